use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use serde_yaml;
use smatch::prelude::Settings;

use errors::*;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Configuration {
    pub settings: Settings
}

impl Configuration {
    pub fn from_file(fpath: &Path) -> Result<Configuration> {
        let reader = BufReader::new(File::open(fpath).chain_err(|| format!("Cannot open settings file: {:?}", fpath))?);
        Ok(serde_yaml::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smatch::prelude::*;

    #[test]
    pub fn test_configuration() {
        let conf: Configuration = serde_yaml::from_str(r#"
settings:
  alignment:
    search_method: Exhaustive
  batch:
    anchor: Candidate
"#).unwrap();

        assert_eq!(conf.settings.alignment.search_method, SearchMethod::Exhaustive);
        assert_eq!(conf.settings.batch.anchor, SegmentAnchor::Candidate);
        assert_eq!(conf.settings.manual_seed, 120);

        let empty: Configuration = serde_yaml::from_str("{}").unwrap();
        assert_eq!(empty.settings.batch.cand_column, "cand_amr");
    }
}
