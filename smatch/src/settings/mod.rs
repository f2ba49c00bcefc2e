use std::fmt;

pub mod conf_alignment;
pub mod conf_batch;
pub mod conf_subscores;

pub use self::conf_alignment::*;
pub use self::conf_batch::*;
pub use self::conf_subscores::*;

/// Settings are passed explicitly to every component that needs them, so two runs with different
/// settings can live in the same process.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    // General arguments
    pub manual_seed: u8,

    pub alignment: AlignmentConf,
    pub subscores: SubscoresConf,
    pub batch: BatchConf,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            manual_seed: 120,
            alignment: AlignmentConf::default(),
            subscores: SubscoresConf::default(),
            batch: BatchConf::default(),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, r#"
****************************** SETTINGS ******************************
manual_seed: {}
alignment: {:?}
subscores: {:?}
batch: {:?}
**********************************************************************
"#,
    self.manual_seed,
    self.alignment,
    self.subscores,
    self.batch)
    }
}
