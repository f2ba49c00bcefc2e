#[derive(Clone, Deserialize, Serialize, Debug)]
#[serde(default)]
pub struct SubscoresConf {
    /// relations matching this pattern are kept by the SRL sub-score
    pub srl_role_pattern: String,
}

impl Default for SubscoresConf {
    fn default() -> SubscoresConf {
        SubscoresConf {
            srl_role_pattern: r"^ARG\d".to_owned(),
        }
    }
}
