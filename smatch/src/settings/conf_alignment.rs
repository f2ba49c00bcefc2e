use std::fmt;

#[derive(Clone, Copy, Deserialize, Serialize, Debug, PartialEq, Eq)]
pub enum SearchMethod {
    /// exact search, the space of assignments must be small
    Exhaustive,
    /// greedy search with restarts, the first start follows the graph structure, the others are random
    HillClimbing,
    /// exact search when the space is smaller than `max_permutation`, hill climbing otherwise
    Auto
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AlignmentConf {
    pub search_method: SearchMethod,
    pub max_permutation: usize,
    pub n_restarts: usize,
    // a pair whose search runs longer than this is scored (0, 0, 0)
    pub time_budget_ms: Option<u64>,
}

impl Default for AlignmentConf {
    fn default() -> AlignmentConf {
        AlignmentConf {
            search_method: SearchMethod::Auto,
            max_permutation: 10000,
            n_restarts: 5,
            time_budget_ms: None,
        }
    }
}

impl fmt::Debug for AlignmentConf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, r#"
    search_method   : {:?}
    max_permutation : {}
    n_restarts      : {}
    time_budget_ms  : {:?}"#,
        self.search_method,
        self.max_permutation,
        self.n_restarts,
        self.time_budget_ms
        )
    }
}
