use std::fmt;

/// How the counts of many pairs are turned into scores
#[derive(Clone, Copy, Deserialize, Serialize, Debug, PartialEq, Eq)]
pub enum Aggregation {
    /// sum (match, test, gold) over the whole corpus, then compute P/R/F once
    Corpus,
    /// compute P/R/F for every item separately
    PerItem
}

/// How a single cell of the input is cut into AMR graphs
#[derive(Clone, Copy, Deserialize, Serialize, Debug, PartialEq, Eq)]
pub enum Segmentation {
    /// a cell holds one graph
    Whole,
    /// a cell holds several graphs separated by blank lines
    Sentences
}

/// In `Sentences` mode, the side whose segments are averaged. Every anchor segment keeps the
/// best scoring segment of the other side.
#[derive(Clone, Copy, Deserialize, Serialize, Debug, PartialEq, Eq)]
pub enum SegmentAnchor {
    Reference,
    Candidate
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BatchConf {
    pub aggregation: Aggregation,
    pub segmentation: Segmentation,
    pub anchor: SegmentAnchor,
    // 0 uses all available cores
    pub n_threads: usize,
    pub cand_column: String,
    pub ref_column: String,
}

impl Default for BatchConf {
    fn default() -> BatchConf {
        BatchConf {
            aggregation: Aggregation::Corpus,
            segmentation: Segmentation::Whole,
            anchor: SegmentAnchor::Reference,
            n_threads: 0,
            cand_column: "cand_amr".to_owned(),
            ref_column: "ref_amr".to_owned(),
        }
    }
}

impl fmt::Debug for BatchConf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, r#"
    aggregation  : {:?}
    segmentation : {:?}
    anchor       : {:?}
    n_threads    : {}
    cand_column  : {}
    ref_column   : {}"#,
        self.aggregation,
        self.segmentation,
        self.anchor,
        self.n_threads,
        self.cand_column,
        self.ref_column
        )
    }
}
