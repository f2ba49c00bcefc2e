use std::hash::Hash;
use fnv::FnvHashSet;
use regex::Regex;
use algorithm::itertools::{ count_items, multiset_intersection };

use amr::AmrInstance;
use super::scores::MatchCounts;

pub const SMATCH: &str = "Smatch";
pub const UNLABELED: &str = "Unlabeled";
pub const NO_WSD: &str = "No WSD";
pub const NON_SENSE_FRAMES: &str = "Non_sense_frames";
pub const FRAMES: &str = "Frames";
pub const CONCEPTS: &str = "Concepts";
pub const WIKIFICATION: &str = "Wikification";
pub const NAMED_ENT: &str = "Named Ent.";
pub const NEGATIONS: &str = "Negations";
pub const IGNORE_VARS: &str = "IgnoreVars";
pub const REENTRANCIES: &str = "Reentrancies";
pub const SRL: &str = "SRL";

/// Every score of a full report, in report order
pub const SCORE_NAMES: [&str; 12] = [
    SMATCH, UNLABELED, NO_WSD, NON_SENSE_FRAMES, FRAMES, CONCEPTS, WIKIFICATION, NAMED_ENT, NEGATIONS,
    IGNORE_VARS, REENTRANCIES, SRL
];

/// Number of common items of two collections, duplicates are counted once
pub fn set_counts<T: Eq + Hash>(test: Vec<T>, gold: Vec<T>) -> MatchCounts {
    let test: FnvHashSet<T> = test.into_iter().collect();
    let gold: FnvHashSet<T> = gold.into_iter().collect();

    MatchCounts::new(test.intersection(&gold).count(), test.len(), gold.len())
}

/// Number of common items of two collections, duplicates are counted as many times as they
/// occur on both sides
pub fn multiset_counts<T: Eq + Hash>(test: Vec<T>, gold: Vec<T>) -> MatchCounts {
    let n_test = test.len();
    let n_gold = gold.len();
    let test = count_items(test.into_iter());
    let gold = count_items(gold.into_iter());

    MatchCounts::new(multiset_intersection(&test, &gold), n_test, n_gold)
}

/// Sub-scores that compare flat collections of labels extracted from each graph. No alignment
/// of variables is needed for them.
pub struct SubscoreExtractor {
    frame_sense: Regex
}

impl SubscoreExtractor {
    pub fn new() -> SubscoreExtractor {
        SubscoreExtractor { frame_sense: Regex::new(r"-\d\d$").unwrap() }
    }

    pub fn concepts(&self, amr: &AmrInstance) -> Vec<String> {
        amr.concepts.clone()
    }

    /// Concepts with a sense suffix
    pub fn frames(&self, amr: &AmrInstance) -> Vec<String> {
        amr.concepts.iter()
            .filter(|c| self.frame_sense.is_match(c))
            .cloned()
            .collect()
    }

    /// Concepts with a sense suffix, without the suffix
    pub fn non_sense_frames(&self, amr: &AmrInstance) -> Vec<String> {
        amr.concepts.iter()
            .filter(|c| self.frame_sense.is_match(c))
            .map(|c| self.frame_sense.replace(c, "").into_owned())
            .collect()
    }

    pub fn wikification(&self, amr: &AmrInstance) -> Vec<String> {
        amr.iter_non_instance_triples()
            .filter(|t| t.relation == "wiki")
            .map(|t| t.target.clone())
            .collect()
    }

    /// Concepts of the variables that have a name
    pub fn named_entities(&self, amr: &AmrInstance) -> Vec<String> {
        self.concepts_of_sources(amr, "name")
    }

    /// Concepts of the negated variables
    pub fn negations(&self, amr: &AmrInstance) -> Vec<String> {
        self.concepts_of_sources(amr, "polarity")
    }

    /// Attribute and relation triples where each variable is replaced by its concept
    pub fn ignore_vars(&self, amr: &AmrInstance) -> Vec<(String, String, String)> {
        let var2concept = amr.var2concept();
        let resolve = |v: &str| var2concept.get(v).map_or(v, |c| *c).to_owned();

        amr.iter_non_instance_triples()
            .map(|t| (t.relation.clone(), resolve(&t.source), resolve(&t.target)))
            .collect()
    }

    fn concepts_of_sources(&self, amr: &AmrInstance, relation: &str) -> Vec<String> {
        let var2concept = amr.var2concept();
        amr.iter_non_instance_triples()
            .filter(|t| t.relation == relation)
            .filter_map(|t| var2concept.get(t.source.as_str()).map(|c| (*c).to_owned()))
            .collect()
    }

    /// Counts of every flat sub-score of one pair, in report order. A graph that could not be
    /// parsed contributes no item.
    pub fn compute_subscores(&self, test: Option<&AmrInstance>, gold: Option<&AmrInstance>) -> Vec<(&'static str, MatchCounts)> {
        let empty = AmrInstance::default();
        let test = test.unwrap_or(&empty);
        let gold = gold.unwrap_or(&empty);

        vec![
            (NON_SENSE_FRAMES, set_counts(self.non_sense_frames(test), self.non_sense_frames(gold))),
            (FRAMES, set_counts(self.frames(test), self.frames(gold))),
            (CONCEPTS, set_counts(self.concepts(test), self.concepts(gold))),
            (WIKIFICATION, set_counts(self.wikification(test), self.wikification(gold))),
            (NAMED_ENT, set_counts(self.named_entities(test), self.named_entities(gold))),
            (NEGATIONS, set_counts(self.negations(test), self.negations(gold))),
            (IGNORE_VARS, multiset_counts(self.ignore_vars(test), self.ignore_vars(gold))),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amr::parse_amr_line;

    fn get_amr() -> AmrInstance {
        parse_amr_line(r#"(w / want-01 :ARG0 (p / person :wiki "Barack_Obama" :name (n / name :op1 "Barack" :op2 "Obama"))
            :ARG1 (g / go-02 :ARG0 p :polarity -) :mod (g2 / go-02))"#.replace("\n", " ").as_str()).unwrap()
    }

    #[test]
    pub fn test_extractors() {
        let extractor = SubscoreExtractor::new();
        let amr = get_amr();

        assert_eq!(extractor.frames(&amr), vec!["want-01", "go-02", "go-02"]);
        assert_eq!(extractor.non_sense_frames(&amr), vec!["want", "go", "go"]);
        assert_eq!(extractor.wikification(&amr), vec!["Barack_Obama"]);
        assert_eq!(extractor.named_entities(&amr), vec!["person"]);
        assert_eq!(extractor.negations(&amr), vec!["go-02"]);
        assert!(extractor.ignore_vars(&amr).contains(&("ARG0".to_owned(), "go-02".to_owned(), "person".to_owned())));
        assert!(extractor.ignore_vars(&amr).contains(&("TOP".to_owned(), "want-01".to_owned(), "want-01".to_owned())));
    }

    #[test]
    pub fn test_set_and_multiset_counts() {
        assert_eq!(set_counts(vec!["go", "go", "want"], vec!["go", "run"]), MatchCounts::new(1, 2, 2));
        assert_eq!(multiset_counts(vec!["go", "go", "want"], vec!["go", "go", "run"]), MatchCounts::new(2, 3, 3));
    }

    #[test]
    pub fn test_subscores_order_and_missing_side() {
        let extractor = SubscoreExtractor::new();
        let amr = get_amr();

        let subscores = extractor.compute_subscores(Some(&amr), Some(&amr));
        assert_eq!(subscores.iter().map(|s| s.0).collect::<Vec<_>>(), SCORE_NAMES[3..10].to_vec());
        for &(_, counts) in &subscores {
            assert_eq!(counts.n_match, counts.n_test);
            assert_eq!(counts.n_match, counts.n_gold);
        }

        let subscores = extractor.compute_subscores(None, Some(&amr));
        // 5 concepts, 4 distinct
        assert_eq!(subscores[2].1, MatchCounts::new(0, 0, 4));
    }
}
