use std::fmt;
use std::iter::Sum;
use std::ops::{ Add, AddAssign };
use algorithm::string::left;

/// Number of matched test triples (or items), and the sizes of both sides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCounts {
    pub n_match: usize,
    pub n_test: usize,
    pub n_gold: usize,
}

impl MatchCounts {
    pub fn new(n_match: usize, n_test: usize, n_gold: usize) -> MatchCounts {
        MatchCounts { n_match, n_test, n_gold }
    }

    pub fn zero() -> MatchCounts {
        MatchCounts::default()
    }
}

impl Add for MatchCounts {
    type Output = MatchCounts;

    fn add(self, other: MatchCounts) -> MatchCounts {
        MatchCounts {
            n_match: self.n_match + other.n_match,
            n_test: self.n_test + other.n_test,
            n_gold: self.n_gold + other.n_gold,
        }
    }
}

impl AddAssign for MatchCounts {
    fn add_assign(&mut self, other: MatchCounts) {
        self.n_match += other.n_match;
        self.n_test += other.n_test;
        self.n_gold += other.n_gold;
    }
}

impl Sum for MatchCounts {
    fn sum<I: Iterator<Item=MatchCounts>>(iter: I) -> MatchCounts {
        iter.fold(MatchCounts::zero(), |a, b| a + b)
    }
}

impl<'a> Sum<&'a MatchCounts> for MatchCounts {
    fn sum<I: Iterator<Item=&'a MatchCounts>>(iter: I) -> MatchCounts {
        iter.fold(MatchCounts::zero(), |a, &b| a + b)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl Score {
    pub fn new(precision: f64, recall: f64, f1: f64) -> Score {
        Score { precision, recall, f1 }
    }

    /// precision = match / test, recall = match / gold, each of them is 0 when its denominator is 0
    pub fn from_counts(counts: &MatchCounts) -> Score {
        let precision = if counts.n_test == 0 { 0.0 } else { counts.n_match as f64 / counts.n_test as f64 };
        let recall = if counts.n_gold == 0 { 0.0 } else { counts.n_match as f64 / counts.n_gold as f64 };
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        Score { precision, recall, f1 }
    }
}

/// Corpus level aggregation: sum the counts of every pair, then compute P/R/F once. The counts may
/// come in any order.
pub fn accumulate<I: IntoIterator<Item=MatchCounts>>(counts: I) -> Score {
    Score::from_counts(&counts.into_iter().sum())
}

/// Per item aggregation: average precision, recall and f1 of scores computed separately.
/// This is not the same number as `accumulate` over the counts of the same items.
#[derive(Debug, Clone, Default)]
pub struct MeanScore {
    sum: Score,
    n_items: usize,
}

impl MeanScore {
    pub fn new() -> MeanScore {
        Default::default()
    }

    pub fn push(&mut self, score: &Score) {
        self.sum.precision += score.precision;
        self.sum.recall += score.recall;
        self.sum.f1 += score.f1;
        self.n_items += 1;
    }

    pub fn n_items(&self) -> usize {
        self.n_items
    }

    pub fn mean(&self) -> Score {
        if self.n_items == 0 {
            return Score::default();
        }

        let n = self.n_items as f64;
        Score::new(self.sum.precision / n, self.sum.recall / n, self.sum.f1 / n)
    }
}

impl<'a> Extend<&'a Score> for MeanScore {
    fn extend<I: IntoIterator<Item=&'a Score>>(&mut self, iter: I) {
        for score in iter {
            self.push(score);
        }
    }
}

/// Named scores, kept in the order they were inserted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreTable {
    pub entries: Vec<(String, Score)>,
}

impl ScoreTable {
    pub fn new() -> ScoreTable {
        Default::default()
    }

    /// Insert a score, or replace the score of an existing name without moving it
    pub fn insert<S: Into<String>>(&mut self, name: S, score: Score) {
        let name = name.into();
        match self.entries.iter_mut().find(|e| e.0 == name) {
            Some(entry) => entry.1 = score,
            None => self.entries.push((name, score))
        }
    }

    pub fn get(&self, name: &str) -> Option<&Score> {
        self.entries.iter().find(|e| e.0 == name).map(|e| &e.1)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.0.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item=&(String, Score)> {
        self.entries.iter()
    }
}

impl fmt::Display for ScoreTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (name, score) in &self.entries {
            writeln!(f, "{} -> P: {:.3},  R: {:.3},  F: {:.3}", left(name, 16), score.precision, score.recall, score.f1)?;
        }

        Ok(())
    }
}
