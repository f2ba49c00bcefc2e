use rayon::prelude::*;
use rayon::{ ThreadPool, ThreadPoolBuilder };
use regex::Regex;

use amr::{ AmrInstance, EntryReader, parse_amr_line };
use errors::*;
use settings::{ Settings, Aggregation, Segmentation, SegmentAnchor };
use super::amr_matching::{ AlignmentStrategy, align_and_score, get_strategy };
use super::scores::*;
use super::subscores::*;
use super::transforms::*;

/// Result of one row of a batch: the score of the row and the counts it was derived from
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemScore {
    pub counts: MatchCounts,
    pub score: Score,
}

impl ItemScore {
    pub fn from_counts(counts: MatchCounts) -> ItemScore {
        ItemScore { counts, score: Score::from_counts(&counts) }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    pub overall: Score,
    pub items: Vec<ItemScore>,
}

/// Index of the best score by f1, the first one wins ties. Precision and recall of the returned
/// index belong to the same alignment as its f1.
pub fn best_of_n(scores: &[Score]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, score) in scores.iter().enumerate() {
        if best.map_or(true, |b| score.f1 > scores[b].f1) {
            best = Some(i);
        }
    }

    best
}

/// Aggregate the scores of every (anchor segment, other segment) pair of a row: each anchor
/// segment (a row of `matrix`) keeps its best pair, and the row score is the mean over anchor
/// segments. The counts are the sum of the counts of the kept pairs.
pub fn aggregate_segments(matrix: &[Vec<MatchCounts>]) -> ItemScore {
    let mut mean = MeanScore::new();
    let mut counts = MatchCounts::zero();

    for row in matrix {
        let scores = row.iter().map(Score::from_counts).collect::<Vec<_>>();
        match best_of_n(&scores) {
            None => mean.push(&Score::default()),
            Some(idx) => {
                mean.push(&scores[idx]);
                counts += row[idx];
            }
        }
    }

    ItemScore { counts, score: mean.mean() }
}

/// Runs the aligner, the text rewrites and the sub-scores over collections of (candidate,
/// reference) pairs on a dedicated thread pool.
pub struct BatchDriver {
    settings: Settings,
    strategy: Box<dyn AlignmentStrategy>,
    rewriter: TextRewriter,
    extractor: SubscoreExtractor,
    entry_reader: EntryReader,
    srl_pattern: Regex,
    pool: ThreadPool,
}

impl BatchDriver {
    pub fn new(settings: &Settings) -> Result<BatchDriver> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(settings.batch.n_threads)
            .build()?;
        let srl_pattern = Regex::new(&settings.subscores.srl_role_pattern)
            .chain_err(|| format!("Invalid SRL role pattern: {}", settings.subscores.srl_role_pattern))?;

        Ok(BatchDriver {
            settings: settings.clone(),
            strategy: get_strategy(&settings.alignment, settings.manual_seed),
            rewriter: TextRewriter::new(),
            extractor: SubscoreExtractor::new(),
            entry_reader: EntryReader::new(),
            srl_pattern,
            pool
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn n_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn parse(&self, text: &str, side: &str) -> Option<AmrInstance> {
        match parse_amr_line(text) {
            Ok(amr) => Some(amr),
            Err(e) => {
                error!("Empty or malformed {} entry: {}", side, e);
                None
            }
        }
    }

    /// Counts of the best alignment of a pair. A side that could not be parsed matches nothing
    /// but the other side still counts; a failed search counts nothing.
    fn pair_counts(&self, test: Option<&AmrInstance>, gold: Option<&AmrInstance>) -> MatchCounts {
        match (test, gold) {
            (Some(test), Some(gold)) => {
                match align_and_score(test, gold, self.strategy.as_ref(), self.settings.alignment.time_budget_ms) {
                    Ok(counts) => counts,
                    Err(e) => {
                        warn!("Cannot align a pair of graphs, count it as (0, 0, 0): {}", e);
                        MatchCounts::zero()
                    }
                }
            },
            (None, Some(gold)) => MatchCounts::new(0, 0, gold.n_triples()),
            (Some(test), None) => MatchCounts::new(0, test.n_triples(), 0),
            (None, None) => MatchCounts::zero()
        }
    }

    fn check_lengths(tests: &[String], golds: &[String]) -> Result<()> {
        if tests.len() != golds.len() {
            bail!(ErrorKind::LengthMismatch(tests.len(), golds.len()));
        }
        Ok(())
    }

    /// Smatch counts of one pair of single-line entries
    pub fn smatch_pair(&self, test: &str, gold: &str) -> MatchCounts {
        let test = self.parse(test, "test");
        let gold = self.parse(gold, "gold");
        self.pair_counts(test.as_ref(), gold.as_ref())
    }

    /// Counts of every score of a full report for one pair, in report order
    pub fn score_pair(&self, test_text: &str, gold_text: &str) -> Vec<(&'static str, MatchCounts)> {
        let test = self.parse(test_text, "test");
        let gold = self.parse(gold_text, "gold");
        let mut counts = Vec::with_capacity(SCORE_NAMES.len());

        counts.push((SMATCH, self.pair_counts(test.as_ref(), gold.as_ref())));

        // the rewritten texts are only parsed when the original could be parsed
        let rewrite = |amr: &Option<AmrInstance>, text: String| amr.as_ref().and_then(|_| parse_amr_line(&text).ok());
        let unlabeled = (
            rewrite(&test, self.rewriter.unlabel(test_text)),
            rewrite(&gold, self.rewriter.unlabel(gold_text)));
        counts.push((UNLABELED, self.pair_counts(unlabeled.0.as_ref(), unlabeled.1.as_ref())));

        let no_wsd = (
            rewrite(&test, self.rewriter.remove_wsd(test_text)),
            rewrite(&gold, self.rewriter.remove_wsd(gold_text)));
        counts.push((NO_WSD, self.pair_counts(no_wsd.0.as_ref(), no_wsd.1.as_ref())));

        counts.extend(self.extractor.compute_subscores(test.as_ref(), gold.as_ref()));

        let reentrancies = (test.as_ref().map(reentrancy_graph), gold.as_ref().map(reentrancy_graph));
        counts.push((REENTRANCIES, self.pair_counts(reentrancies.0.as_ref(), reentrancies.1.as_ref())));

        let srl = (
            test.as_ref().map(|amr| srl_graph(amr, &self.srl_pattern)),
            gold.as_ref().map(|amr| srl_graph(amr, &self.srl_pattern)));
        counts.push((SRL, self.pair_counts(srl.0.as_ref(), srl.1.as_ref())));

        counts
    }

    /// Corpus level smatch of a list of (test, gold) entries
    pub fn compute_smatch(&self, tests: &[String], golds: &[String]) -> Result<Score> {
        BatchDriver::check_lengths(tests, golds)?;
        let counts: Vec<MatchCounts> = self.pool.install(|| {
            tests.par_iter().zip(golds.par_iter())
                .map(|(test, gold)| self.smatch_pair(test, gold))
                .collect()
        });

        Ok(accumulate(counts))
    }

    /// Corpus level scores of every sub-score
    pub fn compute_scores(&self, tests: &[String], golds: &[String]) -> Result<ScoreTable> {
        BatchDriver::check_lengths(tests, golds)?;
        info!("Compute all scores of {} pairs", tests.len());

        let pair_counts: Vec<Vec<(&'static str, MatchCounts)>> = self.pool.install(|| {
            tests.par_iter().zip(golds.par_iter())
                .map(|(test, gold)| self.score_pair(test, gold))
                .collect()
        });

        let mut table = ScoreTable::new();
        for (i, name) in SCORE_NAMES.iter().enumerate() {
            table.insert(*name, accumulate(pair_counts.iter().map(|counts| {
                debug_assert_eq!(counts[i].0, *name);
                counts[i].1
            })));
        }

        Ok(table)
    }

    /// Score one row whose cells may hold several graphs
    fn score_segments(&self, cand: &str, reference: &str) -> ItemScore {
        let cands = self.entry_reader.split_segments(cand);
        let refs = self.entry_reader.split_segments(reference);
        let cand_amrs = cands.iter().map(|s| self.parse(s, "candidate")).collect::<Vec<_>>();
        let ref_amrs = refs.iter().map(|s| self.parse(s, "reference")).collect::<Vec<_>>();

        let matrix = match self.settings.batch.anchor {
            SegmentAnchor::Reference => ref_amrs.iter()
                .map(|r| cand_amrs.iter().map(|c| self.pair_counts(c.as_ref(), r.as_ref())).collect())
                .collect::<Vec<Vec<_>>>(),
            SegmentAnchor::Candidate => cand_amrs.iter()
                .map(|c| ref_amrs.iter().map(|r| self.pair_counts(c.as_ref(), r.as_ref())).collect())
                .collect::<Vec<Vec<_>>>()
        };

        aggregate_segments(&matrix)
    }

    fn score_item(&self, cand: &str, reference: &str) -> ItemScore {
        match self.settings.batch.segmentation {
            Segmentation::Whole => {
                let cand = self.entry_reader.clean_entry(cand);
                let reference = self.entry_reader.clean_entry(reference);
                ItemScore::from_counts(self.smatch_pair(&cand, &reference))
            },
            Segmentation::Sentences => self.score_segments(cand, reference)
        }
    }

    /// Smatch of every (candidate, reference) row, the rows are scored in parallel
    pub fn score_items(&self, cands: &[String], refs: &[String]) -> Result<Vec<ItemScore>> {
        BatchDriver::check_lengths(cands, refs)?;
        Ok(self.pool.install(|| {
            cands.par_iter().zip(refs.par_iter())
                .map(|(cand, reference)| self.score_item(cand, reference))
                .collect()
        }))
    }

    /// Score every row, then aggregate the rows following the configured aggregation
    pub fn run(&self, cands: &[String], refs: &[String]) -> Result<BatchReport> {
        info!("Score {} rows ({:?}, {:?})", cands.len(), self.settings.batch.segmentation, self.settings.batch.aggregation);
        let items = self.score_items(cands, refs)?;
        let overall = match self.settings.batch.aggregation {
            Aggregation::Corpus => accumulate(items.iter().map(|item| item.counts)),
            Aggregation::PerItem => {
                let mut mean = MeanScore::new();
                mean.extend(items.iter().map(|item| &item.score));
                mean.mean()
            }
        };

        Ok(BatchReport { overall, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use settings::SearchMethod;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    pub fn test_best_of_n_keeps_precision_and_recall_of_best_f1() {
        // f1 = 0.2, 0.9, 0.5; the first one has the highest recall
        let matrix = vec![vec![MatchCounts::new(1, 9, 1), MatchCounts::new(9, 9, 11), MatchCounts::new(1, 3, 1)]];
        let scores = matrix[0].iter().map(Score::from_counts).collect::<Vec<_>>();
        assert!(approx(scores[0].f1, 0.2) && approx(scores[1].f1, 0.9) && approx(scores[2].f1, 0.5));

        assert_eq!(best_of_n(&scores), Some(1));
        let item = aggregate_segments(&matrix);
        assert!(approx(item.score.f1, 0.9));
        assert!(approx(item.score.precision, 1.0));
        assert!(approx(item.score.recall, 9.0 / 11.0));
        assert_eq!(item.counts, MatchCounts::new(9, 9, 11));
    }

    #[test]
    pub fn test_best_of_n_ties_and_empty() {
        let scores = vec![Score::new(0.5, 1.0, 0.6), Score::new(1.0, 0.5, 0.6)];
        assert_eq!(best_of_n(&scores), Some(0));
        assert_eq!(best_of_n(&[]), None);

        let item = aggregate_segments(&[vec![MatchCounts::new(2, 2, 2)], vec![]]);
        assert!(approx(item.score.f1, 0.5));
    }

    #[test]
    pub fn test_length_mismatch() {
        let driver = BatchDriver::new(&Settings::default()).unwrap();
        match driver.compute_smatch(&["(a / a)".to_owned()], &[]) {
            Err(Error(ErrorKind::LengthMismatch(1, 0), _)) => {},
            other => panic!("expect a length mismatch, get {:?}", other)
        }
    }

    #[test]
    pub fn test_missing_sides() {
        let driver = BatchDriver::new(&Settings::default()).unwrap();
        assert_eq!(driver.smatch_pair("", "(d / dog :mod (b / big))"), MatchCounts::new(0, 0, 4));
        assert_eq!(driver.smatch_pair("(d / dog", "(d / dog)"), MatchCounts::new(0, 0, 2));
        assert_eq!(driver.smatch_pair("(d / dog)", "NaN"), MatchCounts::new(0, 2, 0));
    }

    #[test]
    pub fn test_timed_out_pair_counts_nothing() {
        let mut settings = Settings::default();
        settings.alignment.search_method = SearchMethod::HillClimbing;
        settings.alignment.time_budget_ms = Some(0);
        let driver = BatchDriver::new(&settings).unwrap();

        let test = "(w / want-01 :ARG0 (b / boy) :ARG1 (g / go-02 :ARG0 b))".to_owned();
        let gold = "(w / want-01 :ARG0 (g / girl) :ARG1 (b / believe-01 :ARG0 g :ARG1 (b2 / boy)))".to_owned();
        assert_eq!(driver.smatch_pair(&test, &gold), MatchCounts::zero());

        // the other pairs of the corpus are still counted
        let tests = vec![test, "".to_owned()];
        let golds = vec![gold, "(d / dog)".to_owned()];
        let items = driver.score_items(&tests, &golds).unwrap();
        assert_eq!(items[0].counts, MatchCounts::zero());
        assert_eq!(items[1].counts, MatchCounts::new(0, 0, 2));
    }

    #[test]
    pub fn test_sentences_anchor() {
        let mut settings = Settings::default();
        settings.batch.segmentation = Segmentation::Sentences;
        let cand = "(d / dog)\n\n(c / cat)\n\n(b / bird)".to_owned();
        let reference = "# ::snt a dog\n(d / dog)".to_owned();

        let driver = BatchDriver::new(&settings).unwrap();
        let items = driver.score_items(&[cand.clone()], &[reference.clone()]).unwrap();
        assert_eq!(items[0].score.f1, 1.0);

        settings.batch.anchor = SegmentAnchor::Candidate;
        let driver = BatchDriver::new(&settings).unwrap();
        let items = driver.score_items(&[cand], &[reference]).unwrap();
        assert!(approx(items[0].score.f1, 1.0 / 3.0));
    }

    #[test]
    pub fn test_run_aggregations() {
        let cands = vec!["(d / dog)".to_owned(), "(c / cat :mod (b / big))".to_owned()];
        let refs = vec!["(d / dog)".to_owned(), "(c / cat)".to_owned()];

        let mut settings = Settings::default();
        let corpus = BatchDriver::new(&settings).unwrap().run(&cands, &refs).unwrap();
        // (2, 2, 2) + (2, 4, 2)
        assert_eq!(corpus.items[1].counts, MatchCounts::new(2, 4, 2));
        assert!(approx(corpus.overall.precision, 4.0 / 6.0));
        assert!(approx(corpus.overall.recall, 1.0));

        settings.batch.aggregation = Aggregation::PerItem;
        let per_item = BatchDriver::new(&settings).unwrap().run(&cands, &refs).unwrap();
        assert!(approx(per_item.overall.precision, 0.75));
        assert!(approx(per_item.overall.recall, 1.0));
    }
}
