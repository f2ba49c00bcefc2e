use amr::AmrInstance;
use errors::*;
use settings::{ AlignmentConf, SearchMethod };
use evaluation_metrics::scores::MatchCounts;
use super::internal_structure::*;
use super::match_pool::MatchPool;
use super::find_best_map::*;

pub fn get_strategy(conf: &AlignmentConf, seed: u8) -> Box<dyn AlignmentStrategy> {
    match conf.search_method {
        SearchMethod::Exhaustive => Box::new(ExhaustiveSearch),
        SearchMethod::HillClimbing => Box::new(HillClimbing::new(conf.n_restarts, seed)),
        SearchMethod::Auto => Box::new(AutoSearch {
            max_permutation: conf.max_permutation,
            hill_climbing: HillClimbing::new(conf.n_restarts, seed)
        })
    }
}

/// Find the best alignment from the variables of `test` to the variables of `gold`.
///
/// The match pool is built for this pair only and dropped when the call returns, so calls for
/// different pairs can run on different threads with the same strategy.
pub fn align(test: &AmrInstance, gold: &AmrInstance, strategy: &dyn AlignmentStrategy, time_budget_ms: Option<u64>) -> Result<AlignmentResult> {
    let pool = MatchPool::new(test, gold);
    strategy.find_best_map(&pool, &SearchBudget::new(time_budget_ms))
}

/// (number of matched triples, number of test triples, number of gold triples) of the best alignment
pub fn align_and_score(test: &AmrInstance, gold: &AmrInstance, strategy: &dyn AlignmentStrategy, time_budget_ms: Option<u64>) -> Result<MatchCounts> {
    let n_test = test.n_triples();
    let n_gold = gold.n_triples();
    if n_test == 0 || n_gold == 0 {
        return Ok(MatchCounts::new(0, n_test, n_gold));
    }

    let result = align(test, gold, strategy, time_budget_ms)?;
    debug_assert!(result.n_match <= n_test.min(n_gold));
    Ok(MatchCounts::new(result.n_match, n_test, n_gold))
}
