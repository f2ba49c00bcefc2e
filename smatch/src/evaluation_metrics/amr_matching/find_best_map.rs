use std::cmp;
use std::time::{ Duration, Instant };
use rand::{ Rng, SeedableRng };
use rand::rngs::StdRng;
use fnv::FnvHashMap;

use errors::*;
use super::internal_structure::*;
use super::match_pool::MatchPool;

/// Wall-clock limit of one alignment search
pub struct SearchBudget {
    deadline: Option<(Instant, u64)>
}

impl SearchBudget {
    pub fn new(budget_ms: Option<u64>) -> SearchBudget {
        SearchBudget {
            deadline: budget_ms.map(|ms| (Instant::now() + Duration::from_millis(ms), ms))
        }
    }

    pub fn unlimited() -> SearchBudget {
        SearchBudget { deadline: None }
    }

    #[inline]
    pub fn check(&self) -> Result<()> {
        match self.deadline {
            Some((deadline, budget_ms)) if Instant::now() >= deadline => {
                Err(ErrorKind::AlignmentTimeout(budget_ms).into())
            },
            _ => Ok(())
        }
    }
}

/// A way to search for the alignment maximizing the number of matched triples.
///
/// Implementations must not keep any state between two calls: all the scratch data of a pair
/// lives in the `MatchPool` the caller hands over.
pub trait AlignmentStrategy: Send + Sync {
    fn find_best_map(&self, pool: &MatchPool, budget: &SearchBudget) -> Result<AlignmentResult>;
}

pub struct FindBestMapArgs {
    pub node_index: usize,
    pub bijection: Bijection,
    pub score: usize,
}

/// Exact search. Walk through every injective assignment (a test variable is either unbound or
/// bound to one of its candidates), pruning branches that cannot beat the best assignment found so far.
pub struct ExhaustiveSearch;

impl AlignmentStrategy for ExhaustiveSearch {
    fn find_best_map(&self, pool: &MatchPool, budget: &SearchBudget) -> Result<AlignmentResult> {
        let terminate_index = pool.n_x_prime;
        // upper_bounds[i] = most weight test variables i.. can still bring
        let mut upper_bounds = vec![0; terminate_index + 1];
        for i in (0..terminate_index).rev() {
            upper_bounds[i] = upper_bounds[i + 1] + pool.optimistic_weight(i);
        }

        let mut call_stack = vec![FindBestMapArgs {
            node_index: 0,
            bijection: Bijection::new(pool.n_x, pool.n_x_prime),
            score: 0
        }];
        let mut best_score = 0;
        let mut best_map = Bijection::new(pool.n_x, pool.n_x_prime);
        let mut n_visited: usize = 0;

        while let Some(call_args) = call_stack.pop() {
            n_visited += 1;
            if n_visited % 1024 == 0 {
                budget.check()?;
            }

            if call_args.score + upper_bounds[call_args.node_index] <= best_score {
                continue;
            }

            if call_args.node_index == terminate_index {
                best_score = call_args.score;
                best_map = call_args.bijection;
                continue;
            }

            let x_prime = call_args.node_index;
            call_stack.push(FindBestMapArgs {
                node_index: x_prime + 1,
                bijection: call_args.bijection.clone(),
                score: call_args.score
            });

            for &x in &pool.candidates[x_prime] {
                if call_args.bijection.is_gold_node_bounded(x) {
                    continue;
                }

                // only relations to variables bound earlier are counted, so each relation is counted
                // once: when its second end gets bound
                let gain = pool.local_weight(x_prime, x, &call_args.bijection);
                let mut bijection = call_args.bijection.clone();
                bijection.push_both(x, x_prime);
                call_stack.push(FindBestMapArgs {
                    node_index: x_prime + 1,
                    bijection,
                    score: call_args.score + gain
                });
            }
        }

        Ok(AlignmentResult { bijection: best_map, n_match: best_score })
    }
}

/// Greedy search used by the reference smatch tool: start from an alignment, apply the remap or
/// swap move with the largest gain until no move improves, and restart several times.
///
/// The first start follows the structure of the graphs (see `smart_init`), the next ones are random. The random
/// generator is seeded with a fixed seed so identical inputs always give identical scores.
/// Like every local search it may stop at a local optimum, so on graphs with many symmetric
/// sub-structures it can under-count matches; `ExhaustiveSearch` does not.
pub struct HillClimbing {
    pub n_restarts: usize,
    pub seed: u8,
}

enum Move {
    Remap(usize, usize),
    Swap(usize, usize),
}

impl HillClimbing {
    pub fn new(n_restarts: usize, seed: u8) -> HillClimbing {
        HillClimbing { n_restarts: cmp::max(n_restarts, 1), seed }
    }

    /// Structure-aware start. Variables whose own triples single out one gold variable (e.g. a
    /// name with a distinct `:op1`) are bound first, then the remaining variables are bound one at
    /// a time, always taking the pair that matches most triples given the bindings made so far.
    fn smart_init(pool: &MatchPool, bijection: &mut Bijection) {
        // the gold variable of largest unary weight, when no other candidate ties with it
        let unique_best = |x_prime: usize| -> Option<usize> {
            let mut best: Option<(usize, usize)> = None;
            let mut n_best = 0;
            for &x in &pool.candidates[x_prime] {
                let weight = pool.unary_weight(x_prime, x);
                match best {
                    Some((_, w)) if weight < w => {},
                    Some((_, w)) if weight == w => n_best += 1,
                    _ => {
                        best = Some((x, weight));
                        n_best = 1;
                    }
                }
            }

            match best {
                Some((x, w)) if w > 0 && n_best == 1 => Some(x),
                _ => None
            }
        };

        let anchors = (0..pool.n_x_prime)
            .filter_map(|x_prime| unique_best(x_prime).map(|x| (x_prime, x)))
            .collect::<Vec<_>>();
        // a gold variable claimed by several anchors is left to the greedy pass
        let mut n_claims: FnvHashMap<usize, usize> = Default::default();
        for &(_, x) in &anchors {
            *n_claims.entry(x).or_insert(0) += 1;
        }
        for &(x_prime, x) in &anchors {
            if n_claims[&x] == 1 {
                bijection.push_both(x, x_prime);
            }
        }

        loop {
            let mut best: Option<(usize, usize, usize)> = None;
            for x_prime in 0..pool.n_x_prime {
                if bijection.is_pred_node_bounded(x_prime) {
                    continue;
                }

                for &x in &pool.candidates[x_prime] {
                    if bijection.is_gold_node_bounded(x) {
                        continue;
                    }

                    let weight = pool.local_weight(x_prime, x, bijection);
                    if weight > 0 && best.map_or(true, |(_, _, w)| weight > w) {
                        best = Some((x_prime, x, weight));
                    }
                }
            }

            match best {
                Some((x_prime, x, _)) => bijection.push_both(x, x_prime),
                None => break
            }
        }
    }

    fn random_init(pool: &MatchPool, bijection: &mut Bijection, rng: &mut StdRng) {
        for x_prime in 0..pool.n_x_prime {
            let free_candidates = pool.candidates[x_prime].iter()
                .filter(|&&x| !bijection.is_gold_node_bounded(x))
                .cloned()
                .collect::<Vec<_>>();

            if !free_candidates.is_empty() {
                let x = free_candidates[rng.gen_range(0, free_candidates.len())];
                bijection.push_both(x, x_prime);
            }
        }
    }

    /// Exact gain of exchanging the gold variables of two test variables (either may be unbound)
    fn swap_gain(pool: &MatchPool, bijection: &mut Bijection, x_prime1: usize, x_prime2: usize) -> i64 {
        let x1 = bijection.get_x(x_prime1);
        let x2 = bijection.get_x(x_prime2);
        let mut gain: i64 = 0;

        if let Some(x2) = x2 {
            gain -= pool.local_weight(x_prime2, x2, bijection) as i64;
            bijection.unbind_x_prime(x_prime2);
        }
        if let Some(x1) = x1 {
            gain -= pool.local_weight(x_prime1, x1, bijection) as i64;
            bijection.unbind_x_prime(x_prime1);
        }
        if let Some(x2) = x2 {
            gain += pool.local_weight(x_prime1, x2, bijection) as i64;
            bijection.push_both(x2, x_prime1);
        }
        if let Some(x1) = x1 {
            gain += pool.local_weight(x_prime2, x1, bijection) as i64;
            bijection.push_both(x1, x_prime2);
        }

        // restore
        bijection.unbind_x_prime(x_prime1);
        bijection.unbind_x_prime(x_prime2);
        if let Some(x1) = x1 {
            bijection.push_both(x1, x_prime1);
        }
        if let Some(x2) = x2 {
            bijection.push_both(x2, x_prime2);
        }

        gain
    }

    fn best_move(pool: &MatchPool, bijection: &mut Bijection) -> Option<(i64, Move)> {
        let mut best: Option<(i64, Move)> = None;

        for x_prime in 0..pool.n_x_prime {
            let current = match bijection.get_x(x_prime) {
                None => 0,
                Some(x) => pool.local_weight(x_prime, x, bijection) as i64
            };

            for &x in &pool.candidates[x_prime] {
                if bijection.is_gold_node_bounded(x) {
                    continue;
                }

                let gain = pool.local_weight(x_prime, x, bijection) as i64 - current;
                if gain > best.as_ref().map_or(0, |b| b.0) {
                    best = Some((gain, Move::Remap(x_prime, x)));
                }
            }
        }

        for x_prime1 in 0..pool.n_x_prime {
            for x_prime2 in (x_prime1 + 1)..pool.n_x_prime {
                if !bijection.is_pred_node_bounded(x_prime1) && !bijection.is_pred_node_bounded(x_prime2) {
                    continue;
                }

                let gain = HillClimbing::swap_gain(pool, bijection, x_prime1, x_prime2);
                if gain > best.as_ref().map_or(0, |b| b.0) {
                    best = Some((gain, Move::Swap(x_prime1, x_prime2)));
                }
            }
        }

        best
    }

    fn apply(bijection: &mut Bijection, mv: Move) {
        match mv {
            Move::Remap(x_prime, x) => {
                bijection.unbind_x_prime(x_prime);
                bijection.push_both(x, x_prime);
            },
            Move::Swap(x_prime1, x_prime2) => {
                let x1 = bijection.get_x(x_prime1);
                let x2 = bijection.get_x(x_prime2);
                bijection.unbind_x_prime(x_prime1);
                bijection.unbind_x_prime(x_prime2);
                if let Some(x2) = x2 {
                    bijection.push_both(x2, x_prime1);
                }
                if let Some(x1) = x1 {
                    bijection.push_both(x1, x_prime2);
                }
            }
        }
    }
}

impl AlignmentStrategy for HillClimbing {
    fn find_best_map(&self, pool: &MatchPool, budget: &SearchBudget) -> Result<AlignmentResult> {
        let mut rng = StdRng::from_seed([self.seed; 32]);
        // a lending bijection, reused by every restart
        let mut bijection = Bijection::new(pool.n_x, pool.n_x_prime);
        let mut best: Option<AlignmentResult> = None;

        for restart in 0..self.n_restarts {
            bijection.clear();
            if restart == 0 {
                HillClimbing::smart_init(pool, &mut bijection);
            } else {
                HillClimbing::random_init(pool, &mut bijection, &mut rng);
            }

            let mut score = pool.score(&bijection) as i64;
            loop {
                budget.check()?;
                match HillClimbing::best_move(pool, &mut bijection) {
                    Some((gain, mv)) => {
                        HillClimbing::apply(&mut bijection, mv);
                        score += gain;
                    },
                    None => break
                }
            }

            debug_assert_eq!(score as usize, pool.score(&bijection));
            if best.as_ref().map_or(true, |b| score as usize > b.n_match) {
                best = Some(AlignmentResult { bijection: bijection.clone(), n_match: score as usize });
            }
        }

        Ok(best.unwrap_or_else(|| AlignmentResult {
            bijection: Bijection::new(pool.n_x, pool.n_x_prime),
            n_match: 0
        }))
    }
}

/// Exact search when the space of assignments is small enough, hill climbing otherwise
pub struct AutoSearch {
    pub max_permutation: usize,
    pub hill_climbing: HillClimbing,
}

impl AlignmentStrategy for AutoSearch {
    fn find_best_map(&self, pool: &MatchPool, budget: &SearchBudget) -> Result<AlignmentResult> {
        let n_permutation = pool.get_n_permutations();
        if n_permutation <= self.max_permutation {
            ExhaustiveSearch.find_best_map(pool, budget)
        } else {
            debug!("Number of permutation is too big: {}, fall back to hill climbing", n_permutation);
            self.hill_climbing.find_best_map(pool, budget)
        }
    }
}
