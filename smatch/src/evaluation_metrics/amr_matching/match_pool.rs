use std::cmp;
use fnv::FnvHashMap;
use itertools::Itertools;
use algorithm::itertools::count_items;

use amr::AmrInstance;
use super::internal_structure::*;

/// A relation that is matched when `x_prime` (test variable) is bound to `x` (gold variable),
/// provided the other end of the relation is bound as the key of the map that stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairWeight {
    pub x_prime: usize,
    pub x: usize,
    pub weight: usize,
}

/// Everything the search needs to know about one (test, gold) pair, computed once before the
/// search starts. A pool belongs to exactly one pair and is dropped with it.
///
/// Triples are compared as multisets: binding `x_prime -> x` matches `min(n_test, n_gold)` copies
/// of a triple. Concepts, constants and relation names are compared case-insensitively.
#[derive(Debug)]
pub struct MatchPool {
    pub n_x_prime: usize,
    pub n_x: usize,
    /// candidates[x_prime] = gold variables that can match at least one triple of x_prime
    pub candidates: Vec<Vec<usize>>,
    /// instance and attribute triples matched by binding (x_prime, x)
    unary: FnvHashMap<(usize, usize), usize>,
    /// relations leaving x_prime, keyed by (x_prime, x)
    outgoing: FnvHashMap<(usize, usize), Vec<PairWeight>>,
    /// relations entering x_prime, keyed by (x_prime, x)
    incoming: FnvHashMap<(usize, usize), Vec<PairWeight>>,
}

impl MatchPool {
    pub fn new(test: &AmrInstance, gold: &AmrInstance) -> MatchPool {
        let test_idx = test.var2index();
        let gold_idx = gold.var2index();
        let mut unary: FnvHashMap<(usize, usize), usize> = Default::default();
        let mut outgoing: FnvHashMap<(usize, usize), Vec<PairWeight>> = Default::default();
        let mut incoming: FnvHashMap<(usize, usize), Vec<PairWeight>> = Default::default();

        // instance triples
        let mut concept2golds: FnvHashMap<String, Vec<usize>> = Default::default();
        for (j, concept) in gold.concepts.iter().enumerate() {
            concept2golds.entry(concept.to_lowercase()).or_insert(Vec::new()).push(j);
        }
        for (i, concept) in test.concepts.iter().enumerate() {
            if let Some(golds) = concept2golds.get(&concept.to_lowercase()) {
                for &j in golds {
                    *unary.entry((i, j)).or_insert(0) += 1;
                }
            }
        }

        // attribute triples
        let test_attrs = count_items(test.attributes.iter()
            .filter_map(|t| test_idx.get(t.source.as_str()).map(|&i| (i, t.relation.to_lowercase(), t.target.to_lowercase()))));
        let mut gold_attrs: FnvHashMap<(String, String), Vec<(usize, usize)>> = Default::default();
        for ((j, relation, value), n) in count_items(gold.attributes.iter()
            .filter_map(|t| gold_idx.get(t.source.as_str()).map(|&j| (j, t.relation.to_lowercase(), t.target.to_lowercase())))) {
            gold_attrs.entry((relation, value)).or_insert(Vec::new()).push((j, n));
        }
        for ((i, relation, value), n_test) in test_attrs {
            if let Some(golds) = gold_attrs.get(&(relation, value)) {
                for &(j, n_gold) in golds {
                    *unary.entry((i, j)).or_insert(0) += cmp::min(n_test, n_gold);
                }
            }
        }

        // relation triples
        let test_rels = count_items(test.relations.iter()
            .filter_map(|t| match (test_idx.get(t.source.as_str()), test_idx.get(t.target.as_str())) {
                (Some(&i), Some(&k)) => Some((t.relation.to_lowercase(), i, k)),
                _ => None
            }));
        let mut gold_rels: FnvHashMap<String, Vec<(usize, usize, usize)>> = Default::default();
        for ((relation, j, l), n) in count_items(gold.relations.iter()
            .filter_map(|t| match (gold_idx.get(t.source.as_str()), gold_idx.get(t.target.as_str())) {
                (Some(&j), Some(&l)) => Some((t.relation.to_lowercase(), j, l)),
                _ => None
            })) {
            gold_rels.entry(relation).or_insert(Vec::new()).push((j, l, n));
        }
        for ((relation, i, k), n_test) in test_rels {
            if let Some(golds) = gold_rels.get(&relation) {
                for &(j, l, n_gold) in golds {
                    let weight = cmp::min(n_test, n_gold);
                    if i == k {
                        // self loop, only matched by another self loop
                        if j == l {
                            *unary.entry((i, j)).or_insert(0) += weight;
                        }
                    } else if j != l {
                        outgoing.entry((i, j)).or_insert(Vec::new()).push(PairWeight { x_prime: k, x: l, weight });
                        incoming.entry((k, l)).or_insert(Vec::new()).push(PairWeight { x_prime: i, x: j, weight });
                    }
                }
            }
        }

        let mut candidates: Vec<Vec<usize>> = vec![Vec::new(); test.n_variables()];
        for (i, j) in unary.keys().chain(outgoing.keys()).chain(incoming.keys()).cloned().sorted().into_iter().dedup() {
            candidates[i].push(j);
        }

        MatchPool {
            n_x_prime: test.n_variables(),
            n_x: gold.n_variables(),
            candidates,
            unary, outgoing, incoming
        }
    }

    #[inline]
    pub fn unary_weight(&self, x_prime: usize, x: usize) -> usize {
        *self.unary.get(&(x_prime, x)).unwrap_or(&0)
    }

    /// Number of triples matched thanks to binding x_prime to x, given how the *other* test
    /// variables are bound in `bijection`. Whatever x_prime is bound to in `bijection` is ignored.
    pub fn local_weight(&self, x_prime: usize, x: usize, bijection: &Bijection) -> usize {
        let mut weight = self.unary_weight(x_prime, x);
        for map in &[&self.outgoing, &self.incoming] {
            if let Some(pairs) = map.get(&(x_prime, x)) {
                for p in pairs {
                    if bijection.to_x(p.x_prime) == p.x as i32 {
                        weight += p.weight;
                    }
                }
            }
        }

        weight
    }

    /// Largest weight a test variable can bring, assuming all its neighbours are bound favourably
    pub fn optimistic_weight(&self, x_prime: usize) -> usize {
        let sum_pairs = |pairs: Option<&Vec<PairWeight>>| pairs.map_or(0, |ps| ps.iter().map(|p| p.weight).sum::<usize>());

        self.candidates[x_prime].iter()
            .map(|&x| self.unary_weight(x_prime, x)
                + sum_pairs(self.outgoing.get(&(x_prime, x)))
                + sum_pairs(self.incoming.get(&(x_prime, x))))
            .max()
            .unwrap_or(0)
    }

    /// Number of test triples matched by a full alignment
    pub fn score(&self, bijection: &Bijection) -> usize {
        let mut score = 0;
        for x_prime in 0..self.n_x_prime {
            if let Some(x) = bijection.get_x(x_prime) {
                score += self.unary_weight(x_prime, x);
                // every relation is stored once as outgoing, so it is counted once
                if let Some(pairs) = self.outgoing.get(&(x_prime, x)) {
                    for p in pairs {
                        if bijection.to_x(p.x_prime) == p.x as i32 {
                            score += p.weight;
                        }
                    }
                }
            }
        }

        score
    }

    /// Size of the space an exact search has to walk through: every test variable is either left
    /// unbound or bound to one of its candidates.
    pub fn get_n_permutations(&self) -> usize {
        self.candidates.iter()
            .fold(1usize, |n, c| n.saturating_mul(c.len() + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use amr::parse_amr_line;

    #[test]
    pub fn test_pool_weights() {
        let test = parse_amr_line("(w / want-01 :ARG0 (b / boy) :ARG1 (g / go-02 :ARG0 b))").unwrap();
        let gold = parse_amr_line("(w2 / want-01 :ARG0 (b2 / boy) :ARG1 (g2 / go-01 :ARG0 b2))").unwrap();
        let pool = MatchPool::new(&test, &gold);

        // instance + TOP for w, instance for b, nothing for g except relations
        assert_eq!(pool.unary_weight(0, 0), 2);
        assert_eq!(pool.unary_weight(1, 1), 1);
        assert_eq!(pool.unary_weight(2, 2), 0);
        assert_eq!(pool.candidates[2], vec![0, 2]);

        let mut bijection = Bijection::new(3, 3);
        bijection.push_both(0, 0);
        bijection.push_both(1, 1);
        assert_eq!(pool.score(&bijection), 4);
        assert_eq!(pool.local_weight(2, 2, &bijection), 2);

        bijection.push_both(2, 2);
        assert_eq!(pool.score(&bijection), 6);
        assert_eq!(pool.optimistic_weight(2), 2);
    }

    #[test]
    pub fn test_relation_names_ignore_case() {
        let test = parse_amr_line(r#"(w / want-01 :ARG0 (b / boy) :Polarity -)"#).unwrap();
        let gold = parse_amr_line(r#"(w / Want-01 :arg0 (b / BOY) :polarity -)"#).unwrap();
        let pool = MatchPool::new(&test, &gold);

        let mut bijection = Bijection::new(2, 2);
        bijection.push_both(0, 0);
        bijection.push_both(1, 1);
        // two instances, TOP, polarity, ARG0
        assert_eq!(pool.score(&bijection), 5);
    }

    #[test]
    pub fn test_duplicated_relations_match_as_multiset() {
        let test = parse_amr_line("(a / a :mod (b / b) :mod b)").unwrap();
        let gold = parse_amr_line("(a / a :mod (b / b))").unwrap();
        let pool = MatchPool::new(&test, &gold);

        let mut bijection = Bijection::new(2, 2);
        bijection.push_both(0, 0);
        bijection.push_both(1, 1);
        // instance a, instance b, TOP, one of the two :mod
        assert_eq!(pool.score(&bijection), 4);
    }
}
