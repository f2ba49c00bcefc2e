use std::collections::HashMap;
use std::hash::Hash;
use std::cmp;

/// Count how many times each element occurs
///
/// Example:
/// ```
/// extern crate algorithm;
/// use algorithm::itertools::count_items;
///
/// let counter = count_items(["go", "want", "go"].iter());
/// assert_eq!(counter[&"go"], 2);
/// assert_eq!(counter.len(), 2);
/// ```
pub fn count_items<K: Eq + Hash, I: Iterator<Item=K>>(iterator: I) -> HashMap<K, usize> {
    let mut counter: HashMap<K, usize> = Default::default();
    for elem in iterator {
        *counter.entry(elem).or_insert(0) += 1;
    }

    counter
}

/// Size of the multiset intersection of two counters
pub fn multiset_intersection<K: Eq + Hash>(a: &HashMap<K, usize>, b: &HashMap<K, usize>) -> usize {
    a.iter()
        .map(|(k, &n)| cmp::min(n, *b.get(k).unwrap_or(&0)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_multiset_intersection() {
        let a = count_items(["x", "x", "y", "z"].iter());
        let b = count_items(["x", "y", "y", "w"].iter());

        assert_eq!(a[&"x"], 2);
        assert_eq!(multiset_intersection(&a, &b), 2);
        assert_eq!(multiset_intersection(&b, &a), 2);
        assert_eq!(multiset_intersection(&a, &a), 4);
    }
}
