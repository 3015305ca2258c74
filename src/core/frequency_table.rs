use std::collections::BTreeMap;

// Ordered item name -> occurrence count. Names are compared byte-wise, so
// "Apple" and "apple" are distinct keys. Every stored count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<String, usize>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            counts: BTreeMap::new(),
        }
    }

    /// Builds a table by recording every token in order.
    #[cfg(test)]
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = FrequencyTable::new();
        for token in tokens {
            table.record(token.as_ref());
        }
        table
    }

    /// Counts one more occurrence of `name`, inserting it with a count of 1 if absent.
    pub fn record(&mut self, name: &str) {
        self.add(name, 1);
    }

    // A zero count would break the "every count >= 1" invariant, so it is ignored.
    pub(crate) fn add(&mut self, name: &str, count: usize) {
        if count == 0 {
            return;
        }
        match self.counts.get_mut(name) {
            Some(existing) => *existing += count,
            None => {
                self.counts.insert(name.to_owned(), count);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.counts.get(name).copied()
    }

    /// Entries in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of tokens recorded.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    const VOCABULARY: [&str; 8] = [
        "apple", "Apple", "banana", "pear", "kiwi", "Kiwi", "onions", "zucchini",
    ];

    fn random_tokens(rng: &mut StdRng) -> Vec<&'static str> {
        let len = rng.random_range(0..200);
        (0..len)
            .map(|_| VOCABULARY[rng.random_range(0..VOCABULARY.len())])
            .collect()
    }

    #[test]
    fn test_scenario_apple_banana_pear() {
        let table = FrequencyTable::from_tokens(["apple", "banana", "apple", "pear", "apple"]);
        let entries: Vec<(&str, usize)> = table.iter().collect();
        assert_eq!(entries, vec![("apple", 3), ("banana", 1), ("pear", 1)]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 5);
    }

    #[test]
    fn test_empty_sequence_gives_empty_table() {
        let table = FrequencyTable::from_tokens(Vec::<String>::new());
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn test_case_variants_are_distinct_keys() {
        let table = FrequencyTable::from_tokens(["Apple", "apple", "APPLE", "apple"]);
        assert_eq!(table.get("apple"), Some(2));
        assert_eq!(table.get("Apple"), Some(1));
        assert_eq!(table.get("APPLE"), Some(1));
        // Byte order puts uppercase before lowercase.
        let names: Vec<&str> = table.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["APPLE", "Apple", "apple"]);
    }

    #[test]
    fn test_add_ignores_zero_count() {
        let mut table = FrequencyTable::new();
        table.add("pear", 0);
        assert!(table.is_empty());
        table.add("pear", 4);
        table.add("pear", 0);
        assert_eq!(table.get("pear"), Some(4));
    }

    #[test]
    fn test_total_equals_token_count_for_random_sequences() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0001);
        for _ in 0..100 {
            let tokens = random_tokens(&mut rng);
            let table = FrequencyTable::from_tokens(&tokens);
            assert_eq!(table.total(), tokens.len());
        }
    }

    #[test]
    fn test_counts_match_occurrences_for_random_sequences() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0002);
        for _ in 0..100 {
            let tokens = random_tokens(&mut rng);
            let table = FrequencyTable::from_tokens(&tokens);

            let mut expected: HashMap<&str, usize> = HashMap::new();
            for token in &tokens {
                *expected.entry(*token).or_insert(0) += 1;
            }

            assert_eq!(table.len(), expected.len());
            for (name, count) in table.iter() {
                assert!(count >= 1);
                assert_eq!(expected.get(name), Some(&count), "count mismatch for {name}");
            }
        }
    }

    #[test]
    fn test_iteration_is_sorted_and_deterministic() {
        let mut rng = StdRng::seed_from_u64(0x5eed_0003);
        let tokens = random_tokens(&mut rng);
        let first = FrequencyTable::from_tokens(&tokens);
        let second = FrequencyTable::from_tokens(&tokens);
        assert_eq!(first, second);

        let names: Vec<&str> = first.iter().map(|(name, _)| name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
