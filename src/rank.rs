use crate::counter::FrequencyTable;
use rayon::prelude::*;
use std::cmp::Ordering;
use std::fmt;

/// A word and its count, in report order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RankedEntry {
    pub word: String,
    pub count: u64,
}

impl RankedEntry {
    pub fn new<S: Into<String>>(word: S, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

// Report order: higher count first, then alphabetical.
// Distinct words never compare equal, so this is a total order.
impl Ord for RankedEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for RankedEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.word, self.count)
    }
}

/// Orders every entry of `table` by descending count, then ascending word.
///
/// The table is left untouched. Because the order is total, an unstable
/// parallel sort still gives the same sequence on every run.
pub fn rank(table: &FrequencyTable) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = table
        .iter()
        .map(|(word, count)| RankedEntry::new(word, count))
        .collect();
    entries.par_sort_unstable();
    entries
}

/// The leading entries of `ranked` seen at least `min_count` times, capped at
/// `max_words`. A `max_words` of 0 means no cap.
///
/// `ranked` must already be in [`rank`] order.
pub fn select(ranked: &[RankedEntry], min_count: u64, max_words: usize) -> &[RankedEntry] {
    let above = ranked.partition_point(|e| e.count >= min_count);
    let n = match max_words {
        0 => above,
        cap => above.min(cap),
    };
    &ranked[..n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::count_str;

    fn pairs(entries: &[RankedEntry]) -> Vec<(&str, u64)> {
        entries.iter().map(|e| (e.word.as_str(), e.count)).collect()
    }

    #[test]
    fn frequency_then_alphabetical() {
        let table = count_str("the cat sat on the mat. The CAT ran.");
        let ranked = rank(&table);
        assert_eq!(
            pairs(&ranked),
            vec![
                ("the", 3),
                ("cat", 2),
                ("mat", 1),
                ("on", 1),
                ("ran", 1),
                ("sat", 1)
            ]
        );
    }

    #[test]
    fn simple_counts() {
        let ranked = rank(&count_str("a a a b b c"));
        assert_eq!(pairs(&ranked), vec![("a", 3), ("b", 2), ("c", 1)]);
    }

    #[test]
    fn empty_table_ranks_empty() {
        assert!(rank(&FrequencyTable::new()).is_empty());
    }

    #[test]
    fn prefix_sorts_first_on_ties() {
        let ranked = rank(&count_str("ab a abc b"));
        assert_eq!(pairs(&ranked), vec![("a", 1), ("ab", 1), ("abc", 1), ("b", 1)]);
    }

    #[test]
    fn rank_is_pure_and_repeatable() {
        let table = count_str("z y x w v u z y x w z y z q q q q");
        let before = table.clone();
        let first = rank(&table);
        let second = rank(&table);
        assert_eq!(first, second);
        assert_eq!(table, before);
        assert_eq!(first.len(), table.len());
        assert!(first.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn select_applies_threshold() {
        let ranked = rank(&count_str("a a a b b c d"));
        assert_eq!(pairs(select(&ranked, 2, 0)), vec![("a", 3), ("b", 2)]);
        assert_eq!(pairs(select(&ranked, 1, 0)).len(), 4);
        assert!(select(&ranked, 4, 0).is_empty());
    }

    #[test]
    fn select_applies_cap() {
        let ranked = rank(&count_str("a a a b b c d"));
        assert_eq!(pairs(select(&ranked, 1, 3)), vec![("a", 3), ("b", 2), ("c", 1)]);
        assert_eq!(pairs(select(&ranked, 2, 1)), vec![("a", 3)]);
        // Cap larger than what the threshold leaves.
        assert_eq!(pairs(select(&ranked, 2, 10)), vec![("a", 3), ("b", 2)]);
    }

    #[test]
    fn select_zero_cap_keeps_everything() {
        let ranked = rank(&count_str("x y z z"));
        assert_eq!(select(&ranked, 0, 0), ranked.as_slice());
        assert_eq!(select(&ranked, 1, 0), ranked.as_slice());
        assert!(select(&[], 1, 0).is_empty());
    }

    #[test]
    fn display_format() {
        assert_eq!(RankedEntry::new("the", 3).to_string(), "the - 3");
    }
}
