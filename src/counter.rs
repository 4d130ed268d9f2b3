use crate::error::{Error, Result};
use crate::letters::fold_letter;
use crate::source::{CharSource, CloseOnDrop};
use log::{debug, trace};
use std::collections::HashMap;

/// Word to occurrence count. Every stored count is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Occurrences of `word`; 0 if it was never seen.
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates in unspecified order. Use `rank` for a stable ordering.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, &c)| (w.as_str(), c))
    }

    fn increment(&mut self, word: &str) {
        // Avoid allocating a key for words we have already seen.
        match self.counts.get_mut(word) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(word.to_owned(), 1);
            }
        }
    }
}

/// Incremental tokenizer and aggregator.
///
/// Letters are lowercased into a pending word; any other character ends it.
#[derive(Debug, Default)]
pub struct WordCounter {
    table: FrequencyTable,
    pending: String,
}

impl WordCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, c: char) {
        match fold_letter(c) {
            Some(lower) => self.pending.push(lower),
            None => self.commit(),
        }
    }

    pub fn feed_str(&mut self, text: &str) {
        text.chars().for_each(|c| self.feed(c));
    }

    /// Counts the pending word, if any, and clears it.
    fn commit(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        trace!("commit '{}'", self.pending);
        self.table.increment(&self.pending);
        self.pending.clear();
    }

    /// Counts any trailing word and returns the table.
    pub fn finish(mut self) -> FrequencyTable {
        self.commit();
        self.table
    }
}

/// Reads `source` to the end and counts the words in it.
///
/// The source is closed before this returns, on success and on failure.
/// A read failure discards everything counted so far.
pub fn count_words<S: CharSource>(source: S) -> Result<FrequencyTable> {
    let mut source = CloseOnDrop(source);
    let mut counter = WordCounter::new();
    let mut chars_read = 0u64;

    let outcome = loop {
        match source.0.next_char() {
            Ok(Some(c)) => {
                chars_read += 1;
                counter.feed(c);
            }
            Ok(None) => break Ok(()),
            Err(e) => break Err(e),
        }
    };

    // The trailing word is flushed exactly once, whichever way the loop ended.
    let table = counter.finish();

    match outcome {
        Ok(()) => {
            debug!(
                "read {chars_read} characters, {} words, {} distinct",
                table.total(),
                table.len()
            );
            Ok(table)
        }
        Err(e) => {
            debug!("aborting after {chars_read} characters");
            Err(Error::Read {
                chars_read,
                source: e,
            })
        }
    }
}

/// Counts the words in an in-memory string.
pub fn count_str(text: &str) -> FrequencyTable {
    let mut counter = WordCounter::new();
    counter.feed_str(text);
    counter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StrSource;
    use std::io;

    #[test]
    fn counts_case_insensitively() {
        let table = count_str("the cat sat on the mat. The CAT ran.");
        assert_eq!(table.get("the"), 3);
        assert_eq!(table.get("cat"), 2);
        assert_eq!(table.get("sat"), 1);
        assert_eq!(table.get("on"), 1);
        assert_eq!(table.get("mat"), 1);
        assert_eq!(table.get("ran"), 1);
        assert_eq!(table.len(), 6);
        assert_eq!(table.total(), 9);
    }

    #[test]
    fn last_word_without_boundary_is_counted() {
        let table = count_str("hello world");
        assert_eq!(table.get("world"), 1);
        let table = count_str("x");
        assert_eq!(table.get("x"), 1);
    }

    #[test]
    fn non_letters_split_words() {
        let table = count_str("don't co-op R2D2 naïve\tend\n");
        for w in ["don", "t", "co", "op", "r", "d", "na", "ve", "end"] {
            assert!(table.get(w) >= 1, "missing {w}");
        }
        assert_eq!(table.len(), 9);
        assert_eq!(table.total(), 9);
        assert!(table.iter().all(|(w, _)| w.bytes().all(|b| b.is_ascii_lowercase())));
    }

    #[test]
    fn no_letters_is_empty() {
        assert!(count_str("").is_empty());
        assert!(count_str("123 !!! ---").is_empty());
        assert_eq!(count_str("   ").get("anything"), 0);
    }

    #[test]
    fn counter_is_incremental() {
        let mut counter = WordCounter::new();
        counter.feed_str("foo ba");
        counter.feed_str("r foo");
        let table = counter.finish();
        assert_eq!(table.get("foo"), 2);
        assert_eq!(table.get("bar"), 1);
        assert_eq!(table.get("ba"), 0);
    }

    #[test]
    fn count_words_matches_count_str() {
        let text = "A a a b B c";
        let table = count_words(StrSource::new(text)).unwrap();
        assert_eq!(table, count_str(text));
    }

    struct Failing {
        inner: StrSource,
        closed: bool,
    }

    impl CharSource for Failing {
        fn next_char(&mut self) -> io::Result<Option<char>> {
            match self.inner.next_char()? {
                Some(c) => Ok(Some(c)),
                None => Err(io::Error::other("disk on fire")),
            }
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    #[test]
    fn read_failure_fails_the_run_and_closes() {
        let mut source = Failing {
            inner: StrSource::new("hello wor"),
            closed: false,
        };
        let err = count_words(&mut source).unwrap_err();
        // The cause is reachable through source() only.
        assert_eq!(err.to_string(), "error reading stream after 9 characters");
        let cause = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(cause.as_deref(), Some("disk on fire"));
        match err {
            Error::Read { chars_read, .. } => assert_eq!(chars_read, 9),
            other => panic!("unexpected error: {other}"),
        }
        assert!(source.closed);
    }
}
