//! Streaming word-frequency counter.
//!
//! Characters are pulled from a [`CharSource`], split into lowercase words
//! over the 52 basic Latin letters, counted into a [`FrequencyTable`], and
//! ranked by descending count then ascending word.

mod counter;
mod error;
mod letters;
mod rank;
mod report;
mod source;

pub use counter::{FrequencyTable, WordCounter, count_str, count_words};
pub use error::{Error, Result};
pub use letters::{fold_letter, is_letter};
pub use rank::{RankedEntry, rank, select};
pub use report::{Reporter, VecReporter, WriteReporter, report};
pub use source::{CharSource, ReaderSource, StrSource};

/// Counts, ranks and reports in one go. Nothing reaches `reporter` if reading fails.
pub fn run<S: CharSource, R: Reporter>(source: S, reporter: R) -> Result<usize> {
    let table = count_words(source)?;
    let ranked = rank(&table);
    report(&ranked, reporter)
}
