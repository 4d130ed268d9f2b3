use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The character source failed for a reason other than running out of input.
    #[error("error reading stream after {chars_read} characters")]
    Read {
        chars_read: u64,
        #[source]
        source: io::Error,
    },
    #[error("error writing report")]
    Report(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
