use crate::error::{Error, Result};
use crate::rank::RankedEntry;
use std::io::{self, Write};

/// Sink for ranked entries. Entries arrive in ranking order and must be kept
/// in that order.
pub trait Reporter {
    fn accept(&mut self, entry: &RankedEntry) -> io::Result<()>;

    /// Called once after the last entry.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn accept(&mut self, entry: &RankedEntry) -> io::Result<()> {
        (**self).accept(entry)
    }

    fn finish(&mut self) -> io::Result<()> {
        (**self).finish()
    }
}

/// Collects `word - count` lines in memory.
#[derive(Debug, Default, Clone)]
pub struct VecReporter {
    pub lines: Vec<String>,
}

impl VecReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for VecReporter {
    fn accept(&mut self, entry: &RankedEntry) -> io::Result<()> {
        self.lines.push(entry.to_string());
        Ok(())
    }
}

/// Writes one `word - count` line per entry.
pub struct WriteReporter<W: Write> {
    writer: W,
}

impl<W: Write> WriteReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Reporter for WriteReporter<W> {
    fn accept(&mut self, entry: &RankedEntry) -> io::Result<()> {
        writeln!(self.writer, "{entry}")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Hands every entry to `reporter` in order and returns how many were sent.
pub fn report<'a, I, R>(entries: I, mut reporter: R) -> Result<usize>
where
    I: IntoIterator<Item = &'a RankedEntry>,
    R: Reporter,
{
    let mut n = 0;
    for entry in entries {
        reporter.accept(entry).map_err(Error::Report)?;
        n += 1;
    }
    reporter.finish().map_err(Error::Report)?;
    Ok(n)
}
