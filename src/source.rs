use byteorder::ReadBytesExt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, ErrorKind};
use std::path::Path;

/// A pull-based provider of characters.
///
/// - `Ok(Some(c))`: the next character.
/// - `Ok(None)`: clean end of stream.
/// - `Err(e)`: the underlying read failed.
pub trait CharSource {
    fn next_char(&mut self) -> io::Result<Option<char>>;

    /// Releases whatever the source holds. Must be safe to call more than once.
    fn close(&mut self) {}
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        (**self).next_char()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

impl<S: CharSource + ?Sized> CharSource for Box<S> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        (**self).next_char()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Closes the wrapped source when dropped, whichever way the scope is left.
pub(crate) struct CloseOnDrop<S: CharSource>(pub(crate) S);

impl<S: CharSource> Drop for CloseOnDrop<S> {
    fn drop(&mut self) {
        self.0.close();
    }
}

/// In-memory source over an owned string.
#[derive(Debug, Clone, Default)]
pub struct StrSource {
    text: String,
    pos: usize, // byte offset of the next character
}

impl StrSource {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            pos: 0,
        }
    }
}

impl CharSource for StrSource {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let Some(c) = self.text[self.pos..].chars().next() else {
            return Ok(None);
        };
        self.pos += c.len_utf8();
        Ok(Some(c))
    }

    fn close(&mut self) {
        self.pos = self.text.len();
    }
}

/// Decodes UTF-8 from a buffered byte reader one character at a time.
///
/// Malformed input is reported as an `InvalidData` error rather than replaced,
/// so a corrupt stream fails the run instead of silently splitting words.
pub struct ReaderSource<R: BufRead> {
    reader: Option<R>,
}

impl ReaderSource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }
}

fn invalid_utf8(msg: &str) -> io::Error {
    io::Error::new(ErrorKind::InvalidData, msg.to_string())
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn next_char(&mut self) -> io::Result<Option<char>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };

        let lead = match reader.read_u8() {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e),
        };

        let (width, init) = match lead {
            0x00..=0x7F => return Ok(Some(lead as char)),
            0xC2..=0xDF => (2, u32::from(lead & 0x1F)),
            0xE0..=0xEF => (3, u32::from(lead & 0x0F)),
            0xF0..=0xF4 => (4, u32::from(lead & 0x07)),
            _ => return Err(invalid_utf8("invalid UTF-8 lead byte")),
        };

        let mut code = init;
        for _ in 1..width {
            // A sequence cut short by EOF is malformed, not a clean end.
            let b = match reader.read_u8() {
                Ok(b) => b,
                Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                    return Err(invalid_utf8("truncated UTF-8 sequence"));
                }
                Err(e) => return Err(e),
            };
            if b & 0xC0 != 0x80 {
                return Err(invalid_utf8("invalid UTF-8 continuation byte"));
            }
            code = (code << 6) | u32::from(b & 0x3F);
        }

        // Rejects overlong encodings and surrogates.
        let min = match width {
            2 => 0x80,
            3 => 0x800,
            _ => 0x1_0000,
        };
        if code < min {
            return Err(invalid_utf8("overlong UTF-8 sequence"));
        }
        char::from_u32(code)
            .map(Some)
            .ok_or_else(|| invalid_utf8("UTF-8 sequence is not a valid scalar value"))
    }

    fn close(&mut self) {
        self.reader = None;
    }
}
