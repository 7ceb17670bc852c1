//! Line assembly for the serial command stream.
//!
//! Bytes arrive one at a time from the UART. The parser collects them until a
//! line terminator (`\n` or `\r`) and then hands back a complete [`Line`].
//! Bytes beyond [`MAX_LINE_LEN`] are dropped; only the first character of a
//! line carries meaning, so truncation never changes the command.

use heapless::Vec;

/// Maximum number of bytes kept per line
pub const MAX_LINE_LEN: usize = 32;

/// A complete line received from the host (terminator excluded)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Line {
    bytes: Vec<u8, MAX_LINE_LEN>,
    truncated: bool,
}

impl Line {
    /// Build a line from raw bytes, truncating to [`MAX_LINE_LEN`]
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut line = Self::default();
        for &byte in data {
            line.push(byte);
        }
        line
    }

    fn push(&mut self, byte: u8) {
        // Leading blanks would only eat into the length limit
        if self.bytes.is_empty() && byte.is_ascii_whitespace() {
            return;
        }
        if self.bytes.push(byte).is_err() {
            self.truncated = true;
        }
    }

    /// Raw bytes of the line, without leading ASCII whitespace
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether bytes were dropped because the line was too long
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The command character of this line
    ///
    /// Surrounding whitespace is ignored. Returns `None` for blank lines.
    /// A line that starts with bytes that are not valid UTF-8 yields
    /// [`char::REPLACEMENT_CHARACTER`] so it is still reported as unknown.
    /// This includes a multi-byte character cut off by the length limit
    /// after leading non-ASCII whitespace.
    pub fn first_char(&self) -> Option<char> {
        let bytes = self.as_bytes();
        let text = match core::str::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                let valid = core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or("");
                if valid.trim().is_empty() {
                    return Some(char::REPLACEMENT_CHARACTER);
                }
                valid
            }
        };
        text.trim().chars().next()
    }
}

/// Incremental line parser
#[derive(Debug, Clone, Default)]
pub struct LineParser {
    current: Line,
}

impl LineParser {
    /// Create a new line parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any partially received line
    pub fn reset(&mut self) {
        self.current = Line::default();
    }

    /// Number of bytes buffered for the line in progress
    pub fn pending(&self) -> usize {
        self.current.bytes.len()
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Some(line)` when a terminator completes a line. Blank lines
    /// are returned as well; callers skip them via [`Line::first_char`].
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        match byte {
            b'\n' | b'\r' => Some(core::mem::take(&mut self.current)),
            _ => {
                self.current.push(byte);
                None
            }
        }
    }
}
