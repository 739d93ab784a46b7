//!
//! Where things are: [Location] (line and column) and [Checkpoint]
//! (a location plus the byte offset it corresponds to).
//!

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{error::ScanError, rules::LineBreaks};

lazy_static! {
    ///
    /// A single line break: `\r\n` and `\n\r` each count once.
    ///
    static ref LINE_BREAK: Regex = Regex::new(r"\r\n?|\n\r?").expect("line break pattern");
}

///
/// A 1-based line and column.
///
/// Columns count characters, not bytes.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub line: usize,
    pub col: usize,
}

impl Location {
    pub const START: Location = Location { line: 1, col: 1 };

    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    ///
    /// The location just after `text`, if `text` started here,
    /// together with the number of line breaks it was counted as.
    ///
    pub(crate) fn advance(self, text: &str, policy: LineBreaks) -> (Location, usize) {
        match policy {
            LineBreaks::None => (
                Location {
                    col: self.col + text.chars().count(),
                    ..self
                },
                0,
            ),
            LineBreaks::Fixed(n) => (
                Location {
                    line: self.line + n,
                    col: 1,
                },
                n,
            ),
            LineBreaks::Scan => {
                let mut breaks = 0;
                let mut tail = 0;
                for found in LINE_BREAK.find_iter(text) {
                    breaks += 1;
                    tail = found.end();
                }

                if breaks == 0 {
                    return self.advance(text, LineBreaks::None);
                }

                (
                    Location {
                        line: self.line + breaks,
                        col: text[tail..].chars().count() + 1,
                    },
                    breaks,
                )
            }
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::START
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

///
/// A resumable position in a buffer.
///
/// Taken with [crate::Scanner::save] or [crate::Token::checkpoint],
/// and handed back to [crate::Scanner::reset]. The mode stack is
/// not part of a checkpoint: resume with the scanner in the mode
/// that was active when it was taken.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Checkpoint {
    pub line: usize,
    pub col: usize,

    ///
    /// Byte offset into the buffer.
    ///
    pub offset: usize,
}

impl Checkpoint {
    pub fn new(offset: usize, location: Location) -> Self {
        Self {
            line: location.line,
            col: location.col,
            offset,
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.line, self.col)
    }

    ///
    /// Checks this checkpoint can be resumed against `buffer`.
    ///
    pub(crate) fn validate(&self, buffer: &str) -> Result<(), ScanError> {
        let reason = if self.line == 0 || self.col == 0 {
            "lines and columns start at 1"
        } else if self.offset > buffer.len() {
            "offset is past the end of the buffer"
        } else if !buffer.is_char_boundary(self.offset) {
            "offset is inside a character"
        } else {
            return Ok(());
        };

        Err(ScanError::InvalidCheckpoint {
            offset: self.offset,
            line: self.line,
            col: self.col,
            reason,
        })
    }
}

impl Default for Checkpoint {
    fn default() -> Self {
        Self::new(0, Location::START)
    }
}
