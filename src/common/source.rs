//!
//! Pointing at a token in its source text.
//!

use std::fmt::{Display, Formatter};

use crate::lexing::Token;

///
/// Finds the physical line around byte `offset`,
/// without its line terminator.
///
pub(crate) fn line_around(buffer: &str, offset: usize) -> &str {
    let mut offset = offset.min(buffer.len());
    while !buffer.is_char_boundary(offset) {
        offset -= 1;
    }

    let is_break = |ch: char| ch == '\r' || ch == '\n';
    let start = buffer[..offset].rfind(is_break).map(|i| i + 1).unwrap_or(0);
    let end = buffer[offset..]
        .find(is_break)
        .map(|i| offset + i)
        .unwrap_or(buffer.len());

    &buffer[start..end]
}

///
/// A human-readable report of an (error) token:
///
/// ```text
/// Error: error at line 1 col 12:
///
/// hello there!
///            ^
/// ```
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic<'a> {
    kind: &'a str,
    line: usize,
    col: usize,
    text: &'a str,
}

impl<'a> Diagnostic<'a> {
    pub fn new(buffer: &'a str, token: &'a Token<'_>) -> Self {
        Self {
            kind: &token.kind,
            line: token.line,
            col: token.col,
            text: line_around(buffer, token.offset),
        }
    }

    ///
    /// The source line the token starts on.
    ///
    pub fn line_text(&self) -> &'a str {
        self.text
    }
}

impl<'a> Display for Diagnostic<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Error: {} at line {} col {}:",
            self.kind, self.line, self.col
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.text)?;
        write!(f, "{:width$}^", "", width = self.col.saturating_sub(1))
    }
}
