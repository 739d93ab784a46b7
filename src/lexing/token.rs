//!
//! Lexical tokens.
//!

use std::{ops::Range, sync::Arc};

use crate::{
    common::{Checkpoint, Location},
    rules::TokenValue,
};

///
/// One match of one rule, borrowing its text from the buffer.
///
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token<'s> {
    ///
    /// Name of the rule that fired.
    ///
    pub kind: Arc<str>,

    ///
    /// The matched text, verbatim.
    ///
    pub text: &'s str,

    ///
    /// The text, unless the rule computes a value of its own.
    ///
    pub value: TokenValue,

    pub line: usize,
    pub col: usize,

    ///
    /// Byte offset of the first character.
    ///
    pub offset: usize,

    ///
    /// How many line breaks the match was counted as.
    ///
    pub line_breaks: usize,

    ///
    /// Matched an error rule: scanning stopped here.
    ///
    pub is_error: bool,

    ///
    /// Which of the rule's variants matched.
    ///
    pub variant: usize,
}

impl<'s> Token<'s> {
    pub fn is(&self, kind: &str) -> bool {
        &*self.kind == kind
    }

    ///
    /// Byte range of this token in its buffer.
    ///
    pub fn span(&self) -> Range<usize> {
        self.offset..self.offset + self.text.len()
    }

    ///
    /// Character index of this token in `buffer`, the buffer it was
    /// scanned from. `None` if `offset` does not fall on a character
    /// boundary of `buffer`.
    ///
    pub fn char_offset(&self, buffer: &str) -> Option<usize> {
        buffer.get(..self.offset).map(|prefix| prefix.chars().count())
    }

    pub fn location(&self) -> Location {
        Location::new(self.line, self.col)
    }

    ///
    /// Resuming here scans this token again.
    ///
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.offset, self.location())
    }
}
