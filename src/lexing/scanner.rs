//!
//! ## Scanning
//!
//! A [Scanner] is one pass of a [Lexer] over one buffer:
//! it owns the cursor, the location and the mode stack,
//! while the lexer itself is only ever read.
//!

use std::{
    fmt::{Debug, Formatter},
    iter::FusedIterator,
};

use regex_automata::{util::captures::Captures, Anchored, Input};

use super::{Lexer, Token};
use crate::{
    common::{Checkpoint, Diagnostic, Location},
    compile::{Jump, ModeId},
    error::ScanError,
    rules::TokenValue,
};

pub struct Scanner<'l, 's> {
    lexer: &'l Lexer,
    buffer: &'s str,

    ///
    /// Byte offset of the next match.
    ///
    cursor: usize,
    location: Location,

    ///
    /// Suspended modes, innermost last.
    ///
    stack: Vec<ModeId>,
    active: ModeId,
    done: bool,

    ///
    /// Offset of the last zero-width match, until the cursor moves.
    ///
    stalled_at: Option<usize>,

    ///
    /// Capture scratch space, one per mode.
    ///
    captures: Vec<Captures>,
}

impl<'l, 's> Scanner<'l, 's> {
    pub(crate) fn new(lexer: &'l Lexer, buffer: &'s str) -> Self {
        let captures = lexer
            .table
            .modes
            .iter()
            .map(|mode| mode.regex.create_captures())
            .collect();

        Self {
            lexer,
            buffer,
            cursor: 0,
            location: Location::START,
            stack: vec![],
            active: 0,
            done: false,
            stalled_at: None,
            captures,
        }
    }

    ///
    /// Starts scanning `buffer` from its start,
    /// or from a checkpoint taken earlier.
    ///
    /// The active mode and the mode stack are left as they are.
    ///
    pub fn reset(&mut self, buffer: &'s str, checkpoint: Option<Checkpoint>) -> Result<(), ScanError> {
        let checkpoint = checkpoint.unwrap_or_default();
        if let Err(err) = checkpoint.validate(buffer) {
            self.done = true;
            return Err(err);
        }

        self.buffer = buffer;
        self.cursor = checkpoint.offset;
        self.location = checkpoint.location();
        self.done = false;
        self.stalled_at = None;

        Ok(())
    }

    ///
    /// Scans the next token, skipping any discarded matches.
    ///
    /// Returns `Ok(None)` once the input is exhausted, nothing
    /// matches, or an error token has been produced.
    ///
    pub fn next_token(&mut self) -> Result<Option<Token<'s>>, ScanError> {
        let lexer = self.lexer;
        let buffer = self.buffer;

        loop {
            if self.done {
                return Ok(None);
            }

            if self.cursor == buffer.len() {
                self.done = true;
                return Ok(None);
            }

            let mode = lexer.table.get(self.active);
            let caps = &mut self.captures[self.active];
            let input = Input::new(buffer)
                .span(self.cursor..buffer.len())
                .anchored(Anchored::Yes);
            mode.regex.search_captures(&input, caps);

            let Some((entry, variant, span)) = mode.dispatch(caps) else {
                self.done = true;
                return Ok(None);
            };

            let start = self.location;
            let offset = self.cursor;
            let text = &buffer[span.start..span.end];

            // A zero-width match must switch modes, and cannot be
            // followed by another one before the cursor moves.
            if text.is_empty() {
                if !entry.transitions() || self.stalled_at == Some(offset) {
                    self.done = true;
                    return Err(ScanError::EmptyMatch {
                        rule: entry.kind.to_string(),
                        line: start.line,
                        col: start.col,
                    });
                }

                self.stalled_at = Some(offset);
            } else {
                self.stalled_at = None;
            }

            let value = match (&entry.value, entry.discard) {
                (_, true) => TokenValue::Nothing,
                (Some(f), false) => f.call(text, &entry.slots[variant].groups(buffer, caps)),
                (None, false) => TokenValue::from(text),
            };

            let (location, line_breaks) = start.advance(text, entry.line_breaks);
            self.location = location;
            self.cursor = span.end;

            match entry.jump {
                Jump::Stay => (),
                Jump::Switch(mode) => self.active = mode,
                Jump::Push(mode) => {
                    self.stack.push(self.active);
                    self.active = mode;
                }
                Jump::Pop => match self.stack.pop() {
                    Some(mode) => self.active = mode,
                    None => {
                        self.done = true;
                        return Err(ScanError::PopOnEmptyStack {
                            rule: entry.kind.to_string(),
                            line: start.line,
                            col: start.col,
                        });
                    }
                },
            }

            if entry.error {
                self.done = true;
            }

            if entry.discard {
                continue;
            }

            return Ok(Some(Token {
                kind: entry.kind.clone(),
                text,
                value,
                line: start.line,
                col: start.col,
                offset,
                line_breaks,
                is_error: entry.error,
                variant,
            }));
        }
    }

    ///
    /// A checkpoint at the current position, for [Scanner::reset].
    ///
    pub fn save(&self) -> Checkpoint {
        Checkpoint::new(self.cursor, self.location)
    }

    ///
    /// Whether tokens called `name` can come out of this scanner.
    ///
    pub fn has(&self, name: &str) -> bool {
        self.lexer.has(name)
    }

    ///
    /// Renders `token` (usually an error token) with the
    /// line of this buffer it was found on.
    ///
    pub fn format_error(&self, token: &Token<'_>) -> String {
        Diagnostic::new(self.buffer, token).to_string()
    }

    ///
    /// Name of the active mode.
    ///
    pub fn mode(&self) -> &'l str {
        self.lexer.table.get(self.active).name()
    }

    ///
    /// Number of suspended modes.
    ///
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn offset(&self) -> usize {
        self.cursor
    }

    pub fn buffer(&self) -> &'s str {
        self.buffer
    }
}

impl<'l, 's> Iterator for Scanner<'l, 's> {
    type Item = Result<Token<'s>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

impl<'l, 's> FusedIterator for Scanner<'l, 's> {}

impl<'l, 's> Debug for Scanner<'l, 's> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let stack = self
            .stack
            .iter()
            .map(|&mode| self.lexer.table.get(mode).name())
            .collect::<Vec<_>>();

        f.debug_struct("Scanner")
            .field("mode", &self.mode())
            .field("stack", &stack)
            .field("location", &self.location)
            .field("offset", &self.cursor)
            .field("done", &self.done)
            .finish()
    }
}
