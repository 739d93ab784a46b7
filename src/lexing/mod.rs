//!
//! The process of lexing involves converting a buffer
//! into lexical tokens, according to a compiled table of rules.
//!
//! A [Lexer] is compiled once and never changes, so it can be
//! shared freely: every pass over a buffer gets its own [Scanner].
//!

pub mod scanner;
pub mod token;

pub use scanner::Scanner;
pub use token::Token;

use crate::{
    common::Checkpoint,
    compile::{Mode, ModeTable},
    error::{ConfigError, ScanError},
    rules::Rule,
};

///
/// A compiled rule table.
///
#[derive(Debug, Clone)]
pub struct Lexer {
    pub(crate) table: ModeTable,
}

impl Lexer {
    ///
    /// Compiles a lexer with a single mode.
    ///
    pub fn compile(rules: impl IntoIterator<Item = Rule>) -> Result<Self, ConfigError> {
        let rules = rules.into_iter().collect::<Vec<_>>();
        let table = ModeTable::single(&rules)?;
        Ok(Self { table })
    }

    ///
    /// Compiles a lexer with several modes: scanning starts in the first one.
    ///
    pub fn compile_modes(modes: impl IntoIterator<Item = Mode>) -> Result<Self, ConfigError> {
        let modes = modes.into_iter().collect::<Vec<_>>();
        let table = ModeTable::compile(&modes)?;
        Ok(Self { table })
    }

    ///
    /// Starts scanning `buffer` from the top, in the first mode.
    ///
    pub fn scan<'l, 's>(&'l self, buffer: &'s str) -> Scanner<'l, 's> {
        Scanner::new(self, buffer)
    }

    ///
    /// Starts scanning `buffer`, optionally resuming from a checkpoint.
    ///
    pub fn reset<'l, 's>(
        &'l self,
        buffer: &'s str,
        checkpoint: Option<Checkpoint>,
    ) -> Result<Scanner<'l, 's>, ScanError> {
        let mut scanner = self.scan(buffer);
        scanner.reset(buffer, checkpoint)?;
        Ok(scanner)
    }

    ///
    /// Whether tokens called `name` can come out of this lexer.
    ///
    /// For a single-mode lexer, that is any of its rules;
    /// otherwise only rules that are not discarded count.
    ///
    pub fn has(&self, name: &str) -> bool {
        self.table.has(name)
    }

    pub fn mode_names(&self) -> impl Iterator<Item = &str> {
        self.table.names()
    }
}
