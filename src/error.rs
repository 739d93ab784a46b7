//!
//! Errors raised while compiling a rule table,
//! or while scanning with a compiled one.
//!
//! Input that simply does not lex is *not* an error here:
//! it shows up as an error token (see [crate::Rule::error])
//! or as the end of the token stream.
//!

use thiserror::Error;

///
/// The rule table could not be compiled.
///
#[derive(Debug, Error)]
pub enum ConfigError {
    ///
    /// A rule (or one of its variants) has nothing to match.
    ///
    #[error("Malformed rule `{rule}`: {reason}")]
    MalformedRule { rule: String, reason: &'static str },

    ///
    /// One of a rule's patterns is not a valid regular expression.
    ///
    #[error("Invalid pattern in rule `{rule}`: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },

    ///
    /// The combined pattern for a mode could not be built,
    /// e.g. two rules declare the same named group.
    ///
    #[error("Could not build mode `{mode}`: {source}")]
    Build {
        mode: String,
        #[source]
        source: regex_automata::meta::BuildError,
    },

    ///
    /// The combined pattern does not have the capture groups
    /// the dispatch table was laid out for.
    ///
    #[error("Mode `{mode}` expected {expected} capture slots, the combined pattern has {found}")]
    SlotMismatch {
        mode: String,
        expected: usize,
        found: usize,
    },

    ///
    /// A rule transitions to a mode that was never declared.
    ///
    #[error("Rule `{rule}` refers to unknown mode `{mode}`")]
    UnknownMode { rule: String, mode: String },

    #[error("Rule `{rule}` is declared twice in mode `{mode}`")]
    DuplicateRule { rule: String, mode: String },

    #[error("Mode `{0}` is declared twice")]
    DuplicateMode(String),

    #[error("Mode `{0}` has no rules")]
    EmptyMode(String),

    #[error("No modes to compile")]
    NoModes,
}

///
/// Something went wrong whilst scanning.
///
/// Every one of these halts the scanner: subsequent
/// calls yield the end of the stream.
///
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanError {
    ///
    /// A rule asked to pop back to a previous mode,
    /// but no mode had been pushed.
    ///
    #[error("Rule `{rule}` popped an empty mode stack\n\tat {line}:{col}")]
    PopOnEmptyStack {
        rule: String,
        line: usize,
        col: usize,
    },

    ///
    /// A rule matched nothing at all, and scanning
    /// would make no further progress.
    ///
    #[error("Rule `{rule}` matched the empty string\n\tat {line}:{col}")]
    EmptyMatch {
        rule: String,
        line: usize,
        col: usize,
    },

    ///
    /// A checkpoint does not point into the buffer it was resumed against.
    ///
    #[error("Cannot resume at offset {offset} ({line}:{col}): {reason}")]
    InvalidCheckpoint {
        offset: usize,
        line: usize,
        col: usize,
        reason: &'static str,
    },
}
