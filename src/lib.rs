//!
//! ## relex
//!
//! A lexer compiler: an ordered table of token rules becomes one
//! combined regular expression per mode, plus a dispatch table
//! telling which rule fired.
//!
//! Rules are tried in the order they are declared, and the first
//! one that matches wins, even if a later rule would match more.
//!
//! ```
//! use relex::{Lexer, Mode, Rule, TokenValue};
//!
//! let lexer = Lexer::compile_modes([
//!     Mode::new(
//!         "code",
//!         [
//!             Rule::regex("ws", r"\s+").discard().count_line_breaks(),
//!             Rule::regex("number", r"\d+")
//!                 .value(|raw, _| TokenValue::from(raw.parse::<i64>().ok())),
//!             Rule::literal("quote", "\"").push("string"),
//!             Rule::regex("name", r"\w+"),
//!         ],
//!     ),
//!     Mode::new(
//!         "string",
//!         [
//!             Rule::literal("quote", "\"").pop(),
//!             Rule::regex("text", r#"[^"]+"#),
//!         ],
//!     ),
//! ])?;
//!
//! let tokens = lexer
//!     .scan("say \"hi\" 3")
//!     .map(|token| token.map(|t| (t.kind.to_string(), t.value)))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! assert_eq!(
//!     tokens,
//!     vec![
//!         ("name".to_string(), TokenValue::from("say")),
//!         ("quote".to_string(), TokenValue::from("\"")),
//!         ("text".to_string(), TokenValue::from("hi")),
//!         ("quote".to_string(), TokenValue::from("\"")),
//!         ("number".to_string(), TokenValue::Integer(3)),
//!     ]
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!

pub mod common;
pub mod compile;
pub mod error;
pub mod lexing;
pub mod rules;

#[cfg(test)]
mod tests;

pub use common::{Checkpoint, Diagnostic, Location};
pub use compile::Mode;
pub use error::{ConfigError, ScanError};
pub use lexing::{Lexer, Scanner, Token};
pub use rules::{Groups, LineBreaks, Match, Rule, RuleOptions, Transition, TokenValue, ValueFn};
