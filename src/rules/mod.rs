//!
//! Token rules: what to match, and what to do about it.
//!
//! ```
//! use relex::{Match, Rule, TokenValue};
//!
//! let rules = vec![
//!     Rule::regex("ws", r"\s+").discard().count_line_breaks(),
//!     Rule::regex("number", r"\d+")
//!         .value(|raw, _| TokenValue::from(raw.parse::<i64>().ok())),
//!     Rule::new("keyword", Match::keywords(["if", "else"])).word_bound(),
//!     Rule::regex("identifier", r"\w+"),
//!     Rule::literal("open", "(").push("nested"),
//! ];
//! # assert_eq!(rules.len(), 5);
//! ```
//!

pub mod pattern;
pub mod value;

use std::sync::Arc;

pub use self::{
    pattern::Match,
    value::{Groups, TokenValue, ValueFn},
};

///
/// Matches any leftover input: a run of word characters,
/// or a run of anything else.
///
pub const CATCH_ALL: &str = r"\w+|\W+";

///
/// How a match moves the line counter.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineBreaks {
    ///
    /// The match never spans lines: only the column moves.
    ///
    #[default]
    None,

    ///
    /// Count `\r`, `\n`, `\r\n` and `\n\r` in the matched text.
    ///
    Scan,

    ///
    /// The match is exactly this many line breaks,
    /// whatever its text says.
    ///
    Fixed(usize),
}

///
/// What happens to the active mode after a rule fires.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Transition {
    #[default]
    None,

    ///
    /// Replace the active mode.
    ///
    SwitchTo(String),

    ///
    /// Suspend the active mode on the stack, then switch.
    ///
    Push(String),

    ///
    /// Resume the most recently suspended mode.
    ///
    Pop,
}

///
/// Everything about a rule besides its name and pattern.
///
#[derive(Debug, Clone, Default)]
pub struct RuleOptions {
    ///
    /// Matches are consumed but no token is produced.
    ///
    pub discard: bool,

    ///
    /// Matches produce an error token, and scanning stops.
    ///
    pub error: bool,

    ///
    /// The match must be followed by a word boundary.
    ///
    pub word_bound: bool,

    pub line_breaks: LineBreaks,
    pub transition: Transition,
    pub value: Option<ValueFn>,
}

///
/// One named rule in a mode.
///
/// A rule with several variants gives each its own capture groups,
/// so variants with differently-shaped patterns (e.g. hex and decimal
/// numbers) can share a token name and a value function.
///
#[derive(Debug, Clone)]
pub struct Rule {
    pub(crate) name: Arc<str>,
    pub(crate) variants: Vec<Match>,
    pub(crate) options: RuleOptions,
}

impl Rule {
    pub fn new(name: impl Into<Arc<str>>, pattern: impl Into<Match>) -> Self {
        Self {
            name: name.into(),
            variants: vec![pattern.into()],
            options: RuleOptions::default(),
        }
    }

    ///
    /// A rule matching `text` verbatim.
    ///
    pub fn literal(name: impl Into<Arc<str>>, text: impl Into<String>) -> Self {
        Self::new(name, Match::Literal(text.into()))
    }

    ///
    /// A rule matching a regular expression.
    ///
    pub fn regex(name: impl Into<Arc<str>>, pattern: impl Into<String>) -> Self {
        Self::new(name, Match::Regex(pattern.into()))
    }

    ///
    /// A rule with several variants, tried in order.
    ///
    pub fn variants<I, M>(name: impl Into<Arc<str>>, variants: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Match>,
    {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
            options: RuleOptions::default(),
        }
    }

    ///
    /// An error rule that swallows any leftover input (see [CATCH_ALL]).
    ///
    /// Put it last: it matches anything.
    ///
    pub fn catch_all(name: impl Into<Arc<str>>) -> Self {
        Self::regex(name, CATCH_ALL).error()
    }

    pub fn discard(mut self) -> Self {
        self.options.discard = true;
        self
    }

    pub fn error(mut self) -> Self {
        self.options.error = true;
        self
    }

    pub fn word_bound(mut self) -> Self {
        self.options.word_bound = true;
        self
    }

    ///
    /// Each match counts as exactly `n` line breaks (`0` means none).
    ///
    pub fn line_breaks(mut self, n: usize) -> Self {
        self.options.line_breaks = match n {
            0 => LineBreaks::None,
            n => LineBreaks::Fixed(n),
        };
        self
    }

    ///
    /// Count the line breaks inside each match.
    ///
    pub fn count_line_breaks(mut self) -> Self {
        self.options.line_breaks = LineBreaks::Scan;
        self
    }

    pub fn switch_to(mut self, mode: impl Into<String>) -> Self {
        self.options.transition = Transition::SwitchTo(mode.into());
        self
    }

    pub fn push(mut self, mode: impl Into<String>) -> Self {
        self.options.transition = Transition::Push(mode.into());
        self
    }

    pub fn pop(mut self) -> Self {
        self.options.transition = Transition::Pop;
        self
    }

    ///
    /// Compute token values with `f` instead of using the matched text.
    ///
    pub fn value<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &Groups<'_>) -> TokenValue + Send + Sync + 'static,
    {
        self.options.value = Some(ValueFn::new(f));
        self
    }

    pub fn with_options(mut self, options: RuleOptions) -> Self {
        self.options = options;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patterns(&self) -> &[Match] {
        &self.variants
    }

    pub fn options(&self) -> &RuleOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::{LineBreaks, Match, Rule, Transition};

    #[test]
    fn builder() {
        let rule = Rule::regex("ws", r"\s+").discard().count_line_breaks();
        assert_eq!(rule.name(), "ws");
        assert_eq!(rule.patterns(), &[Match::regex(r"\s+")]);
        assert!(rule.options().discard);
        assert_eq!(rule.options().line_breaks, LineBreaks::Scan);

        assert_eq!(
            Rule::literal("nl", "\n").line_breaks(1).options().line_breaks,
            LineBreaks::Fixed(1)
        );
        assert_eq!(
            Rule::literal("nl", "\n").line_breaks(0).options().line_breaks,
            LineBreaks::None
        );
    }

    #[test]
    fn the_last_transition_wins() {
        let rule = Rule::literal("open", "{").push("block").pop();
        assert_eq!(rule.options().transition, Transition::Pop);

        let rule = Rule::literal("quote", "\"").switch_to("string");
        assert_eq!(
            rule.options().transition,
            Transition::SwitchTo("string".to_string())
        );
    }

    #[test]
    fn catch_all_is_an_error_rule() {
        let rule = Rule::catch_all("error");
        assert!(rule.options().error);
        assert!(!rule.options().discard);
    }
}
