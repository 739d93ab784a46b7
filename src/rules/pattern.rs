//!
//! ## Patterns
//!
//! What a rule matches: literal text, a regular expression,
//! or an ordered choice between several of those.
//!
//! Every [Match] normalizes into a fragment of `regex` syntax,
//! ready to be spliced into a mode's combined pattern.
//!

///
/// The text a rule (or one of its variants) matches.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match {
    ///
    /// Matches this exact text: nothing in it is special.
    ///
    Literal(String),

    ///
    /// A regular expression, in the syntax of the `regex` crate.
    ///
    Regex(String),

    ///
    /// Any one of these, tried in order.
    ///
    OneOf(Vec<Match>),
}

impl Match {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::Regex(pattern.into())
    }

    ///
    /// An ordered choice: the first alternative that
    /// matches wins, even if a later one would match more.
    ///
    pub fn one_of<I, M>(alternatives: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Match>,
    {
        Self::OneOf(alternatives.into_iter().map(Into::into).collect())
    }

    ///
    /// A choice between literal words, e.g. a keyword list.
    ///
    pub fn keywords<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf(words.into_iter().map(|w| Self::Literal(w.into())).collect())
    }

    ///
    /// Normalizes this into a `regex` fragment.
    ///
    /// Literal text is escaped so it matches verbatim, and choices are
    /// joined by alternation in declaration order.
    ///
    pub(crate) fn to_fragment(&self) -> Result<String, &'static str> {
        match self {
            Match::Literal(text) => Ok(regex::escape(text)),
            Match::Regex(pattern) => Ok(pattern.clone()),
            Match::OneOf(alternatives) if alternatives.is_empty() => {
                Err("a choice needs at least one alternative")
            }
            Match::OneOf(alternatives) => {
                let fragments = alternatives
                    .iter()
                    .map(Match::to_fragment)
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(fragments.join("|"))
            }
        }
    }
}

///
/// Plain strings are literals.
///
impl From<&str> for Match {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for Match {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

///
/// An already-compiled [regex::Regex] contributes its source.
///
impl From<regex::Regex> for Match {
    fn from(value: regex::Regex) -> Self {
        Self::Regex(value.as_str().to_string())
    }
}

impl From<&regex::Regex> for Match {
    fn from(value: &regex::Regex) -> Self {
        Self::Regex(value.as_str().to_string())
    }
}
