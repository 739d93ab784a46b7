//!
//! ## Token values
//!
//! By default a token's value is the text it matched.
//! A rule can instead compute a value from the match
//! and its capture groups with a [ValueFn].
//!

use std::{collections::BTreeMap, fmt::Debug, sync::Arc};

///
/// The semantic value carried by a token.
///
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<TokenValue>),
    Map(BTreeMap<String, TokenValue>),

    ///
    /// No value, e.g. an optional capture group that did not participate.
    ///
    Nothing,
}

impl TokenValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for TokenValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for TokenValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for TokenValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<TokenValue>> for TokenValue {
    fn from(value: Vec<TokenValue>) -> Self {
        Self::List(value)
    }
}

impl<T: Into<TokenValue>> From<Option<T>> for TokenValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Nothing)
    }
}

///
/// The capture groups of the variant that fired, handed to a [ValueFn].
///
/// Indices and names are relative to the rule's own pattern:
/// they do not depend on where the rule sits in its mode.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Groups<'a> {
    ///
    /// Sub-groups in capture order (the whole match is not included).
    ///
    Positional(Vec<Option<&'a str>>),

    ///
    /// Used when the pattern declares named groups: only those appear.
    ///
    Named(BTreeMap<&'a str, Option<&'a str>>),
}

impl<'a> Groups<'a> {
    ///
    /// The `index`-th sub-group (0-based), if it participated in the match.
    ///
    pub fn get(&self, index: usize) -> Option<&'a str> {
        match self {
            Groups::Positional(groups) => groups.get(index).copied().flatten(),
            Groups::Named(_) => None,
        }
    }

    ///
    /// The group called `name`, if it participated in the match.
    ///
    pub fn name(&self, name: &str) -> Option<&'a str> {
        match self {
            Groups::Named(groups) => groups.get(name).copied().flatten(),
            Groups::Positional(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Groups::Positional(groups) => groups.len(),
            Groups::Named(groups) => groups.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

///
/// Computes a token's value from its raw text and capture groups.
///
/// Shared behind an [Arc] so a compiled lexer can be
/// used from several threads at once.
///
#[derive(Clone)]
pub struct ValueFn(Arc<dyn Fn(&str, &Groups<'_>) -> TokenValue + Send + Sync>);

impl ValueFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, &Groups<'_>) -> TokenValue + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub(crate) fn call(&self, raw: &str, groups: &Groups<'_>) -> TokenValue {
        (self.0)(raw, groups)
    }
}

impl Debug for ValueFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ValueFn(..)")
    }
}
