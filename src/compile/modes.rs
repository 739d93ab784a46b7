//!
//! ## Mode Table
//!
//! A lexer with several modes (e.g. code, and strings inside code)
//! compiles each mode separately, once every mode name is known.
//!

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use super::{CompiledMode, ModeId};
use crate::{error::ConfigError, rules::Rule};

///
/// The name of the mode used by a single-mode lexer.
///
pub const MAIN: &str = "main";

///
/// A named set of rules.
///
#[derive(Debug, Clone)]
pub struct Mode {
    pub(crate) name: String,
    pub(crate) rules: Vec<Rule>,
}

impl Mode {
    pub fn new(name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            name: name.into(),
            rules: rules.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

///
/// Every compiled mode, plus the names of the rules that
/// can show up as token kinds.
///
#[derive(Debug, Clone)]
pub struct ModeTable {
    pub(crate) modes: Vec<CompiledMode>,
    pub(crate) owned: HashSet<Arc<str>>,
}

impl ModeTable {
    ///
    /// Compiles several modes: the first one is where scanning starts.
    ///
    /// Only rules that produce tokens (i.e. are not discarded)
    /// are owned by the table.
    ///
    pub fn compile(modes: &[Mode]) -> Result<Self, ConfigError> {
        if modes.is_empty() {
            return Err(ConfigError::NoModes);
        }

        let mut index = HashMap::new();
        for (id, mode) in modes.iter().enumerate() {
            if index.insert(mode.name.as_str(), id).is_some() {
                return Err(ConfigError::DuplicateMode(mode.name.clone()));
            }
        }

        let resolve = |name: &str| index.get(name).copied();
        let compiled = modes
            .iter()
            .map(|mode| CompiledMode::compile(&mode.name, &mode.rules, resolve))
            .collect::<Result<Vec<_>, _>>()?;

        let owned = modes
            .iter()
            .flat_map(|mode| mode.rules.iter())
            .filter(|rule| !rule.options.discard)
            .map(|rule| rule.name.clone())
            .collect();

        Ok(Self {
            modes: compiled,
            owned,
        })
    }

    ///
    /// Compiles a lexer without modes.
    ///
    /// Its rules cannot transition, and every rule,
    /// discarded or not, is owned by the table.
    ///
    pub fn single(rules: &[Rule]) -> Result<Self, ConfigError> {
        let mode = CompiledMode::compile(MAIN, rules, |_| None)?;
        let owned = rules.iter().map(|rule| rule.name.clone()).collect();

        Ok(Self {
            modes: vec![mode],
            owned,
        })
    }

    pub(crate) fn get(&self, id: ModeId) -> &CompiledMode {
        &self.modes[id]
    }

    pub fn has(&self, name: &str) -> bool {
        self.owned.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modes.iter().map(CompiledMode::name)
    }
}
