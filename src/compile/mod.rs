//!
//! ## Rule Compiler
//!
//! Turns the rules of one mode into a single combined pattern
//! and the dispatch table that tells which rule fired.
//!
//! Every rule variant becomes one top-level alternative, wrapped
//! in its own capture group:
//!
//! ```text
//! (ws)|(number)|((?:if|else)\b)|(\w+)
//! ```
//!
//! The groups *inside* a variant come right after its wrapper,
//! so a variant owns the contiguous slots `start..start + width`,
//! where `width` counts the wrapper plus the variant's own groups.
//!

pub mod modes;

use std::{
    collections::{BTreeMap, HashSet},
    sync::Arc,
};

use regex_automata::{
    meta::Regex,
    util::{captures::Captures, syntax},
    Span,
};

pub use self::modes::{Mode, ModeTable};
use crate::{
    error::ConfigError,
    rules::{Groups, LineBreaks, Rule, Transition, ValueFn},
};

///
/// Index of a compiled mode in its [ModeTable].
///
pub type ModeId = usize;

///
/// What the active mode does after a rule fires,
/// with mode names already resolved.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jump {
    Stay,
    Switch(ModeId),
    Push(ModeId),
    Pop,
}

///
/// The capture slots belonging to one variant of a rule.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    ///
    /// Index of the group wrapping the whole variant.
    ///
    pub start: usize,

    ///
    /// The wrapper plus every group inside the variant.
    ///
    pub width: usize,

    ///
    /// Named groups, with their index relative to `start`.
    ///
    pub names: Vec<(String, usize)>,
}

impl Slot {
    ///
    /// The groups of this variant, as seen by a value function.
    ///
    pub(crate) fn groups<'b>(&'b self, buffer: &'b str, caps: &Captures) -> Groups<'b> {
        let text = |relative: usize| {
            caps.get_group(self.start + relative)
                .map(|span| &buffer[span.start..span.end])
        };

        if self.names.is_empty() {
            return Groups::Positional((1..self.width).map(text).collect());
        }

        Groups::Named(
            self.names
                .iter()
                .map(|(name, relative)| (name.as_str(), text(*relative)))
                .collect::<BTreeMap<_, _>>(),
        )
    }
}

///
/// Everything the scanner needs to know about one rule.
///
#[derive(Debug, Clone)]
pub struct DispatchEntry {
    pub kind: Arc<str>,
    pub slots: Vec<Slot>,
    pub discard: bool,
    pub error: bool,
    pub line_breaks: LineBreaks,
    pub jump: Jump,
    pub value: Option<ValueFn>,
}

impl DispatchEntry {
    ///
    /// Whether this rule changes the active mode when it fires.
    ///
    pub fn transitions(&self) -> bool {
        self.jump != Jump::Stay
    }
}

///
/// The rules of one mode, compiled.
///
#[derive(Debug, Clone)]
pub struct CompiledMode {
    pub(crate) name: Arc<str>,
    pub(crate) regex: Regex,
    pub(crate) pattern: String,
    pub(crate) dispatch: Vec<DispatchEntry>,
}

impl CompiledMode {
    ///
    /// Compiles `rules` under the mode `name`.
    ///
    /// Transition targets are looked up with `resolve`.
    ///
    pub fn compile(
        name: &str,
        rules: &[Rule],
        resolve: impl Fn(&str) -> Option<ModeId>,
    ) -> Result<Self, ConfigError> {
        if rules.is_empty() {
            return Err(ConfigError::EmptyMode(name.to_string()));
        }

        let mut seen = HashSet::new();
        let mut alternatives = vec![];
        let mut dispatch = vec![];

        // Group 0 is the whole match.
        let mut next_slot = 1;

        for rule in rules {
            if !seen.insert(rule.name.clone()) {
                return Err(ConfigError::DuplicateRule {
                    rule: rule.name.to_string(),
                    mode: name.to_string(),
                });
            }

            if rule.variants.is_empty() {
                return Err(ConfigError::MalformedRule {
                    rule: rule.name.to_string(),
                    reason: "a rule needs at least one pattern",
                });
            }

            let mut slots = vec![];
            for variant in &rule.variants {
                let fragment =
                    variant
                        .to_fragment()
                        .map_err(|reason| ConfigError::MalformedRule {
                            rule: rule.name.to_string(),
                            reason,
                        })?;

                let parsed = regex::Regex::new(&fragment).map_err(|source| {
                    ConfigError::InvalidPattern {
                        rule: rule.name.to_string(),
                        source,
                    }
                })?;

                let names = parsed
                    .capture_names()
                    .enumerate()
                    .filter_map(|(i, name)| name.map(|name| (name.to_string(), i)))
                    .collect();

                let slot = Slot {
                    start: next_slot,
                    width: parsed.captures_len(),
                    names,
                };
                next_slot += slot.width;

                if rule.options.word_bound {
                    alternatives.push(format!(r"((?:{fragment})\b)"));
                } else {
                    alternatives.push(format!("({fragment})"));
                }
                slots.push(slot);
            }

            let options = &rule.options;
            let unknown = |mode: &str| ConfigError::UnknownMode {
                rule: rule.name.to_string(),
                mode: mode.to_string(),
            };

            let jump = match &options.transition {
                Transition::None => Jump::Stay,
                Transition::Pop => Jump::Pop,
                Transition::SwitchTo(mode) => {
                    Jump::Switch(resolve(mode).ok_or_else(|| unknown(mode))?)
                }
                Transition::Push(mode) => Jump::Push(resolve(mode).ok_or_else(|| unknown(mode))?),
            };

            dispatch.push(DispatchEntry {
                kind: rule.name.clone(),
                slots,
                discard: options.discard,
                error: options.error,
                line_breaks: options.line_breaks,
                jump,
                value: options.value.clone(),
            });
        }

        let pattern = alternatives.join("|");
        let regex = Regex::builder()
            .syntax(syntax::Config::new().multi_line(true).crlf(true))
            .build(&pattern)
            .map_err(|source| ConfigError::Build {
                mode: name.to_string(),
                source,
            })?;

        if regex.captures_len() != next_slot {
            return Err(ConfigError::SlotMismatch {
                mode: name.to_string(),
                expected: next_slot,
                found: regex.captures_len(),
            });
        }

        Ok(Self {
            name: name.into(),
            regex,
            pattern,
            dispatch,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    ///
    /// The combined pattern, as handed to the regex engine.
    ///
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn rules(&self) -> impl Iterator<Item = &DispatchEntry> {
        self.dispatch.iter()
    }

    ///
    /// Finds the rule (and variant) behind a successful search,
    /// with the span it matched.
    ///
    /// Entries are walked in declaration order, so the
    /// first declared rule wins.
    ///
    pub(crate) fn dispatch(&self, caps: &Captures) -> Option<(&DispatchEntry, usize, Span)> {
        self.dispatch.iter().find_map(|entry| {
            entry
                .slots
                .iter()
                .enumerate()
                .find_map(|(variant, slot)| {
                    caps.get_group(slot.start).map(|span| (variant, span))
                })
                .map(|(variant, span)| (entry, variant, span))
        })
    }
}

#[cfg(test)]
mod tests {
    use regex_automata::{Anchored, Input};

    use super::{CompiledMode, Jump, ModeId, Slot};
    use crate::{
        error::ConfigError,
        rules::{Groups, Match, Rule},
    };

    fn no_modes(_: &str) -> Option<ModeId> {
        None
    }

    #[test]
    fn slots_are_contiguous() -> anyhow::Result<()> {
        let mode = CompiledMode::compile(
            "main",
            &[
                Rule::regex("pair", r"(\d)-(\d)"),
                Rule::variants("num", [Match::regex(r"0x([0-9a-f]+)"), Match::regex(r"\d+")]),
                Rule::regex("named", r"(?<left>\w)=(?<right>\w)"),
            ],
            no_modes,
        )?;

        let slots = mode
            .rules()
            .flat_map(|entry| entry.slots.iter().cloned())
            .collect::<Vec<_>>();

        assert_eq!(
            slots,
            vec![
                Slot { start: 1, width: 3, names: vec![] },
                Slot { start: 4, width: 2, names: vec![] },
                Slot { start: 6, width: 1, names: vec![] },
                Slot {
                    start: 7,
                    width: 3,
                    names: vec![("left".to_string(), 1), ("right".to_string(), 2)]
                },
            ]
        );
        assert_eq!(mode.regex.captures_len(), 10);

        Ok(())
    }

    #[test]
    fn dispatch_picks_the_first_rule() -> anyhow::Result<()> {
        let mode = CompiledMode::compile(
            "main",
            &[
                Rule::regex("pair", r"(\d)-(\d)"),
                Rule::variants("num", [Match::regex(r"0x([0-9a-f]+)"), Match::regex(r"\d+")]),
            ],
            no_modes,
        )?;

        let buffer = "1-2 0xff 42";
        let mut caps = mode.regex.create_captures();
        let mut at = |offset: usize| {
            let input = Input::new(buffer)
                .span(offset..buffer.len())
                .anchored(Anchored::Yes);
            mode.regex.search_captures(&input, &mut caps);
            mode.dispatch(&caps)
                .map(|(entry, variant, span)| {
                    let groups = entry.slots[variant].groups(buffer, &caps);
                    (entry.kind.to_string(), variant, span.start..span.end, groups)
                })
        };

        assert_eq!(
            at(0),
            Some((
                "pair".to_string(),
                0,
                0..3,
                Groups::Positional(vec![Some("1"), Some("2")])
            ))
        );
        assert_eq!(
            at(4),
            Some(("num".to_string(), 0, 4..8, Groups::Positional(vec![Some("ff")])))
        );
        assert_eq!(
            at(9),
            Some(("num".to_string(), 1, 9..11, Groups::Positional(vec![])))
        );

        // Anchored: never skips ahead.
        assert_eq!(at(3), None);

        Ok(())
    }

    #[test]
    fn named_groups_are_keyed_by_name() -> anyhow::Result<()> {
        let mode = CompiledMode::compile(
            "main",
            &[
                Rule::regex("pair", r"(\d)-(\d)"),
                Rule::regex("assign", r"(?<left>\w+)=(?<right>\w+)?;"),
            ],
            no_modes,
        )?;

        let buffer = "x=;";
        let mut caps = mode.regex.create_captures();
        let input = Input::new(buffer).anchored(Anchored::Yes);
        mode.regex.search_captures(&input, &mut caps);

        let Some((entry, variant, _)) = mode.dispatch(&caps) else {
            anyhow::bail!("nothing matched");
        };

        assert_eq!(&*entry.kind, "assign");
        assert_eq!(
            entry.slots[variant].groups(buffer, &caps),
            Groups::Named([("left", Some("x")), ("right", None)].into_iter().collect())
        );

        Ok(())
    }

    #[test]
    fn transitions_are_resolved() -> anyhow::Result<()> {
        let resolve = |mode: &str| (mode == "string").then_some(1);
        let mode = CompiledMode::compile(
            "main",
            &[
                Rule::literal("quote", "\"").push("string"),
                Rule::literal("close", ")").pop(),
                Rule::literal("word", "w"),
            ],
            resolve,
        )?;

        let jumps = mode.rules().map(|entry| entry.jump).collect::<Vec<_>>();
        assert_eq!(jumps, vec![Jump::Push(1), Jump::Pop, Jump::Stay]);

        let unknown = CompiledMode::compile(
            "main",
            &[Rule::literal("quote", "\"").switch_to("nowhere")],
            resolve,
        );
        assert!(matches!(
            unknown,
            Err(ConfigError::UnknownMode { mode, .. }) if mode == "nowhere"
        ));

        Ok(())
    }

    #[test]
    fn malformed_tables() {
        assert!(matches!(
            CompiledMode::compile("main", &[], no_modes),
            Err(ConfigError::EmptyMode(_))
        ));

        assert!(matches!(
            CompiledMode::compile(
                "main",
                &[Rule::variants("none", Vec::<Match>::new())],
                no_modes
            ),
            Err(ConfigError::MalformedRule { .. })
        ));

        assert!(matches!(
            CompiledMode::compile(
                "main",
                &[Rule::literal("a", "a"), Rule::literal("a", "b")],
                no_modes
            ),
            Err(ConfigError::DuplicateRule { .. })
        ));

        assert!(matches!(
            CompiledMode::compile("main", &[Rule::regex("bad", "(")], no_modes),
            Err(ConfigError::InvalidPattern { .. })
        ));

        assert!(matches!(
            CompiledMode::compile(
                "main",
                &[Rule::regex("a", "(?<x>a)"), Rule::regex("b", "(?<x>b)")],
                no_modes
            ),
            Err(ConfigError::Build { .. })
        ));
    }
}
