//! Candidate-value validation against a rule set.
//!
//! The validator is a pure function: given an option name (or a batch of
//! name/value pairs), a candidate value, and a [`RuleSet`], it decides
//! admissibility. Integer and float candidates are admitted by type
//! wildcards, string candidates by exact literals or combo wildcards
//! (`bob-int()` admitting `"bob-10"`).
//!
//! # Examples
//!
//! ```
//! use optgate_core::{validate_value, OptValue, RuleSet};
//!
//! let rules = RuleSet::new().permit("opt3", ["bob-int()", "flop", "chum"]);
//!
//! assert!(validate_value("opt3", &OptValue::from("bob-10"), &rules));
//! assert!(validate_value("opt3", &OptValue::from("flop"), &rules));
//! // "flop" is a literal, not a combo wildcard.
//! assert!(!validate_value("opt3", &OptValue::from("flop-02"), &rules));
//! ```

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::rules::{ComboKind, NumberKind, RuleSet, RuleSpec};
use crate::value::OptValue;

/// A plain option token: one or more alphanumeric/underscore/hyphen chars.
static OPTION_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z_-]+$").unwrap());

/// A combo value: `<prefix>-<number>`. The prefix is greedy, so `a-1-2`
/// splits as prefix `a-1`, number `2`.
static COMBO_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9A-Za-z_-]+)-([0-9]+(?:\.[0-9]+)?)$").unwrap());

/// What is being validated: a single option or a batch of them.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    /// One option name with its candidate value.
    Single(&'a str, &'a OptValue),
    /// A mapping of option names to candidate values.
    Batch(&'a BTreeMap<String, OptValue>),
}

/// Validation outcome, never partial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Outcome for a single option (also used for empty and one-entry
    /// batches).
    Single(bool),
    /// Per-option outcomes for a batch, keyed by option name.
    Batch(BTreeMap<String, bool>),
}

impl Verdict {
    /// Returns true when every covered option was admitted.
    pub fn all_admitted(&self) -> bool {
        match self {
            Verdict::Single(ok) => *ok,
            Verdict::Batch(verdicts) => verdicts.values().all(|ok| *ok),
        }
    }
}

/// Validates a candidate against a rule set.
///
/// Batches with two or more entries are validated per key and collected into
/// [`Verdict::Batch`], in the iteration order of the input mapping. A
/// one-entry batch unwraps to the scalar case; an empty batch is rejected
/// outright.
///
/// An empty rule set admits everything. The bypass applies per key, so a
/// batch against an empty rule set still produces a per-option verdict map
/// rather than one blanket answer.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use optgate_core::{validate, Candidate, Verdict, OptValue, RuleSet};
///
/// let rules = RuleSet::new()
///     .permit("opt1", ["int()"])
///     .permit("opt3", ["bob-int()", "flop", "chum"]);
///
/// let batch: BTreeMap<String, OptValue> = [
///     ("opt1".to_string(), OptValue::from("super")),
///     ("opt3".to_string(), OptValue::from("bob-1")),
/// ]
/// .into();
///
/// let Verdict::Batch(verdicts) = validate(Candidate::Batch(&batch), &rules) else {
///     panic!("two-entry batch yields a batch verdict");
/// };
/// assert_eq!(verdicts["opt1"], false);
/// assert_eq!(verdicts["opt3"], true);
/// ```
pub fn validate(candidate: Candidate<'_>, rules: &RuleSet) -> Verdict {
    match candidate {
        Candidate::Single(key, value) => Verdict::Single(validate_value(key, value, rules)),
        Candidate::Batch(batch) => match batch.len() {
            0 => Verdict::Single(false),
            1 => {
                let (key, value) = batch.iter().next().unwrap();
                Verdict::Single(validate_value(key, value, rules))
            }
            _ => Verdict::Batch(
                batch
                    .iter()
                    .map(|(key, value)| (key.clone(), validate_value(key, value, rules)))
                    .collect(),
            ),
        },
    }
}

/// Validates one candidate value for one option.
///
/// Returns true when the rule set is empty, false when the option is not
/// constrained by the rule set, and otherwise dispatches on the value kind.
pub fn validate_value(key: &str, value: &OptValue, rules: &RuleSet) -> bool {
    if rules.is_empty() {
        return true;
    }

    let Some(specs) = rules.get(key) else {
        trace!(option = %key, "option not in rule set");
        return false;
    };

    match value {
        OptValue::Int(_) => specs.iter().any(|spec| {
            matches!(
                spec,
                RuleSpec::TypeWildcard(NumberKind::Int | NumberKind::Number)
            )
        }),
        OptValue::Float(_) => specs.iter().any(|spec| {
            matches!(
                spec,
                RuleSpec::TypeWildcard(NumberKind::Float | NumberKind::Number)
            )
        }),
        OptValue::Text(text) => validate_text(text, specs),
    }
}

fn validate_text(text: &str, specs: &[RuleSpec]) -> bool {
    if OPTION_TOKEN_RE.is_match(text)
        && specs
            .iter()
            .any(|spec| matches!(spec, RuleSpec::Literal(literal) if literal == text))
    {
        return true;
    }

    let Some(caps) = COMBO_VALUE_RE.captures(text) else {
        return false;
    };
    let prefix = &caps[1];
    let wanted = if caps[2].contains('.') {
        ComboKind::Float
    } else {
        ComboKind::Int
    };

    specs.iter().any(|spec| {
        matches!(
            spec,
            RuleSpec::Combo { prefix: p, kind } if p == prefix && *kind == wanted
        )
    })
}
