//! Declarative rule sets for admissible option values.
//!
//! A rule set maps each permitted option name to the specifications a
//! candidate value may satisfy. Specifications are written as plain tokens —
//! `"red"` (literal), `int()` / `float()` / `number()` (type wildcards), or
//! `bob-int()` / `bob-float()` (combo wildcards matching `bob-<number>`
//! strings) — and parsed once, at rule-set construction, into [`RuleSpec`].
//!
//! # Examples
//!
//! ```
//! use optgate_core::{RuleSet, RuleSpec, NumberKind};
//!
//! let rules = RuleSet::new()
//!     .permit("opt1", ["int()"])
//!     .permit("opt3", ["bob-int()", "flop", "chum"]);
//!
//! assert_eq!(
//!     rules.get("opt1"),
//!     Some(&[RuleSpec::TypeWildcard(NumberKind::Int)][..])
//! );
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Combo-wildcard prefixes use the same alphabet as plain option tokens.
static PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z_-]+$").unwrap());

/// Numeric kind admitted by a type wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberKind {
    /// `int()` — integers only
    Int,
    /// `float()` — floating-point only
    Float,
    /// `number()` — integers and floating-point
    Number,
}

/// Numeric kind admitted by a combo wildcard's suffix.
///
/// Combo wildcards only come in `-int()` and `-float()` forms; a
/// `prefix-number()` token is a literal, not a wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComboKind {
    /// `<prefix>-int()` — integer suffix, no decimal point
    Int,
    /// `<prefix>-float()` — suffix with a decimal point
    Float,
}

/// A single admissible-value specification.
///
/// Parsed from its token form with [`RuleSpec::parse`]; `Display` renders
/// the token back, so the string round trip is lossless and serde uses the
/// token form directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleSpec {
    /// Exact string match.
    Literal(String),
    /// Any value of the given numeric kind.
    TypeWildcard(NumberKind),
    /// A `<prefix>-<number>` string whose suffix has the given kind.
    Combo {
        /// Literal prefix before the numeric suffix.
        prefix: String,
        /// Required kind of the numeric suffix.
        kind: ComboKind,
    },
}

impl RuleSpec {
    /// Parses a specification token.
    ///
    /// Parsing is total: any token that is not a recognized wildcard or
    /// combo form is an exact-match literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use optgate_core::{RuleSpec, NumberKind, ComboKind};
    ///
    /// assert_eq!(RuleSpec::parse("number()"), RuleSpec::TypeWildcard(NumberKind::Number));
    /// assert_eq!(
    ///     RuleSpec::parse("bob-int()"),
    ///     RuleSpec::Combo { prefix: "bob".into(), kind: ComboKind::Int }
    /// );
    /// assert_eq!(RuleSpec::parse("flop"), RuleSpec::Literal("flop".into()));
    /// ```
    pub fn parse(token: &str) -> Self {
        match token {
            "int()" => return RuleSpec::TypeWildcard(NumberKind::Int),
            "float()" => return RuleSpec::TypeWildcard(NumberKind::Float),
            "number()" => return RuleSpec::TypeWildcard(NumberKind::Number),
            _ => {}
        }

        for (suffix, kind) in [("-int()", ComboKind::Int), ("-float()", ComboKind::Float)] {
            if let Some(prefix) = token.strip_suffix(suffix) {
                if PREFIX_RE.is_match(prefix) {
                    return RuleSpec::Combo {
                        prefix: prefix.to_string(),
                        kind,
                    };
                }
            }
        }

        RuleSpec::Literal(token.to_string())
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSpec::Literal(s) => f.write_str(s),
            RuleSpec::TypeWildcard(NumberKind::Int) => f.write_str("int()"),
            RuleSpec::TypeWildcard(NumberKind::Float) => f.write_str("float()"),
            RuleSpec::TypeWildcard(NumberKind::Number) => f.write_str("number()"),
            RuleSpec::Combo {
                prefix,
                kind: ComboKind::Int,
            } => write!(f, "{prefix}-int()"),
            RuleSpec::Combo {
                prefix,
                kind: ComboKind::Float,
            } => write!(f, "{prefix}-float()"),
        }
    }
}

impl From<String> for RuleSpec {
    fn from(token: String) -> Self {
        RuleSpec::parse(&token)
    }
}

impl From<&str> for RuleSpec {
    fn from(token: &str) -> Self {
        RuleSpec::parse(token)
    }
}

impl From<RuleSpec> for String {
    fn from(spec: RuleSpec) -> Self {
        spec.to_string()
    }
}

/// Per-option admissible-value specifications.
///
/// Immutable after construction aside from the builder methods. An empty
/// rule set disables validation entirely: every candidate is admitted. This
/// is the deliberate "no validation configured" escape hatch.
///
/// The serde representation is the plain token mapping, so a rule set can be
/// declared as JSON:
///
/// ```
/// use optgate_core::RuleSet;
///
/// let rules: RuleSet =
///     serde_json::from_str(r#"{"opt1": ["int()"], "opt3": ["bob-int()", "flop"]}"#).unwrap();
/// assert_eq!(rules.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: BTreeMap<String, Vec<RuleSpec>>,
}

impl RuleSet {
    /// Creates an empty rule set (validation disabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option with specifications given in token form.
    ///
    /// # Examples
    ///
    /// ```
    /// use optgate_core::RuleSet;
    ///
    /// let rules = RuleSet::new().permit("opt2", ["yellow", "red", "blue"]);
    /// assert!(!rules.is_empty());
    /// ```
    pub fn permit<I, S>(mut self, option: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rules.insert(
            option.into(),
            tokens
                .into_iter()
                .map(|token| RuleSpec::parse(token.as_ref()))
                .collect(),
        );
        self
    }

    /// Adds an option with already-parsed specifications.
    pub fn permit_specs(
        mut self,
        option: impl Into<String>,
        specs: impl IntoIterator<Item = RuleSpec>,
    ) -> Self {
        self.rules.insert(option.into(), specs.into_iter().collect());
        self
    }

    /// Returns the specifications for an option, if it is permitted.
    pub fn get(&self, option: &str) -> Option<&[RuleSpec]> {
        self.rules.get(option).map(Vec::as_slice)
    }

    /// Returns true when no options are constrained (validation disabled).
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the number of constrained options.
    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

impl FromIterator<(String, Vec<RuleSpec>)> for RuleSet {
    fn from_iter<T: IntoIterator<Item = (String, Vec<RuleSpec>)>>(iter: T) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_wildcards() {
        assert_eq!(RuleSpec::parse("int()"), RuleSpec::TypeWildcard(NumberKind::Int));
        assert_eq!(
            RuleSpec::parse("float()"),
            RuleSpec::TypeWildcard(NumberKind::Float)
        );
        assert_eq!(
            RuleSpec::parse("number()"),
            RuleSpec::TypeWildcard(NumberKind::Number)
        );
    }

    #[test]
    fn test_parse_combo_wildcards() {
        assert_eq!(
            RuleSpec::parse("bob-int()"),
            RuleSpec::Combo {
                prefix: "bob".into(),
                kind: ComboKind::Int
            }
        );
        assert_eq!(
            RuleSpec::parse("snake_case-2-float()"),
            RuleSpec::Combo {
                prefix: "snake_case-2".into(),
                kind: ComboKind::Float
            }
        );
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(RuleSpec::parse("flop"), RuleSpec::Literal("flop".into()));
        // No number() combo form exists.
        assert_eq!(
            RuleSpec::parse("bob-number()"),
            RuleSpec::Literal("bob-number()".into())
        );
        // Empty prefix is not a combo.
        assert_eq!(RuleSpec::parse("-int()"), RuleSpec::Literal("-int()".into()));
    }

    #[test]
    fn test_token_round_trip() {
        for token in ["int()", "float()", "number()", "bob-int()", "a-1-float()", "chum"] {
            assert_eq!(RuleSpec::parse(token).to_string(), token);
        }
    }

    #[test]
    fn test_rule_set_json() {
        let rules: RuleSet =
            serde_json::from_str(r#"{"opt3": ["bob-int()", "flop", "chum"]}"#).unwrap();
        assert_eq!(
            rules.get("opt3"),
            Some(
                &[
                    RuleSpec::Combo {
                        prefix: "bob".into(),
                        kind: ComboKind::Int
                    },
                    RuleSpec::Literal("flop".into()),
                    RuleSpec::Literal("chum".into()),
                ][..]
            )
        );

        let json = serde_json::to_string(&rules).unwrap();
        assert_eq!(json, r#"{"opt3":["bob-int()","flop","chum"]}"#);
    }

    #[test]
    fn test_empty_rule_set() {
        let rules = RuleSet::new();
        assert!(rules.is_empty());
        assert_eq!(rules.get("opt1"), None);
    }
}
