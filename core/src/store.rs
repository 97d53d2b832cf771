//! The option store and its gated accessors.
//!
//! An [`OptionStore`] holds the current value of every permitted option. The
//! permitted key set is fixed at construction: writes only ever overwrite
//! existing entries, and nothing is ever removed. All writes pass through the
//! validator first, and a rejected write is a silent no-op — the store never
//! holds a value that fails its own rule set.
//!
//! Callers that need to know *why* a write was dropped can use
//! [`OptionStore::try_set`], which reports the rejection as a [`SetError`]
//! instead of absorbing it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::rules::RuleSet;
use crate::validate::{Candidate, Verdict, validate, validate_value};
use crate::value::OptValue;

/// Why a strict-mode write was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetError {
    /// The key is not in the permitted option set.
    #[error("unknown option: {0}")]
    UnknownOption(String),
    /// The rule set does not admit the candidate value.
    #[error("value for option `{option}` failed validation")]
    InvalidValue {
        /// Name of the rejected option.
        option: String,
    },
    /// The candidate was a falsy scalar (`0`, `0.0`, or `""`) — treated as
    /// "nothing to set".
    #[error("no value to set for option `{0}`")]
    NoValue(String),
}

/// A mapping of option names to their current values.
///
/// # Examples
///
/// ```
/// use optgate_core::{OptionStore, RuleSet, OptValue};
///
/// let mut store = OptionStore::new()
///     .with_option("opt1", "value1")
///     .with_option("opt2", "value2");
/// let rules = RuleSet::new().permit("opt1", ["int()"]);
///
/// store.set("opt1", 7, &rules);
/// assert_eq!(store.get("opt1"), Some(&OptValue::Int(7)));
///
/// // Rejected writes leave the store untouched.
/// store.set("opt1", "seven", &rules);
/// assert_eq!(store.get("opt1"), Some(&OptValue::Int(7)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionStore {
    opts: BTreeMap<String, OptValue>,
}

impl OptionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an option with its default value. This is the only way keys
    /// enter the store.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<OptValue>) -> Self {
        self.opts.insert(key.into(), value.into());
        self
    }

    /// Sets a single option, gated by the rule set.
    ///
    /// Rejected or falsy values are silently dropped; the store is returned
    /// either way so calls can chain.
    ///
    /// Quirk, preserved deliberately: a falsy value (`0`, `0.0`, `""`) is
    /// treated as "nothing to set" even when validation would have admitted
    /// it, and the caller cannot tell this apart from a validation failure.
    /// Use [`try_set`](Self::try_set) to distinguish the two.
    pub fn set(
        &mut self,
        key: &str,
        value: impl Into<OptValue>,
        rules: &RuleSet,
    ) -> &mut Self {
        let value = value.into();
        if !validate_value(key, &value, rules) {
            debug!(option = %key, "set rejected by rule set");
            return self;
        }
        if value.is_falsy() {
            debug!(option = %key, "falsy value, nothing to set");
            return self;
        }
        self.write(key, value);
        self
    }

    /// Sets a batch of options, gated per key.
    ///
    /// Each entry is validated independently and written only when admitted
    /// and already present in the store. The falsy-value quirk of
    /// [`set`](Self::set) does not apply to the batch form.
    pub fn set_many(
        &mut self,
        updates: &BTreeMap<String, OptValue>,
        rules: &RuleSet,
    ) -> &mut Self {
        match validate(Candidate::Batch(updates), rules) {
            Verdict::Single(true) => {
                // The validator unwraps one-entry batches to a scalar verdict.
                if let Some((key, value)) = updates.iter().next() {
                    self.write(key, value.clone());
                }
            }
            Verdict::Single(false) => {
                debug!("batch set rejected");
            }
            Verdict::Batch(verdicts) => {
                for (key, admitted) in verdicts {
                    if admitted {
                        self.write(&key, updates[&key].clone());
                    } else {
                        debug!(option = %key, "set rejected by rule set");
                    }
                }
            }
        }
        self
    }

    /// Strict-mode single set: reports the rejection instead of absorbing
    /// it. The write semantics are identical to [`set`](Self::set).
    pub fn try_set(
        &mut self,
        key: &str,
        value: impl Into<OptValue>,
        rules: &RuleSet,
    ) -> Result<(), SetError> {
        let value = value.into();
        if !self.opts.contains_key(key) {
            return Err(SetError::UnknownOption(key.to_string()));
        }
        if !validate_value(key, &value, rules) {
            return Err(SetError::InvalidValue {
                option: key.to_string(),
            });
        }
        if value.is_falsy() {
            return Err(SetError::NoValue(key.to_string()));
        }
        self.write(key, value);
        Ok(())
    }

    /// Returns the current value of an option, or `None` if the key is not
    /// permitted. Never an error.
    pub fn get(&self, key: &str) -> Option<&OptValue> {
        self.opts.get(key)
    }

    /// Resolves several options at once, pairing each name with its value
    /// (`None` for unknown names), in the order the names were given.
    pub fn get_many<I>(&self, keys: I) -> Vec<(String, Option<OptValue>)>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        keys.into_iter()
            .map(|key| {
                let key = key.as_ref();
                (key.to_string(), self.opts.get(key).cloned())
            })
            .collect()
    }

    /// Read-only view of the whole store.
    pub fn all(&self) -> &BTreeMap<String, OptValue> {
        &self.opts
    }

    /// Returns true when the store holds the given option.
    pub fn contains(&self, key: &str) -> bool {
        self.opts.contains_key(key)
    }

    /// Returns the number of permitted options.
    pub fn len(&self) -> usize {
        self.opts.len()
    }

    /// Returns true when no options are permitted.
    pub fn is_empty(&self) -> bool {
        self.opts.is_empty()
    }

    fn write(&mut self, key: &str, value: OptValue) {
        if let Some(slot) = self.opts.get_mut(key) {
            *slot = value;
        } else {
            debug!(option = %key, "not a permitted option");
        }
    }
}

impl From<BTreeMap<String, OptValue>> for OptionStore {
    fn from(opts: BTreeMap<String, OptValue>) -> Self {
        Self { opts }
    }
}

impl FromIterator<(String, OptValue)> for OptionStore {
    fn from_iter<T: IntoIterator<Item = (String, OptValue)>>(iter: T) -> Self {
        Self {
            opts: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> OptionStore {
        OptionStore::new()
            .with_option("opt1", "value1")
            .with_option("opt2", "value2")
            .with_option("opt3", "value3")
            .with_option("opt4", "value4")
    }

    fn test_rules() -> RuleSet {
        RuleSet::new()
            .permit("opt1", ["int()"])
            .permit("opt2", ["yellow", "red", "blue"])
            .permit("opt3", ["bob-int()", "flop", "chum"])
    }

    #[test]
    fn test_get() {
        let store = test_store();
        assert_eq!(store.get("opt2"), Some(&OptValue::from("value2")));
        assert_eq!(store.get("noneopt"), None);
    }

    #[test]
    fn test_get_many_includes_missing() {
        let store = test_store();
        let values = store.get_many(["opt1", "noneopt"]);
        assert_eq!(
            values,
            vec![
                ("opt1".to_string(), Some(OptValue::from("value1"))),
                ("noneopt".to_string(), None),
            ]
        );
    }

    #[test]
    fn test_get_many_follows_input_order() {
        let store = test_store();
        let values = store.get_many(["opt4", "opt1", "opt3"]);
        let names: Vec<&str> = values.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(names, ["opt4", "opt1", "opt3"]);
    }

    #[test]
    fn test_set_with_empty_rules_bypasses_validation() {
        let mut store = test_store();
        store.set("opt3", "3val", &RuleSet::new());
        assert_eq!(store.get("opt3"), Some(&OptValue::from("3val")));
    }

    #[test]
    fn test_set_unknown_key_is_noop() {
        let mut store = test_store();
        store.set("noneopt", "boring", &RuleSet::new());
        assert!(!store.contains("noneopt"));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_set_rejected_value_is_noop() {
        let mut store = test_store();
        store.set("opt1", "words", &test_rules());
        assert_eq!(store.get("opt1"), Some(&OptValue::from("value1")));
    }

    #[test]
    fn test_set_falsy_value_is_noop() {
        let mut store = test_store();
        // 0 passes the int() rule but is falsy, so nothing is written.
        store.set("opt1", 0, &test_rules());
        assert_eq!(store.get("opt1"), Some(&OptValue::from("value1")));

        // Same with an empty string under no validation at all.
        store.set("opt1", "", &RuleSet::new());
        assert_eq!(store.get("opt1"), Some(&OptValue::from("value1")));
    }

    #[test]
    fn test_set_many_gates_per_key() {
        let mut store = test_store();
        let updates: BTreeMap<String, OptValue> = [
            ("opt1".to_string(), OptValue::from("super")),
            ("opt3".to_string(), OptValue::from("bob-1")),
        ]
        .into();

        store.set_many(&updates, &test_rules());
        assert_eq!(store.get("opt1"), Some(&OptValue::from("value1")));
        assert_eq!(store.get("opt3"), Some(&OptValue::from("bob-1")));
    }

    #[test]
    fn test_set_many_single_entry() {
        let mut store = test_store();
        let updates: BTreeMap<String, OptValue> =
            [("opt3".to_string(), OptValue::from("3val"))].into();
        store.set_many(&updates, &RuleSet::new());
        assert_eq!(store.get("opt3"), Some(&OptValue::from("3val")));
    }

    #[test]
    fn test_set_many_empty_batch_is_noop() {
        let mut store = test_store();
        let before = store.clone();
        store.set_many(&BTreeMap::new(), &RuleSet::new());
        assert_eq!(store, before);
    }

    #[test]
    fn test_set_many_ignores_unknown_keys() {
        let mut store = test_store();
        let updates: BTreeMap<String, OptValue> = [
            ("opt1".to_string(), OptValue::from("yoga")),
            ("noneopt".to_string(), OptValue::from("boring")),
        ]
        .into();

        store.set_many(&updates, &RuleSet::new());
        assert_eq!(store.get("opt1"), Some(&OptValue::from("yoga")));
        assert!(!store.contains("noneopt"));
    }

    #[test]
    fn test_try_set_distinguishes_rejections() {
        let mut store = test_store();
        let rules = test_rules();

        assert_eq!(
            store.try_set("noneopt", 1, &rules),
            Err(SetError::UnknownOption("noneopt".into()))
        );
        assert_eq!(
            store.try_set("opt1", "words", &rules),
            Err(SetError::InvalidValue {
                option: "opt1".into()
            })
        );
        assert_eq!(
            store.try_set("opt1", 0, &rules),
            Err(SetError::NoValue("opt1".into()))
        );
        assert_eq!(store.try_set("opt1", 7, &rules), Ok(()));
        assert_eq!(store.get("opt1"), Some(&OptValue::Int(7)));
    }

    #[test]
    fn test_chaining() {
        let mut store = test_store();
        store
            .set("opt1", 4, &test_rules())
            .set("opt2", "red", &test_rules());
        assert_eq!(store.get("opt1"), Some(&OptValue::Int(4)));
        assert_eq!(store.get("opt2"), Some(&OptValue::from("red")));
    }
}
