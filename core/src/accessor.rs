//! Embeddable accessor over a store/rule-set pair.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rules::RuleSet;
use crate::store::OptionStore;
use crate::value::OptValue;

/// An option store bundled with the rule set that gates its writes.
///
/// This is the embedding surface: a type that wants gated options holds an
/// `OptionAccessor` and forwards to it, instead of juggling the store and
/// rule set separately. The accessor owns both, so two accessors built from
/// clones of the same defaults are fully isolated from each other and from
/// the caller's original mapping.
///
/// # Examples
///
/// ```
/// use optgate_core::{OptionAccessor, OptionStore, RuleSet, OptValue};
///
/// let defaults = OptionStore::new()
///     .with_option("color", "blue")
///     .with_option("size", 10);
/// let rules = RuleSet::new()
///     .permit("color", ["yellow", "red", "blue"])
///     .permit("size", ["int()"]);
///
/// let mut opts = OptionAccessor::new(defaults, rules);
/// opts.set_opts("color", "red").set_opts("size", 12);
///
/// assert_eq!(opts.get_opts("color"), Some(&OptValue::from("red")));
/// assert_eq!(opts.get_opts("size"), Some(&OptValue::Int(12)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionAccessor {
    opts: OptionStore,
    rules: RuleSet,
}

impl OptionAccessor {
    /// Creates an accessor from default options and a rule set.
    ///
    /// Both are taken by value; callers keep their own copy by cloning.
    pub fn new(defaults: impl Into<OptionStore>, rules: RuleSet) -> Self {
        Self {
            opts: defaults.into(),
            rules,
        }
    }

    /// Sets a single option through the wrapped rule set. Returns `&mut
    /// Self` for chaining; rejected writes are silent no-ops.
    pub fn set_opts(&mut self, key: &str, value: impl Into<OptValue>) -> &mut Self {
        self.opts.set(key, value, &self.rules);
        self
    }

    /// Sets a batch of options, each gated individually.
    pub fn set_opts_many(&mut self, updates: &BTreeMap<String, OptValue>) -> &mut Self {
        self.opts.set_many(updates, &self.rules);
        self
    }

    /// Returns the current value of one option, or `None` if unknown.
    pub fn get_opts(&self, key: &str) -> Option<&OptValue> {
        self.opts.get(key)
    }

    /// Resolves several options at once (`None` for unknown names), in the
    /// order the names were given.
    pub fn get_opts_many<I>(&self, keys: I) -> Vec<(String, Option<OptValue>)>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.opts.get_many(keys)
    }

    /// Read-only view of all current option values.
    pub fn opts(&self) -> &BTreeMap<String, OptValue> {
        self.opts.all()
    }

    /// The rule set gating this accessor's writes.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}
