//! Rule-gated option management.
//!
//! An [`OptionStore`] maps option names to typed values ([`OptValue`]) and
//! only accepts writes that a declarative [`RuleSet`] admits — exact
//! literals, type wildcards (`int()`, `float()`, `number()`), or combo
//! wildcards (`bob-int()` admitting strings like `"bob-10"`). Rejected
//! writes are silent no-ops by contract; [`OptionStore::try_set`] is the
//! strict-mode variant that reports the reason. [`OptionAccessor`] bundles a
//! store with its rule set for embedding into other types.

mod accessor;
mod rules;
mod store;
mod validate;
mod value;

pub use accessor::OptionAccessor;
pub use rules::{ComboKind, NumberKind, RuleSet, RuleSpec};
pub use store::{OptionStore, SetError};
pub use validate::{Candidate, Verdict, validate, validate_value};
pub use value::OptValue;
