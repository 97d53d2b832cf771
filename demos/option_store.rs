//! Gated option store walkthrough.
//!
//! Declares a rule set as JSON, builds an accessor over default options,
//! and shows which writes the rules admit.
//!
//! Run with: `cargo run --example option_store`

use optgate_core::{OptionAccessor, OptionStore, RuleSet};

fn main() -> Result<(), serde_json::Error> {
    let rules: RuleSet = serde_json::from_str(
        r#"{
            "retries": ["int()"],
            "color": ["yellow", "red", "blue"],
            "profile": ["bob-int()", "flop", "chum"],
            "ratio": ["number()"]
        }"#,
    )?;

    let defaults = OptionStore::new()
        .with_option("retries", 3)
        .with_option("color", "blue")
        .with_option("profile", "flop")
        .with_option("ratio", 0.5);

    let mut opts = OptionAccessor::new(defaults, rules);

    // Admitted: integer for int(), literal from the set, combo value.
    opts.set_opts("retries", 5)
        .set_opts("color", "red")
        .set_opts("profile", "bob-10");

    // Dropped: float for int(), literal outside the set, unknown option.
    opts.set_opts("retries", 2.5)
        .set_opts("color", "green")
        .set_opts("verbosity", 1);

    println!("{}", serde_json::to_string_pretty(opts.opts())?);
    Ok(())
}
