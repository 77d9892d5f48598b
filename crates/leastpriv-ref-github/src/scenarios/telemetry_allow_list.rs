//! Scenario 4: the allow-list at work.
//!
//! X-Ray actions cannot be scoped to a resource. Under the baseline rules
//! their `Put` verbs make them destructive grants without a tag condition;
//! under the GitHub Actions rules they are allow-listed and pass.

use leastpriv_contracts::{
    config::RuleConfig,
    error::LeastPrivResult,
    validation::{ValidationContext, ValidationReport},
};
use leastpriv_policy::parse_value;
use leastpriv_verify::PolicyValidator;

use crate::{audit_config, fixtures::telemetry_policy, scenarios::print_validation};

/// Returns the reports under the baseline rules and under the GitHub Actions
/// rules, in that order.
pub fn run_scenario() -> LeastPrivResult<(ValidationReport, ValidationReport)> {
    println!("=== Scenario 4: Allow-listed telemetry actions ===");
    println!();

    let document = parse_value(&telemetry_policy())?;
    let ctx = ValidationContext::default();

    let baseline = PolicyValidator::new(&RuleConfig::default()).validate(&document, &ctx);
    println!("  Baseline rules (empty allow-list):");
    print_validation(&baseline);
    println!();

    let configured = PolicyValidator::new(&audit_config()?.rules).validate(&document, &ctx);
    println!("  GitHub Actions rules:");
    print_validation(&configured);
    println!();
    println!("  Scenario 4 complete.");
    println!();

    Ok((baseline, configured))
}
