//! Scenario 1: a well-scoped deployment role.
//!
//! The role carries the day-to-day permissions policy and the tag-gated
//! teardown policy. Every rule passes and both required policies are found.

use leastpriv_contracts::error::LeastPrivResult;
use leastpriv_report::{outputs_from_json_str, ComplianceReport, InMemoryPolicySource, RoleAuditor};

use crate::{
    audit_config,
    fixtures::{
        permissions_policy, tagged_destroy_policy, terraform_outputs_json, DESTROY_POLICY,
        PERMISSIONS_POLICY, ROLE_ARN,
    },
    scenarios::print_compliance,
};

pub fn policy_source() -> InMemoryPolicySource {
    InMemoryPolicySource::new()
        .with_policy(ROLE_ARN, PERMISSIONS_POLICY, permissions_policy().to_string())
        .with_policy(ROLE_ARN, DESTROY_POLICY, tagged_destroy_policy().to_string())
}

pub fn run_scenario() -> LeastPrivResult<ComplianceReport> {
    println!("=== Scenario 1: Well-scoped deployment role ===");
    println!();

    let outputs = outputs_from_json_str(&terraform_outputs_json().to_string())?;
    let auditor = RoleAuditor::new(audit_config()?);
    let report = auditor.audit(&outputs, &policy_source())?;

    print_compliance(&report);
    println!();
    println!("  Scenario 1 complete.");
    println!();

    Ok(report)
}
