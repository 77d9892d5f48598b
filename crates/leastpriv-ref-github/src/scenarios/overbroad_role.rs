//! Scenario 2: the same role before review.
//!
//! Expected failures:
//!   - `secretsmanager:GetSecretValue` on `*`     → unscoped-sensitive-access
//!   - `s3:*` on the artifact bucket              → unscoped-action-wildcard
//!   - `ec2:StopInstances` on `*`, no tag         → unscoped-destructive-wildcard
//!   - teardown gated on region, not ownership    → missing-tag-condition
//!   - no policy named `*tagged-resource-destroy*` → role-level failure

use leastpriv_contracts::error::LeastPrivResult;
use leastpriv_report::{ComplianceReport, InMemoryPolicySource, RoleAuditor};

use crate::{
    audit_config,
    fixtures::{
        outputs, overbroad_permissions_policy, region_gated_destroy_policy, PERMISSIONS_POLICY,
        ROLE_ARN,
    },
    scenarios::print_compliance,
};

pub const REGION_DESTROY_POLICY: &str = "webhook-github-actions-destroy";

pub fn policy_source() -> InMemoryPolicySource {
    InMemoryPolicySource::new()
        .with_policy(
            ROLE_ARN,
            PERMISSIONS_POLICY,
            overbroad_permissions_policy().to_string(),
        )
        .with_policy(
            ROLE_ARN,
            REGION_DESTROY_POLICY,
            region_gated_destroy_policy().to_string(),
        )
}

pub fn run_scenario() -> LeastPrivResult<ComplianceReport> {
    println!("=== Scenario 2: Over-broad deployment role ===");
    println!();

    let auditor = RoleAuditor::new(audit_config()?);
    let report = auditor.audit(&outputs(), &policy_source())?;

    print_compliance(&report);
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(report)
}
