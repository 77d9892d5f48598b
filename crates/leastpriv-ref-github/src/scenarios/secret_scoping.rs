//! Scenario 3: secret access scoped to the wrong secret.
//!
//! A single document is validated against the provisioned secret ARN. The
//! statement names a concrete secret, so it is not a wildcard, but not the
//! one that was provisioned.

use serde_json::json;

use leastpriv_contracts::{
    error::LeastPrivResult,
    validation::{ValidationContext, ValidationReport},
};
use leastpriv_policy::parse_value;
use leastpriv_verify::PolicyValidator;

use crate::{
    audit_config,
    fixtures::{ACCOUNT, SECRET_ARN},
    scenarios::print_validation,
};

pub fn run_scenario() -> LeastPrivResult<ValidationReport> {
    println!("=== Scenario 3: Secret scoped to another secret ===");
    println!();

    let document = parse_value(&json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Sid": "ReadToken",
            "Effect": "Allow",
            "Action": "secretsmanager:GetSecretValue",
            "Resource": format!("arn:aws:secretsmanager:us-east-1:{ACCOUNT}:secret:legacy-token-*")
        }]
    }))?;

    let config = audit_config()?;
    let validator = PolicyValidator::new(&config.rules);
    let report = validator.validate(&document, &ValidationContext::with_expected([SECRET_ARN]));

    println!("  Expected secret: {SECRET_ARN}");
    print_validation(&report);
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(report)
}
