//! Reference audits of the GitHub Actions deployment role.
//!
//! Each scenario wires real leastpriv components (TOML rule config,
//! validator, role auditor, in-memory policy source) to the fixtures and
//! prints what a deployment gate would see.

use leastpriv_contracts::validation::{Severity, ValidationReport};
use leastpriv_report::{ComplianceReport, DocumentOutcome};

pub mod compliant_role;
pub mod overbroad_role;
pub mod secret_scoping;
pub mod telemetry_allow_list;

fn mark(severity: Severity) -> &'static str {
    match severity {
        Severity::Pass => "PASS",
        Severity::Fail => "FAIL",
    }
}

pub(crate) fn print_validation(report: &ValidationReport) {
    for finding in &report.findings {
        let at = finding
            .statement_index
            .map(|i| format!("statement {i}"))
            .unwrap_or_else(|| "document".to_string());
        println!(
            "    [{}] {:<30} {:<12} {}",
            mark(finding.severity),
            finding.rule.as_str(),
            at,
            finding.message
        );
    }
}

pub(crate) fn print_compliance(report: &ComplianceReport) {
    println!("  Role:         {}", report.role);
    println!("  Run:          {}", report.run_id);
    for document in &report.documents {
        println!();
        println!("  Policy: {}", document.name);
        match &document.outcome {
            DocumentOutcome::Validated { report } => print_validation(report),
            DocumentOutcome::Unverifiable { reason } => println!("    UNVERIFIABLE: {reason}"),
        }
    }
    println!();
    println!("  Role-level findings:");
    for finding in &report.role_findings {
        println!("    [{}] {}", mark(finding.severity), finding.message);
    }
    println!();
    println!(
        "  Verdict:      {} ({} failure(s))",
        if report.is_compliant() { "COMPLIANT" } else { "NON-COMPLIANT" },
        report.failure_count()
    );
    println!("  Fingerprint:  {}", report.fingerprint);
}
