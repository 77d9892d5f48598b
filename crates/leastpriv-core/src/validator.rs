//! The validator: one pass over a document, every check, every statement.
//!
//! Output ordering is part of the contract:
//!
//!   document-level findings (check order)
//!   → statement 0 (check order) → statement 1 (check order) → …
//!
//! A failing rule never stops the pass. Only the parser can abort a
//! document, and it does so before the validator is ever called.

use tracing::{debug, info, warn};

use leastpriv_contracts::{
    document::PolicyDocument,
    validation::{ValidationContext, ValidationFinding, ValidationReport},
};

use crate::traits::Check;

/// Runs an ordered list of checks over policy documents.
///
/// Holds no mutable state, so one validator can be shared across threads and
/// used for any number of documents.
pub struct Validator {
    checks: Vec<Box<dyn Check>>,
}

impl Validator {
    /// Create a validator. Checks report in the order given here.
    pub fn new(checks: Vec<Box<dyn Check>>) -> Self {
        Self { checks }
    }

    /// Names of the configured checks, in reporting order.
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Validate `document` and return every finding.
    pub fn validate(&self, document: &PolicyDocument, ctx: &ValidationContext) -> ValidationReport {
        let mut findings: Vec<ValidationFinding> = Vec::new();

        for check in &self.checks {
            let produced = check.check_document(document, ctx);
            log_findings(check.name(), None, &produced);
            findings.extend(produced);
        }

        for (index, statement) in document.statements.iter().enumerate() {
            for check in &self.checks {
                let produced = check.check_statement(index, statement, ctx);
                log_findings(check.name(), Some(index), &produced);
                findings.extend(produced);
            }
        }

        let report = ValidationReport { findings };
        info!(
            statements = document.statements.len(),
            findings = report.findings.len(),
            failures = report.failures().count(),
            compliant = report.is_compliant(),
            "policy validation complete"
        );
        report
    }
}

fn log_findings(check: &str, index: Option<usize>, findings: &[ValidationFinding]) {
    for finding in findings {
        if finding.is_fail() {
            warn!(
                check,
                statement = ?index,
                rule = %finding.rule,
                message = %finding.message,
                "rule failed"
            );
        } else {
            debug!(check, statement = ?index, rule = %finding.rule, "rule passed");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
