//! Compliance report types.
//!
//! A `ComplianceReport` is what a deployment gate consumes: one entry per
//! attached policy, the role-level findings that no single document can
//! express, and a fingerprint committing to all of it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use leastpriv_contracts::validation::{Severity, ValidationReport};

/// A finding about the role as a whole rather than one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFinding {
    pub severity: Severity,
    pub message: String,
}

impl RoleFinding {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Pass,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Fail,
            message: message.into(),
        }
    }

    pub fn is_fail(&self) -> bool {
        self.severity == Severity::Fail
    }
}

/// What happened to one attached policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum DocumentOutcome {
    /// The document parsed and every rule ran.
    Validated { report: ValidationReport },
    /// The document could not be fetched or parsed; no rule ran.
    Unverifiable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub name: String,
    pub arn: Option<String>,
    #[serde(flatten)]
    pub outcome: DocumentOutcome,
}

impl DocumentReport {
    /// Compliant when validated without a single `Fail` finding.
    pub fn is_compliant(&self) -> bool {
        match &self.outcome {
            DocumentOutcome::Validated { report } => report.is_compliant(),
            DocumentOutcome::Unverifiable { .. } => false,
        }
    }

    /// An unverifiable document counts as one failure.
    pub fn failure_count(&self) -> usize {
        match &self.outcome {
            DocumentOutcome::Validated { report } => report.failures().count(),
            DocumentOutcome::Unverifiable { .. } => 1,
        }
    }
}

/// The sealed result of one role audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Unique per run; excluded from the fingerprint.
    pub run_id: Uuid,

    /// The audited role identifier as read from the provisioning outputs.
    pub role: String,

    /// Wall-clock time (UTC) the report was produced; excluded from the
    /// fingerprint.
    pub generated_at: DateTime<Utc>,

    /// One entry per attached policy, in the order the source listed them.
    pub documents: Vec<DocumentReport>,

    pub role_findings: Vec<RoleFinding>,

    /// SHA-256 (hex) over role, documents and role findings.
    pub fingerprint: String,
}

impl ComplianceReport {
    /// Compliant iff every document validated cleanly and no role-level
    /// finding failed.
    pub fn is_compliant(&self) -> bool {
        self.documents.iter().all(DocumentReport::is_compliant)
            && !self.role_findings.iter().any(RoleFinding::is_fail)
    }

    /// Total `Fail` findings across documents and the role, plus one per
    /// unverifiable document. Zero iff the report is compliant.
    pub fn failure_count(&self) -> usize {
        self.documents.iter().map(DocumentReport::failure_count).sum::<usize>()
            + self.role_findings.iter().filter(|f| f.is_fail()).count()
    }

    pub fn unverifiable(&self) -> impl Iterator<Item = &DocumentReport> {
        self.documents
            .iter()
            .filter(|d| matches!(d.outcome, DocumentOutcome::Unverifiable { .. }))
    }
}
