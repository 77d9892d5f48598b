//! Validation inputs and outputs.
//!
//! The validator is a pure function from a `PolicyDocument`, a `RuleConfig`
//! and a `ValidationContext` to a `ValidationReport`. Findings are values,
//! not errors: a single run surfaces every violation in the document.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-run inputs supplied by the caller alongside the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationContext {
    /// Identifiers that sensitive-service statements must be scoped to,
    /// typically the provisioned secret's ARN. Empty means "only reject
    /// wildcards".
    pub expected_identifiers: Vec<String>,
}

impl ValidationContext {
    pub fn with_expected(identifiers: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            expected_identifiers: identifiers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Stable identifiers for every rule the validator can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    /// The document `Version` is not the accepted value.
    UnsupportedVersion,
    /// A statement that needs a tag condition has no condition at all.
    MissingCondition,
    /// A statement has conditions, but none is a tag-equality constraint.
    MissingTagCondition,
    /// A wildcard-resource statement grants non-read-only actions without a
    /// tag condition.
    UnscopedDestructiveWildcard,
    /// A statement grants every verb of a service (`*` or `service:*`).
    UnscopedActionWildcard,
    /// A sensitive-service statement is not scoped to the expected resource.
    UnscopedSensitiveAccess,
}

impl RuleId {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported-version",
            Self::MissingCondition => "missing-condition",
            Self::MissingTagCondition => "missing-tag-condition",
            Self::UnscopedDestructiveWildcard => "unscoped-destructive-wildcard",
            Self::UnscopedActionWildcard => "unscoped-action-wildcard",
            Self::UnscopedSensitiveAccess => "unscoped-sensitive-access",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one rule against one statement (or the whole document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Pass,
    Fail,
}

/// A single rule outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFinding {
    /// Index into `PolicyDocument::statements`; `None` for document-level
    /// rules such as the version check.
    pub statement_index: Option<usize>,
    pub rule: RuleId,
    pub severity: Severity,
    /// Human-readable explanation.
    pub message: String,
}

impl ValidationFinding {
    pub fn pass(statement_index: Option<usize>, rule: RuleId, message: impl Into<String>) -> Self {
        Self {
            statement_index,
            rule,
            severity: Severity::Pass,
            message: message.into(),
        }
    }

    pub fn fail(statement_index: Option<usize>, rule: RuleId, message: impl Into<String>) -> Self {
        Self {
            statement_index,
            rule,
            severity: Severity::Fail,
            message: message.into(),
        }
    }

    pub fn is_fail(&self) -> bool {
        self.severity == Severity::Fail
    }
}

/// All findings from one validation run, in statement order then rule order.
///
/// Document-level findings come first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub findings: Vec<ValidationFinding>,
}

impl ValidationReport {
    /// A document is compliant iff no finding has severity `Fail`.
    pub fn is_compliant(&self) -> bool {
        !self.findings.iter().any(ValidationFinding::is_fail)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationFinding> {
        self.findings.iter().filter(|f| f.is_fail())
    }

    /// Failures reported by `rule`, in report order.
    pub fn failures_for(&self, rule: RuleId) -> impl Iterator<Item = &ValidationFinding> {
        self.failures().filter(move |f| f.rule == rule)
    }
}
