//! Core trait definitions.
//!
//! - `Check`       : one security rule, a pure function over the document
//! - `PolicySource`: the identity API collaborator that hands out policy text
//!
//! Checks never perform I/O. Everything a check needs (rule configuration,
//! classifier) is captured when it is constructed; per-run inputs arrive in
//! the `ValidationContext`.

use leastpriv_contracts::{
    discovery::PolicyHandle,
    document::{PolicyDocument, Statement},
    error::LeastPrivResult,
    validation::{ValidationContext, ValidationFinding},
};

/// A single security rule.
///
/// The validator calls `check_document` once per document, then
/// `check_statement` once per statement in document order. Both default to
/// reporting nothing, so a rule implements whichever level it works at.
///
/// Implementations must be stateless between calls: running the same check
/// twice over the same inputs yields identical findings.
pub trait Check: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Findings about the document as a whole (e.g. its version).
    fn check_document(
        &self,
        _document: &PolicyDocument,
        _ctx: &ValidationContext,
    ) -> Vec<ValidationFinding> {
        Vec::new()
    }

    /// Findings about the statement at `index`.
    fn check_statement(
        &self,
        _index: usize,
        _statement: &Statement,
        _ctx: &ValidationContext,
    ) -> Vec<ValidationFinding> {
        Vec::new()
    }
}

/// Where policy documents come from.
///
/// In production this wraps the cloud identity API; tests and the reference
/// scenarios use in-memory or directory-backed implementations. Retries and
/// timeouts belong to the implementation, never to the validator.
pub trait PolicySource: Send + Sync {
    /// List the policies attached to `role` (an ARN or role name).
    fn attached_policies(&self, role: &str) -> LeastPrivResult<Vec<PolicyHandle>>;

    /// Return the raw JSON text of the default version of `policy` as
    /// attached to `role`. Two roles may attach different policies under the
    /// same name.
    fn policy_document(&self, role: &str, policy: &PolicyHandle) -> LeastPrivResult<String>;
}
