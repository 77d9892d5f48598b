//! Report fingerprints.
//!
//! Hash input: the compact JSON of `{ role, documents, role_findings }`,
//! fields in that order. `run_id` and `generated_at` are left out, so two
//! audits over identical inputs share a fingerprint.

use serde::Serialize;
use sha2::{Digest, Sha256};

use leastpriv_contracts::error::{LeastPrivError, LeastPrivResult};

use crate::report::{ComplianceReport, DocumentReport, RoleFinding};

#[derive(Serialize)]
struct FingerprintInput<'a> {
    role: &'a str,
    documents: &'a [DocumentReport],
    role_findings: &'a [RoleFinding],
}

/// Lowercase 64-character SHA-256 hex over the audit result.
pub fn fingerprint(
    role: &str,
    documents: &[DocumentReport],
    role_findings: &[RoleFinding],
) -> LeastPrivResult<String> {
    let input = FingerprintInput {
        role,
        documents,
        role_findings,
    };
    let bytes = serde_json::to_vec(&input).map_err(|e| LeastPrivError::ReportError {
        reason: format!("failed to serialise report for fingerprinting: {e}"),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// True when `report.fingerprint` matches its own content.
pub fn verify_fingerprint(report: &ComplianceReport) -> bool {
    fingerprint(&report.role, &report.documents, &report.role_findings)
        .is_ok_and(|computed| computed == report.fingerprint)
}
