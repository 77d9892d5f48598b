//! Document version rule.

use leastpriv_contracts::{
    document::{PolicyDocument, POLICY_VERSION},
    validation::{RuleId, ValidationContext, ValidationFinding},
};
use leastpriv_core::traits::Check;

/// Fails any document whose `Version` is not `2012-10-17`.
///
/// Document-level only: a wrong version never stops the statement rules.
#[derive(Debug, Default)]
pub struct VersionCheck;

impl Check for VersionCheck {
    fn name(&self) -> &'static str {
        "version"
    }

    fn check_document(
        &self,
        document: &PolicyDocument,
        _ctx: &ValidationContext,
    ) -> Vec<ValidationFinding> {
        let finding = if document.version == POLICY_VERSION {
            ValidationFinding::pass(
                None,
                RuleId::UnsupportedVersion,
                format!("policy uses version {POLICY_VERSION}"),
            )
        } else {
            ValidationFinding::fail(
                None,
                RuleId::UnsupportedVersion,
                format!(
                    "policy version '{}' is not the accepted version '{POLICY_VERSION}'",
                    document.version
                ),
            )
        };
        vec![finding]
    }
}
