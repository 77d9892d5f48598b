//! `PolicyValidator`: the standard rule set wired into a core `Validator`.

use std::sync::Arc;

use leastpriv_contracts::{
    config::RuleConfig,
    document::PolicyDocument,
    error::LeastPrivResult,
    validation::{ValidationContext, ValidationReport},
};
use leastpriv_core::{traits::Check, Validator};
use leastpriv_policy::{parse_document, ActionClassifier};

use crate::{
    destructive::DestructiveActionCheck,
    sensitive::SensitiveScopeCheck,
    tag_condition::TagConditionChecker,
    version::VersionCheck,
    wildcard::{ActionWildcardCheck, WildcardResourceCheck},
};

/// Validates policy documents against one `RuleConfig`.
///
/// Checks run in a fixed order: version, destructive-action,
/// wildcard-resource, action-wildcard, sensitive-scope.
pub struct PolicyValidator {
    inner: Validator,
    sensitive: SensitiveScopeCheck,
}

impl PolicyValidator {
    pub fn new(config: &RuleConfig) -> Self {
        let classifier = Arc::new(ActionClassifier::new(config));
        let tags = TagConditionChecker::new(config.tag_condition_key_substring.clone());
        let deny = config.evaluate_deny_statements;

        let checks: Vec<Box<dyn Check>> = vec![
            Box::new(VersionCheck),
            Box::new(DestructiveActionCheck::new(
                Arc::clone(&classifier),
                tags.clone(),
                deny,
            )),
            Box::new(WildcardResourceCheck::new(Arc::clone(&classifier), tags, deny)),
            Box::new(ActionWildcardCheck::new(classifier)),
            Box::new(SensitiveScopeCheck::new(
                config.sensitive_service_prefixes.clone(),
                deny,
            )),
        ];

        Self {
            inner: Validator::new(checks),
            sensitive: SensitiveScopeCheck::new(config.sensitive_service_prefixes.clone(), deny),
        }
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.inner.check_names()
    }

    pub fn validate(&self, document: &PolicyDocument, ctx: &ValidationContext) -> ValidationReport {
        self.inner.validate(document, ctx)
    }

    /// Parse then validate. Only a malformed document is an error.
    pub fn validate_json(&self, raw: &str, ctx: &ValidationContext) -> LeastPrivResult<ValidationReport> {
        let document = parse_document(raw)?;
        Ok(self.validate(&document, ctx))
    }

    /// True when some `Allow` statement grants an action on a sensitive service.
    pub fn grants_sensitive_access(&self, document: &PolicyDocument) -> bool {
        self.sensitive.grants_sensitive_access(&document.statements)
    }
}
