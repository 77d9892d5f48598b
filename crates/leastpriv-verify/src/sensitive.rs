//! Sensitive-service scoping rule.
//!
//! Any statement touching a sensitive service (secret storage by default)
//! must name concrete resources, whatever the action class: reading a secret
//! is as sensitive as deleting it. When the caller supplies expected
//! identifiers (the provisioned secret's ARN), every resource must also be
//! consistent with one of them.
//!
//! Consistency between a policy resource `r` and an expected identifier `e`:
//!
//! - `r == e`;
//! - either is a prefix of the other (ARN with or without the random
//!   suffix the secret service appends);
//! - either is a suffix of the other (one side is a bare name);
//! - `r` ends in `*` and `e` starts with the text before the `*`
//!   (`…:secret:backend-*` covers `…:secret:backend-AbCdEf`).
//!
//! `*`, the empty string and service-level globs ending in `:*` are never
//! consistent.

use tracing::debug;

use leastpriv_contracts::{
    action::ActionName,
    document::{Effect, Statement},
    validation::{RuleId, ValidationContext, ValidationFinding},
};
use leastpriv_core::traits::Check;

use crate::{in_scope, join_actions};

pub struct SensitiveScopeCheck {
    prefixes: Vec<String>,
    evaluate_deny: bool,
}

impl SensitiveScopeCheck {
    pub fn new(prefixes: Vec<String>, evaluate_deny: bool) -> Self {
        Self {
            prefixes,
            evaluate_deny,
        }
    }

    /// True when `action` belongs to a sensitive service. The bare `*`
    /// covers every service and therefore counts.
    pub fn is_sensitive(&self, action: &ActionName) -> bool {
        let service = action.service();
        service == "*" || self.prefixes.iter().any(|p| p.eq_ignore_ascii_case(service))
    }

    /// True when an `Allow` statement in `statements` grants a sensitive action.
    pub fn grants_sensitive_access(&self, statements: &[Statement]) -> bool {
        statements
            .iter()
            .filter(|s| s.effect == Effect::Allow)
            .any(|s| s.actions.iter().any(|a| self.is_sensitive(a)))
    }
}

fn is_unscoped(resource: &str) -> bool {
    resource == "*" || resource.ends_with(":*")
}

fn is_consistent(resource: &str, expected: &str) -> bool {
    if resource.is_empty() || expected.is_empty() {
        return false;
    }
    if resource == expected
        || resource.starts_with(expected)
        || expected.starts_with(resource)
        || resource.ends_with(expected)
        || expected.ends_with(resource)
    {
        return true;
    }
    match resource.strip_suffix('*') {
        Some(stem) if !stem.is_empty() => expected.starts_with(stem),
        _ => false,
    }
}

impl Check for SensitiveScopeCheck {
    fn name(&self) -> &'static str {
        "sensitive-scope"
    }

    fn check_statement(
        &self,
        index: usize,
        statement: &Statement,
        ctx: &ValidationContext,
    ) -> Vec<ValidationFinding> {
        if !in_scope(statement, self.evaluate_deny) {
            return Vec::new();
        }

        let sensitive: Vec<&ActionName> = statement
            .actions
            .iter()
            .filter(|a| self.is_sensitive(a))
            .collect();
        if sensitive.is_empty() {
            return Vec::new();
        }

        let label = statement.label(index);
        let actions = join_actions(sensitive);
        let expected = &ctx.expected_identifiers;

        let mut problems: Vec<String> = Vec::new();
        match &statement.resources {
            None => problems.push("no Resource (implicitly every resource)".to_string()),
            Some(resources) => {
                for resource in resources.iter().map(|r| r.as_str()) {
                    if is_unscoped(resource) {
                        problems.push(format!("'{resource}' is a wildcard"));
                    } else if !expected.is_empty()
                        && !expected.iter().any(|e| is_consistent(resource, e))
                    {
                        problems.push(format!(
                            "'{resource}' does not match any expected identifier [{}]",
                            expected.join(", ")
                        ));
                    }
                }
            }
        }

        debug!(statement = index, %actions, problems = problems.len(), "sensitive actions found");

        let finding = if problems.is_empty() {
            ValidationFinding::pass(
                Some(index),
                RuleId::UnscopedSensitiveAccess,
                format!("{label}: sensitive actions [{actions}] are scoped to specific resources"),
            )
        } else {
            ValidationFinding::fail(
                Some(index),
                RuleId::UnscopedSensitiveAccess,
                format!(
                    "{label} grants sensitive actions [{actions}] without specific scoping: {}",
                    problems.join("; ")
                ),
            )
        };
        vec![finding]
    }
}
