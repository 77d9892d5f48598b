//! Wildcard scope rules.
//!
//! `WildcardResourceCheck` decides whether a `Resource: "*"` (or an absent
//! resource list) is acceptable for a statement:
//!
//! - every action read-only or allow-listed → pass;
//! - otherwise the statement needs a tag condition.
//!
//! The action set is judged as a whole: one unsafe action makes the statement
//! unsafe, since a condition applies to the entire statement. When the unsafe
//! action is destructive the statement is already covered by
//! `DestructiveActionCheck`, which reports it instead, so one missing tag
//! condition yields one failure.
//!
//! `ActionWildcardCheck` rejects `*` and `service:*` grants outright.

use std::sync::Arc;

use tracing::debug;

use leastpriv_contracts::{
    action::ActionClass,
    document::{Effect, Statement},
    validation::{RuleId, ValidationContext, ValidationFinding},
};
use leastpriv_core::traits::Check;
use leastpriv_policy::ActionClassifier;

use crate::{
    in_scope, join_actions,
    tag_condition::{TagCondition, TagConditionChecker},
};

pub struct WildcardResourceCheck {
    classifier: Arc<ActionClassifier>,
    tags: TagConditionChecker,
    evaluate_deny: bool,
}

impl WildcardResourceCheck {
    pub fn new(classifier: Arc<ActionClassifier>, tags: TagConditionChecker, evaluate_deny: bool) -> Self {
        Self {
            classifier,
            tags,
            evaluate_deny,
        }
    }
}

impl Check for WildcardResourceCheck {
    fn name(&self) -> &'static str {
        "wildcard-resource"
    }

    fn check_statement(
        &self,
        index: usize,
        statement: &Statement,
        _ctx: &ValidationContext,
    ) -> Vec<ValidationFinding> {
        if !in_scope(statement, self.evaluate_deny) || !statement.has_wildcard_resource() {
            return Vec::new();
        }

        let label = statement.label(index);
        let class = self.classifier.classify_all(&statement.actions);
        debug!(statement = index, ?class, "wildcard resource found");

        match class {
            ActionClass::ReadOnly => vec![ValidationFinding::pass(
                Some(index),
                RuleId::UnscopedDestructiveWildcard,
                format!("{label}: wildcard resource limited to read-only or allow-listed actions"),
            )],
            // Reported by the destructive-action rule.
            ActionClass::Destructive => Vec::new(),
            ActionClass::Other => {
                let unsafe_actions = join_actions(
                    statement
                        .actions
                        .iter()
                        .filter(|a| self.classifier.classify(a) != ActionClass::ReadOnly),
                );
                let finding = match self.tags.evaluate(statement) {
                    TagCondition::Present => ValidationFinding::pass(
                        Some(index),
                        RuleId::UnscopedDestructiveWildcard,
                        format!("{label}: wildcard resource for [{unsafe_actions}] is gated by a tag condition"),
                    ),
                    missing => ValidationFinding::fail(
                        Some(index),
                        RuleId::UnscopedDestructiveWildcard,
                        format!(
                            "{label} grants [{unsafe_actions}] on a wildcard resource with {}",
                            missing.describe(self.tags.key_substring())
                        ),
                    ),
                };
                vec![finding]
            }
        }
    }
}

/// Rejects grants of every verb of a service (`*`, `s3:*`).
///
/// Applies to `Allow` statements only: a `Deny` on `s3:*` narrows access.
pub struct ActionWildcardCheck {
    classifier: Arc<ActionClassifier>,
}

impl ActionWildcardCheck {
    pub fn new(classifier: Arc<ActionClassifier>) -> Self {
        Self { classifier }
    }
}

impl Check for ActionWildcardCheck {
    fn name(&self) -> &'static str {
        "action-wildcard"
    }

    fn check_statement(
        &self,
        index: usize,
        statement: &Statement,
        _ctx: &ValidationContext,
    ) -> Vec<ValidationFinding> {
        if statement.effect != Effect::Allow {
            return Vec::new();
        }

        let wildcards: Vec<_> = statement
            .actions
            .iter()
            .filter(|a| a.is_service_wildcard() && !self.classifier.is_allow_listed(a))
            .collect();
        if wildcards.is_empty() {
            return Vec::new();
        }

        vec![ValidationFinding::fail(
            Some(index),
            RuleId::UnscopedActionWildcard,
            format!(
                "{} grants every action of a service via [{}]",
                statement.label(index),
                join_actions(wildcards)
            ),
        )]
    }
}
