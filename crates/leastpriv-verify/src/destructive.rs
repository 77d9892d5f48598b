//! Destructive-action rule.
//!
//! Every statement granting a destructive action must carry a tag condition,
//! whether its resources are wildcarded or not. Scoped destructive grants are
//! still gated on tags so that a mis-scoped ARN cannot reach resources the
//! automation identity does not own.

use std::sync::Arc;

use tracing::debug;

use leastpriv_contracts::{
    document::Statement,
    validation::{RuleId, ValidationContext, ValidationFinding},
};
use leastpriv_core::traits::Check;
use leastpriv_policy::ActionClassifier;

use crate::{
    in_scope, join_actions,
    tag_condition::{TagCondition, TagConditionChecker},
};

pub struct DestructiveActionCheck {
    classifier: Arc<ActionClassifier>,
    tags: TagConditionChecker,
    evaluate_deny: bool,
}

impl DestructiveActionCheck {
    pub fn new(classifier: Arc<ActionClassifier>, tags: TagConditionChecker, evaluate_deny: bool) -> Self {
        Self {
            classifier,
            tags,
            evaluate_deny,
        }
    }
}

impl Check for DestructiveActionCheck {
    fn name(&self) -> &'static str {
        "destructive-action"
    }

    fn check_statement(
        &self,
        index: usize,
        statement: &Statement,
        _ctx: &ValidationContext,
    ) -> Vec<ValidationFinding> {
        if !in_scope(statement, self.evaluate_deny) {
            return Vec::new();
        }

        let destructive = self.classifier.destructive(&statement.actions);
        if destructive.is_empty() {
            return Vec::new();
        }

        let label = statement.label(index);
        let actions = join_actions(destructive.iter().copied());
        let tag = self.tags.evaluate(statement);
        debug!(statement = index, ?tag, %actions, "destructive actions found");

        let finding = match tag {
            TagCondition::Present => ValidationFinding::pass(
                Some(index),
                RuleId::MissingTagCondition,
                format!("{label}: destructive actions [{actions}] are gated by a tag condition"),
            ),
            TagCondition::MissingCondition => ValidationFinding::fail(
                Some(index),
                RuleId::MissingCondition,
                format!("{label} grants destructive actions [{actions}] without any Condition"),
            ),
            TagCondition::MissingTagKey => ValidationFinding::fail(
                Some(index),
                RuleId::MissingTagCondition,
                format!(
                    "{label} grants destructive actions [{actions}] with {}",
                    tag.describe(self.tags.key_substring())
                ),
            ),
        };
        vec![finding]
    }
}
