//! Tag-condition checker.
//!
//! A statement carries a qualifying tag condition when it has a
//! `StringEquals` block with at least one key containing the configured
//! substring (`ResourceTag` by default, matched case-sensitively), i.e. the
//! grant only applies to resources carrying a specific tag value.
//!
//! Other operators (`StringLike`, `Bool`, …) count as "a condition is
//! present" but never as a tag constraint.

use leastpriv_contracts::document::Statement;

/// The only operator inspected for tag keys.
pub const TAG_OPERATOR: &str = "StringEquals";

/// Result of looking for a tag condition on one statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCondition {
    /// A `StringEquals` key containing the tag substring exists.
    Present,
    /// The statement has no condition block at all.
    MissingCondition,
    /// Conditions exist, but none is a tag-equality constraint.
    MissingTagKey,
}

impl TagCondition {
    /// Explanation used in failure messages.
    pub fn describe(&self, key_substring: &str) -> String {
        match self {
            Self::Present => format!("{TAG_OPERATOR} condition on a '{key_substring}' key"),
            Self::MissingCondition => "no Condition".to_string(),
            Self::MissingTagKey => {
                format!("no {TAG_OPERATOR} condition on a key containing '{key_substring}'")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TagConditionChecker {
    key_substring: String,
}

impl TagConditionChecker {
    pub fn new(key_substring: impl Into<String>) -> Self {
        Self {
            key_substring: key_substring.into(),
        }
    }

    pub fn key_substring(&self) -> &str {
        &self.key_substring
    }

    pub fn evaluate(&self, statement: &Statement) -> TagCondition {
        if statement.conditions.is_empty() {
            return TagCondition::MissingCondition;
        }
        let tagged = statement.condition(TAG_OPERATOR).is_some_and(|c| {
            c.key_values
                .keys()
                .any(|key| key.contains(self.key_substring.as_str()))
        });
        if tagged {
            TagCondition::Present
        } else {
            TagCondition::MissingTagKey
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use leastpriv_policy::parse_value;

    use super::{TagCondition, TagConditionChecker};

    fn evaluate(condition: serde_json::Value) -> TagCondition {
        let mut statement = json!({ "Effect": "Allow", "Action": "ec2:TerminateInstances", "Resource": "*" });
        if !condition.is_null() {
            statement["Condition"] = condition;
        }
        let doc = parse_value(&json!({ "Version": "2012-10-17", "Statement": [statement] })).unwrap();
        TagConditionChecker::new("ResourceTag").evaluate(&doc.statements[0])
    }

    #[test]
    fn no_condition() {
        assert_eq!(evaluate(serde_json::Value::Null), TagCondition::MissingCondition);
    }

    #[test]
    fn string_equals_on_resource_tag() {
        assert_eq!(
            evaluate(json!({ "StringEquals": { "aws:ResourceTag/ManagedBy": "github-actions" } })),
            TagCondition::Present
        );
    }

    #[test]
    fn string_equals_without_tag_key() {
        assert_eq!(
            evaluate(json!({ "StringEquals": { "aws:RequestedRegion": "us-east-1" } })),
            TagCondition::MissingTagKey
        );
    }

    /// Only `StringEquals` counts, even when another operator names a tag.
    #[test]
    fn other_operator_is_not_a_tag_condition() {
        assert_eq!(
            evaluate(json!({ "StringLike": { "aws:ResourceTag/ManagedBy": "github-*" } })),
            TagCondition::MissingTagKey
        );
    }

    #[test]
    fn key_match_is_case_sensitive() {
        assert_eq!(
            evaluate(json!({ "StringEquals": { "aws:resourcetag/ManagedBy": "github-actions" } })),
            TagCondition::MissingTagKey
        );
    }

    #[test]
    fn one_tag_key_among_several_is_enough() {
        assert_eq!(
            evaluate(json!({
                "Bool": { "aws:SecureTransport": true },
                "StringEquals": {
                    "aws:RequestedRegion": "us-east-1",
                    "ec2:ResourceTag/Environment": "dev"
                }
            })),
            TagCondition::Present
        );
    }
}
