//! The typed policy-document model.
//!
//! A `PolicyDocument` is built once by the parser from JSON text and is then
//! read-only: every check borrows it, none mutates it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::action::ActionName;

/// The only policy language version the organisation accepts.
///
/// Any other value is reported as a `Fail` finding, not as a parse error.
pub const POLICY_VERSION: &str = "2012-10-17";

/// A parsed access-control policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyDocument {
    /// The `Version` field, verbatim.
    pub version: String,
    /// The optional document-level `Id`.
    pub id: Option<String>,
    /// Statements in document order.
    pub statements: Vec<Statement>,
}

/// Whether a statement grants or revokes its actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// One permission statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// The optional `Sid`, used only to make messages easier to trace.
    pub sid: Option<String>,
    pub effect: Effect,
    /// Actions in document order. Never empty.
    pub actions: Vec<ActionName>,
    /// `None` when the statement has no `Resource` key at all.
    ///
    /// An absent resource list means "implicit all" and is treated as a
    /// wildcard by every check.
    pub resources: Option<Vec<ResourceSpec>>,
    /// Zero or more condition blocks, one per operator.
    pub conditions: Vec<Condition>,
}

impl Statement {
    /// True when the resource list is absent or contains the literal `*`.
    pub fn has_wildcard_resource(&self) -> bool {
        match &self.resources {
            None => true,
            Some(resources) => resources.iter().any(ResourceSpec::is_wildcard),
        }
    }

    /// The condition block for `operator`, if the statement carries one.
    pub fn condition(&self, operator: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.operator == operator)
    }

    /// A short label for log lines and messages: the `Sid` when present.
    pub fn label(&self, index: usize) -> String {
        match &self.sid {
            Some(sid) => format!("statement {index} ('{sid}')"),
            None => format!("statement {index}"),
        }
    }
}

/// A resource entry: either the literal wildcard or a concrete identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceSpec {
    Wildcard,
    /// An ARN or other identifier, verbatim. May itself contain glob
    /// characters (`arn:aws:s3:::bucket/*`).
    Identifier(String),
}

impl ResourceSpec {
    /// Classify a raw resource string. Only the exact string `*` is the
    /// wildcard.
    pub fn parse(raw: &str) -> Self {
        if raw == "*" {
            Self::Wildcard
        } else {
            Self::Identifier(raw.to_string())
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Wildcard => "*",
            Self::Identifier(id) => id,
        }
    }
}

/// One condition block, e.g. `"StringEquals": { "aws:ResourceTag/Env": "dev" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// The condition operator, e.g. `StringEquals`.
    pub operator: String,
    /// Condition key → expected value(s).
    pub key_values: BTreeMap<String, ConditionValues>,
}

/// The right-hand side of a condition key: one value or a list of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValues {
    Single(ConditionValue),
    Many(Vec<ConditionValue>),
}

/// A single scalar condition value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionValue {
    String(String),
    Bool(bool),
    Number(serde_json::Number),
}
