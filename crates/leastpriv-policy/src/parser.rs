//! Policy document parser.
//!
//! Parsing is purely structural and runs in three steps:
//!
//! 1. The text must be JSON.
//! 2. The JSON is validated against a built-in JSON Schema describing the
//!    accepted document shape. Every violation is collected so the error
//!    names all structural problems at once.
//! 3. The validated JSON is deserialized into wire structs and converted to
//!    the typed `PolicyDocument`.
//!
//! Any failure is `LeastPrivError::MalformedPolicy` and no partial document
//! is returned. Semantic problems (wrong version, unscoped wildcards) are
//! left to the validator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use leastpriv_contracts::{
    action::ActionName,
    document::{Condition, ConditionValues, Effect, PolicyDocument, ResourceSpec, Statement},
    error::{LeastPrivError, LeastPrivResult},
};

// ── Wire format ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireDocument {
    version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    statement: Vec<WireStatement>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireStatement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sid: Option<String>,
    effect: Effect,
    action: StringOrArray,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resource: Option<StringOrArray>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    condition: Option<BTreeMap<String, BTreeMap<String, ConditionValues>>>,
}

/// `Action` and `Resource` may be a single string or a list of strings.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum StringOrArray {
    Single(String),
    Array(Vec<String>),
}

impl StringOrArray {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::Single(s) => vec![s],
            Self::Array(v) => v,
        }
    }
}

/// The accepted document shape. Unknown keys are tolerated.
fn document_schema() -> Value {
    let string_or_array = json!({
        "oneOf": [
            { "type": "string" },
            { "type": "array", "items": { "type": "string" } }
        ]
    });

    json!({
        "type": "object",
        "required": ["Version", "Statement"],
        "properties": {
            "Version": { "type": "string" },
            "Id": { "type": "string" },
            "Statement": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["Effect", "Action"],
                    "properties": {
                        "Sid": { "type": "string" },
                        "Effect": { "enum": ["Allow", "Deny"] },
                        "Action": {
                            "oneOf": [
                                { "type": "string" },
                                { "type": "array", "items": { "type": "string" }, "minItems": 1 }
                            ]
                        },
                        "Resource": string_or_array,
                        "Condition": {
                            "type": "object",
                            "additionalProperties": { "type": "object" }
                        }
                    }
                }
            }
        }
    })
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse policy JSON text into a `PolicyDocument`.
pub fn parse_document(text: &str) -> LeastPrivResult<PolicyDocument> {
    let value: Value = serde_json::from_str(text).map_err(|e| malformed(format!("invalid JSON: {e}")))?;
    parse_value(&value)
}

/// Parse an already-decoded JSON value into a `PolicyDocument`.
pub fn parse_value(value: &Value) -> LeastPrivResult<PolicyDocument> {
    check_structure(value)?;

    let wire: WireDocument = serde_json::from_value(value.clone())
        .map_err(|e| malformed(format!("policy does not match the document shape: {e}")))?;

    let statements = wire
        .statement
        .into_iter()
        .enumerate()
        .map(|(index, s)| convert_statement(index, s))
        .collect::<LeastPrivResult<Vec<_>>>()?;

    debug!(
        version = %wire.version,
        statements = statements.len(),
        "parsed policy document"
    );

    Ok(PolicyDocument {
        version: wire.version,
        id: wire.id,
        statements,
    })
}

/// Render a document back to policy JSON.
///
/// Statement order and every action and resource string are preserved
/// verbatim. `Action` and `Resource` are always rendered as arrays.
pub fn render_document(document: &PolicyDocument) -> Value {
    let wire = WireDocument {
        version: document.version.clone(),
        id: document.id.clone(),
        statement: document.statements.iter().map(render_statement).collect(),
    };
    // Plain structs of strings and maps; serialization cannot fail.
    serde_json::to_value(wire).unwrap_or(Value::Null)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn malformed(reason: String) -> LeastPrivError {
    warn!(%reason, "rejecting malformed policy");
    LeastPrivError::MalformedPolicy { reason }
}

fn check_structure(value: &Value) -> LeastPrivResult<()> {
    let validator = jsonschema::validator_for(&document_schema())
        .map_err(|e| malformed(format!("built-in document schema failed to compile: {e}")))?;

    let violations: Vec<String> = validator
        .iter_errors(value)
        .map(|error| format!("at '{}': {}", error.instance_path, error))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(malformed(violations.join("; ")))
    }
}

fn convert_statement(index: usize, wire: WireStatement) -> LeastPrivResult<Statement> {
    let actions: Vec<ActionName> = wire.action.into_vec().into_iter().map(ActionName::new).collect();
    if actions.is_empty() {
        return Err(malformed(format!("statement {index} has an empty Action list")));
    }

    let resources = wire
        .resource
        .map(|r| r.into_vec().iter().map(|s| ResourceSpec::parse(s)).collect());

    let conditions = wire
        .condition
        .unwrap_or_default()
        .into_iter()
        .map(|(operator, key_values)| Condition { operator, key_values })
        .collect();

    Ok(Statement {
        sid: wire.sid,
        effect: wire.effect,
        actions,
        resources,
        conditions,
    })
}

fn render_statement(statement: &Statement) -> WireStatement {
    let condition = if statement.conditions.is_empty() {
        None
    } else {
        Some(
            statement
                .conditions
                .iter()
                .map(|c| (c.operator.clone(), c.key_values.clone()))
                .collect(),
        )
    };

    WireStatement {
        sid: statement.sid.clone(),
        effect: statement.effect,
        action: StringOrArray::Array(
            statement
                .actions
                .iter()
                .map(|a| a.as_str().to_string())
                .collect(),
        ),
        resource: statement.resources.as_ref().map(|resources| {
            StringOrArray::Array(resources.iter().map(|r| r.as_str().to_string()).collect())
        }),
        condition,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
