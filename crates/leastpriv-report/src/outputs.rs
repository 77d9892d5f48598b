//! Loading provisioning outputs.
//!
//! Two JSON shapes are accepted, and may be mixed within one object:
//!
//! ```text
//! plain:      { "github_role_arn": "arn:aws:iam::…:role/deploy" }
//! terraform:  { "github_role_arn": { "value": "arn:…", "type": "string", "sensitive": false } }
//! ```
//!
//! Values that are not strings (lists, maps, numbers) are dropped; asking for
//! one later fails with `OutputsError`.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use leastpriv_contracts::{
    discovery::ProvisionedOutputs,
    error::{LeastPrivError, LeastPrivResult},
};

pub fn outputs_from_json_str(raw: &str) -> LeastPrivResult<ProvisionedOutputs> {
    let value: Value = serde_json::from_str(raw).map_err(|e| LeastPrivError::OutputsError {
        reason: format!("failed to parse outputs JSON: {e}"),
    })?;

    let Value::Object(entries) = value else {
        return Err(LeastPrivError::OutputsError {
            reason: "outputs JSON must be an object of name → value".to_string(),
        });
    };

    let mut outputs = ProvisionedOutputs::default();
    for (name, entry) in entries {
        let resolved = match &entry {
            Value::String(s) => Some(s.clone()),
            Value::Object(wrapped) => wrapped
                .get("value")
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        };
        match resolved {
            Some(value) => {
                outputs.values.insert(name, value);
            }
            None => debug!(output = %name, "skipping non-string output"),
        }
    }
    Ok(outputs)
}

pub fn outputs_from_file(path: &Path) -> LeastPrivResult<ProvisionedOutputs> {
    let raw = std::fs::read_to_string(path).map_err(|e| LeastPrivError::OutputsError {
        reason: format!("failed to read outputs file '{}': {e}", path.display()),
    })?;
    outputs_from_json_str(&raw)
}
