//! Discovery data handed over by external collaborators.
//!
//! The provisioning tool produces named outputs; the identity API lists the
//! policies attached to a role. leastpriv only consumes these values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LeastPrivError, LeastPrivResult};

/// Output name → string value, captured after a successful provisioning run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedOutputs {
    pub values: BTreeMap<String, String>,
}

impl ProvisionedOutputs {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Look up `name`, failing with `OutputsError` when it is absent.
    pub fn require(&self, name: &str) -> LeastPrivResult<&str> {
        self.get(name).ok_or_else(|| LeastPrivError::OutputsError {
            reason: format!("required output '{name}' is missing or not a string"),
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProvisionedOutputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A policy attached to a role, as listed by the identity API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyHandle {
    /// The policy name, e.g. `deploy-tagged-resource-destroy`.
    pub name: String,
    /// The policy ARN when the source knows it.
    pub arn: Option<String>,
}

impl PolicyHandle {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arn: None,
        }
    }
}
