//! Action names and their security classification.
//!
//! An action is written `service:Verb` (e.g. `ec2:TerminateInstances`). The
//! classifier in `leastpriv-policy` only ever looks at the two halves exposed
//! here; nothing in this module decides what is safe.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single action string exactly as it appeared in the policy document.
///
/// Immutable after parse. The string is kept verbatim (including wildcards
/// such as `ec2:Describe*`) so that rendering a parsed document reproduces
/// the original action list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionName(String);

impl ActionName {
    /// Construct an action from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The service prefix: everything before the first `:`.
    ///
    /// The bare action `*` has service `*`.
    pub fn service(&self) -> &str {
        match self.0.split_once(':') {
            Some((service, _)) => service,
            None => &self.0,
        }
    }

    /// The verb fragment: everything after the first `:`.
    ///
    /// An action without a colon (only `*` in practice) is its own verb.
    pub fn verb(&self) -> &str {
        match self.0.split_once(':') {
            Some((_, verb)) => verb,
            None => &self.0,
        }
    }

    /// True for `*` and `service:*`, which grant every verb of a service.
    pub fn is_service_wildcard(&self) -> bool {
        self.verb() == "*"
    }
}

impl fmt::Display for ActionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The label the action classifier assigns to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionClass {
    /// Describe/Get/List verbs, or an action on the organisational allow-list.
    ReadOnly,
    /// Delete/Terminate/Remove/Modify/Put/Create verbs.
    Destructive,
    /// Neither flagged safe nor flagged destructive.
    Other,
}
