//! `PolicySource` implementations that need no cloud access.
//!
//! - `InMemoryPolicySource` : documents registered in code (tests, scenarios)
//! - `DirectoryPolicySource`: `<root>/<role-name>/<policy-name>.json`
//!
//! Both accept either a role ARN or a bare role name: the role name is the
//! last `/` segment of the identifier.

use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
};

use tracing::debug;

use leastpriv_contracts::{
    discovery::PolicyHandle,
    error::{LeastPrivError, LeastPrivResult},
};
use leastpriv_core::traits::PolicySource;

/// `arn:aws:iam::123456789012:role/ci/deploy` → `deploy`.
pub fn role_name(role: &str) -> &str {
    role.rsplit('/').next().unwrap_or(role)
}

// ── In-memory ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct InMemoryPolicySource {
    attached: BTreeMap<String, Vec<PolicyHandle>>,
    /// Keyed by (role name, policy name).
    documents: HashMap<(String, String), String>,
}

impl InMemoryPolicySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `document` to `role` under `policy_name`. Listing order is
    /// registration order.
    pub fn with_policy(
        mut self,
        role: &str,
        policy_name: impl Into<String>,
        document: impl Into<String>,
    ) -> Self {
        let role = role_name(role).to_string();
        let policy_name = policy_name.into();
        self.attached
            .entry(role.clone())
            .or_default()
            .push(PolicyHandle::named(policy_name.clone()));
        self.documents.insert((role, policy_name), document.into());
        self
    }

    /// Register `role` with no attached policies.
    pub fn with_role(mut self, role: &str) -> Self {
        self.attached.entry(role_name(role).to_string()).or_default();
        self
    }
}

impl PolicySource for InMemoryPolicySource {
    fn attached_policies(&self, role: &str) -> LeastPrivResult<Vec<PolicyHandle>> {
        self.attached
            .get(role_name(role))
            .cloned()
            .ok_or_else(|| LeastPrivError::SourceError {
                reason: format!("unknown role '{role}'"),
            })
    }

    fn policy_document(&self, role: &str, policy: &PolicyHandle) -> LeastPrivResult<String> {
        let key = (role_name(role).to_string(), policy.name.clone());
        self.documents
            .get(&key)
            .cloned()
            .ok_or_else(|| LeastPrivError::SourceError {
                reason: format!("no document for policy '{}' on role '{role}'", policy.name),
            })
    }
}

// ── Directory ─────────────────────────────────────────────────────────────────

/// Reads exported policies from disk.
///
/// `attached_policies` lists `<root>/<role-name>/*.json` in sorted file-name
/// order; each handle is named after its file stem. `policy_document` reads
/// `<root>/<role-name>/<policy-name>.json`.
pub struct DirectoryPolicySource {
    root: PathBuf,
}

impl DirectoryPolicySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn policy_path(&self, role: &str, policy: &str) -> PathBuf {
        self.root
            .join(role_name(role))
            .join(format!("{policy}.json"))
    }
}

impl PolicySource for DirectoryPolicySource {
    fn attached_policies(&self, role: &str) -> LeastPrivResult<Vec<PolicyHandle>> {
        let dir = self.root.join(role_name(role));
        let entries = std::fs::read_dir(&dir).map_err(|e| LeastPrivError::SourceError {
            reason: format!("failed to list policies in '{}': {e}", dir.display()),
        })?;

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| LeastPrivError::SourceError {
                reason: format!("failed to list policies in '{}': {e}", dir.display()),
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut handles = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            debug!(policy = name, path = %path.display(), "found policy file");
            handles.push(PolicyHandle::named(name));
        }
        Ok(handles)
    }

    fn policy_document(&self, role: &str, policy: &PolicyHandle) -> LeastPrivResult<String> {
        if policy.name.contains(['/', '\\']) || policy.name.starts_with('.') {
            return Err(LeastPrivError::SourceError {
                reason: format!("invalid policy name '{}'", policy.name),
            });
        }
        let path = self.policy_path(role, &policy.name);
        std::fs::read_to_string(&path).map_err(|e| LeastPrivError::SourceError {
            reason: format!("failed to read policy '{}': {e}", path.display()),
        })
    }
}
