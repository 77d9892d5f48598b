//! # leastpriv-ref-github
//!
//! Reference audits of a GitHub Actions deployment role.
//!
//! Demonstrates four scenarios on fictional fixtures:
//!
//! 1. **Well-scoped role**: every rule and role requirement passes.
//! 2. **Over-broad role**: one failure per rule, plus a missing required
//!    policy.
//! 3. **Secret scoping**: a concrete resource that is not the provisioned
//!    secret.
//! 4. **Allow-list**: the same telemetry policy under two rule sets.
//!
//! No cloud API is called.

use leastpriv_contracts::{config::AuditConfig, error::LeastPrivResult};
use leastpriv_policy::config_from_toml_str;

pub mod fixtures;
pub mod scenarios;

/// Embedded rule configuration for the GitHub Actions role.
pub const GITHUB_ACTIONS_RULES: &str = include_str!("../policies/github-actions.toml");

pub fn audit_config() -> LeastPrivResult<AuditConfig> {
    config_from_toml_str(GITHUB_ACTIONS_RULES)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
