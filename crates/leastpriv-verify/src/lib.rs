//! # leastpriv-verify
//!
//! The least-privilege rules and [`engine::PolicyValidator`], which wires
//! them into a [`leastpriv_core::Validator`] in a fixed order:
//!
//! 1. **version** – the document uses `2012-10-17`.
//! 2. **destructive-action** – destructive grants carry a tag condition.
//! 3. **wildcard-resource** – `Resource: "*"` only for read-only actions, or
//!    behind a tag condition.
//! 4. **action-wildcard** – no `*` / `service:*` grants.
//! 5. **sensitive-scope** – secret-store actions name their resources.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use leastpriv_verify::PolicyValidator;
//!
//! let validator = PolicyValidator::new(&RuleConfig::default());
//! let report = validator.validate_json(&policy_json, &ValidationContext::default())?;
//! for failure in report.failures() {
//!     eprintln!("{}: {}", failure.rule, failure.message);
//! }
//! ```

use leastpriv_contracts::{
    action::ActionName,
    document::{Effect, Statement},
};

pub mod destructive;
pub mod engine;
pub mod sensitive;
pub mod tag_condition;
pub mod version;
pub mod wildcard;

pub use engine::PolicyValidator;

/// Whether the statement rules look at `statement` at all.
pub(crate) fn in_scope(statement: &Statement, evaluate_deny: bool) -> bool {
    statement.effect == Effect::Allow || evaluate_deny
}

pub(crate) fn join_actions<'a>(actions: impl IntoIterator<Item = &'a ActionName>) -> String {
    actions
        .into_iter()
        .map(|a| a.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
