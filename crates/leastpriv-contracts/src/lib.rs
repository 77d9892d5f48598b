//! # leastpriv-contracts
//!
//! Shared types for the leastpriv policy validator.
//!
//! Every crate in the workspace imports from here. No rule logic lives in
//! this crate: only the document model, configuration schema, findings and
//! error types.

pub mod action;
pub mod config;
pub mod discovery;
pub mod document;
pub mod error;
pub mod validation;

#[cfg(test)]
mod tests {
    use super::*;
    use action::ActionName;
    use config::{AuditConfig, RuleConfig};
    use discovery::ProvisionedOutputs;
    use document::{Effect, ResourceSpec, Statement};
    use error::LeastPrivError;
    use validation::{RuleId, ValidationFinding, ValidationReport};

    fn statement(resources: Option<Vec<&str>>) -> Statement {
        Statement {
            sid: None,
            effect: Effect::Allow,
            actions: vec![ActionName::new("ec2:DescribeInstances")],
            resources: resources.map(|r| r.into_iter().map(ResourceSpec::parse).collect()),
            conditions: Vec::new(),
        }
    }

    // ── ActionName ───────────────────────────────────────────────────────────

    #[test]
    fn action_name_splits_service_and_verb() {
        let action = ActionName::new("ec2:TerminateInstances");
        assert_eq!(action.service(), "ec2");
        assert_eq!(action.verb(), "TerminateInstances");
        assert!(!action.is_service_wildcard());
    }

    #[test]
    fn action_name_wildcards() {
        assert!(ActionName::new("*").is_service_wildcard());
        assert!(ActionName::new("s3:*").is_service_wildcard());
        assert!(!ActionName::new("s3:Get*").is_service_wildcard());
        assert_eq!(ActionName::new("*").service(), "*");
    }

    #[test]
    fn action_name_is_built_and_read_through_methods() {
        let action: ActionName = "s3:GetObject".into();
        assert_eq!(action, ActionName::new("s3:GetObject"));
        assert_eq!(action.as_str(), "s3:GetObject");
        assert_eq!(action.to_string(), "s3:GetObject");

        let encoded = serde_json::to_string(&action).unwrap();
        assert_eq!(encoded, "\"s3:GetObject\"");
        let decoded: ActionName = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.verb(), "GetObject");
    }

    // ── Statement resources ──────────────────────────────────────────────────

    #[test]
    fn absent_resource_counts_as_wildcard() {
        assert!(statement(None).has_wildcard_resource());
    }

    #[test]
    fn only_literal_star_is_wildcard() {
        assert!(statement(Some(vec!["arn:aws:s3:::b", "*"])).has_wildcard_resource());
        assert!(!statement(Some(vec!["arn:aws:s3:::b/*"])).has_wildcard_resource());
        assert_eq!(ResourceSpec::parse("*").as_str(), "*");
    }

    // ── ValidationReport ─────────────────────────────────────────────────────

    #[test]
    fn report_compliant_only_without_failures() {
        let mut report = ValidationReport::default();
        report
            .findings
            .push(ValidationFinding::pass(Some(0), RuleId::MissingCondition, "ok"));
        assert!(report.is_compliant());

        report.findings.push(ValidationFinding::fail(
            Some(1),
            RuleId::UnscopedSensitiveAccess,
            "wildcard",
        ));
        assert!(!report.is_compliant());
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.failures_for(RuleId::UnscopedSensitiveAccess).count(), 1);
        assert_eq!(report.failures_for(RuleId::MissingCondition).count(), 0);
    }

    #[test]
    fn rule_id_serializes_kebab_case() {
        let json = serde_json::to_string(&RuleId::UnscopedDestructiveWildcard).unwrap();
        assert_eq!(json, "\"unscoped-destructive-wildcard\"");
        assert_eq!(RuleId::MissingTagCondition.to_string(), "missing-tag-condition");
    }

    // ── Configuration defaults ───────────────────────────────────────────────

    #[test]
    fn rule_config_defaults() {
        let config = RuleConfig::default();
        assert_eq!(config.tag_condition_key_substring, "ResourceTag");
        assert_eq!(config.sensitive_service_prefixes, vec!["secretsmanager"]);
        assert!(config.destructive_verbs.iter().any(|v| v == "Terminate"));
        assert!(config.read_only_verbs.iter().any(|v| v == "Describe"));
        assert!(config.evaluate_deny_statements);
    }

    #[test]
    fn audit_config_deserializes_from_empty_object() {
        let config: AuditConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AuditConfig::default());
        assert_eq!(config.role.role_output, "github_role_arn");
    }

    // ── ProvisionedOutputs ───────────────────────────────────────────────────

    #[test]
    fn outputs_require_reports_missing_name() {
        let outputs: ProvisionedOutputs = [("github_role_arn", "arn:aws:iam::1:role/r")]
            .into_iter()
            .collect();
        assert_eq!(outputs.require("github_role_arn").unwrap(), "arn:aws:iam::1:role/r");

        match outputs.require("secrets_manager_arn") {
            Err(LeastPrivError::OutputsError { reason }) => {
                assert!(reason.contains("secrets_manager_arn"), "got: {reason}");
            }
            other => panic!("expected OutputsError, got {:?}", other),
        }
    }

    // ── LeastPrivError display messages ──────────────────────────────────────

    #[test]
    fn error_malformed_policy_display() {
        let err = LeastPrivError::MalformedPolicy {
            reason: "Statement is not an array".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("malformed policy"));
        assert!(msg.contains("Statement is not an array"));
    }

    #[test]
    fn error_source_error_display() {
        let err = LeastPrivError::SourceError {
            reason: "role 'deploy' not found".to_string(),
        };
        assert!(err.to_string().contains("policy source error"));
    }
}
