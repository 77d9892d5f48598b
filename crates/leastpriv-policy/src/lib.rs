//! # leastpriv-policy
//!
//! Turning inputs into typed values: policy JSON into a `PolicyDocument`,
//! action strings into `ActionClass` labels, TOML into an `AuditConfig`.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use leastpriv_policy::{parse_document, ActionClassifier, config_from_file};
//!
//! let config = config_from_file(Path::new("rules.toml"))?;
//! let classifier = ActionClassifier::new(&config.rules);
//! let document = parse_document(&policy_json)?;
//! ```

pub mod classifier;
pub mod parser;
pub mod rules;

pub use classifier::ActionClassifier;
pub use parser::{parse_document, parse_value, render_document};
pub use rules::{config_from_file, config_from_toml_str, validate_config};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;

    use leastpriv_contracts::{config::AuditConfig, error::LeastPrivError};

    use crate::{config_from_file, config_from_toml_str};

    fn expect_config_error(toml: &str) -> String {
        match config_from_toml_str(toml) {
            Err(LeastPrivError::ConfigError { reason }) => reason,
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    // ── 1. defaults ───────────────────────────────────────────────────────────

    /// An empty file yields the baseline configuration.
    #[test]
    fn test_empty_config_uses_defaults() {
        let config = config_from_toml_str("").unwrap();
        assert_eq!(config, AuditConfig::default());
    }

    // ── 2. full config ────────────────────────────────────────────────────────

    #[test]
    fn test_full_config() {
        let toml = r#"
            [rules]
            allow_list_wildcard_actions = ["ec2:Describe*", "xray:PutTraceSegments"]
            sensitive_service_prefixes = ["secretsmanager", "kms"]
            tag_condition_key_substring = "ResourceTag"
            evaluate_deny_statements = false

            [role]
            role_output = "deploy_role_arn"
            sensitive_resource_outputs = []
            required_policies = ["tagged-resource-destroy"]
        "#;

        let config = config_from_toml_str(toml).unwrap();

        assert_eq!(config.rules.allow_list_wildcard_actions.len(), 2);
        assert_eq!(config.rules.sensitive_service_prefixes, vec!["secretsmanager", "kms"]);
        assert!(!config.rules.evaluate_deny_statements);
        // Unspecified fields keep their defaults.
        assert!(config.rules.destructive_verbs.iter().any(|v| v == "Delete"));
        assert_eq!(config.role.role_output, "deploy_role_arn");
        assert!(config.role.sensitive_resource_outputs.is_empty());
        assert_eq!(config.role.required_policies, vec!["tagged-resource-destroy"]);
    }

    // ── 3. rejected values ────────────────────────────────────────────────────

    #[test]
    fn test_bare_star_allow_list_rejected() {
        let reason = expect_config_error(
            r#"
            [rules]
            allow_list_wildcard_actions = ["*"]
        "#,
        );
        assert!(reason.contains("exempt every action"), "got: {reason}");
    }

    #[test]
    fn test_empty_destructive_verb_list_rejected() {
        let reason = expect_config_error(
            r#"
            [rules]
            destructive_verbs = []
        "#,
        );
        assert!(reason.contains("destructive_verbs"), "got: {reason}");
    }

    #[test]
    fn test_custom_destructive_verb_list_accepted() {
        let config = config_from_toml_str(
            r#"
            [rules]
            destructive_verbs = ["Stop"]
        "#,
        )
        .unwrap();
        assert_eq!(config.rules.destructive_verbs, vec!["Stop"]);
    }

    #[test]
    fn test_empty_tag_substring_rejected() {
        expect_config_error(
            r#"
            [rules]
            tag_condition_key_substring = ""
        "#,
        );
    }

    // ── 4. parse errors ───────────────────────────────────────────────────────

    #[test]
    fn test_toml_parse_error() {
        let reason = expect_config_error("this is not valid toml ][[[");
        assert!(
            reason.contains("failed to parse rule config TOML"),
            "expected parse error message, got: {reason}"
        );
    }

    #[test]
    fn test_wrong_type_rejected() {
        expect_config_error(
            r#"
            [rules]
            sensitive_service_prefixes = "secretsmanager"
        "#,
        );
    }

    // ── 5. files ──────────────────────────────────────────────────────────────

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[role]\nrequired_policies = [\"permissions\"]").unwrap();

        let config = config_from_file(file.path()).unwrap();
        assert_eq!(config.role.required_policies, vec!["permissions"]);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        match config_from_file(&missing) {
            Err(LeastPrivError::ConfigError { reason }) => {
                assert!(reason.contains("absent.toml"), "got: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }
}
