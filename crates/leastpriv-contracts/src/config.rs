//! Rule configuration schema.
//!
//! `AuditConfig` is deserialized from TOML by `leastpriv-policy`. Every field
//! has a default, so an empty file yields the organisation's baseline rules.
//!
//! Example:
//! ```toml
//! [rules]
//! allow_list_wildcard_actions = ["ec2:Describe*", "xray:PutTraceSegments"]
//! sensitive_service_prefixes = ["secretsmanager"]
//!
//! [role]
//! role_output = "github_role_arn"
//! required_policies = ["tagged-resource-destroy"]
//! ```

use serde::{Deserialize, Serialize};

/// Options consumed by the action classifier and the rule checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// Actions exempt from wildcard-resource scrutiny.
    ///
    /// An entry is an exact action name, or a prefix glob when it ends in
    /// `*` (`ec2:Describe*` matches `ec2:DescribeInstances`).
    pub allow_list_wildcard_actions: Vec<String>,

    /// Service prefixes (the part before `:`) whose resources must always be
    /// scoped to concrete identifiers.
    pub sensitive_service_prefixes: Vec<String>,

    /// Substring a `StringEquals` condition key must contain to count as a
    /// tag-equality constraint.
    pub tag_condition_key_substring: String,

    /// Verb fragments that make an action destructive (case-sensitive).
    pub destructive_verbs: Vec<String>,

    /// Verb fragments that make an action read-only (case-sensitive).
    pub read_only_verbs: Vec<String>,

    /// When false, `Deny` statements are skipped by the statement rules.
    pub evaluate_deny_statements: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            allow_list_wildcard_actions: Vec::new(),
            sensitive_service_prefixes: vec!["secretsmanager".to_string()],
            tag_condition_key_substring: "ResourceTag".to_string(),
            destructive_verbs: ["Delete", "Terminate", "Remove", "Modify", "Put", "Create"]
                .into_iter()
                .map(String::from)
                .collect(),
            read_only_verbs: ["Describe", "Get", "List"]
                .into_iter()
                .map(String::from)
                .collect(),
            evaluate_deny_statements: true,
        }
    }
}

/// Role-level expectations checked by the role audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleRequirements {
    /// Name of the provisioning output holding the audited role's ARN.
    pub role_output: String,

    /// Provisioning outputs whose values are the sensitive resources the
    /// role must be scoped to (e.g. the provisioned secret's ARN).
    pub sensitive_resource_outputs: Vec<String>,

    /// Name fragments that must each match at least one attached policy.
    pub required_policies: Vec<String>,
}

impl Default for RoleRequirements {
    fn default() -> Self {
        Self {
            role_output: "github_role_arn".to_string(),
            sensitive_resource_outputs: vec!["secrets_manager_arn".to_string()],
            required_policies: Vec::new(),
        }
    }
}

/// The top-level structure of a rule configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    pub rules: RuleConfig,
    pub role: RoleRequirements,
}
