//! TOML loading for the rule configuration.
//!
//! Parses an `AuditConfig` from a TOML string or file and rejects values
//! that would silently disable a rule: an empty tag-key substring, a bare
//! `*` allow-list entry, or an empty destructive verb list.

use std::path::Path;

use tracing::debug;

use leastpriv_contracts::{
    config::AuditConfig,
    error::{LeastPrivError, LeastPrivResult},
};

/// Parse `s` as TOML and validate the resulting configuration.
///
/// Returns `LeastPrivError::ConfigError` if the TOML is malformed, does not
/// match the `AuditConfig` schema, or carries a value rejected by
/// [`validate_config`].
pub fn config_from_toml_str(s: &str) -> LeastPrivResult<AuditConfig> {
    let config: AuditConfig = toml::from_str(s).map_err(|e| LeastPrivError::ConfigError {
        reason: format!("failed to parse rule config TOML: {}", e),
    })?;
    validate_config(&config)?;
    debug!(
        allow_list = config.rules.allow_list_wildcard_actions.len(),
        sensitive_prefixes = ?config.rules.sensitive_service_prefixes,
        role_output = %config.role.role_output,
        "loaded rule configuration"
    );
    Ok(config)
}

/// Read the file at `path` and parse it as rule configuration.
pub fn config_from_file(path: &Path) -> LeastPrivResult<AuditConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| LeastPrivError::ConfigError {
        reason: format!("failed to read rule config '{}': {}", path.display(), e),
    })?;
    config_from_toml_str(&contents)
}

/// Reject configurations that would make a rule vacuous.
pub fn validate_config(config: &AuditConfig) -> LeastPrivResult<()> {
    let rules = &config.rules;

    if rules.tag_condition_key_substring.is_empty() {
        return Err(config_error("tag_condition_key_substring must not be empty"));
    }
    for entry in &rules.allow_list_wildcard_actions {
        if entry.is_empty() || entry == "*" {
            return Err(config_error(format!(
                "allow-list entry '{entry}' would exempt every action"
            )));
        }
    }
    if rules.destructive_verbs.is_empty() {
        return Err(config_error("rules.destructive_verbs must not be empty"));
    }
    for verb in rules.destructive_verbs.iter().chain(&rules.read_only_verbs) {
        if verb.is_empty() {
            return Err(config_error("verb fragments must not be empty"));
        }
    }
    if rules.sensitive_service_prefixes.iter().any(String::is_empty) {
        return Err(config_error("sensitive service prefixes must not be empty"));
    }
    if config.role.role_output.is_empty() {
        return Err(config_error("role.role_output must name a provisioning output"));
    }
    Ok(())
}

fn config_error(reason: impl Into<String>) -> LeastPrivError {
    LeastPrivError::ConfigError {
        reason: reason.into(),
    }
}
