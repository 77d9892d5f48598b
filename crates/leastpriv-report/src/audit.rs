//! Role audit: every policy attached to the provisioned automation role,
//! validated and sealed into a `ComplianceReport`.
//!
//! Steps:
//!
//! 1. read the role identifier and expected sensitive identifiers from the
//!    provisioning outputs (missing output → `OutputsError`, no report);
//! 2. list the role's attached policies (none → role-level fail);
//! 3. fetch and validate each document; one that cannot be fetched or
//!    parsed is recorded as unverifiable and the audit moves on;
//! 4. role-level checks: sensitive access is granted somewhere when a
//!    sensitive resource was provisioned, and every required policy name
//!    fragment matches an attached policy;
//! 5. fingerprint and seal.

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use leastpriv_contracts::{
    config::AuditConfig,
    discovery::{PolicyHandle, ProvisionedOutputs},
    error::LeastPrivResult,
    validation::ValidationContext,
};
use leastpriv_core::traits::PolicySource;
use leastpriv_policy::parse_document;
use leastpriv_verify::PolicyValidator;

use crate::{
    fingerprint::fingerprint,
    report::{ComplianceReport, DocumentOutcome, DocumentReport, RoleFinding},
};

pub struct RoleAuditor {
    config: AuditConfig,
    validator: PolicyValidator,
}

impl RoleAuditor {
    pub fn new(config: AuditConfig) -> Self {
        let validator = PolicyValidator::new(&config.rules);
        Self { config, validator }
    }

    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    pub fn audit(
        &self,
        outputs: &ProvisionedOutputs,
        source: &dyn PolicySource,
    ) -> LeastPrivResult<ComplianceReport> {
        let requirements = &self.config.role;
        let role = outputs.require(&requirements.role_output)?.to_string();
        let expected = requirements
            .sensitive_resource_outputs
            .iter()
            .map(|name| outputs.require(name).map(str::to_string))
            .collect::<LeastPrivResult<Vec<_>>>()?;
        let ctx = ValidationContext::with_expected(expected.iter().cloned());

        info!(role = %role, expected = expected.len(), "auditing role");

        let handles = source.attached_policies(&role)?;
        let mut role_findings = Vec::new();
        if handles.is_empty() {
            role_findings.push(RoleFinding::fail(format!(
                "role '{role}' should have attached policies"
            )));
        } else {
            role_findings.push(RoleFinding::pass(format!(
                "role '{role}' has {} attached policies",
                handles.len()
            )));
        }

        let mut documents = Vec::with_capacity(handles.len());
        let mut grants_sensitive = false;
        for handle in &handles {
            let (report, sensitive) = self.audit_document(source, &role, handle, &ctx);
            grants_sensitive |= sensitive;
            documents.push(report);
        }

        if !expected.is_empty() {
            role_findings.push(if grants_sensitive {
                RoleFinding::pass("an attached policy grants access to the provisioned sensitive resources")
            } else {
                RoleFinding::fail(format!(
                    "no attached policy grants access to the provisioned sensitive resources [{}]",
                    expected.join(", ")
                ))
            });
        }

        for fragment in &requirements.required_policies {
            let found = handles.iter().any(|h| h.name.contains(fragment.as_str()));
            role_findings.push(if found {
                RoleFinding::pass(format!("required policy '{fragment}' is attached"))
            } else {
                RoleFinding::fail(format!("no attached policy name contains '{fragment}'"))
            });
        }

        let fingerprint = fingerprint(&role, &documents, &role_findings)?;
        let report = ComplianceReport {
            run_id: Uuid::new_v4(),
            role,
            generated_at: Utc::now(),
            documents,
            role_findings,
            fingerprint,
        };

        info!(
            run_id = %report.run_id,
            documents = report.documents.len(),
            failures = report.failure_count(),
            compliant = report.is_compliant(),
            "role audit complete"
        );
        Ok(report)
    }

    /// Validate one attached policy. Also reports whether it grants
    /// sensitive access.
    fn audit_document(
        &self,
        source: &dyn PolicySource,
        role: &str,
        handle: &PolicyHandle,
        ctx: &ValidationContext,
    ) -> (DocumentReport, bool) {
        let parsed = source
            .policy_document(role, handle)
            .and_then(|raw| parse_document(&raw));

        let (outcome, sensitive) = match parsed {
            Ok(document) => {
                let sensitive = self.validator.grants_sensitive_access(&document);
                let report = self.validator.validate(&document, ctx);
                (DocumentOutcome::Validated { report }, sensitive)
            }
            Err(e) => {
                warn!(policy = %handle.name, error = %e, "policy is unverifiable");
                (
                    DocumentOutcome::Unverifiable {
                        reason: e.to_string(),
                    },
                    false,
                )
            }
        };

        (
            DocumentReport {
                name: handle.name.clone(),
                arn: handle.arn.clone(),
                outcome,
            },
            sensitive,
        )
    }
}
