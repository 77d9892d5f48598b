//! # leastpriv-report
//!
//! Role-level auditing on top of the policy validator.
//!
//! ## Overview
//!
//! [`RoleAuditor`] reads the provisioned role from the provisioning outputs,
//! pulls every attached policy from a [`leastpriv_core::traits::PolicySource`]
//! and produces a [`ComplianceReport`] sealed with a SHA-256 fingerprint.
//! Identical inputs always produce the identical fingerprint, so a gate can
//! compare runs without comparing full reports.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use leastpriv_report::{outputs_from_file, DirectoryPolicySource, RoleAuditor};
//!
//! let outputs = outputs_from_file(Path::new("outputs.json"))?;
//! let source = DirectoryPolicySource::new("exported-policies");
//! let report = RoleAuditor::new(config).audit(&outputs, &source)?;
//!
//! assert!(verify_fingerprint(&report));
//! ```

pub mod audit;
pub mod fingerprint;
pub mod outputs;
pub mod report;
pub mod source;

pub use audit::RoleAuditor;
pub use fingerprint::{fingerprint, verify_fingerprint};
pub use outputs::{outputs_from_file, outputs_from_json_str};
pub use report::{ComplianceReport, DocumentOutcome, DocumentReport, RoleFinding};
pub use source::{role_name, DirectoryPolicySource, InMemoryPolicySource};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use leastpriv_contracts::{
        config::AuditConfig,
        discovery::{PolicyHandle, ProvisionedOutputs},
        error::LeastPrivError,
        validation::RuleId,
    };
    use leastpriv_core::traits::PolicySource;

    use super::{
        outputs_from_json_str, role_name, verify_fingerprint, DirectoryPolicySource,
        DocumentOutcome, InMemoryPolicySource, RoleAuditor,
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    const ROLE_ARN: &str = "arn:aws:iam::123456789012:role/github-deploy";
    const SECRET_ARN: &str = "arn:aws:secretsmanager:us-east-1:123456789012:secret:webhook-AbCdEf";

    fn outputs() -> ProvisionedOutputs {
        [("github_role_arn", ROLE_ARN), ("secrets_manager_arn", SECRET_ARN)]
            .into_iter()
            .collect()
    }

    fn secret_policy() -> String {
        json!({
            "Version": "2012-10-17",
            "Statement": [{
                "Effect": "Allow",
                "Action": ["secretsmanager:GetSecretValue"],
                "Resource": [SECRET_ARN]
            }]
        })
        .to_string()
    }

    fn destroy_policy(tagged: bool) -> String {
        let mut statement = json!({
            "Effect": "Allow",
            "Action": ["ec2:TerminateInstances", "ec2:DescribeInstances"],
            "Resource": "*"
        });
        if tagged {
            statement["Condition"] =
                json!({ "StringEquals": { "aws:ResourceTag/ManagedBy": "github-actions" } });
        }
        json!({ "Version": "2012-10-17", "Statement": [statement] }).to_string()
    }

    fn compliant_source() -> InMemoryPolicySource {
        InMemoryPolicySource::new()
            .with_policy(ROLE_ARN, "github-deploy-secrets", secret_policy())
            .with_policy(ROLE_ARN, "github-deploy-tagged-resource-destroy", destroy_policy(true))
    }

    fn config_requiring(fragment: &str) -> AuditConfig {
        let mut config = AuditConfig::default();
        config.role.required_policies = vec![fragment.to_string()];
        config
    }

    // ── 1. role audit ─────────────────────────────────────────────────────────

    #[test]
    fn test_compliant_role() {
        let auditor = RoleAuditor::new(config_requiring("tagged-resource-destroy"));
        let report = auditor.audit(&outputs(), &compliant_source()).unwrap();

        assert!(report.is_compliant(), "unexpected failures: {:#?}", report);
        assert_eq!(report.role, ROLE_ARN);
        assert_eq!(report.documents.len(), 2);
        assert_eq!(report.failure_count(), 0);
    }

    #[test]
    fn test_untagged_destroy_policy_fails() {
        let source = InMemoryPolicySource::new()
            .with_policy(ROLE_ARN, "secrets", secret_policy())
            .with_policy(ROLE_ARN, "destroy", destroy_policy(false));
        let report = RoleAuditor::new(AuditConfig::default())
            .audit(&outputs(), &source)
            .unwrap();

        assert!(!report.is_compliant());
        assert_eq!(report.failure_count(), 1);
        match &report.documents[1].outcome {
            DocumentOutcome::Validated { report } => {
                assert_eq!(report.failures_for(RuleId::MissingCondition).count(), 1);
            }
            other => panic!("expected validated document, got {:?}", other),
        }
    }

    #[test]
    fn test_role_without_policies_fails() {
        let source = InMemoryPolicySource::new().with_role(ROLE_ARN);
        let report = RoleAuditor::new(AuditConfig::default())
            .audit(&outputs(), &source)
            .unwrap();

        assert!(!report.is_compliant());
        assert!(report.role_findings.iter().any(|f| f.is_fail() && f.message.contains("should have attached policies")));
    }

    #[test]
    fn test_missing_sensitive_grant_fails() {
        let source = InMemoryPolicySource::new().with_policy(ROLE_ARN, "destroy", destroy_policy(true));
        let report = RoleAuditor::new(AuditConfig::default())
            .audit(&outputs(), &source)
            .unwrap();

        assert!(!report.is_compliant());
        assert!(report.role_findings.iter().any(|f| f.is_fail() && f.message.contains(SECRET_ARN)));
    }

    #[test]
    fn test_missing_required_policy_fails() {
        let auditor = RoleAuditor::new(config_requiring("permissions-boundary"));
        let report = auditor.audit(&outputs(), &compliant_source()).unwrap();

        assert!(!report.is_compliant());
        assert_eq!(report.failure_count(), 1);
    }

    #[test]
    fn test_malformed_document_is_unverifiable_and_audit_continues() {
        let source = InMemoryPolicySource::new()
            .with_policy(ROLE_ARN, "broken", "{ not json")
            .with_policy(ROLE_ARN, "secrets", secret_policy());
        let report = RoleAuditor::new(AuditConfig::default())
            .audit(&outputs(), &source)
            .unwrap();

        assert!(!report.is_compliant());
        assert_eq!(report.unverifiable().count(), 1);
        assert_eq!(report.documents.len(), 2);
        assert!(report.documents[1].is_compliant());
    }

    #[test]
    fn test_unverifiable_document_counts_as_failure() {
        let source = InMemoryPolicySource::new()
            .with_policy(ROLE_ARN, "broken", "{ not json")
            .with_policy(ROLE_ARN, "secrets", secret_policy());
        let report = RoleAuditor::new(AuditConfig::default())
            .audit(&outputs(), &source)
            .unwrap();

        assert_eq!(report.documents[0].failure_count(), 1);
        assert_eq!(report.documents[1].failure_count(), 0);
        assert!(report.role_findings.iter().all(|f| !f.is_fail()));
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.failure_count() == 0, report.is_compliant());
    }

    #[test]
    fn test_missing_role_output_is_error() {
        let outputs: ProvisionedOutputs = [("secrets_manager_arn", SECRET_ARN)].into_iter().collect();
        let result = RoleAuditor::new(AuditConfig::default()).audit(&outputs, &compliant_source());

        assert!(matches!(result, Err(LeastPrivError::OutputsError { .. })));
    }

    // ── 2. fingerprint ────────────────────────────────────────────────────────

    #[test]
    fn test_fingerprint_is_stable_across_runs() {
        let auditor = RoleAuditor::new(AuditConfig::default());
        let first = auditor.audit(&outputs(), &compliant_source()).unwrap();
        let second = auditor.audit(&outputs(), &compliant_source()).unwrap();

        assert_ne!(first.run_id, second.run_id);
        assert_eq!(first.fingerprint, second.fingerprint);
        assert_eq!(first.fingerprint.len(), 64);
        assert!(verify_fingerprint(&first));
    }

    #[test]
    fn test_fingerprint_detects_tampering() {
        let mut report = RoleAuditor::new(AuditConfig::default())
            .audit(&outputs(), &compliant_source())
            .unwrap();
        report.role_findings.clear();

        assert!(!verify_fingerprint(&report));
    }

    // ── 3. outputs ────────────────────────────────────────────────────────────

    #[test]
    fn test_plain_and_terraform_outputs() {
        let raw = json!({
            "github_role_arn": { "value": ROLE_ARN, "type": "string", "sensitive": false },
            "secrets_manager_arn": SECRET_ARN,
            "subnet_ids": { "value": ["subnet-1"], "type": ["list", "string"] }
        })
        .to_string();

        let outputs = outputs_from_json_str(&raw).unwrap();
        assert_eq!(outputs.get("github_role_arn"), Some(ROLE_ARN));
        assert_eq!(outputs.get("secrets_manager_arn"), Some(SECRET_ARN));
        assert!(matches!(
            outputs.require("subnet_ids"),
            Err(LeastPrivError::OutputsError { .. })
        ));
    }

    #[test]
    fn test_non_object_outputs_rejected() {
        assert!(outputs_from_json_str("[1, 2]").is_err());
        assert!(outputs_from_json_str("not json").is_err());
    }

    // ── 4. sources ────────────────────────────────────────────────────────────

    #[test]
    fn test_role_name() {
        assert_eq!(role_name(ROLE_ARN), "github-deploy");
        assert_eq!(role_name("arn:aws:iam::1:role/ci/deploy"), "deploy");
        assert_eq!(role_name("deploy"), "deploy");
    }

    #[test]
    fn test_in_memory_unknown_role() {
        let source = InMemoryPolicySource::new();
        assert!(matches!(
            source.attached_policies(ROLE_ARN),
            Err(LeastPrivError::SourceError { .. })
        ));
    }

    #[test]
    fn test_directory_source_lists_sorted_json() {
        let dir = tempfile::tempdir().unwrap();
        let role_dir = dir.path().join("github-deploy");
        std::fs::create_dir(&role_dir).unwrap();
        std::fs::write(role_dir.join("b-destroy.json"), destroy_policy(true)).unwrap();
        std::fs::write(role_dir.join("a-secrets.json"), secret_policy()).unwrap();
        std::fs::write(role_dir.join("notes.txt"), "ignored").unwrap();

        let source = DirectoryPolicySource::new(dir.path());
        let handles = source.attached_policies(ROLE_ARN).unwrap();
        let names: Vec<&str> = handles.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["a-secrets", "b-destroy"]);

        let document = source.policy_document(ROLE_ARN, &handles[0]).unwrap();
        assert!(document.contains("GetSecretValue"));

        let report = RoleAuditor::new(AuditConfig::default())
            .audit(&outputs(), &source)
            .unwrap();
        assert!(report.is_compliant(), "unexpected failures: {:#?}", report);
    }

    #[test]
    fn test_directory_source_unlisted_policy() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectoryPolicySource::new(dir.path());

        assert!(source.attached_policies(ROLE_ARN).is_err());
        assert!(source
            .policy_document(ROLE_ARN, &PolicyHandle::named("anything"))
            .is_err());
        assert!(source
            .policy_document(ROLE_ARN, &PolicyHandle::named("../escape"))
            .is_err());
    }

    #[test]
    fn test_in_memory_roles_do_not_share_documents() {
        let build = "arn:aws:iam::123456789012:role/ci/build";
        let deploy = "arn:aws:iam::123456789012:role/ci/deploy";
        let source = InMemoryPolicySource::new()
            .with_policy(build, "permissions", destroy_policy(true))
            .with_policy(deploy, "permissions", secret_policy());

        let build_handles = source.attached_policies(build).unwrap();
        let deploy_handles = source.attached_policies(deploy).unwrap();
        assert_eq!(build_handles[0].name, deploy_handles[0].name);

        let build_doc = source.policy_document(build, &build_handles[0]).unwrap();
        let deploy_doc = source.policy_document(deploy, &deploy_handles[0]).unwrap();
        assert_eq!(build_doc, destroy_policy(true));
        assert_eq!(deploy_doc, secret_policy());

        let unregistered = "arn:aws:iam::123456789012:role/ci/other";
        assert!(source
            .policy_document(unregistered, &build_handles[0])
            .is_err());
    }

    #[test]
    fn test_directory_roles_do_not_share_documents() {
        let dir = tempfile::tempdir().unwrap();
        for (role, document) in [("build", destroy_policy(true)), ("deploy", secret_policy())] {
            let role_dir = dir.path().join(role);
            std::fs::create_dir(&role_dir).unwrap();
            std::fs::write(role_dir.join("permissions.json"), document).unwrap();
        }

        let source = DirectoryPolicySource::new(dir.path());
        let build = source.attached_policies("build").unwrap();
        let deploy = source.attached_policies("deploy").unwrap();

        assert_eq!(
            source.policy_document("build", &build[0]).unwrap(),
            destroy_policy(true)
        );
        assert_eq!(
            source.policy_document("deploy", &deploy[0]).unwrap(),
            secret_policy()
        );
    }
}
