//! Fictional provisioning outputs and policy documents for a GitHub Actions
//! deployment role.
//!
//! Nothing here talks to a cloud account. The documents mirror what a
//! webhook + Lambda stack typically attaches to its CI role, in a well-scoped
//! and an over-broad variant.

use serde_json::{json, Value};

use leastpriv_contracts::discovery::ProvisionedOutputs;

pub const ACCOUNT: &str = "123456789012";
pub const ROLE_ARN: &str = "arn:aws:iam::123456789012:role/webhook-github-actions";
pub const SECRET_ARN: &str =
    "arn:aws:secretsmanager:us-east-1:123456789012:secret:webhook-github-token-Xk9Lmq";

pub const PERMISSIONS_POLICY: &str = "webhook-github-actions-permissions";
pub const DESTROY_POLICY: &str = "webhook-github-actions-tagged-resource-destroy";

/// Outputs as written by `terraform output -json` after a successful apply.
pub fn terraform_outputs_json() -> Value {
    json!({
        "github_role_arn": { "value": ROLE_ARN, "type": "string", "sensitive": false },
        "secrets_manager_arn": { "value": SECRET_ARN, "type": "string", "sensitive": false },
        "webhook_url": {
            "value": "https://abc123.execute-api.us-east-1.amazonaws.com/prod/webhook",
            "type": "string",
            "sensitive": false
        },
        "lambda_function_names": {
            "value": ["webhook-handler", "telegram-bot"],
            "type": ["list", "string"],
            "sensitive": false
        }
    })
}

pub fn outputs() -> ProvisionedOutputs {
    [("github_role_arn", ROLE_ARN), ("secrets_manager_arn", SECRET_ARN)]
        .into_iter()
        .collect()
}

fn managed_by_tag() -> Value {
    json!({ "StringEquals": { "aws:ResourceTag/ManagedBy": "github-actions" } })
}

// ── Well-scoped policies ──────────────────────────────────────────────────────

/// Day-to-day deployment permissions: read infrastructure, read the webhook
/// token, update the functions of this stack.
pub fn permissions_policy() -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Sid": "ReadInfrastructure",
                "Effect": "Allow",
                "Action": ["ec2:DescribeInstances", "ec2:DescribeSecurityGroups", "ec2:DescribeVpcs"],
                "Resource": "*"
            },
            {
                "Sid": "ReadWebhookToken",
                "Effect": "Allow",
                "Action": ["secretsmanager:GetSecretValue", "secretsmanager:DescribeSecret"],
                "Resource": SECRET_ARN
            },
            {
                "Sid": "UpdateStackFunctions",
                "Effect": "Allow",
                "Action": ["lambda:UpdateFunctionCode", "lambda:UpdateFunctionConfiguration"],
                "Resource": [
                    format!("arn:aws:lambda:us-east-1:{ACCOUNT}:function:webhook-handler"),
                    format!("arn:aws:lambda:us-east-1:{ACCOUNT}:function:telegram-bot")
                ]
            }
        ]
    })
}

/// Teardown permissions, only for resources tagged `ManagedBy=github-actions`.
pub fn tagged_destroy_policy() -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Sid": "DestroyManagedResources",
            "Effect": "Allow",
            "Action": [
                "ec2:TerminateInstances",
                "lambda:DeleteFunction",
                "logs:DeleteLogGroup"
            ],
            "Resource": "*",
            "Condition": managed_by_tag()
        }]
    })
}

/// Tracing permissions for the stack's functions. X-Ray accepts no resource
/// scoping, so these only pass with the allow-list configured.
pub fn telemetry_policy() -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Sid": "XRayTracing",
            "Effect": "Allow",
            "Action": ["xray:PutTraceSegments", "xray:PutTelemetryRecords"],
            "Resource": "*"
        }]
    })
}

// ── Over-broad policies ───────────────────────────────────────────────────────

/// The permissions policy as it often starts out: every shortcut taken.
pub fn overbroad_permissions_policy() -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [
            {
                "Sid": "ReadAnySecret",
                "Effect": "Allow",
                "Action": "secretsmanager:GetSecretValue",
                "Resource": "*"
            },
            {
                "Sid": "ArtifactBucket",
                "Effect": "Allow",
                "Action": "s3:*",
                "Resource": ["arn:aws:s3:::webhook-artifacts", "arn:aws:s3:::webhook-artifacts/*"]
            },
            {
                "Sid": "StopInstances",
                "Effect": "Allow",
                "Action": ["ec2:DescribeInstances", "ec2:StopInstances"],
                "Resource": "*"
            }
        ]
    })
}

/// Teardown gated on region instead of ownership.
pub fn region_gated_destroy_policy() -> Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Sid": "DestroyInRegion",
            "Effect": "Allow",
            "Action": ["ec2:TerminateInstances", "lambda:DeleteFunction"],
            "Resource": "*",
            "Condition": { "StringEquals": { "aws:RequestedRegion": "us-east-1" } }
        }]
    })
}
