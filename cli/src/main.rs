//! leastpriv: least-privilege gate for access policies.
//!
//! Usage:
//!   leastpriv validate --policy policy.json [--config rules.toml] [--expect <arn>]... [--json]
//!   leastpriv audit --outputs outputs.json --policies exported/ [--config rules.toml] [--json]
//!   leastpriv demo
//!
//! Exit status: 0 compliant, 2 non-compliant, 1 on error.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use leastpriv_contracts::{
    config::AuditConfig,
    error::{LeastPrivError, LeastPrivResult},
    validation::{Severity, ValidationContext, ValidationReport},
};
use leastpriv_policy::config_from_file;
use leastpriv_ref_github::scenarios::{
    compliant_role, overbroad_role, secret_scoping, telemetry_allow_list,
};
use leastpriv_report::{outputs_from_file, DirectoryPolicySource, DocumentOutcome, RoleAuditor};
use leastpriv_verify::PolicyValidator;

const EXIT_ERROR: i32 = 1;
const EXIT_NON_COMPLIANT: i32 = 2;

// ── CLI definition ────────────────────────────────────────────────────────────

/// leastpriv: validate access policies against least-privilege rules.
#[derive(Parser)]
#[command(
    name = "leastpriv",
    about = "Least-privilege security gate for access policy documents",
    long_about = "Validates access policy documents for wildcard scoping, tag conditions\n\
                  on destructive actions and sensitive-service scoping, alone or for\n\
                  every policy attached to a provisioned role."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a single policy document.
    Validate {
        /// Policy document (JSON).
        #[arg(long)]
        policy: PathBuf,
        /// Rule configuration (TOML); baseline rules when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Identifier sensitive statements must be scoped to. Repeatable.
        #[arg(long = "expect")]
        expected: Vec<String>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Audit every policy attached to the provisioned role.
    Audit {
        /// Provisioning outputs (plain or `terraform output -json` form).
        #[arg(long)]
        outputs: PathBuf,
        /// Directory of exported policies: `<dir>/<role-name>/<policy>.json`.
        #[arg(long)]
        policies: PathBuf,
        /// Rule configuration (TOML); baseline rules when omitted.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run the GitHub Actions reference scenarios.
    Demo,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for per-rule output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Validate {
            policy,
            config,
            expected,
            json,
        } => run_validate(&policy, config.as_deref(), expected, json),
        Command::Audit {
            outputs,
            policies,
            config,
            json,
        } => run_audit(&outputs, policies, config.as_deref(), json),
        Command::Demo => run_demo(),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_NON_COMPLIANT),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> LeastPrivResult<AuditConfig> {
    match path {
        Some(path) => config_from_file(path),
        None => Ok(AuditConfig::default()),
    }
}

/// Returns whether the document is compliant.
fn run_validate(
    policy: &Path,
    config: Option<&Path>,
    expected: Vec<String>,
    json: bool,
) -> LeastPrivResult<bool> {
    let config = load_config(config)?;
    let raw = std::fs::read_to_string(policy).map_err(|e| LeastPrivError::SourceError {
        reason: format!("failed to read policy '{}': {e}", policy.display()),
    })?;

    let validator = PolicyValidator::new(&config.rules);
    let report = validator.validate_json(&raw, &ValidationContext::with_expected(expected))?;
    info!(policy = %policy.display(), compliant = report.is_compliant(), "validated");

    if json {
        print_json(&report)?;
    } else {
        println!("{}", policy.display());
        print_findings(&report);
        println!();
        println!("{}", verdict(report.is_compliant()));
    }
    Ok(report.is_compliant())
}

/// Returns whether the role is compliant.
fn run_audit(
    outputs: &Path,
    policies: PathBuf,
    config: Option<&Path>,
    json: bool,
) -> LeastPrivResult<bool> {
    let config = load_config(config)?;
    let outputs = outputs_from_file(outputs)?;
    let source = DirectoryPolicySource::new(policies);

    let report = RoleAuditor::new(config).audit(&outputs, &source)?;

    if json {
        print_json(&report)?;
    } else {
        println!("role {}", report.role);
        for document in &report.documents {
            println!();
            println!("{}", document.name);
            match &document.outcome {
                DocumentOutcome::Validated { report } => print_findings(report),
                DocumentOutcome::Unverifiable { reason } => println!("  UNVERIFIABLE  {reason}"),
            }
        }
        println!();
        for finding in &report.role_findings {
            println!("  {}  {}", mark(finding.severity), finding.message);
        }
        println!();
        println!(
            "{} ({} failure(s), fingerprint {})",
            verdict(report.is_compliant()),
            report.failure_count(),
            report.fingerprint
        );
    }
    Ok(report.is_compliant())
}

/// The scenarios are expected to produce non-compliant reports; only an
/// error is a demo failure.
fn run_demo() -> LeastPrivResult<bool> {
    println!();
    println!("leastpriv: GitHub Actions reference audits");
    println!("==========================================");
    println!();

    compliant_role::run_scenario()?;
    overbroad_role::run_scenario()?;
    secret_scoping::run_scenario()?;
    telemetry_allow_list::run_scenario()?;

    println!("All scenarios completed.");
    Ok(true)
}

// ── Output ────────────────────────────────────────────────────────────────────

fn mark(severity: Severity) -> &'static str {
    match severity {
        Severity::Pass => "PASS",
        Severity::Fail => "FAIL",
    }
}

fn verdict(compliant: bool) -> &'static str {
    if compliant {
        "COMPLIANT"
    } else {
        "NON-COMPLIANT"
    }
}

fn print_findings(report: &ValidationReport) {
    for finding in &report.findings {
        let at = finding
            .statement_index
            .map(|i| format!("#{i}"))
            .unwrap_or_else(|| "doc".to_string());
        println!(
            "  {}  {:<4} {:<30} {}",
            mark(finding.severity),
            at,
            finding.rule.as_str(),
            finding.message
        );
    }
}

fn print_json<T: Serialize>(value: &T) -> LeastPrivResult<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(|e| LeastPrivError::ReportError {
        reason: format!("failed to render JSON: {e}"),
    })?;
    println!("{rendered}");
    Ok(())
}
