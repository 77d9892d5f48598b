//! Error types for the leastpriv crates.
//!
//! Only structural and I/O-shaped problems are errors. A policy that parses
//! but breaks a security rule is reported through `ValidationFinding`s, never
//! through `LeastPrivError`.

use thiserror::Error;

/// The unified error type for leastpriv.
#[derive(Debug, Error)]
pub enum LeastPrivError {
    /// The policy text could not be turned into a `PolicyDocument`.
    ///
    /// No findings are produced for such a document; callers must treat it
    /// as unverifiable.
    #[error("malformed policy: {reason}")]
    MalformedPolicy { reason: String },

    /// A rule configuration file is unreadable or does not match the schema.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// Provisioning outputs are unreadable, or a required output is missing.
    #[error("provisioning outputs error: {reason}")]
    OutputsError { reason: String },

    /// The policy source could not list or fetch a policy document.
    #[error("policy source error: {reason}")]
    SourceError { reason: String },

    /// A compliance report could not be serialised or fingerprinted.
    #[error("report error: {reason}")]
    ReportError { reason: String },
}

/// Convenience alias used throughout the leastpriv crates.
pub type LeastPrivResult<T> = Result<T, LeastPrivError>;
