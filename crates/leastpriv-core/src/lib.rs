//! # leastpriv-core
//!
//! The composing validator for leastpriv.
//!
//! This crate provides:
//! - The two trait seams (`Check`, `PolicySource`)
//! - The `Validator` that runs a list of checks over a parsed document in
//!   statement order, then rule order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use leastpriv_core::{Validator, traits::Check};
//!
//! let validator = Validator::new(checks);
//! let report = validator.validate(&document, &ctx);
//! ```

pub mod traits;
pub mod validator;

pub use validator::Validator;
