//! Self-verification harness for the simdext kernels.
//!
//! This crate provides infrastructure for:
//! - Generating deterministic inputs, including signed zeros and subnormals
//! - Running every fixed-width and variable-length kernel on each available
//!   SIMD capability
//! - Comparing results bit for bit with the scalar reference
//! - Generating text and JSON reports

pub mod error;

mod config;
mod generator;
mod harness;
mod report;

pub use config::{ElementType, VerifyConfig};
pub use error::{Error as VerifyError, Result as VerifyResult};
pub use generator::InputGenerator;
pub use harness::verify;
pub use report::{CaseResult, Mismatch, VerificationReport, VerificationSummary};

pub(crate) use error::Result;
