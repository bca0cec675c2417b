//! Error types for the checked kernel entry points.

use thiserror::Error;

use crate::capability::SimdCapability;

/// Result type for checked kernel calls.
pub type Result<T> = std::result::Result<T, Error>;

/// Precondition failures reported by the `try_*` entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A buffer does not hold the number of elements the kernel requires.
    #[error("length mismatch for `{operand}`: expected {expected}, got {actual}")]
    LengthMismatch {
        operand: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The requested instruction set cannot run on this CPU.
    #[error("SIMD capability not available on this CPU: {0}")]
    UnsupportedCapability(SimdCapability),
}
