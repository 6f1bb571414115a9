//! Structured error kinds for the derivation engine
//!
//! Two kinds of failure exist here. `MissingInput` means the caller handed us
//! a reserving result we must refuse to compute from (absent or non-finite
//! exposure figures) — producing zeros would make every downstream regulatory
//! figure meaningless. `InvariantViolation` means a post-computation
//! consistency check failed; that is a programming-contract breach and is
//! surfaced loudly, never silently corrected.
//!
//! Compliance findings are deliberately NOT errors — see `findings`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Input is absent or unusable; the engine refuses to compute.
    #[error("missing input: {field} — {reason}")]
    MissingInput { field: &'static str, reason: String },

    /// An internal consistency check failed after computation.
    #[error("invariant violation in {check}: {detail}")]
    InvariantViolation { check: &'static str, detail: String },
}

impl EngineError {
    pub fn missing(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::MissingInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn invariant(check: &'static str, detail: impl Into<String>) -> Self {
        EngineError::InvariantViolation {
            check,
            detail: detail.into(),
        }
    }
}
