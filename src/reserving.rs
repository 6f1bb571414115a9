//! Reserving-method result consumed by the derivation engine
//!
//! Produced upstream by a reserving method (chain-ladder, Bornhuetter-
//! Ferguson, ...). The engine treats it as immutable input and validates it
//! before any derivation runs.

use serde::{Deserialize, Serialize};

use crate::constants::PAID_FRACTION_FALLBACK;
use crate::error::EngineError;

/// Output of an upstream reserving method for one line of business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservingResult {
    /// Ultimate claims estimate
    pub ultimate: f64,

    /// Claims paid to date. When absent, exposure extraction estimates it
    /// as 65% of ultimate (documented fallback, not silent).
    pub paid_to_date: Option<f64>,

    /// Reported ultimate loss ratio (fraction, e.g. 0.75)
    pub loss_ratio: Option<f64>,

    /// Coefficient of variation of the reserve estimate (fraction)
    pub coefficient_of_variation: Option<f64>,

    /// Data quality score on a 0-100 scale
    pub data_quality_score: Option<f64>,

    /// Model fit diagnostic on a 0-1 scale, used for CSM experience terms
    pub model_fit_score: Option<f64>,

    /// Free-text line-of-business label, e.g. "Motor Third Party Liability"
    pub line_of_business: String,
}

impl ReservingResult {
    /// Outstanding reserves implied by the method result.
    ///
    /// Uses the 65%-paid fallback when `paid_to_date` is absent, matching
    /// the exposure extractor.
    pub fn reserves(&self) -> f64 {
        self.ultimate - self.paid_to_date.unwrap_or(self.ultimate * PAID_FRACTION_FALLBACK)
    }

    /// Reject results the engine must refuse to compute from.
    ///
    /// All downstream regulatory figures are meaningless if the ultimate or
    /// the implied reserves are absent, non-finite, or negative.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.ultimate.is_finite() {
            return Err(EngineError::missing(
                "ultimate",
                format!("non-finite value {}", self.ultimate),
            ));
        }
        if self.ultimate < 0.0 {
            return Err(EngineError::missing(
                "ultimate",
                format!("negative value {}", self.ultimate),
            ));
        }
        if let Some(paid) = self.paid_to_date {
            if !paid.is_finite() {
                return Err(EngineError::missing(
                    "paid_to_date",
                    format!("non-finite value {paid}"),
                ));
            }
        }
        let reserves = self.reserves();
        if !reserves.is_finite() || reserves < 0.0 {
            return Err(EngineError::missing(
                "reserves",
                format!("implied reserves {reserves} (ultimate minus paid) must be finite and non-negative"),
            ));
        }
        Ok(())
    }
}
