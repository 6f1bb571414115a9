//! Exposure extraction from a reserving result
//!
//! Normalizes a reserving-method result into the premium/reserve totals and
//! line-of-business weight distribution every downstream component consumes.
//! Pure and total: given a validated input it always produces a profile.

use serde::{Deserialize, Serialize};

use crate::constants::{RegulatoryConstants, PAID_FRACTION_FALLBACK};
use crate::exposure::lob::{classify_label, LineCode, WeightTemplate};
use crate::reserving::ReservingResult;

/// Normalized exposure totals plus the line-of-business weight distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposureProfile {
    pub total_ultimate: f64,
    pub total_paid: f64,
    pub total_reserves: f64,

    /// Premium volume implied by the ultimate and the average loss ratio
    pub estimated_premiums: f64,

    /// Template the free-text label resolved to
    pub template: WeightTemplate,

    /// Per-line weights; sum to 1.0
    pub lob_weights: Vec<(LineCode, f64)>,
}

impl ExposureProfile {
    /// Derive the profile from a validated reserving result.
    pub fn from_reserving(result: &ReservingResult, constants: &RegulatoryConstants) -> Self {
        let total_ultimate = result.ultimate;

        let total_paid = match result.paid_to_date {
            Some(paid) => paid,
            None => {
                log::debug!(
                    "paid_to_date absent; estimating as {:.0}% of ultimate",
                    PAID_FRACTION_FALLBACK * 100.0
                );
                total_ultimate * PAID_FRACTION_FALLBACK
            }
        };
        let total_reserves = total_ultimate - total_paid;

        let average_loss_ratio = match result.loss_ratio {
            Some(lr) if lr > 0.0 => lr,
            _ => {
                log::debug!(
                    "loss ratio absent or non-positive; using default {}",
                    constants.default_loss_ratio
                );
                constants.default_loss_ratio
            }
        };
        let estimated_premiums = total_ultimate / average_loss_ratio;

        let template = classify_label(&result.line_of_business);

        Self {
            total_ultimate,
            total_paid,
            total_reserves,
            estimated_premiums,
            template,
            lob_weights: template.weights(),
        }
    }

    /// Weight of a single line in this profile (0.0 when the line is absent)
    pub fn weight(&self, line: LineCode) -> f64 {
        self.lob_weights
            .iter()
            .find(|(code, _)| *code == line)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motor_result() -> ReservingResult {
        ReservingResult {
            ultimate: 425_600_000.0,
            paid_to_date: Some(298_400_000.0),
            loss_ratio: Some(0.75),
            coefficient_of_variation: Some(0.08),
            data_quality_score: Some(88.0),
            model_fit_score: None,
            line_of_business: "Motor Third Party Liability".to_string(),
        }
    }

    #[test]
    fn test_motor_tpl_exposure() {
        let constants = RegulatoryConstants::standard_formula();
        let profile = ExposureProfile::from_reserving(&motor_result(), &constants);

        assert!((profile.total_reserves - 127_200_000.0).abs() < 1.0);
        // 425.6M / 0.75
        assert!((profile.estimated_premiums - 567_466_666.67).abs() < 1.0);
        assert_eq!(profile.template, WeightTemplate::MotorDominant);
        assert!((profile.weight(LineCode::Motor) - 0.70).abs() < 1e-12);
    }

    #[test]
    fn test_weights_sum_to_one() {
        let constants = RegulatoryConstants::standard_formula();
        let profile = ExposureProfile::from_reserving(&motor_result(), &constants);
        let total: f64 = profile.lob_weights.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_loss_ratio_uses_default() {
        let constants = RegulatoryConstants::standard_formula();
        let mut result = motor_result();
        result.loss_ratio = None;
        let profile = ExposureProfile::from_reserving(&result, &constants);
        assert!((profile.estimated_premiums - 425_600_000.0 / 0.75).abs() < 1.0);

        // Zero is treated the same as absent, never divided by
        result.loss_ratio = Some(0.0);
        let profile = ExposureProfile::from_reserving(&result, &constants);
        assert!(profile.estimated_premiums.is_finite());
    }

    #[test]
    fn test_missing_paid_uses_fallback() {
        let constants = RegulatoryConstants::standard_formula();
        let mut result = motor_result();
        result.paid_to_date = None;
        let profile = ExposureProfile::from_reserving(&result, &constants);
        assert!((profile.total_paid - 425_600_000.0 * 0.65).abs() < 1.0);
        assert!((profile.total_reserves - 425_600_000.0 * 0.35).abs() < 1.0);
    }
}
