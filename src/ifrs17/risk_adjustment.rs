//! Risk adjustment for non-financial risk
//!
//! Derives the margin held against insurance-risk uncertainty from the
//! reserve volatility and data-quality signals, and splits it across risk
//! categories using the fixed reporting-convention proportions.

use serde::{Deserialize, Serialize};

use crate::constants::RegulatoryConstants;
use crate::exposure::ExposureProfile;

/// Risk categories used in the breakdown, in split order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Reserve,
    Premium,
    Catastrophe,
    Lapse,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 4] = [
        RiskCategory::Reserve,
        RiskCategory::Premium,
        RiskCategory::Catastrophe,
        RiskCategory::Lapse,
    ];
}

/// One category's share of the risk adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskCategoryShare {
    pub category: RiskCategory,
    pub amount: f64,
    pub weight: f64,
}

/// The derived risk adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAdjustment {
    pub total_amount: f64,
    /// Rate applied to reserves, clamped to the published 5-12% band
    pub risk_adjustment_rate: f64,
    /// 6% by convention unless overridden
    pub cost_of_capital_rate: f64,
    /// Percentage, e.g. 75.0
    pub confidence_level: f64,
    /// Fixed proportional split; weights sum to 1.0
    pub breakdown: Vec<RiskCategoryShare>,
}

/// Derive the risk adjustment from the exposure profile and signals.
///
/// `confidence_override` (when supplied by the caller) is clamped to the
/// hard bounds; otherwise the level is derived from the data-quality score
/// or falls back to 75.
pub fn derive_risk_adjustment(
    profile: &ExposureProfile,
    coefficient_of_variation: Option<f64>,
    data_quality_score: Option<f64>,
    confidence_override: Option<f64>,
    cost_of_capital_override: Option<f64>,
    constants: &RegulatoryConstants,
) -> RiskAdjustment {
    let (lo, hi) = constants.confidence_derivation_bounds;
    let confidence_level = match confidence_override {
        Some(level) => {
            let (hard_lo, hard_hi) = constants.confidence_hard_bounds;
            level.clamp(hard_lo, hard_hi)
        }
        None => match data_quality_score {
            Some(score) => (score * 0.8).clamp(lo, hi),
            None => 75.0,
        },
    };

    let (rate_lo, rate_hi) = constants.risk_adjustment_rate_bounds;
    let risk_adjustment_rate = match coefficient_of_variation {
        Some(cov) => (cov * 0.5).clamp(rate_lo, rate_hi),
        // No volatility signal: hold the minimum margin
        None => rate_lo,
    };

    let total_amount = profile.total_reserves * risk_adjustment_rate;

    let breakdown = RiskCategory::ALL
        .iter()
        .zip(constants.risk_category_split.iter())
        .map(|(&category, &weight)| RiskCategoryShare {
            category,
            amount: total_amount * weight,
            weight,
        })
        .collect();

    RiskAdjustment {
        total_amount,
        risk_adjustment_rate,
        cost_of_capital_rate: cost_of_capital_override.unwrap_or(constants.cost_of_capital_rate),
        confidence_level,
        breakdown,
    }
}
