//! Own funds tiering and solvency coverage ratios
//!
//! When no real own-funds figure is supplied, eligible capital is estimated
//! from a data-quality proxy for the solvency ratio, clamped to [120, 200].
//! Tiering is the fixed 70/20/10/0 reporting split.

use serde::{Deserialize, Serialize};

use crate::constants::RegulatoryConstants;

/// Eligible capital split into quality tiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnFunds {
    pub tier1_unrestricted: f64,
    pub tier1_restricted: f64,
    pub tier2: f64,
    pub tier3: f64,
    pub total_eligible: f64,
}

/// Qualitative solvency trend from the combined ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolvencyTrend {
    Improving,
    Stable,
    Deteriorating,
}

/// Coverage ratios against both capital requirements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolvencyRatios {
    /// total eligible / total SCR, in percent
    pub scr_coverage: f64,
    /// total eligible / final MCR, in percent
    pub mcr_coverage: f64,
    pub trend: SolvencyTrend,
}

/// Estimate the solvency ratio from the data-quality proxy, clamped to
/// the [120, 200] band.
pub fn estimate_solvency_ratio(data_quality_score: Option<f64>) -> f64 {
    let score = data_quality_score.unwrap_or(75.0);
    (100.0 + score * 0.8).clamp(120.0, 200.0)
}

/// Tier the estimated eligible capital and compute coverage ratios.
pub fn derive_own_funds(
    total_scr: f64,
    final_mcr: f64,
    data_quality_score: Option<f64>,
    combined_ratio: f64,
    constants: &RegulatoryConstants,
) -> (OwnFunds, SolvencyRatios) {
    let solvency_ratio = estimate_solvency_ratio(data_quality_score);
    let total_eligible = total_scr * (solvency_ratio / 100.0);

    let [t1u, t1r, t2, t3] = constants.tier_split;
    let own_funds = OwnFunds {
        tier1_unrestricted: total_eligible * t1u,
        tier1_restricted: total_eligible * t1r,
        tier2: total_eligible * t2,
        tier3: total_eligible * t3,
        total_eligible,
    };

    let scr_coverage = if total_scr > 0.0 {
        total_eligible / total_scr * 100.0
    } else {
        0.0
    };
    let mcr_coverage = if final_mcr > 0.0 {
        total_eligible / final_mcr * 100.0
    } else {
        0.0
    };

    let trend = if combined_ratio < 95.0 {
        SolvencyTrend::Improving
    } else if combined_ratio <= 105.0 {
        SolvencyTrend::Stable
    } else {
        SolvencyTrend::Deteriorating
    };

    (
        own_funds,
        SolvencyRatios {
            scr_coverage,
            mcr_coverage,
            trend,
        },
    )
}
