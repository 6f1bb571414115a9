//! Minimum capital requirement
//!
//! Linear exposure-based formula bounded against the SCR: the linear amount
//! is capped at 45% of total SCR, then floored by the larger of 25% of total
//! SCR and the absolute currency floor. Floor and cap both apply regardless
//! of which one binds.

use serde::{Deserialize, Serialize};

use crate::constants::RegulatoryConstants;
use crate::exposure::{ExposureProfile, LineCode};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McrResult {
    pub linear_mcr: f64,
    pub absolute_floor: f64,
    /// min(linear, 45% of total SCR)
    pub capped_mcr: f64,
    /// max(capped, 25% of total SCR, absolute floor)
    pub final_mcr: f64,
}

impl McrResult {
    /// Apply the cap and floors to a pre-computed linear MCR.
    pub fn from_linear(linear_mcr: f64, total_scr: f64, constants: &RegulatoryConstants) -> Self {
        let capped_mcr = linear_mcr.min(constants.mcr_cap_ratio * total_scr);
        let final_mcr = capped_mcr
            .max(constants.mcr_floor_ratio * total_scr)
            .max(constants.absolute_mcr_floor);

        Self {
            linear_mcr,
            absolute_floor: constants.absolute_mcr_floor,
            capped_mcr,
            final_mcr,
        }
    }

    /// True when the absolute currency floor is what determined the result
    pub fn absolute_floor_binds(&self) -> bool {
        self.final_mcr == self.absolute_floor && self.capped_mcr < self.absolute_floor
    }
}

/// Compute the linear MCR from the exposure profile and apply the bounds.
pub fn compute_mcr(
    profile: &ExposureProfile,
    total_scr: f64,
    constants: &RegulatoryConstants,
) -> McrResult {
    let premiums = profile.estimated_premiums;
    let reserves = profile.total_reserves;

    let mut linear_mcr = 0.0;
    for &line in &LineCode::ALL {
        let weight = profile.weight(line);
        let factors = constants.mcr_factors(line);
        linear_mcr +=
            weight * (premiums * weight * factors.alpha + reserves * weight * factors.beta);
    }

    McrResult::from_linear(linear_mcr, total_scr, constants)
}
