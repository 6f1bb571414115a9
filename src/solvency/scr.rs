//! Solvency capital requirement: module charges and correlation aggregation
//!
//! Step 1 computes the five risk-module charges from the exposure profile
//! and the published factor tables. Step 2 aggregates them through the 5x5
//! correlation matrix with the quadratic form sqrt(v' C v). All five charges
//! must exist before aggregation; a negative charge is a contract violation.

use serde::{Deserialize, Serialize};

use crate::constants::{RegulatoryConstants, MODULE_COUNT};
use crate::error::EngineError;
use crate::exposure::{ExposureProfile, LineCode};

/// Per-module capital charges, each non-negative
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrModuleCharges {
    pub market: f64,
    pub underwriting: f64,
    pub counterparty: f64,
    pub operational: f64,
    pub intangible: f64,
}

impl ScrModuleCharges {
    /// Charges in correlation-matrix order
    pub fn as_vector(&self) -> [f64; MODULE_COUNT] {
        [
            self.market,
            self.underwriting,
            self.counterparty,
            self.operational,
            self.intangible,
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_vector().iter().sum()
    }
}

/// Aggregated capital requirement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrResult {
    pub module_charges: ScrModuleCharges,
    /// Multiplier applied to the market and underwriting charges
    pub volatility_adjustment: f64,
    /// sqrt(v' C v) over the module vector
    pub basic_scr: f64,
    /// basic_scr - sum of charges; non-positive by construction
    pub diversification_benefit: f64,
    /// Equal to `basic_scr`: diversification already folds into the
    /// quadratic-form aggregation. Kept as a named field because the MCR
    /// floor/cap formulas reference "total SCR".
    pub total_scr: f64,
}

/// Compute the SCR from an exposure profile.
pub fn compute_scr(
    profile: &ExposureProfile,
    coefficient_of_variation: Option<f64>,
    constants: &RegulatoryConstants,
) -> Result<ScrResult, EngineError> {
    let premiums = profile.estimated_premiums;
    let reserves = profile.total_reserves;

    let mut underwriting = 0.0;
    let mut market = 0.0;
    for &line in &LineCode::ALL {
        let weight = profile.weight(line);
        let factors = constants.scr_factors(line);
        underwriting +=
            weight * (premiums * weight * factors.premium + reserves * weight * factors.reserve);
        market += weight
            * (premiums * weight * factors.market_premium
                + reserves * weight * factors.market_reserve);
    }

    let counterparty = constants.counterparty_charge_rate * (premiums + reserves);
    let operational = constants.operational_charge_rate * (premiums + reserves);
    let intangible = constants.intangible_charge_rate * reserves;

    // Volatility scaling applies to market and underwriting risk only
    let volatility_adjustment = match coefficient_of_variation {
        Some(cov) => 1.0 + (cov / 100.0 - 0.15) * 0.5,
        None => 1.0,
    };

    let module_charges = ScrModuleCharges {
        market: market * volatility_adjustment,
        underwriting: underwriting * volatility_adjustment,
        counterparty,
        operational,
        intangible,
    };

    let v = module_charges.as_vector();
    for (charge, name) in v.iter().zip([
        "market",
        "underwriting",
        "counterparty",
        "operational",
        "intangible",
    ]) {
        if *charge < 0.0 {
            return Err(EngineError::invariant(
                "scr_module_charge",
                format!("{name} charge is negative: {charge}"),
            ));
        }
    }

    let basic_scr = constants.correlation.aggregate(&v);
    let diversification_benefit = basic_scr - module_charges.sum();

    Ok(ScrResult {
        module_charges,
        volatility_adjustment,
        basic_scr,
        diversification_benefit,
        total_scr: basic_scr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reserving::ReservingResult;

    fn motor_profile(constants: &RegulatoryConstants) -> ExposureProfile {
        let result = ReservingResult {
            ultimate: 425_600_000.0,
            paid_to_date: Some(298_400_000.0),
            loss_ratio: Some(0.75),
            coefficient_of_variation: Some(0.08),
            data_quality_score: Some(88.0),
            model_fit_score: None,
            line_of_business: "Motor Third Party Liability".to_string(),
        };
        ExposureProfile::from_reserving(&result, constants)
    }

    #[test]
    fn test_diversification_non_positive() {
        let constants = RegulatoryConstants::standard_formula();
        let scr = compute_scr(&motor_profile(&constants), Some(0.08), &constants).unwrap();

        assert!(scr.diversification_benefit <= 0.0);
        assert!(scr.total_scr <= scr.module_charges.sum());
        assert_eq!(scr.total_scr, scr.basic_scr);
    }

    #[test]
    fn test_all_charges_positive_for_real_exposure() {
        let constants = RegulatoryConstants::standard_formula();
        let scr = compute_scr(&motor_profile(&constants), Some(0.08), &constants).unwrap();
        for charge in scr.module_charges.as_vector() {
            assert!(charge > 0.0);
        }
    }

    #[test]
    fn test_volatility_adjustment_formula() {
        let constants = RegulatoryConstants::standard_formula();
        let scr = compute_scr(&motor_profile(&constants), Some(0.08), &constants).unwrap();
        // 1 + (0.08/100 - 0.15) * 0.5
        assert!((scr.volatility_adjustment - 0.9254).abs() < 1e-6);

        let scr = compute_scr(&motor_profile(&constants), None, &constants).unwrap();
        assert_eq!(scr.volatility_adjustment, 1.0);
    }

    #[test]
    fn test_volatility_scales_market_and_underwriting_only() {
        let constants = RegulatoryConstants::standard_formula();
        let profile = motor_profile(&constants);
        let base = compute_scr(&profile, None, &constants).unwrap();
        let scaled = compute_scr(&profile, Some(0.08), &constants).unwrap();

        let va = scaled.volatility_adjustment;
        assert!((scaled.module_charges.market - base.module_charges.market * va).abs() < 1e-3);
        assert!(
            (scaled.module_charges.underwriting - base.module_charges.underwriting * va).abs()
                < 1e-3
        );
        assert_eq!(scaled.module_charges.counterparty, base.module_charges.counterparty);
        assert_eq!(scaled.module_charges.operational, base.module_charges.operational);
        assert_eq!(scaled.module_charges.intangible, base.module_charges.intangible);
    }

    #[test]
    fn test_zero_exposure_gives_zero_scr() {
        let constants = RegulatoryConstants::standard_formula();
        let result = ReservingResult {
            ultimate: 0.0,
            paid_to_date: Some(0.0),
            loss_ratio: Some(0.75),
            coefficient_of_variation: None,
            data_quality_score: None,
            model_fit_score: None,
            line_of_business: "Motor".to_string(),
        };
        let profile = ExposureProfile::from_reserving(&result, &constants);
        let scr = compute_scr(&profile, None, &constants).unwrap();

        assert_eq!(scr.basic_scr, 0.0);
        assert_eq!(scr.diversification_benefit, 0.0);
        assert_eq!(scr.total_scr, 0.0);
    }
}
