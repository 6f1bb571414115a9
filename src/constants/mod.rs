//! Published regulatory constants used by every component
//!
//! The correlation matrix, factor tables, floors, and convention rates are
//! regulatory publications, not derived quantities. They live in one named,
//! versioned structure passed explicitly into every component, so a
//! jurisdiction override is a different `RegulatoryConstants` value rather
//! than hidden global state.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::exposure::LineCode;

/// Fraction of ultimate assumed paid when `paid_to_date` is absent
pub const PAID_FRACTION_FALLBACK: f64 = 0.65;

/// Number of risk modules in the standard formula
pub const MODULE_COUNT: usize = 5;

/// 5x5 correlation matrix over the risk modules, in module order
/// (market, underwriting, counterparty, operational, intangible).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    entries: [[f64; MODULE_COUNT]; MODULE_COUNT],
}

impl CorrelationMatrix {
    /// Build a matrix, enforcing symmetry, unit diagonal, and entries in
    /// [0, 1]. A malformed matrix is a contract violation, not a finding.
    pub fn new(entries: [[f64; MODULE_COUNT]; MODULE_COUNT]) -> Result<Self, EngineError> {
        for i in 0..MODULE_COUNT {
            if (entries[i][i] - 1.0).abs() > 1e-12 {
                return Err(EngineError::invariant(
                    "correlation_matrix",
                    format!("diagonal entry [{i}][{i}] = {} is not 1.0", entries[i][i]),
                ));
            }
            for j in 0..MODULE_COUNT {
                let e = entries[i][j];
                if !(0.0..=1.0).contains(&e) {
                    return Err(EngineError::invariant(
                        "correlation_matrix",
                        format!("entry [{i}][{j}] = {e} outside [0, 1]"),
                    ));
                }
                if (e - entries[j][i]).abs() > 1e-12 {
                    return Err(EngineError::invariant(
                        "correlation_matrix",
                        format!("asymmetric at [{i}][{j}]: {e} vs {}", entries[j][i]),
                    ));
                }
            }
        }
        Ok(Self { entries })
    }

    /// Quadratic-form aggregation: sqrt(v' C v).
    ///
    /// The radicand is non-negative for any non-negative charge vector and
    /// non-negative correlations; the max(0) guard only absorbs float noise.
    pub fn aggregate(&self, v: &[f64; MODULE_COUNT]) -> f64 {
        let mut sum = 0.0;
        for i in 0..MODULE_COUNT {
            for j in 0..MODULE_COUNT {
                sum += v[i] * self.entries[i][j] * v[j];
            }
        }
        sum.max(0.0).sqrt()
    }

    pub fn entry(&self, i: usize, j: usize) -> f64 {
        self.entries[i][j]
    }
}

/// Per-line charge factors for the SCR standard formula
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScrLineFactors {
    pub premium: f64,
    pub reserve: f64,
    pub market_premium: f64,
    pub market_reserve: f64,
}

/// Per-line alpha/beta factors for the linear MCR (distinct from SCR factors)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct McrLineFactors {
    pub alpha: f64,
    pub beta: f64,
}

/// Complete set of regulatory constants for one jurisdiction/version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegulatoryConstants {
    /// Identifier of the published parameter set, e.g. "standard-formula-2024"
    pub version: String,

    /// Cost-of-capital convention for the risk adjustment (6%)
    pub cost_of_capital_rate: f64,

    /// Loss ratio assumed when the reserving result reports none
    pub default_loss_ratio: f64,

    /// Expense ratio used by the disclosure builder
    pub default_expense_ratio: f64,

    /// Default annual discount rate, clamped to `discount_rate_bounds`
    pub default_discount_rate: f64,
    pub discount_rate_bounds: (f64, f64),

    /// Floor on the profit-margin rate seeding the CSM balance
    pub min_profit_margin: f64,

    /// Fraction of premiums assumed invested (disclosure builder)
    pub investable_asset_fraction: f64,

    /// Flat annual yield on investable assets
    pub investment_yield: f64,

    /// Risk-adjustment rate bounds (5%-12%)
    pub risk_adjustment_rate_bounds: (f64, f64),

    /// Derived confidence-level band (65-80) and hard bounds (60-90)
    pub confidence_derivation_bounds: (f64, f64),
    pub confidence_hard_bounds: (f64, f64),

    /// Flat counterparty charge on premiums + reserves
    pub counterparty_charge_rate: f64,
    /// Flat operational charge on premiums + reserves
    pub operational_charge_rate: f64,
    /// Flat intangible charge on reserves
    pub intangible_charge_rate: f64,

    /// Absolute MCR floor in currency units
    pub absolute_mcr_floor: f64,
    /// MCR cap as a fraction of total SCR (45%)
    pub mcr_cap_ratio: f64,
    /// MCR floor as a fraction of total SCR (25%)
    pub mcr_floor_ratio: f64,

    /// Own-funds tier split: tier 1 unrestricted / tier 1 restricted /
    /// tier 2 / tier 3. Sums to 1.0.
    pub tier_split: [f64; 4],

    /// Risk-adjustment breakdown split across the four risk categories
    pub risk_category_split: [f64; 4],

    pub correlation: CorrelationMatrix,
}

impl RegulatoryConstants {
    /// Standard-formula parameter set used when no jurisdiction override is
    /// supplied.
    pub fn standard_formula() -> Self {
        Self {
            version: "standard-formula-2024".to_string(),
            cost_of_capital_rate: 0.06,
            default_loss_ratio: 0.75,
            default_expense_ratio: 0.28,
            default_discount_rate: 0.06,
            discount_rate_bounds: (0.05, 0.07),
            min_profit_margin: 0.08,
            investable_asset_fraction: 0.80,
            investment_yield: 0.032,
            risk_adjustment_rate_bounds: (0.05, 0.12),
            confidence_derivation_bounds: (65.0, 80.0),
            confidence_hard_bounds: (60.0, 90.0),
            counterparty_charge_rate: 0.04,
            operational_charge_rate: 0.03,
            intangible_charge_rate: 0.01,
            absolute_mcr_floor: 3_700_000.0,
            mcr_cap_ratio: 0.45,
            mcr_floor_ratio: 0.25,
            tier_split: [0.70, 0.20, 0.10, 0.0],
            risk_category_split: [0.40, 0.35, 0.15, 0.10],
            correlation: CorrelationMatrix::new([
                // mkt    uw     cpty   op     intg
                [1.00, 0.25, 0.25, 0.25, 0.00], // market
                [0.25, 1.00, 0.25, 0.50, 0.00], // underwriting
                [0.25, 0.25, 1.00, 0.25, 0.00], // counterparty
                [0.25, 0.50, 0.25, 1.00, 0.00], // operational
                [0.00, 0.00, 0.00, 0.00, 1.00], // intangible
            ])
            .expect("published correlation matrix is well-formed"),
        }
    }

    /// SCR premium/reserve charge factors per canonical line
    pub fn scr_factors(&self, line: LineCode) -> ScrLineFactors {
        match line {
            LineCode::Motor => ScrLineFactors {
                premium: 0.10,
                reserve: 0.09,
                market_premium: 0.06,
                market_reserve: 0.05,
            },
            LineCode::Property => ScrLineFactors {
                premium: 0.08,
                reserve: 0.10,
                market_premium: 0.07,
                market_reserve: 0.05,
            },
            LineCode::GeneralLiability => ScrLineFactors {
                premium: 0.14,
                reserve: 0.11,
                market_premium: 0.06,
                market_reserve: 0.06,
            },
            LineCode::Marine => ScrLineFactors {
                premium: 0.15,
                reserve: 0.11,
                market_premium: 0.07,
                market_reserve: 0.06,
            },
            LineCode::Miscellaneous => ScrLineFactors {
                premium: 0.13,
                reserve: 0.20,
                market_premium: 0.08,
                market_reserve: 0.07,
            },
        }
    }

    /// Linear-MCR alpha (premium) and beta (reserve) factors per line
    pub fn mcr_factors(&self, line: LineCode) -> McrLineFactors {
        match line {
            LineCode::Motor => McrLineFactors { alpha: 0.094, beta: 0.103 },
            LineCode::Property => McrLineFactors { alpha: 0.075, beta: 0.094 },
            LineCode::GeneralLiability => McrLineFactors { alpha: 0.131, beta: 0.113 },
            LineCode::Marine => McrLineFactors { alpha: 0.105, beta: 0.111 },
            LineCode::Miscellaneous => McrLineFactors { alpha: 0.120, beta: 0.200 },
        }
    }

    /// Clamp a requested discount rate into the published bounds.
    pub fn clamp_discount_rate(&self, rate: f64) -> f64 {
        rate.clamp(self.discount_rate_bounds.0, self.discount_rate_bounds.1)
    }
}

impl Default for RegulatoryConstants {
    fn default() -> Self {
        Self::standard_formula()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_matrix_is_valid() {
        // Construction panics on a malformed published matrix; reaching here
        // means symmetry, unit diagonal, and bounds all hold.
        let constants = RegulatoryConstants::standard_formula();
        assert!((constants.correlation.entry(1, 3) - 0.50).abs() < 1e-12);
        assert!((constants.correlation.entry(3, 1) - 0.50).abs() < 1e-12);
    }

    #[test]
    fn test_asymmetric_matrix_rejected() {
        let mut entries = [[0.0; MODULE_COUNT]; MODULE_COUNT];
        for (i, row) in entries.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        entries[0][1] = 0.3;
        entries[1][0] = 0.4;
        assert!(matches!(
            CorrelationMatrix::new(entries),
            Err(EngineError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_non_unit_diagonal_rejected() {
        let mut entries = [[0.0; MODULE_COUNT]; MODULE_COUNT];
        for (i, row) in entries.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        entries[2][2] = 0.9;
        assert!(CorrelationMatrix::new(entries).is_err());
    }

    #[test]
    fn test_aggregate_identity_matrix() {
        let mut entries = [[0.0; MODULE_COUNT]; MODULE_COUNT];
        for (i, row) in entries.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        let matrix = CorrelationMatrix::new(entries).unwrap();
        // With no correlation, aggregation is the Euclidean norm
        let v = [3.0, 4.0, 0.0, 0.0, 0.0];
        assert!((matrix.aggregate(&v) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_tier_and_category_splits_sum_to_one() {
        let constants = RegulatoryConstants::standard_formula();
        let tiers: f64 = constants.tier_split.iter().sum();
        let categories: f64 = constants.risk_category_split.iter().sum();
        assert!((tiers - 1.0).abs() < 1e-12);
        assert!((categories - 1.0).abs() < 1e-12);
    }
}
