//! Contractual service margin roll-forward
//!
//! Simulates the periodic movement of the deferred-profit liability: each
//! period accretes interest, releases margin for service provided, absorbs an
//! experience adjustment, and (once, at the midpoint) an assumption-unlocking
//! adjustment. Periods run strictly in order; each period's opening balance
//! is the prior period's closing balance.

use serde::{Deserialize, Serialize};

use crate::constants::RegulatoryConstants;
use crate::error::EngineError;
use crate::exposure::ExposureProfile;

/// Tolerance on the per-period balance identity, in currency units.
/// Absorbs float drift across the five summed terms at 9-figure balances.
pub const BALANCE_TOLERANCE: f64 = 1000.0;

/// Coverage units decay per period
const COVERAGE_DECAY: f64 = 0.15;

/// One reporting period of the roll-forward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsmMovement {
    /// 0-indexed reporting period
    pub period: usize,
    pub opening_balance: f64,
    pub interest_accretion: f64,
    /// Negative: margin released to revenue for service provided
    pub service_release: f64,
    pub experience_adjustment: f64,
    /// Nonzero only at the midpoint period (one-time assumption change)
    pub unlocking_adjustment: f64,
    pub closing_balance: f64,
    pub coverage_units: f64,
    pub release_rate: f64,
}

/// Configuration for one roll-forward run
#[derive(Debug, Clone)]
pub struct CsmConfig {
    /// Number of periods, clamped to 4-8
    pub periods: usize,
    /// Annual discount rate, clamped to the published band
    pub discount_rate: f64,
    /// Model-fit diagnostic driving the experience term when present
    pub model_fit_score: Option<f64>,
    /// Seed for the deterministic perturbation used when no diagnostic exists
    pub experience_seed: u64,
}

impl CsmConfig {
    pub fn new(
        constants: &RegulatoryConstants,
        periods: Option<usize>,
        discount_rate: Option<f64>,
        model_fit_score: Option<f64>,
        experience_seed: u64,
    ) -> Self {
        Self {
            periods: periods.unwrap_or(6).clamp(4, 8),
            discount_rate: constants
                .clamp_discount_rate(discount_rate.unwrap_or(constants.default_discount_rate)),
            model_fit_score,
            experience_seed,
        }
    }
}

/// Roll-forward engine for the contractual service margin
pub struct CsmEngine<'a> {
    constants: &'a RegulatoryConstants,
    config: CsmConfig,
}

impl<'a> CsmEngine<'a> {
    pub fn new(constants: &'a RegulatoryConstants, config: CsmConfig) -> Self {
        Self { constants, config }
    }

    /// Initial CSM balance: reserves times the loss-ratio-implied profit
    /// margin, floored at the published minimum.
    pub fn initial_balance(&self, profile: &ExposureProfile, loss_ratio: f64) -> f64 {
        let technical_margin = 1.0 - loss_ratio - self.constants.default_expense_ratio;
        let margin_rate = technical_margin.max(self.constants.min_profit_margin);
        profile.total_reserves * margin_rate
    }

    /// Generate the full movement sequence. Deterministic: identical inputs
    /// (including the seed) produce bit-identical movements.
    pub fn roll_forward(&self, profile: &ExposureProfile, loss_ratio: f64) -> Vec<CsmMovement> {
        let initial = self.initial_balance(profile, loss_ratio);
        let quarterly_rate = self.config.discount_rate / 4.0;
        let midpoint = self.config.periods / 2;
        let initial_units = profile.estimated_premiums / 1000.0;

        let mut movements = Vec::with_capacity(self.config.periods);
        let mut prior_closing = initial * 1.2;

        for period in 0..self.config.periods {
            let opening_balance = prior_closing;
            let interest_accretion = opening_balance * quarterly_rate;

            // Release rate increases 0.5% per period from 3%, capped at 8%
            let release_rate = (0.03 + period as f64 * 0.005).min(0.08);
            let service_release = -opening_balance * release_rate;

            let experience_adjustment = opening_balance * self.experience_fraction(period);

            let unlocking_adjustment = if period == midpoint {
                -0.015 * opening_balance
            } else {
                0.0
            };

            let closing_balance = opening_balance
                + interest_accretion
                + service_release
                + experience_adjustment
                + unlocking_adjustment;

            let coverage_units = initial_units * (1.0 - COVERAGE_DECAY).powi(period as i32);

            movements.push(CsmMovement {
                period,
                opening_balance,
                interest_accretion,
                service_release,
                experience_adjustment,
                unlocking_adjustment,
                closing_balance,
                coverage_units,
                release_rate,
            });

            prior_closing = closing_balance;
        }

        movements
    }

    /// Experience term as a fraction of the opening balance, bounded to
    /// plus/minus 0.5%. A pure function of the model-fit diagnostic when one
    /// exists, otherwise of the seed and period index.
    fn experience_fraction(&self, period: usize) -> f64 {
        match self.config.model_fit_score {
            Some(fit) => (fit.clamp(0.0, 1.0) - 0.5) * 0.01,
            None => {
                let h = splitmix64(self.config.experience_seed ^ (period as u64).wrapping_mul(0x9E37_79B9));
                let unit = (h >> 11) as f64 / (1u64 << 53) as f64;
                (unit - 0.5) * 0.01
            }
        }
    }
}

/// Verify the movement-sequence invariants.
///
/// A failure here is a programming-contract violation: the balance identity
/// must hold within `BALANCE_TOLERANCE` for every period, and each opening
/// balance must equal the prior closing balance exactly.
pub fn verify_movements(movements: &[CsmMovement]) -> Result<(), EngineError> {
    for m in movements {
        let reconstructed = m.opening_balance
            + m.interest_accretion
            + m.service_release
            + m.experience_adjustment
            + m.unlocking_adjustment;
        let drift = (m.closing_balance - reconstructed).abs();
        if drift > BALANCE_TOLERANCE {
            return Err(EngineError::invariant(
                "csm_balance_identity",
                format!("period {} off by {drift:.2}", m.period),
            ));
        }
    }
    for pair in movements.windows(2) {
        if pair[1].opening_balance != pair[0].closing_balance {
            return Err(EngineError::invariant(
                "csm_balance_chain",
                format!(
                    "period {} opens at {} but period {} closed at {}",
                    pair[1].period, pair[1].opening_balance, pair[0].period, pair[0].closing_balance
                ),
            ));
        }
    }
    Ok(())
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
