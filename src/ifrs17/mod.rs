//! IFRS 17 pipeline: CSM roll-forward, risk adjustment, disclosure
//!
//! `derive` is the top-level operation: validate the reserving result,
//! extract exposures, run the three components in order, verify the
//! post-computation invariants, and collect compliance findings.

mod csm;
mod disclosure;
mod risk_adjustment;

pub use csm::{verify_movements, CsmConfig, CsmEngine, CsmMovement, BALANCE_TOLERANCE};
pub use disclosure::{build_disclosure, DisclosureStatement};
pub use risk_adjustment::{derive_risk_adjustment, RiskAdjustment, RiskCategory, RiskCategoryShare};

use serde::{Deserialize, Serialize};

use crate::assumptions::EngineAssumptions;
use crate::constants::RegulatoryConstants;
use crate::error::EngineError;
use crate::exposure::ExposureProfile;
use crate::findings::{Severity, ValidationStatus};
use crate::reserving::ReservingResult;

/// Complete IFRS 17 derivation output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ifrs17Metrics {
    pub exposure: ExposureProfile,
    pub csm_roll_forward: Vec<CsmMovement>,
    pub risk_adjustment: RiskAdjustment,
    pub disclosure: DisclosureStatement,
    pub validation: ValidationStatus,
}

/// Derive the IFRS 17 metric set from a reserving result.
pub fn derive(
    result: &ReservingResult,
    assumptions: &EngineAssumptions,
    constants: &RegulatoryConstants,
) -> Result<Ifrs17Metrics, EngineError> {
    result.validate()?;

    let exposure = ExposureProfile::from_reserving(result, constants);
    let loss_ratio = match result.loss_ratio {
        Some(lr) if lr > 0.0 => lr,
        _ => constants.default_loss_ratio,
    };

    let config = CsmConfig::new(
        constants,
        assumptions.periods,
        assumptions.discount_rate,
        result.model_fit_score,
        assumptions.experience_seed,
    );
    let discount_rate = config.discount_rate;
    let csm_engine = CsmEngine::new(constants, config);
    let csm_roll_forward = csm_engine.roll_forward(&exposure, loss_ratio);
    verify_movements(&csm_roll_forward)?;

    let risk_adjustment = derive_risk_adjustment(
        &exposure,
        result.coefficient_of_variation,
        result.data_quality_score,
        assumptions.confidence_level,
        assumptions.cost_of_capital_rate,
        constants,
    );

    let closing_csm = csm_roll_forward
        .last()
        .map(|m| m.closing_balance)
        .unwrap_or(0.0);
    let disclosure = build_disclosure(&exposure, loss_ratio, closing_csm, discount_rate, constants);

    let mut validation = ValidationStatus::new();
    run_compliance_checks(
        &risk_adjustment,
        closing_csm,
        constants,
        &mut validation,
    );

    Ok(Ifrs17Metrics {
        exposure,
        csm_roll_forward,
        risk_adjustment,
        disclosure,
        validation,
    })
}

/// Compliance pass: expectation-band checks that report, never abort.
fn run_compliance_checks(
    risk_adjustment: &RiskAdjustment,
    closing_csm: f64,
    constants: &RegulatoryConstants,
    validation: &mut ValidationStatus,
) {
    if (risk_adjustment.cost_of_capital_rate - constants.cost_of_capital_rate).abs() > 1e-9 {
        validation.push(
            Severity::Warning,
            "COC_RATE_DEVIATES",
            format!(
                "cost-of-capital rate {:.2}% deviates from the {:.0}% convention",
                risk_adjustment.cost_of_capital_rate * 100.0,
                constants.cost_of_capital_rate * 100.0
            ),
            risk_adjustment.cost_of_capital_rate,
            constants.cost_of_capital_rate,
        );
    }

    if risk_adjustment.confidence_level < 70.0 || risk_adjustment.confidence_level > 80.0 {
        validation.push(
            Severity::Warning,
            "CONFIDENCE_OUT_OF_BAND",
            format!(
                "confidence level {:.1} outside the expected 70-80 band",
                risk_adjustment.confidence_level
            ),
            risk_adjustment.confidence_level,
            70.0,
        );
    }

    // Negative closing balances are reachable under large unlocking terms;
    // flagged rather than clamped (candidate defect pending domain review).
    if closing_csm < 0.0 {
        validation.push(
            Severity::Warning,
            "CSM_BALANCE_NEGATIVE",
            format!("closing CSM balance {closing_csm:.0} is negative"),
            closing_csm,
            0.0,
        );
    }
}
