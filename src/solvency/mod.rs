//! Solvency pipeline: SCR, MCR, own funds, ratios, stress tests
//!
//! `derive` runs the components in dependency order: exposure feeds the SCR
//! aggregator, the SCR bounds the MCR, both feed the own-funds and ratio
//! calculator, and the stress projector consumes the baseline ratio.

mod mcr;
mod own_funds;
mod scr;
mod stress;

pub use mcr::{compute_mcr, McrResult};
pub use own_funds::{derive_own_funds, estimate_solvency_ratio, OwnFunds, SolvencyRatios, SolvencyTrend};
pub use scr::{compute_scr, ScrModuleCharges, ScrResult};
pub use stress::{project_stress, StressScenario, StressScenarioResult};

use serde::{Deserialize, Serialize};

use crate::assumptions::EngineAssumptions;
use crate::constants::RegulatoryConstants;
use crate::error::EngineError;
use crate::exposure::ExposureProfile;
use crate::findings::{Severity, ValidationStatus};
use crate::reserving::ReservingResult;

/// Complete solvency derivation output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolvencyMetrics {
    pub exposure: ExposureProfile,
    pub scr: ScrResult,
    pub mcr: McrResult,
    pub own_funds: OwnFunds,
    pub ratios: SolvencyRatios,
    pub stress_tests: Vec<StressScenarioResult>,
    pub validation: ValidationStatus,
}

/// Derive the solvency metric set from a reserving result.
pub fn derive(
    result: &ReservingResult,
    assumptions: &EngineAssumptions,
    constants: &RegulatoryConstants,
) -> Result<SolvencyMetrics, EngineError> {
    result.validate()?;

    let exposure = ExposureProfile::from_reserving(result, constants);

    let scr = compute_scr(&exposure, result.coefficient_of_variation, constants)?;
    let mcr = compute_mcr(&exposure, scr.total_scr, constants);

    let loss_ratio = match result.loss_ratio {
        Some(lr) if lr > 0.0 => lr,
        _ => constants.default_loss_ratio,
    };
    let combined_ratio = (loss_ratio + constants.default_expense_ratio) * 100.0;

    let (own_funds, ratios) = derive_own_funds(
        scr.total_scr,
        mcr.final_mcr,
        result.data_quality_score,
        combined_ratio,
        constants,
    );

    let stress_tests = project_stress(ratios.scr_coverage, assumptions.stress_scenarios.as_deref());

    let mut validation = ValidationStatus::new();
    run_compliance_checks(&scr, &mcr, &ratios, &stress_tests, &mut validation);

    Ok(SolvencyMetrics {
        exposure,
        scr,
        mcr,
        own_funds,
        ratios,
        stress_tests,
        validation,
    })
}

/// Compliance pass over the solvency outputs.
fn run_compliance_checks(
    scr: &ScrResult,
    mcr: &McrResult,
    ratios: &SolvencyRatios,
    stress_tests: &[StressScenarioResult],
    validation: &mut ValidationStatus,
) {
    if ratios.scr_coverage < 100.0 && scr.total_scr > 0.0 {
        validation.push(
            Severity::Critical,
            "SCR_COVERAGE_BELOW_100",
            format!("SCR coverage {:.1}% is below 100%", ratios.scr_coverage),
            ratios.scr_coverage,
            100.0,
        );
    }
    if ratios.mcr_coverage < 100.0 && mcr.final_mcr > 0.0 {
        validation.push(
            Severity::Critical,
            "MCR_COVERAGE_BELOW_100",
            format!("MCR coverage {:.1}% is below 100%", ratios.mcr_coverage),
            ratios.mcr_coverage,
            100.0,
        );
    }
    if mcr.absolute_floor_binds() {
        validation.push(
            Severity::Info,
            "MCR_ABSOLUTE_FLOOR_BINDS",
            "final MCR is set by the absolute currency floor",
            mcr.final_mcr,
            mcr.absolute_floor,
        );
    }
    for stressed in stress_tests {
        if !stressed.passed {
            validation.push(
                Severity::Warning,
                "STRESS_SCENARIO_FAILED",
                format!(
                    "{} drops solvency to {:.1}%",
                    stressed.scenario.label(),
                    stressed.solvency_ratio
                ),
                stressed.solvency_ratio,
                100.0,
            );
        }
    }
}
