//! Stress-test projection over the fixed scenario catalogue
//!
//! One multiplication per scenario: the baseline solvency ratio is scaled by
//! the scenario's fixed negative impact and checked against the 100% pass
//! threshold. No iterative search.

use serde::{Deserialize, Serialize};

/// Named stress scenarios with published impact fractions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StressScenario {
    EquityMarketCrash,
    ReserveDeterioration,
    NaturalCatastrophe,
    MassLapse,
    CombinedAdverse,
}

impl StressScenario {
    /// Full catalogue, evaluated when the caller selects no subset
    pub const CATALOGUE: [StressScenario; 5] = [
        StressScenario::EquityMarketCrash,
        StressScenario::ReserveDeterioration,
        StressScenario::NaturalCatastrophe,
        StressScenario::MassLapse,
        StressScenario::CombinedAdverse,
    ];

    /// Multiplicative impact on the baseline solvency ratio
    pub fn impact(&self) -> f64 {
        match self {
            StressScenario::EquityMarketCrash => -0.22,
            StressScenario::ReserveDeterioration => -0.15,
            StressScenario::NaturalCatastrophe => -0.12,
            StressScenario::MassLapse => -0.08,
            StressScenario::CombinedAdverse => -0.30,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StressScenario::EquityMarketCrash => "Equity market crash",
            StressScenario::ReserveDeterioration => "Reserve deterioration",
            StressScenario::NaturalCatastrophe => "Natural catastrophe",
            StressScenario::MassLapse => "Mass lapse",
            StressScenario::CombinedAdverse => "Combined adverse",
        }
    }
}

/// Outcome of one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressScenarioResult {
    pub scenario: StressScenario,
    pub impact: f64,
    /// Baseline ratio scaled by (1 + impact)
    pub solvency_ratio: f64,
    /// Stressed ratio still covers the SCR
    pub passed: bool,
}

/// Project the baseline ratio through the selected scenarios.
pub fn project_stress(
    baseline_solvency_ratio: f64,
    scenarios: Option<&[StressScenario]>,
) -> Vec<StressScenarioResult> {
    scenarios
        .unwrap_or(&StressScenario::CATALOGUE)
        .iter()
        .map(|&scenario| {
            let impact = scenario.impact();
            let solvency_ratio = baseline_solvency_ratio * (1.0 + impact);
            StressScenarioResult {
                scenario,
                impact,
                solvency_ratio,
                passed: solvency_ratio >= 100.0,
            }
        })
        .collect()
}
