//! Caller-supplied assumption overrides
//!
//! Everything is optional; absent fields fall back to derived values or to
//! `RegulatoryConstants`. Serde leaves unrecognized JSON keys alone, so the
//! shape is forward-compatible with future option additions.

use serde::{Deserialize, Serialize};

use crate::solvency::StressScenario;

/// Optional overrides recognized by both entry points
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineAssumptions {
    /// Annual discount rate; clamped to the published 5-7% band
    pub discount_rate: Option<f64>,

    /// Cost-of-capital rate; deviating from the 6% convention raises a
    /// compliance finding but never fails
    pub cost_of_capital_rate: Option<f64>,

    /// Risk-adjustment confidence level; clamped to the hard 60-90 bounds
    pub confidence_level: Option<f64>,

    /// Number of CSM roll-forward periods; clamped to 4-8
    pub periods: Option<usize>,

    /// Subset of the stress catalogue to evaluate; None means the full
    /// catalogue
    pub stress_scenarios: Option<Vec<StressScenario>>,

    /// Seed for the deterministic experience-adjustment perturbation
    pub experience_seed: u64,
}
