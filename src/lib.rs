//! Regulatory Metrics - deterministic derivation engine for reserving results
//!
//! This library provides:
//! - Exposure extraction from reserving-method results
//! - IFRS 17 metrics: CSM roll-forward, risk adjustment, P&L disclosure
//! - Solvency metrics: SCR aggregation, MCR, own funds, coverage ratios
//! - Stress-test projection over a fixed scenario catalogue
//!
//! Every derivation is a pure function of its input record plus a named set
//! of regulatory constants; outputs are plain serializable records.

pub mod assumptions;
pub mod constants;
pub mod error;
pub mod exposure;
pub mod findings;
pub mod ifrs17;
pub mod reserving;
pub mod runner;
pub mod solvency;

// Re-export commonly used types
pub use assumptions::EngineAssumptions;
pub use constants::RegulatoryConstants;
pub use error::EngineError;
pub use exposure::{ExposureProfile, LineCode};
pub use findings::{ComplianceFinding, Severity, ValidationStatus};
pub use ifrs17::Ifrs17Metrics;
pub use reserving::ReservingResult;
pub use runner::{CombinedMetrics, EngineRunner};
pub use solvency::SolvencyMetrics;

/// Derive the IFRS 17 metric set using the standard-formula constants.
pub fn derive_ifrs17_metrics(
    result: &ReservingResult,
    assumptions: &EngineAssumptions,
) -> Result<Ifrs17Metrics, EngineError> {
    ifrs17::derive(result, assumptions, &RegulatoryConstants::standard_formula())
}

/// Derive the solvency metric set using the standard-formula constants.
pub fn derive_solvency_metrics(
    result: &ReservingResult,
    assumptions: &EngineAssumptions,
) -> Result<SolvencyMetrics, EngineError> {
    solvency::derive(result, assumptions, &RegulatoryConstants::standard_formula())
}
