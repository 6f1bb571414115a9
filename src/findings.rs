//! Compliance findings attached to calculation results
//!
//! A finding records that a computed value fell outside a regulatory
//! expectation band (cost-of-capital rate away from the 6% convention, SCR
//! coverage under 100%, confidence level outside the 70-80% band, a negative
//! CSM closing balance). Findings never abort a calculation — surfacing them
//! to the caller is the point of the engine.

use serde::{Deserialize, Serialize};

/// Severity of a compliance finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Informational; no action expected
    Info,
    /// Outside the expected band; review recommended
    Warning,
    /// Regulatory threshold breached; escalation expected
    Critical,
}

/// A single structured compliance finding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceFinding {
    pub severity: Severity,
    /// Stable machine-readable code, e.g. "SCR_COVERAGE_BELOW_100"
    #[serde(skip_deserializing)]
    pub code: &'static str,
    pub message: String,
    /// The value the engine observed
    pub observed: f64,
    /// The regulatory threshold or convention it was checked against
    pub threshold: f64,
}

/// Outcome of the post-computation compliance pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationStatus {
    pub findings: Vec<ComplianceFinding>,
}

impl ValidationStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finding and log it at a level matching its severity.
    pub fn push(
        &mut self,
        severity: Severity,
        code: &'static str,
        message: impl Into<String>,
        observed: f64,
        threshold: f64,
    ) {
        let message = message.into();
        match severity {
            Severity::Info => log::debug!("compliance [{code}]: {message}"),
            Severity::Warning => log::warn!("compliance [{code}]: {message}"),
            Severity::Critical => log::warn!("compliance [{code}] CRITICAL: {message}"),
        }
        self.findings.push(ComplianceFinding {
            severity,
            code,
            message,
            observed,
            threshold,
        });
    }

    /// True when no finding is Warning or Critical
    pub fn is_clean(&self) -> bool {
        self.findings
            .iter()
            .all(|f| f.severity == Severity::Info)
    }

    /// Highest severity present, if any findings exist
    pub fn worst_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max_by_key(|s| match s {
            Severity::Info => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
        })
    }
}
