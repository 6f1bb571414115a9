//! Canonical line-of-business codes and free-text label classification
//!
//! The numeric core never touches strings: free-text labels from upstream
//! reserving results are resolved to a `LineCode` template exactly once, at
//! the boundary, by case-insensitive substring matching against a fixed
//! keyword table.

use serde::{Deserialize, Serialize};

/// Canonical lines of business used by the factor tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineCode {
    Motor,
    Property,
    GeneralLiability,
    Marine,
    Miscellaneous,
}

impl LineCode {
    /// All lines, in factor-table order
    pub const ALL: [LineCode; 5] = [
        LineCode::Motor,
        LineCode::Property,
        LineCode::GeneralLiability,
        LineCode::Marine,
        LineCode::Miscellaneous,
    ];
}

/// Weight-distribution template a label resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightTemplate {
    MotorDominant,
    PropertyDominant,
    LiabilityDominant,
    /// Fallback when no keyword matches
    Diversified,
}

impl WeightTemplate {
    /// Line weights for this template. Each row sums to 1.0.
    pub fn weights(&self) -> Vec<(LineCode, f64)> {
        use LineCode::*;
        match self {
            WeightTemplate::MotorDominant => vec![
                (Motor, 0.70),
                (Property, 0.10),
                (GeneralLiability, 0.10),
                (Marine, 0.05),
                (Miscellaneous, 0.05),
            ],
            WeightTemplate::PropertyDominant => vec![
                (Motor, 0.10),
                (Property, 0.65),
                (GeneralLiability, 0.10),
                (Marine, 0.10),
                (Miscellaneous, 0.05),
            ],
            WeightTemplate::LiabilityDominant => vec![
                (Motor, 0.10),
                (Property, 0.10),
                (GeneralLiability, 0.65),
                (Marine, 0.05),
                (Miscellaneous, 0.10),
            ],
            WeightTemplate::Diversified => vec![
                (Motor, 0.25),
                (Property, 0.25),
                (GeneralLiability, 0.25),
                (Marine, 0.15),
                (Miscellaneous, 0.10),
            ],
        }
    }
}

/// Keyword table checked in order; first match wins.
///
/// Motor keywords come first so labels like "Motor Third Party Liability"
/// resolve to the motor template rather than the liability one.
const KEYWORD_TABLE: &[(&str, WeightTemplate)] = &[
    ("motor", WeightTemplate::MotorDominant),
    ("auto", WeightTemplate::MotorDominant),
    ("vehicle", WeightTemplate::MotorDominant),
    ("mtpl", WeightTemplate::MotorDominant),
    ("property", WeightTemplate::PropertyDominant),
    ("fire", WeightTemplate::PropertyDominant),
    ("homeowner", WeightTemplate::PropertyDominant),
    ("engineering", WeightTemplate::PropertyDominant),
    ("liability", WeightTemplate::LiabilityDominant),
    ("casualty", WeightTemplate::LiabilityDominant),
    ("professional", WeightTemplate::LiabilityDominant),
    ("employer", WeightTemplate::LiabilityDominant),
];

/// Resolve a free-text label to a weight template.
///
/// Total function: an empty or unrecognized label resolves to the
/// diversified default.
pub fn classify_label(label: &str) -> WeightTemplate {
    let lower = label.to_lowercase();
    for (keyword, template) in KEYWORD_TABLE {
        if lower.contains(keyword) {
            return *template;
        }
    }
    WeightTemplate::Diversified
}
