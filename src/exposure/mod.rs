//! Exposure extraction: reserving result -> premium/reserve totals + weights

mod extractor;
mod lob;

pub use extractor::ExposureProfile;
pub use lob::{classify_label, LineCode, WeightTemplate};
