//! Disclosure (P&L) statement builder
//!
//! Derives the insurance revenue, service expense, and financial-result
//! lines from the exposure profile. The profit figure is computed as the
//! literal sum of the three components, so the disclosure identity holds
//! exactly rather than approximately.

use serde::{Deserialize, Serialize};

use crate::constants::RegulatoryConstants;
use crate::exposure::ExposureProfile;

/// Derived P&L disclosure lines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisclosureStatement {
    pub insurance_revenue: f64,
    pub insurance_service_expenses: f64,
    pub net_financial_result: f64,
    /// Exactly revenue - expenses + net financial result
    pub profit_before_tax: f64,
    pub loss_ratio: f64,
    pub expense_ratio: f64,
}

/// Build the disclosure statement.
///
/// `csm_balance` is the closing CSM from the roll-forward; its accretion at
/// the discount rate contributes to the net financial result.
pub fn build_disclosure(
    profile: &ExposureProfile,
    loss_ratio: f64,
    csm_balance: f64,
    discount_rate: f64,
    constants: &RegulatoryConstants,
) -> DisclosureStatement {
    let expense_ratio = constants.default_expense_ratio;

    let insurance_revenue = profile.estimated_premiums;
    let insurance_service_expenses = profile.estimated_premiums * (loss_ratio + expense_ratio);

    let investable_assets = profile.estimated_premiums * constants.investable_asset_fraction;
    let net_financial_result =
        investable_assets * constants.investment_yield + csm_balance * discount_rate;

    DisclosureStatement {
        insurance_revenue,
        insurance_service_expenses,
        net_financial_result,
        profit_before_tax: insurance_revenue - insurance_service_expenses + net_financial_result,
        loss_ratio,
        expense_ratio,
    }
}
