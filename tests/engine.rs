//! End-to-end scenarios for both derivation pipelines

use approx::{assert_abs_diff_eq, assert_relative_eq};

use regulatory_metrics::solvency::{McrResult, StressScenario};
use regulatory_metrics::{
    derive_ifrs17_metrics, derive_solvency_metrics, EngineAssumptions, EngineError, EngineRunner,
    RegulatoryConstants, ReservingResult,
};

fn motor_tpl() -> ReservingResult {
    ReservingResult {
        ultimate: 425_600_000.0,
        paid_to_date: Some(298_400_000.0),
        loss_ratio: Some(0.75),
        coefficient_of_variation: Some(0.08),
        data_quality_score: Some(88.0),
        model_fit_score: None,
        line_of_business: "Motor Third Party Liability".to_string(),
    }
}

#[test]
fn motor_tpl_scenario_matches_reference_figures() {
    let metrics = derive_ifrs17_metrics(&motor_tpl(), &EngineAssumptions::default()).unwrap();

    assert_abs_diff_eq!(metrics.exposure.total_reserves, 127_200_000.0, epsilon = 1.0);
    // 0.08 * 0.5 = 0.04 clamps up to the 5% floor
    assert_relative_eq!(metrics.risk_adjustment.risk_adjustment_rate, 0.05, max_relative = 1e-12);
    assert_abs_diff_eq!(metrics.risk_adjustment.total_amount, 6_360_000.0, epsilon = 1.0);
    assert_relative_eq!(metrics.risk_adjustment.cost_of_capital_rate, 0.06, max_relative = 1e-12);
}

#[test]
fn csm_sequence_invariants_hold_for_varied_inputs() {
    let cases = [
        (4, 0.05, Some(0.3)),
        (5, 0.06, None),
        (6, 0.07, Some(0.95)),
        (8, 0.065, None),
    ];
    for (periods, rate, fit) in cases {
        let mut input = motor_tpl();
        input.model_fit_score = fit;
        let assumptions = EngineAssumptions {
            periods: Some(periods),
            discount_rate: Some(rate),
            experience_seed: 7,
            ..Default::default()
        };
        let metrics = derive_ifrs17_metrics(&input, &assumptions).unwrap();
        let movements = &metrics.csm_roll_forward;
        assert_eq!(movements.len(), periods);

        for m in movements {
            let sum = m.opening_balance
                + m.interest_accretion
                + m.service_release
                + m.experience_adjustment
                + m.unlocking_adjustment;
            assert_abs_diff_eq!(m.closing_balance, sum, epsilon = 1000.0);
        }
        for pair in movements.windows(2) {
            assert_eq!(pair[1].opening_balance, pair[0].closing_balance);
        }
    }
}

#[test]
fn scr_diversification_is_a_benefit() {
    let metrics = derive_solvency_metrics(&motor_tpl(), &EngineAssumptions::default()).unwrap();

    assert!(metrics.scr.diversification_benefit <= 0.0);
    assert!(metrics.scr.total_scr <= metrics.scr.module_charges.sum());
    assert_eq!(metrics.scr.total_scr, metrics.scr.basic_scr);
}

#[test]
fn mcr_cap_binding_scenario() {
    let constants = RegulatoryConstants::standard_formula();
    let mcr = McrResult::from_linear(60_000_000.0, 100_000_000.0, &constants);
    assert_abs_diff_eq!(mcr.capped_mcr, 45_000_000.0, epsilon = 1e-6);
    assert_abs_diff_eq!(mcr.final_mcr, 45_000_000.0, epsilon = 1e-6);
}

#[test]
fn mcr_scr_floor_binding_scenario() {
    let constants = RegulatoryConstants::standard_formula();
    let mcr = McrResult::from_linear(1_000_000.0, 10_000_000.0, &constants);
    assert_abs_diff_eq!(mcr.capped_mcr, 1_000_000.0, epsilon = 1e-6);
    assert_abs_diff_eq!(mcr.final_mcr, 2_500_000.0, epsilon = 1e-6);
}

#[test]
fn zero_exposure_yields_zero_scr() {
    let input = ReservingResult {
        ultimate: 0.0,
        paid_to_date: Some(0.0),
        loss_ratio: Some(0.75),
        coefficient_of_variation: None,
        data_quality_score: None,
        model_fit_score: None,
        line_of_business: "Diversified".to_string(),
    };
    let metrics = derive_solvency_metrics(&input, &EngineAssumptions::default()).unwrap();

    assert_eq!(metrics.scr.basic_scr, 0.0);
    assert_eq!(metrics.scr.diversification_benefit, 0.0);
    assert_eq!(metrics.scr.total_scr, 0.0);
    // The absolute floor still produces a positive MCR
    assert_abs_diff_eq!(metrics.mcr.final_mcr, 3_700_000.0, epsilon = 1e-6);
}

#[test]
fn disclosure_identity_holds_exactly() {
    let metrics = derive_ifrs17_metrics(&motor_tpl(), &EngineAssumptions::default()).unwrap();
    let d = &metrics.disclosure;
    assert_eq!(
        d.profit_before_tax,
        d.insurance_revenue - d.insurance_service_expenses + d.net_financial_result
    );
}

#[test]
fn identical_inputs_produce_bit_identical_output() {
    let runner = EngineRunner::new();
    let a = runner.run(&motor_tpl()).unwrap();
    let b = runner.run(&motor_tpl()).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn missing_input_is_a_tagged_failure() {
    let mut input = motor_tpl();
    input.ultimate = f64::NAN;
    let err = derive_solvency_metrics(&input, &EngineAssumptions::default()).unwrap_err();
    assert!(matches!(err, EngineError::MissingInput { field: "ultimate", .. }));

    let mut input = motor_tpl();
    input.paid_to_date = Some(input.ultimate * 2.0);
    let err = derive_ifrs17_metrics(&input, &EngineAssumptions::default()).unwrap_err();
    assert!(matches!(err, EngineError::MissingInput { field: "reserves", .. }));
}

#[test]
fn stress_projection_scales_baseline() {
    let assumptions = EngineAssumptions {
        stress_scenarios: Some(vec![
            StressScenario::EquityMarketCrash,
            StressScenario::CombinedAdverse,
        ]),
        ..Default::default()
    };
    let metrics = derive_solvency_metrics(&motor_tpl(), &assumptions).unwrap();
    let baseline = metrics.ratios.scr_coverage;

    assert_eq!(metrics.stress_tests.len(), 2);
    assert_relative_eq!(
        metrics.stress_tests[0].solvency_ratio,
        baseline * 0.78,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        metrics.stress_tests[1].solvency_ratio,
        baseline * 0.70,
        max_relative = 1e-12
    );
    for stressed in &metrics.stress_tests {
        assert_eq!(stressed.passed, stressed.solvency_ratio >= 100.0);
    }
}

#[test]
fn unrecognized_assumption_keys_are_ignored() {
    let json = r#"{"discount_rate": 0.055, "periods": 5, "submission_format": "QRT"}"#;
    let assumptions: EngineAssumptions = serde_json::from_str(json).unwrap();
    let metrics = derive_ifrs17_metrics(&motor_tpl(), &assumptions).unwrap();
    assert_eq!(metrics.csm_roll_forward.len(), 5);
}
