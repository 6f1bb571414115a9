//! Regulatory Metrics CLI
//!
//! Runs both derivation pipelines for reserving results supplied as JSON
//! (or a built-in sample) and prints the metric records as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use regulatory_metrics::{EngineAssumptions, EngineRunner, ReservingResult};

#[derive(Parser, Debug)]
#[command(name = "regulatory_metrics", version, about = "Derive IFRS 17 / solvency metrics from reserving results")]
struct Cli {
    /// JSON file containing one ReservingResult or an array of them.
    /// Omit to run the built-in sample portfolio.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Annual discount rate override (clamped to the 5-7% band)
    #[arg(long)]
    discount_rate: Option<f64>,

    /// Cost-of-capital rate override (deviating from 6% raises a finding)
    #[arg(long)]
    cost_of_capital: Option<f64>,

    /// Confidence-level override in percent
    #[arg(long)]
    confidence_level: Option<f64>,

    /// Number of CSM roll-forward periods (clamped to 4-8)
    #[arg(long)]
    periods: Option<usize>,

    /// Seed for the deterministic experience-adjustment perturbation
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Pretty-print the output JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let inputs = match &cli.input {
        Some(path) => load_inputs(path)?,
        None => sample_portfolio(),
    };

    let assumptions = EngineAssumptions {
        discount_rate: cli.discount_rate,
        cost_of_capital_rate: cli.cost_of_capital,
        confidence_level: cli.confidence_level,
        periods: cli.periods,
        stress_scenarios: None,
        experience_seed: cli.seed,
    };
    let runner = EngineRunner::new().with_assumptions(assumptions);

    let mut outputs = Vec::with_capacity(inputs.len());
    for (i, result) in inputs.iter().enumerate() {
        let metrics = runner
            .run(result)
            .with_context(|| format!("derivation failed for input {i} ({})", result.line_of_business))?;
        log::info!(
            "input {i} ({}): SCR coverage {:.1}%, {} findings",
            result.line_of_business,
            metrics.solvency.ratios.scr_coverage,
            metrics.ifrs17.validation.findings.len() + metrics.solvency.validation.findings.len()
        );
        outputs.push(metrics);
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&outputs)?
    } else {
        serde_json::to_string(&outputs)?
    };
    println!("{json}");
    Ok(())
}

fn load_inputs(path: &PathBuf) -> anyhow::Result<Vec<ReservingResult>> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    // Accept a single record or an array
    if let Ok(one) = serde_json::from_str::<ReservingResult>(&raw) {
        return Ok(vec![one]);
    }
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn sample_portfolio() -> Vec<ReservingResult> {
    vec![
        ReservingResult {
            ultimate: 425_600_000.0,
            paid_to_date: Some(298_400_000.0),
            loss_ratio: Some(0.75),
            coefficient_of_variation: Some(0.08),
            data_quality_score: Some(88.0),
            model_fit_score: Some(0.91),
            line_of_business: "Motor Third Party Liability".to_string(),
        },
        ReservingResult {
            ultimate: 182_300_000.0,
            paid_to_date: Some(101_500_000.0),
            loss_ratio: Some(0.68),
            coefficient_of_variation: Some(0.14),
            data_quality_score: Some(76.0),
            model_fit_score: None,
            line_of_business: "Commercial Property".to_string(),
        },
        ReservingResult {
            ultimate: 96_800_000.0,
            paid_to_date: None,
            loss_ratio: None,
            coefficient_of_variation: Some(0.21),
            data_quality_score: Some(64.0),
            model_fit_score: None,
            line_of_business: "Professional Indemnity".to_string(),
        },
    ]
}
