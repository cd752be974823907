use anyhow::Result;
use log::info;
use serde::Serialize;

use pressure_rise::analysis::{fit_trial, AnalysisError, FitResult};

use super::{load, Source};

#[derive(Serialize)]
struct FitOutput<'a> {
    trial: &'a str,
    label: String,
    t_lo: f64,
    t_hi: f64,
    #[serde(flatten)]
    fit: FitResult,
}

/// Compute and print the rise rate of one trial
pub fn run(source: Source, trial_id: &str, t_lo: f64, t_hi: f64, json: bool) -> Result<()> {
    let dataset = load(&source)?;
    info!("Fitting {} over [{}, {}]", trial_id, t_lo, t_hi);

    let trial = dataset
        .get(trial_id)
        .ok_or_else(|| AnalysisError::NotFound(trial_id.to_string()))?;
    let fit = fit_trial(trial, t_lo, t_hi)?;
    let label = trial.label();

    if json {
        let output = FitOutput {
            trial: trial_id,
            label,
            t_lo,
            t_hi,
            fit,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", label);
        println!("{}", fit);
    }
    Ok(())
}
