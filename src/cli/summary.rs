use anyhow::Result;

use pressure_rise::dataset::{Dataset, TrialSummary};

use super::{load, Source};

/// List the trials of the workbook
pub fn run(source: Source, json: bool) -> Result<()> {
    let dataset = load(&source)?;
    let summaries = dataset.summaries();

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    #[cfg(feature = "colorized_output")]
    {
        print!("{}", format_colored(&source, &dataset, &summaries));
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        print!("{}", format_plain(&source, &dataset, &summaries));
    }

    Ok(())
}

#[cfg(not(feature = "colorized_output"))]
fn format_plain(source: &Source, dataset: &Dataset, summaries: &[TrialSummary]) -> String {
    let mut output = String::new();
    output.push_str(&format!("Workbook: {}\n", source.workbook.display()));
    output.push_str(&format!(
        "{} trials, {} samples\n\n",
        dataset.len(),
        dataset.total_samples()
    ));
    for (i, summary) in summaries.iter().enumerate() {
        output.push_str(&format!("{:02}. {}\n", i + 1, summary));
    }
    output
}

#[cfg(feature = "colorized_output")]
fn format_colored(source: &Source, dataset: &Dataset, summaries: &[TrialSummary]) -> String {
    use console::style;

    let mut output = String::new();
    output.push_str(&format!(
        "{}: {}\n",
        style("Workbook").bold(),
        source.workbook.display()
    ));
    output.push_str(&format!(
        "{} trials, {} samples\n\n",
        style(dataset.len()).cyan(),
        style(dataset.total_samples()).cyan()
    ));

    let mut level = "";
    for (i, (trial, summary)) in dataset.iter().zip(summaries).enumerate() {
        let trial_level = trial.level();
        if trial_level != level {
            output.push_str(&format!("{}\n", style(trial_level).bold().cyan()));
            level = trial_level;
        }
        output.push_str(&format!(
            "  {} {}  {:>6} samples  t: {:.2} to {:.2} s  P: {} kPa\n",
            style(format!("{:02}.", i + 1)).dim(),
            style(&summary.id).green(),
            summary.samples,
            summary.time_range.min,
            summary.time_range.max,
            style(format!(
                "{:.3} to {:.3}",
                summary.pressure_range.min, summary.pressure_range.max
            ))
            .yellow()
        ));
    }
    output
}
