//! Markdown report bundle for a single linear run.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::app::pipeline::LinearRun;
use crate::error::AppError;
use crate::plot::render_residual_histogram;
use crate::report::{format_describe_table, format_linear_findings};

const HISTOGRAM_BINS: usize = 20;
const HISTOGRAM_BAR_WIDTH: usize = 40;

/// Write `<dir>/synth_report_<timestamp>_seed<seed>.md` and return its path.
pub fn write_report_bundle(dir: &Path, run: &LinearRun) -> Result<PathBuf, AppError> {
    create_dir_all(dir)
        .map_err(|e| AppError::io(format!("Failed to create report dir '{}'", dir.display()), e))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("synth_report_{ts}_seed{}.md", run.seed));

    let body = render_bundle(run)?;
    let mut file = File::create(&path)
        .map_err(|e| AppError::io(format!("Failed to create report '{}'", path.display()), e))?;
    file.write_all(body.as_bytes())
        .map_err(|e| AppError::io(format!("Failed to write report '{}'", path.display()), e))?;

    info!(path = %path.display(), "report bundle written");
    Ok(path)
}

fn render_bundle(run: &LinearRun) -> Result<String, AppError> {
    let config = &run.summary.config;
    let mut out = String::new();

    out.push_str("# synth report bundle\n");
    out.push_str(&format!("- generated: {}\n", Local::now().to_rfc3339()));
    out.push_str(&format!("- seed: {}\n", run.seed));
    out.push_str(&format!("- sample_size: {}\n", config.sample_size));
    out.push_str(&format!("- noise_level: {:.2}\n", config.noise_level));
    out.push_str(&format!(
        "- fitted line: y = {:.4}x + {:.4}\n\n",
        run.summary.fit.slope, run.summary.fit.intercept
    ));

    out.push_str(&format_linear_findings(&run.summary));
    out.push_str("\n## Summary statistics\n```\n");
    out.push_str(&format_describe_table(&run.summary));
    out.push_str("```\n\n## Residual distribution\n```\n");
    out.push_str(&render_residual_histogram(
        &run.dataset,
        HISTOGRAM_BINS,
        HISTOGRAM_BAR_WIDTH,
    )?);
    out.push_str("```\n");
    Ok(out)
}
