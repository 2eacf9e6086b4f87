//! Read/write linear summary JSON files.
//!
//! A summary file is the portable record of one dashboard state: the metrics,
//! the configuration and seed that produced them, and when it was written.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::app::pipeline::LinearRun;
use crate::domain::LinearSummary;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub seed: u64,
    pub summary: LinearSummary,
}

impl SummaryFile {
    pub fn from_run(run: &LinearRun) -> Self {
        Self {
            tool: "synth".to_string(),
            generated_at: Utc::now(),
            seed: run.seed,
            summary: run.summary.clone(),
        }
    }
}

/// Write a summary JSON file.
pub fn write_summary_json(path: &Path, file: &SummaryFile) -> Result<(), AppError> {
    let out = File::create(path).map_err(|e| {
        AppError::io(format!("Failed to create summary JSON '{}'", path.display()), e)
    })?;
    serde_json::to_writer_pretty(out, file)
        .map_err(|e| AppError::Render(format!("Failed to write summary JSON: {e}")))
}

/// Read a summary JSON file.
pub fn read_summary_json(path: &Path) -> Result<SummaryFile, AppError> {
    let input = File::open(path).map_err(|e| {
        AppError::io(format!("Failed to open summary JSON '{}'", path.display()), e)
    })?;
    serde_json::from_reader(input).map_err(|e| {
        AppError::invalid("summary", path.display(), format!("a summary JSON file ({e})"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_linear;
    use crate::domain::LinearConfig;

    #[test]
    fn summary_file_survives_disk() {
        let run = run_linear(&LinearConfig { sample_size: 40, noise_level: 0.8 }, 42).unwrap();
        let file = SummaryFile::from_run(&run);
        let path = std::env::temp_dir().join("synth_dash_summary.json");

        write_summary_json(&path, &file).unwrap();
        let back = read_summary_json(&path).unwrap();
        assert_eq!(back.seed, 42);
        assert_eq!(back.summary.config, run.summary.config);
        assert_eq!(back.summary.strength, run.summary.strength);
        assert_eq!(back.summary.describe.len(), 3);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn garbage_is_rejected() {
        let path = std::env::temp_dir().join("synth_dash_garbage.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            read_summary_json(&path),
            Err(AppError::InvalidConfiguration { parameter: "summary", .. })
        ));
        let _ = std::fs::remove_file(&path);
    }
}
