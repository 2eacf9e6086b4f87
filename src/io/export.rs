//! Export generated datasets to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{LinearDataset, SupportDataset};
use crate::error::AppError;

/// Write the linear dataset (`x_variable,y_variable,residuals`).
pub fn write_linear_csv(path: &Path, dataset: &LinearDataset) -> Result<(), AppError> {
    let mut out = create(path)?;

    writeln!(out, "x_variable,y_variable,residuals")
        .map_err(|e| AppError::io("Failed to write export CSV header", e))?;
    for r in &dataset.records {
        writeln!(out, "{:.10},{:.10},{:.10}", r.x, r.y, r.residual)
            .map_err(|e| AppError::io("Failed to write export CSV row", e))?;
    }

    out.flush()
        .map_err(|e| AppError::io(format!("Failed to flush '{}'", path.display()), e))
}

/// Write the support dataset (`channel,response_time_hours,customer_satisfaction`).
pub fn write_support_csv(path: &Path, dataset: &SupportDataset) -> Result<(), AppError> {
    let mut out = create(path)?;

    writeln!(out, "channel,response_time_hours,customer_satisfaction")
        .map_err(|e| AppError::io("Failed to write export CSV header", e))?;
    for r in &dataset.records {
        writeln!(
            out,
            "{},{:.10},{:.10}",
            r.channel.display_name(),
            r.response_time_hours,
            r.satisfaction
        )
        .map_err(|e| AppError::io("Failed to write export CSV row", e))?;
    }

    out.flush()
        .map_err(|e| AppError::io(format!("Failed to flush '{}'", path.display()), e))
}

fn create(path: &Path) -> Result<BufWriter<File>, AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::io(format!("Failed to create export CSV '{}'", path.display()), e)
    })?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Channel, LinearConfig, LinearRecord, SupportConfig, SupportRecord};

    #[test]
    fn linear_csv_has_header_and_one_line_per_record() {
        let dataset = LinearDataset {
            config: LinearConfig { sample_size: 2, noise_level: 0.0 },
            records: vec![
                LinearRecord { x: 0.0, y: 1.0, residual: 0.0 },
                LinearRecord { x: 10.0, y: 21.0, residual: 0.0 },
            ],
        };
        let path = std::env::temp_dir().join("synth_dash_linear_export.csv");
        write_linear_csv(&path, &dataset).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "x_variable,y_variable,residuals");
        assert_eq!(lines[2], "10.0000000000,21.0000000000,0.0000000000");
        assert_eq!(lines.len(), 3);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn support_csv_uses_channel_display_names() {
        let dataset = SupportDataset {
            config: SupportConfig::new(4),
            records: vec![SupportRecord {
                channel: Channel::SocialMedia,
                response_time_hours: 6.5,
                satisfaction: 4.25,
            }],
        };
        let path = std::env::temp_dir().join("synth_dash_support_export.csv");
        write_support_csv(&path, &dataset).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.ends_with("Social Media,6.5000000000,4.2500000000\n"));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let path = std::env::temp_dir().join("synth_dash_no_such_dir").join("out.csv");
        let dataset = LinearDataset {
            config: LinearConfig { sample_size: 1, noise_level: 0.0 },
            records: Vec::new(),
        };
        let err = write_linear_csv(&path, &dataset).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
        assert_eq!(err.exit_code(), 4);
    }
}
