//! Formatted terminal/markdown output.
//!
//! We keep formatting code in one place so:
//! - the generators and statistics stay clean and testable
//! - output changes are localized (golden tests below)

use crate::domain::{Channel, ChannelStats, ColumnSummary, LinearSummary, SupportSummary};

const RULE_WIDTH: usize = 60;

/// Parameter header plus the findings section of the linear dashboard.
pub fn format_linear_findings(summary: &LinearSummary) -> String {
    let cfg = &summary.config;
    let mut out = String::new();

    out.push_str("# Interactive Data Analysis\n\n");
    out.push_str("## Data Parameters\n");
    out.push_str(&format!("- Sample Size: {}\n", cfg.sample_size));
    out.push_str(&format!("- Noise Level: {}\n\n", cfg.noise_level));

    out.push_str("## Data Flow\n");
    out.push_str(&format!(
        "1. Parameters: sample_size={}, noise_level={}\n",
        cfg.sample_size, cfg.noise_level
    ));
    out.push_str(&format!(
        "2. Generated synthetic dataset with {} observations\n",
        cfg.sample_size
    ));
    out.push_str(&format!(
        "3. Correlation coefficient: **{:.3}**\n",
        summary.correlation
    ));
    out.push_str("4. Visualizations of the current data\n");
    out.push_str("5. Summary of all previous calculations\n\n");

    out.push_str("## Key Findings\n");
    out.push_str(&format!("- Sample Size: {} data points\n", cfg.sample_size));
    out.push_str(&format!(
        "- Correlation: {:.3} ({} relationship)\n",
        summary.correlation,
        summary.strength.label()
    ));
    out.push_str(&format!("- Mean Y: {:.2} ± {:.2}\n", summary.mean_y, summary.std_y));
    out.push_str(&format!(
        "- Noise Level: {} ({})\n",
        summary.noise_band.label(),
        cfg.noise_level
    ));
    out.push_str(&format!(
        "- Fitted Line: y = {:.3}x + {:.3} (true: y = 2x + 1)\n\n",
        summary.fit.slope, summary.fit.intercept
    ));

    out.push_str("## Variable Dependencies\n");
    out.push_str("sample_size, noise_level -> data -> statistics -> visualization -> summary\n");

    out
}

/// `describe()`-style table with one column per dataset column.
pub fn format_describe_table(summary: &LinearSummary) -> String {
    let mut out = String::new();

    let mut header = format!("{:<6}", "");
    for (name, _) in &summary.describe {
        header.push_str(&format!(" {name:>12}"));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for label in ["count", "mean", "std", "min", "25%", "50%", "75%", "max"] {
        let mut line = format!("{label:<6}");
        for (_, col) in &summary.describe {
            line.push(' ');
            line.push_str(&describe_cell(label, col));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn describe_cell(label: &str, col: &ColumnSummary) -> String {
    let value = match label {
        "count" => return format!("{:>12}", col.count),
        "mean" => col.mean,
        "std" => match col.std {
            Some(v) => v,
            None => return format!("{:>12}", "-"),
        },
        "min" => col.min,
        "25%" => col.q25,
        "50%" => col.median,
        "75%" => col.q75,
        _ => col.max,
    };
    format!("{value:>12.4}")
}

/// Dataset shape, channel list, and response-time range.
pub fn format_support_overview(summary: &SupportSummary, channels: &[Channel]) -> String {
    let names: Vec<&str> = channels.iter().map(|c| c.display_name()).collect();
    let mut out = String::new();
    out.push_str(&format!("Dataset shape: ({}, {})\n", summary.rows, summary.columns));
    out.push_str(&format!("Channels: {}\n", names.join(", ")));
    out.push_str(&format!(
        "Response time range: {:.2} - {:.2} hours\n",
        summary.response_min, summary.response_max
    ));
    out
}

/// Per-channel statistics table, rounded to two decimals.
pub fn format_channel_table(summary: &SupportSummary) -> String {
    let mut out = String::new();
    out.push_str("Channel Statistics:\n");
    out.push_str(&format!(
        "{:<14} {:>8} {:>8} {:>8}\n",
        "channel", "mean", "median", "std"
    ));
    out.push_str(&format!("{:-<14} {:-<8} {:-<8} {:-<8}\n", "", "", "", ""));
    for s in &summary.channels {
        out.push_str(&format!(
            "{:<14} {:>8.2} {:>8.2} {:>8.2}\n",
            s.channel.display_name(),
            s.mean,
            s.median,
            s.std
        ));
    }
    out
}

/// Fixed business-insight lines with each channel's average.
pub fn format_business_insights(summary: &SupportSummary) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    out.push_str(&format!("{rule}\nBUSINESS INSIGHTS:\n{rule}\n"));

    let lines = [
        (Channel::LiveChat, "Fastest channel"),
        (Channel::Phone, "Moderate response"),
        (Channel::SocialMedia, "Quick response"),
        (Channel::Email, "Slowest channel"),
    ];
    for (channel, label) in lines {
        if let Some(ChannelStats { mean, .. }) = summary.channel(channel) {
            out.push_str(&format!(
                "• {}: {label} (avg: {mean:.1}h)\n",
                channel.display_name()
            ));
        }
    }

    out.push_str("\nRecommendation: Invest in live chat infrastructure for optimal efficiency\n");
    out
}
