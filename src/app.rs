//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and resolves settings
//! - installs the log subscriber
//! - runs the generate -> summarize pipeline
//! - prints reports/plots and writes optional exports

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, LinearArgs, ShowArgs, SupportArgs, TuiArgs};
use crate::config::Settings;
use crate::error::AppError;

pub mod pipeline;
pub mod session;

const HISTOGRAM_BINS: usize = 20;
const HISTOGRAM_BAR_WIDTH: usize = 50;

/// Entry point for the `synth` binary.
pub fn run() -> Result<(), AppError> {
    // `synth` and `synth -n 200` behave like `synth tui ...`. Clap requires a
    // subcommand name, so argv is rewritten before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    init_logging(matches!(cli.command, Command::Tui(_)));
    let settings = Settings::from_env()?;

    match cli.command {
        Command::Linear(args) => handle_linear(&args, &settings),
        Command::Support(args) => handle_support(&args, &settings),
        Command::Tui(args) => handle_tui(&args, &settings),
        Command::Show(args) => handle_show(&args),
    }
}

/// `RUST_LOG` wins; otherwise `info` for batch commands and `warn` under the
/// TUI so log lines do not bleed into the alternate screen.
fn init_logging(interactive: bool) {
    let default = if interactive {
        "synth_dash=warn"
    } else {
        "synth_dash=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_linear(args: &LinearArgs, settings: &Settings) -> Result<(), AppError> {
    let config = args.config()?;
    let run = pipeline::run_linear(&config, settings.seed_or(args.seed))?;

    println!("{}", crate::report::format_linear_findings(&run.summary));
    println!("## Summary Statistics");
    println!("{}", crate::report::format_describe_table(&run.summary));

    if args.show_plot() {
        println!(
            "{}",
            crate::plot::render_scatter(&run.dataset, args.width, args.height)
        );
        println!(
            "{}",
            crate::plot::render_residual_histogram(
                &run.dataset,
                HISTOGRAM_BINS,
                HISTOGRAM_BAR_WIDTH
            )?
        );
    }

    if let Some(path) = &args.export {
        crate::io::write_linear_csv(path, &run.dataset)?;
        info!(path = %path.display(), "dataset exported");
    }
    if let Some(path) = &args.export_summary {
        crate::io::write_summary_json(path, &crate::io::SummaryFile::from_run(&run))?;
        info!(path = %path.display(), "summary exported");
    }

    Ok(())
}

fn handle_support(args: &SupportArgs, settings: &Settings) -> Result<(), AppError> {
    let config = args.config()?;
    let run = pipeline::run_support(&config, settings.seed_or(args.seed))?;

    println!(
        "{}",
        crate::report::format_support_overview(&run.summary, &run.dataset.channels())
    );
    println!("{}", crate::report::format_channel_table(&run.summary));

    if let Some(path) = args.chart_path() {
        crate::plot::write_channel_chart(path, &run.dataset, &run.summary)?;
        println!("Chart saved as '{}'\n", path.display());
    }

    print!("{}", crate::report::format_business_insights(&run.summary));

    if let Some(path) = &args.export {
        crate::io::write_support_csv(path, &run.dataset)?;
        info!(path = %path.display(), "tickets exported");
    }

    Ok(())
}

fn handle_tui(args: &TuiArgs, settings: &Settings) -> Result<(), AppError> {
    crate::tui::run(args.params()?, settings.seed_or(args.seed), settings)
}

fn handle_show(args: &ShowArgs) -> Result<(), AppError> {
    let file = crate::io::read_summary_json(&args.summary)?;
    println!(
        "Summary of seed {} generated {} by {}\n",
        file.seed,
        file.generated_at.to_rfc3339(),
        file.tool
    );
    println!("{}", crate::report::format_linear_findings(&file.summary));
    println!("{}", crate::report::format_describe_table(&file.summary));
    Ok(())
}

/// Rewrite argv so `synth` defaults to `synth tui`.
///
/// Rules:
/// - `synth`                       -> `synth tui`
/// - `synth -n 200 ...`            -> `synth tui -n 200 ...`
/// - `synth --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "linear" | "support" | "tui" | "show");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_binary_becomes_tui() {
        assert_eq!(rewrite_args(argv(&["synth"])), argv(&["synth", "tui"]));
    }

    #[test]
    fn leading_flags_go_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["synth", "-n", "200"])),
            argv(&["synth", "tui", "-n", "200"])
        );
    }

    #[test]
    fn subcommands_and_help_unchanged() {
        for args in [
            &["synth", "linear", "--seed", "1"][..],
            &["synth", "support"][..],
            &["synth", "show", "--summary", "s.json"][..],
            &["synth", "--help"][..],
            &["synth", "-V"][..],
        ] {
            assert_eq!(rewrite_args(argv(args)), argv(args));
        }
    }

    #[test]
    fn rewritten_argv_parses() {
        let cli = Cli::try_parse_from(rewrite_args(argv(&["synth", "--noise-level", "1.0"])))
            .unwrap();
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        assert_eq!(args.params().unwrap().config().noise_level, 1.0);
    }
}
