use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn, Level};

use hrcompare::{
    chart, export, logging, AnalyzerError, AppConfig, DecoderRegistry, PreviewData,
    PreviewFormat, ReportFormat, TimeRange,
};

/// hrcompare - Heart rate section comparison
///
/// Loads a FIT or GPX recording and compares average heart rate and pace
/// between two time windows of the same activity.
#[derive(Parser)]
#[command(name = "hrcompare")]
#[command(author = "hrcompare contributors")]
#[command(version)]
#[command(about = "Compare heart rate between two sections of an activity", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare heart rate and pace between two time ranges
    Compare {
        /// Activity file (.fit or .gpx)
        file: PathBuf,

        /// Start of section 1 (HH:MM:SS, MM:SS or seconds)
        #[arg(long, value_name = "TIME")]
        section1_start: String,

        /// End of section 1
        #[arg(long, value_name = "TIME")]
        section1_end: String,

        /// Start of section 2
        #[arg(long, value_name = "TIME")]
        section2_start: String,

        /// End of section 2
        #[arg(long, value_name = "TIME")]
        section2_end: String,

        /// Report format (text, json); defaults to the configured format
        #[arg(short = 'f', long)]
        format: Option<ReportFormat>,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Also draw a heart rate and speed chart
        #[arg(long)]
        plot: bool,

        /// Chart output path (.png or .svg)
        #[arg(long, value_name = "PATH", requires = "plot")]
        plot_file: Option<PathBuf>,
    },

    /// Print the full heart rate and speed series of an activity
    Preview {
        /// Activity file (.fit or .gpx)
        file: PathBuf,

        /// Output format (json, csv)
        #[arg(short = 'f', long, default_value = "json")]
        format: PreviewFormat,

        /// Write the series to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_failure(&err),
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    let mut log_config = config.logging.clone();
    log_config.level = log_config.level.raised_by(cli.verbose);
    logging::init_logging(&log_config)?;

    let registry = DecoderRegistry::new();

    match cli.command {
        Commands::Compare {
            file,
            section1_start,
            section1_end,
            section2_start,
            section2_end,
            format,
            output,
            plot,
            plot_file,
        } => {
            let range1 = TimeRange::new(section1_start, section1_end);
            let range2 = TimeRange::new(section2_start, section2_end);
            // Reject malformed bounds before touching the file
            range1.offsets()?;
            range2.offsets()?;

            let dataset = registry.load_dataset(&file)?;
            info!(
                duration_s = dataset.duration_seconds(),
                section1 = %range1,
                section2 = %range2,
                "Comparing sections"
            );

            let result = hrcompare::compare(&dataset, &range1, &range2)?;
            let format = format.unwrap_or(config.output.format);

            match &output {
                Some(path) => {
                    export::write_to_file(path, |writer| {
                        export::write_report(&result, format, writer)
                    })?;
                    eprintln!("{} {}", "Report saved to".green(), path.display());
                }
                None => export::write_report(&result, format, &mut io::stdout().lock())?,
            }

            if plot {
                let path = plot_file.unwrap_or_else(|| config.chart.default_file.clone());
                let preview = PreviewData::from_dataset(&dataset);
                plot_sections(&preview, &range1, &range2, &path, config.chart.size());
            }
        }

        Commands::Preview {
            file,
            format,
            output,
        } => {
            let dataset = registry.load_dataset(&file)?;
            let preview = PreviewData::from_dataset(&dataset);
            info!(points = preview.len(), total_time = preview.total_time, "Preview ready");

            match &output {
                Some(path) => {
                    export::write_to_file(path, |writer| {
                        export::write_preview(&preview, format, writer)
                    })?;
                    eprintln!("{} {}", "Preview saved to".green(), path.display());
                }
                None => export::write_preview(&preview, format, &mut io::stdout().lock())?,
            }
        }
    }

    Ok(())
}

/// Chart failures never fail the command; the numbers are already out
fn plot_sections(
    preview: &PreviewData,
    range1: &TimeRange,
    range2: &TimeRange,
    path: &Path,
    size: (u32, u32),
) {
    if !chart::charts_available() {
        warn!("Chart requested but this build has no chart support");
        eprintln!(
            "{}",
            "Warning: charts are not available in this build (rebuild with --features charts)"
                .yellow()
        );
        return;
    }

    match chart::render_chart(preview, range1, range2, path, size) {
        Ok(()) => eprintln!("{} {}", "Chart saved to".green(), path.display()),
        Err(err) => {
            warn!(error = %err, path = %path.display(), "Chart not generated");
            eprintln!("{} {}", "Warning:".yellow().bold(), err.user_message());
        }
    }
}

fn report_failure(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<AnalyzerError>() {
        Some(analyzer_error) => {
            let severity = analyzer_error.severity();
            // tracing macros need a constant level
            if severity.to_tracing_level() == Level::WARN {
                warn!(error = %analyzer_error, ?severity, "Analysis failed");
            } else {
                tracing::error!(error = %analyzer_error, ?severity, "Analysis failed");
            }
            eprintln!("{} {}", "Error:".red().bold(), analyzer_error.user_message());
            ExitCode::from(analyzer_error.exit_code())
        }
        None => {
            tracing::error!(error = %err, "Command failed");
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
