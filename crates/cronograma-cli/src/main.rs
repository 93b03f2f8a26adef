//! cronograma CLI - Project Report Generator
//!
//! Command-line interface for exporting activity/finance snapshots as
//! spreadsheet reports with a Gantt chart.

mod snapshot;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cronograma_core::{finance_total, Activity, StatusCategory, StatusSummary};
use cronograma_render::{Renderer, ReportBuilder, TextRenderer, XlsxRenderer};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::snapshot::{load_config, load_snapshot};

#[derive(Parser)]
#[command(name = "cronograma")]
#[command(author, version, about = "Project schedule and finance reports", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Xlsx,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a snapshot as a report
    Export {
        /// Snapshot file (JSON)
        #[arg(value_name = "SNAPSHOT")]
        file: PathBuf,

        /// Output file (xlsx: cronograma_YYYYMMDD.xlsx, text: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Xlsx)]
        format: ExportFormat,

        /// Report configuration (TOML)
        #[arg(short, long, env = "CRONOGRAMA_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Show the status of every activity
    Status {
        /// Snapshot file (JSON)
        #[arg(value_name = "SNAPSHOT")]
        file: PathBuf,

        /// Machine-readable output
        #[arg(long)]
        json: bool,
    },

    /// Print the finance aggregate total
    Total {
        /// Snapshot file (JSON)
        #[arg(value_name = "SNAPSHOT")]
        file: PathBuf,
    },

    /// Validate every record of a snapshot
    Check {
        /// Snapshot file (JSON)
        #[arg(value_name = "SNAPSHOT")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match cli.command {
        Some(Commands::Export {
            file,
            output,
            format,
            config,
        }) => cmd_export(&file, output, format, config.as_deref()),
        Some(Commands::Status { file, json }) => cmd_status(&file, json),
        Some(Commands::Total { file }) => cmd_total(&file),
        Some(Commands::Check { file }) => cmd_check(&file),
        None => {
            println!("cronograma - Project Report Generator");
            println!("Run with --help for usage information");
            Ok(())
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_export(
    file: &Path,
    output: Option<PathBuf>,
    format: ExportFormat,
    config: Option<&Path>,
) -> Result<()> {
    let config = load_config(config)?;
    let (activities, finances) = load_snapshot(file)?;
    let document = ReportBuilder::with_config(config)
        .build(&activities, &finances)
        .context("Failed to build report")?;

    match format {
        ExportFormat::Xlsx => {
            let path = output.unwrap_or_else(default_output_name);
            XlsxRenderer::new()
                .render_to_file(&document, &path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "exported workbook");
            println!("Exported: {}", path.display());
        }
        ExportFormat::Text => {
            let text = TextRenderer::new().render(&document)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, text)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Exported: {}", path.display());
                }
                None => print!("{text}"),
            }
        }
    }
    Ok(())
}

/// `cronograma_YYYYMMDD.xlsx` for today's local date
fn default_output_name() -> PathBuf {
    PathBuf::from(format!(
        "cronograma_{}.xlsx",
        chrono::Local::now().format("%Y%m%d")
    ))
}

#[derive(Serialize)]
struct StatusLine<'a> {
    name: &'a str,
    owner: &'a str,
    due_date: chrono::NaiveDate,
    status: StatusCategory,
}

#[derive(Serialize)]
struct StatusReport<'a> {
    activities: Vec<StatusLine<'a>>,
    summary: StatusSummary,
}

fn cmd_status(file: &Path, json: bool) -> Result<()> {
    let (activities, _) = load_snapshot(file)?;
    let ordered = cronograma_render::report::sorted_by_due_date(&activities);

    let lines = ordered
        .into_iter()
        .map(|a: &Activity| {
            a.status().map(|status| StatusLine {
                name: &a.name,
                owner: &a.owner,
                due_date: a.due_date,
                status,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let mut summary = StatusSummary::default();
    for line in &lines {
        summary.record(line.status);
    }

    if json {
        let report = StatusReport {
            activities: lines,
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for line in &lines {
        println!(
            "{:<14} {}  {} ({})",
            line.status.label(),
            line.due_date,
            line.name,
            line.owner
        );
    }
    println!();
    println!("Activities: {}", summary.total);
    for status in StatusCategory::ALL {
        println!("  {:<14} {}", format!("{}:", status.label()), summary.count(status));
    }
    Ok(())
}

fn cmd_total(file: &Path) -> Result<()> {
    let (_, finances) = load_snapshot(file)?;
    let total = finance_total(&finances);
    println!("Total: {:.2}", total.round_dp(2));
    Ok(())
}

fn cmd_check(file: &Path) -> Result<()> {
    let (activities, finances) = load_snapshot(file)?;
    println!(
        "OK: {} activities, {} finance entries",
        activities.len(),
        finances.len()
    );
    Ok(())
}
