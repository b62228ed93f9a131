mod engine;
mod grid;
mod models;
mod sections;
mod types;

use std::io::{stderr, stdin, stdout, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::exit;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::StatementEngine;
use crate::models::StatementReport;

/// Reads the workbook from stdin instead of a file path.
const STDIN_MARKER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Csv
}

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: If I was making a much more sophisticated CLI application, I would have used the clap crate
    //      to handle the CLI parsing and execution.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: broker-statement-parser [statement].xls|xlsx|- [log_level:optional] [json|csv:optional] > [output]");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let source = &args[1];
    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or_else(|| LevelFilter::ERROR);
    let format = args.get(3)
        .map(|s| parse_output_format(s)).unwrap_or(OutputFormat::Json);

    setup_logging(log_level);

    let engine = StatementEngine::new();

    let timer = Instant::now();
    let report = if source == STDIN_MARKER {
        let mut bytes = Vec::new();
        stdin().lock().read_to_end(&mut bytes).context("Failed to read statement from stdin")?;
        engine.run_bytes(bytes).await
            .context("Failed to parse statement from stdin")?
    } else {
        engine.run(PathBuf::from(source)).await
            .with_context(|| format!("Failed to parse statement [{source}]"))?
    };
    let duration = timer.elapsed();

    info!("Parsed {} operations with {} warnings in: {duration:?}", report.operations.len(), report.warnings.len());

    match format {
        OutputFormat::Json => write_json_to_stdout(&report)?,
        OutputFormat::Csv => write_csv_to_stdout(&report)?
    }

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn parse_output_format(format: &str) -> OutputFormat {
    match format.to_lowercase().as_str() {
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        _ => {
            eprintln!("Invalid output format '{}', defaulting to 'json'", format);
            OutputFormat::Json
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Because we are doing stdout redirection, we will need to utilize stderr to display logging
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_json_to_stdout(report: &StatementReport) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    serde_json::to_writer_pretty(&mut output, report)?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}

fn write_csv_to_stdout(report: &StatementReport) -> Result<()> {
    let mut writer = csv::Writer::from_writer(BufWriter::new(stdout().lock()));

    for operation in &report.operations {
        writer.serialize(operation)?;
    }

    writer.flush()?;

    Ok(())
}
