//! Command implementation for the read-table CLI
//!
//! Reads the input line by line, converts each line with the column schema,
//! writes good rows to stdout and a diagnostic for every rejected row to
//! stderr. A rejected row never stops the run; only a terminal input state
//! does.

use crate::cli::args::{Args, OutputFormat};
use crate::cli::stats::RunStats;
use crate::error::ErrorKind;
use crate::reader::{LineSource, TableReader};
use crate::schema::{Schema, Value};
use anyhow::{Context, Result};
use colored::*;
use std::io::{self, Write};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Main command runner for read-table
///
/// 1. Set up logging
/// 2. Validate arguments, build reader settings and schema
/// 3. Convert every line of the input
/// 4. Log summary statistics
pub fn run(args: Args) -> Result<RunStats> {
    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = args
        .reader_config()
        .context("Failed to build reader settings")?;
    let schema = args.schema().context("Failed to parse column schema")?;

    let unsupported = schema.unsupported_columns();
    if !unsupported.is_empty() {
        warn!(
            "Schema has columns without a converter, every row will be rejected: {}",
            unsupported.join(", ")
        );
    }
    debug!("Reader settings: {:?}", config);

    let stdout = io::stdout();
    let stderr = io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    let stats = match &args.input {
        Some(path) => {
            let mut reader = TableReader::open(path).with_config(&config)?;
            process_table(&mut reader, &schema, args.output_format, &mut out, &mut err)?
        }
        None => {
            let stdin = io::stdin();
            let mut reader = TableReader::from_reader(stdin.lock()).with_config(&config)?;
            process_table(&mut reader, &schema, args.output_format, &mut out, &mut err)?
        }
    };

    log_summary(&stats);
    Ok(stats)
}

/// Set up structured logging on stderr
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("read_table={}", log_level)));

    let layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    let initialized = if args.quiet {
        registry.with(layer.compact()).try_init()
    } else {
        registry.with(layer.with_timer(fmt::time::uptime())).try_init()
    };
    initialized.context("Failed to initialize logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Convert every remaining line of `reader`
///
/// Good rows go to `out`, diagnostics to `err`. The returned statistics
/// carry the state the input ended in.
pub fn process_table<S: LineSource>(
    reader: &mut TableReader<S>,
    schema: &Schema,
    format: OutputFormat,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<RunStats> {
    let start = Instant::now();
    let mut stats = RunStats::new();

    while reader.next_line().is_ok() {
        match schema.read_row(reader.cursor_mut()) {
            Ok(row) => {
                stats.record_row();
                write_row(out, &row, format).context("Failed to write row")?;
            }
            Err(kind) => {
                stats.record_rejection(kind);
                writeln!(err, "{}", reader.diagnostic().to_string().yellow())
                    .context("Failed to write diagnostic")?;
            }
        }
    }

    stats.lines_read = reader.line_number();
    stats.final_state = reader.last_error();
    stats.elapsed = start.elapsed();

    if stats.final_state != ErrorKind::EndOfInput {
        writeln!(err, "{}", reader.diagnostic().to_string().bright_red().bold())
            .context("Failed to write diagnostic")?;
    }

    out.flush().context("Failed to flush output")?;
    Ok(stats)
}

fn write_row(out: &mut impl Write, row: &[Value], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            let fields: Vec<String> = row.iter().map(Value::to_string).collect();
            writeln!(out, "Read: {}", fields.join("\t"))?;
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, row)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn log_summary(stats: &RunStats) {
    info!(
        "Read {} lines: {} rows parsed, {} rejected ({:.1}% success) in {:?}",
        stats.lines_read,
        stats.rows_parsed,
        stats.rows_rejected,
        stats.success_rate(),
        stats.elapsed
    );
    for (kind, count) in stats.rejections_sorted() {
        info!("  {}: {}", kind, count);
    }
    if !stats.is_successful() {
        warn!("Input ended with: {}", stats.final_state);
    }
}
