//! Financial records export command.
//!
//! Reads a JSON array of payment records (camelCase keys, as produced by the
//! membership UI), exports the paid ones to
//! `Financial_Records_<YYYY-MM-DD>.xlsx` and optionally prints the summary
//! metrics as a terminal table.
//!
//! ## Examples
//!
//! ```bash
//! # Export into the configured output directory (default: current directory)
//! finrec export payments.json
//!
//! # Export into ./reports and show the summary
//! finrec export payments.json --output-dir reports --preview
//! ```

use crate::{
    libs::{
        config::Config,
        export::{DirectorySink, ExportOutcome, Exporter, XlsxEngineLoader},
        messages::Message,
        record::PaymentRecord,
        view::View,
    },
    msg_bail_anyhow, msg_error_anyhow, msg_info, msg_print,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

/// Command-line arguments for the export command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// JSON file containing an array of payment records
    input: PathBuf,

    /// Directory the workbook is written to
    ///
    /// Overrides `output_dir` from the configuration file. The directory is
    /// created if it does not exist.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the summary metrics after exporting
    #[arg(short, long)]
    preview: bool,
}

/// Executes the export command.
///
/// 1. **Configuration**: currency, civil zone and output directory
/// 2. **Input**: JSON array of payment records
/// 3. **Export**: filter, map, aggregate, build, style, serialize, write
/// 4. **Preview**: optional summary table
///
/// An empty input file and an input without paid records both finish
/// successfully without writing a file; only the latter prints a notice.
pub async fn cmd(args: ExportArgs) -> Result<()> {
    let config = Config::read()?;
    let records = read_records(&args.input)?;

    if !records.is_empty() {
        msg_info!(Message::ExportStarted(records.len()));
    }

    let output_dir = args.output_dir.unwrap_or_else(|| config.output_dir());
    let exporter = Exporter::new(&config, XlsxEngineLoader, DirectorySink::new(output_dir));

    let outcome = exporter
        .export(&records, &Local::now())
        .await
        .map_err(|e| msg_error_anyhow!(Message::ExportFailed(e.to_string())))?;

    if let ExportOutcome::Exported { metrics, .. } = outcome {
        if args.preview {
            msg_print!(Message::SummaryHeader, true);
            View::summary(&metrics);
        }
    }
    Ok(())
}

/// Reads and parses the record file.
pub fn read_records(path: &Path) -> Result<Vec<PaymentRecord>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => msg_bail_anyhow!(Message::InputReadFailed(path.display().to_string(), e.to_string())),
    };
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str(&content) {
        Ok(records) => Ok(records),
        Err(e) => msg_bail_anyhow!(Message::InputParseFailed(path.display().to_string(), e.to_string())),
    }
}
