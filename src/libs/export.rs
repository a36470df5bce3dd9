//! Financial records export pipeline.
//!
//! Turns a list of payment records into a styled two-sheet Excel workbook and
//! delivers it as `Financial_Records_<YYYY-MM-DD>.xlsx`.
//!
//! ## Pipeline
//!
//! ```text
//! records ─▶ filter_paid ─┬─▶ RowMapper ──┐
//!                         └─▶ Summary ────┴─▶ [load engine] ─▶ build_workbook ─▶ apply_styles ─▶ serialize ─▶ sink
//! ```
//!
//! The spreadsheet engine is obtained through an [`EngineLoader`] right before
//! the workbook is built. This is the only await point of an export; nothing
//! is built against an engine that failed to load, and no partial artifact is
//! ever delivered.
//!
//! ## Outcomes
//!
//! - empty input: [`ExportOutcome::Skipped`], nothing is shown or written
//! - no paid records: [`ExportOutcome::NoPaidRecords`], a notice is shown
//! - otherwise: [`ExportOutcome::Exported`] with the delivered file name
//!
//! ## Usage
//!
//! ```rust,no_run
//! use finrec::libs::export::{DirectorySink, Exporter, XlsxEngineLoader};
//! use finrec::libs::config::Config;
//! use chrono::Local;
//!
//! # async fn run(records: Vec<finrec::libs::record::PaymentRecord>) -> anyhow::Result<()> {
//! let config = Config::read()?;
//! let exporter = Exporter::new(&config, XlsxEngineLoader, DirectorySink::new("."));
//! exporter.export(&records, &Local::now()).await?;
//! # Ok(())
//! # }
//! ```

use crate::{
    libs::{
        civil_time::CivilTimeFormatter,
        config::Config,
        messages::Message,
        record::{filter_paid, PaymentRecord},
        row::RowMapper,
        style::{apply_styles, Align, Border, StyleRole},
        summary::{Summary, SummaryMetric},
        workbook::{build_workbook, Workbook},
    },
    msg_success, msg_warning,
};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike};
use rust_xlsxwriter::{
    Color, DocProperties, ExcelDateTime, Format, FormatAlign, FormatBorder, FormatPattern, FormatUnderline,
    Workbook as XlsxWorkbook, XlsxError,
};
use std::collections::HashMap;
use std::fs;
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;

/// Prefix of every generated artifact name.
pub const FILE_PREFIX: &str = "Financial_Records";

/// Failures that abort an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet engine failed to load: {0}")]
    EngineLoad(String),
    #[error("failed to serialize workbook: {0}")]
    Serialize(#[from] XlsxError),
    #[error("failed to write export: {0}")]
    Write(#[from] std::io::Error),
    #[error("failed to deliver export: {0}")]
    Sink(String),
}

/// Result of a completed export call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The input list was empty; nothing happened.
    Skipped,
    /// Records were given but none was paid; the user was notified.
    NoPaidRecords,
    /// The artifact was serialized and delivered.
    Exported {
        file_name: String,
        path: PathBuf,
        /// Detail rows written, excluding the header.
        rows: usize,
        metrics: Vec<SummaryMetric>,
    },
}

/// Serializes a finished workbook to spreadsheet bytes.
pub trait SpreadsheetEngine {
    /// # Arguments
    ///
    /// * `workbook` - Styled workbook model
    /// * `generated_at` - Export time, recorded as the document creation time
    fn serialize<Tz: TimeZone>(&self, workbook: &Workbook, generated_at: &DateTime<Tz>) -> Result<Vec<u8>, ExportError>;
}

/// Provides a [`SpreadsheetEngine`] on demand.
pub trait EngineLoader {
    type Engine: SpreadsheetEngine;

    fn load(&self) -> impl Future<Output = Result<Self::Engine, ExportError>> + Send;
}

/// Receives the finished artifact.
pub trait ArtifactSink {
    /// Stores `bytes` under `file_name`, returning where it ended up.
    fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError>;
}

/// Writes artifacts into a directory, creating it when needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtifactSink for DirectorySink {
    fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        let path = self.dir.join(file_name);
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// Excel engine backed by `rust_xlsxwriter`.
#[derive(Debug, Clone)]
pub struct XlsxEngine {
    formats: HashMap<StyleRole, Format>,
}

impl XlsxEngine {
    pub fn new() -> Self {
        let formats = StyleRole::ALL.iter().map(|role| (*role, xlsx_format(*role))).collect();
        Self { formats }
    }
}

impl Default for XlsxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpreadsheetEngine for XlsxEngine {
    fn serialize<Tz: TimeZone>(&self, workbook: &Workbook, generated_at: &DateTime<Tz>) -> Result<Vec<u8>, ExportError> {
        let mut xlsx = XlsxWorkbook::new();

        let properties = DocProperties::new()
            .set_title(crate::libs::summary::REPORT_TITLE)
            .set_creation_datetime(&excel_datetime(generated_at)?);
        xlsx.set_properties(&properties);

        for (index, sheet) in workbook.sheets.iter().enumerate() {
            let worksheet = xlsx.add_worksheet();
            worksheet.set_name(&sheet.name)?;
            if index == 0 {
                worksheet.set_active(true);
            }

            for (col, width) in sheet.column_widths.iter().enumerate() {
                worksheet.set_column_width(col as u16, *width)?;
            }

            for (row, cells) in sheet.rows.iter().enumerate() {
                for (col, cell) in cells.iter().enumerate() {
                    let (row, col) = (row as u32, col as u16);
                    match cell.style.and_then(|role| self.formats.get(&role)) {
                        Some(format) => worksheet.write_string_with_format(row, col, &cell.value, format)?,
                        None => worksheet.write_string(row, col, &cell.value)?,
                    };
                }
            }
        }

        let bytes = xlsx.save_to_buffer()?;
        tracing::debug!(bytes = bytes.len(), "workbook serialized");
        Ok(bytes)
    }
}

/// Loads the `rust_xlsxwriter`-backed engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxEngineLoader;

impl EngineLoader for XlsxEngineLoader {
    type Engine = XlsxEngine;

    async fn load(&self) -> Result<XlsxEngine, ExportError> {
        tokio::task::spawn_blocking(XlsxEngine::new)
            .await
            .map_err(|e| ExportError::EngineLoad(e.to_string()))
    }
}

/// Runs the export pipeline with an injectable engine loader and sink.
pub struct Exporter<L, S> {
    loader: L,
    sink: S,
    clock: CivilTimeFormatter,
    currency_symbol: String,
}

impl<L: EngineLoader, S: ArtifactSink> Exporter<L, S> {
    /// Creates an exporter using the configured currency and civil zone.
    pub fn new(config: &Config, loader: L, sink: S) -> Self {
        Self {
            loader,
            sink,
            clock: CivilTimeFormatter::new(config.time_zone.clone()),
            currency_symbol: config.currency_symbol.clone(),
        }
    }

    /// Exports the paid subset of `records`.
    ///
    /// `now` supplies both the summary's export timestamp (rendered in the
    /// civil zone) and the file name's calendar date (taken in `now`'s own
    /// zone, without conversion).
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be loaded, the workbook cannot be
    /// serialized, or the sink fails. Nothing is delivered in those cases.
    pub async fn export<Tz>(&self, records: &[PaymentRecord], now: &DateTime<Tz>) -> Result<ExportOutcome, ExportError>
    where
        Tz: TimeZone,
    {
        if records.is_empty() {
            tracing::debug!("no records given, export skipped");
            return Ok(ExportOutcome::Skipped);
        }

        let eligible = filter_paid(records);
        tracing::debug!(records = records.len(), eligible = eligible.len(), "records filtered");
        if eligible.is_empty() {
            msg_warning!(Message::NoPaidRecords);
            return Ok(ExportOutcome::NoPaidRecords);
        }

        let rows = RowMapper::new(&self.currency_symbol, &self.clock).map_all(&eligible);
        let metrics = Summary::from_records(&eligible).metrics(now, &self.clock, &self.currency_symbol);

        let engine = self.loader.load().await?;

        let mut workbook = build_workbook(&rows, &metrics);
        apply_styles(&mut workbook);

        let bytes = engine.serialize(&workbook, now)?;
        let file_name = artifact_file_name(now.date_naive());
        let path = self.sink.deliver(&file_name, &bytes)?;

        msg_success!(Message::ExportCompleted(rows.len(), path.display().to_string()));
        Ok(ExportOutcome::Exported {
            file_name,
            path,
            rows: rows.len(),
            metrics,
        })
    }
}

/// `Financial_Records_<YYYY-MM-DD>.xlsx` for the given calendar date.
pub fn artifact_file_name(date: NaiveDate) -> String {
    format!("{}_{}.xlsx", FILE_PREFIX, date.format("%Y-%m-%d"))
}

fn excel_datetime<Tz: TimeZone>(instant: &DateTime<Tz>) -> Result<ExcelDateTime, XlsxError> {
    let utc = instant.naive_utc();
    ExcelDateTime::from_ymd(utc.year() as u16, utc.month() as u8, utc.day() as u8)?.and_hms(
        utc.hour() as u16,
        utc.minute() as u8,
        utc.second() as u8,
    )
}

fn xlsx_format(role: StyleRole) -> Format {
    let rule = role.rule();
    let mut format = Format::new().set_align(match rule.align {
        Align::Left => FormatAlign::Left,
        Align::Center => FormatAlign::Center,
        Align::Right => FormatAlign::Right,
    });
    format = format.set_align(FormatAlign::VerticalCenter);

    if rule.bold {
        format = format.set_bold();
    }
    if rule.underline {
        format = format.set_underline(FormatUnderline::Single);
    }
    if let Some(color) = rule.font_color {
        format = format.set_font_color(Color::RGB(color));
    }
    if let Some(color) = rule.fill_color {
        format = format
            .set_background_color(Color::RGB(color))
            .set_pattern(FormatPattern::Solid);
    }
    if rule.border == Border::Thin {
        format = format
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::RGB(rule.border_color));
    }
    format
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::style::{HEADER_BORDER, HEADER_FILL, LIGHT_GRAY, LINK_BLUE, MONEY_GREEN, WHITE};
    use chrono::{TimeZone, Utc};

    #[test]
    fn file_name_uses_calendar_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(artifact_file_name(date), "Financial_Records_2025-03-07.xlsx");
    }

    #[test]
    fn xlsx_engine_produces_zip_container() {
        let mut workbook = build_workbook(&[], &[]);
        apply_styles(&mut workbook);
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 10, 0, 0).unwrap();

        let bytes = XlsxEngine::new().serialize(&workbook, &now).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn engine_has_a_format_per_role() {
        let engine = XlsxEngine::new();
        assert!(StyleRole::ALL.iter().all(|role| engine.formats.contains_key(role)));
    }

    #[test]
    fn xlsx_engine_output_is_stable_for_a_fixed_time() {
        let metrics = vec![SummaryMetric::new("Total Paid Members", "0")];
        let mut workbook = build_workbook(&[], &metrics);
        apply_styles(&mut workbook);
        let now = Utc.with_ymd_and_hms(2025, 3, 7, 10, 0, 0).unwrap();
        let engine = XlsxEngine::new();

        let first = engine.serialize(&workbook, &now).unwrap();
        let second = engine.serialize(&workbook, &now).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn header_format_is_bold_white_on_solid_green() {
        let expected = Format::new()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_bold()
            .set_font_color(Color::RGB(WHITE))
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_pattern(FormatPattern::Solid)
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::RGB(HEADER_BORDER));
        assert_eq!(xlsx_format(StyleRole::Header), expected);
    }

    #[test]
    fn monetary_and_link_formats() {
        let monetary = Format::new()
            .set_align(FormatAlign::Right)
            .set_align(FormatAlign::VerticalCenter)
            .set_bold()
            .set_font_color(Color::RGB(MONEY_GREEN))
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::RGB(LIGHT_GRAY));
        assert_eq!(xlsx_format(StyleRole::Monetary), monetary);

        let link = Format::new()
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter)
            .set_underline(FormatUnderline::Single)
            .set_font_color(Color::RGB(LINK_BLUE))
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::RGB(LIGHT_GRAY));
        assert_eq!(xlsx_format(StyleRole::Link), link);

        assert_ne!(xlsx_format(StyleRole::Data), xlsx_format(StyleRole::Centered));
    }

    #[test]
    fn directory_sink_creates_missing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("nested").join("out"));
        let path = sink.deliver("a.xlsx", b"data").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"data");
    }
}
