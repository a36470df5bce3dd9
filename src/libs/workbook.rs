//! In-memory workbook model and the two-sheet report layout.
//!
//! The report is assembled as plain data first (sheets, rows, cells, column
//! widths) and only handed to a spreadsheet engine at the very end.
//!
//! ## Layout
//!
//! 1. `Financial Records` (active): a header row of ten titles, then one row
//!    per [`DisplayRow`] in mapper order.
//! 2. `Summary`: a `Metric` / `Value` header row, then one row per
//!    [`SummaryMetric`] in aggregator order.

use crate::libs::{
    row::{DisplayRow, DETAIL_HEADERS},
    style::StyleRole,
    summary::{SummaryMetric, SUMMARY_HEADERS},
};
use serde::Serialize;

pub const DETAIL_SHEET_NAME: &str = "Financial Records";
pub const SUMMARY_SHEET_NAME: &str = "Summary";

/// Detail sheet column widths, in Excel character units.
pub const DETAIL_COLUMN_WIDTHS: [f64; DisplayRow::FIELD_COUNT] = [6.0, 28.0, 10.0, 10.0, 18.0, 14.0, 16.0, 20.0, 45.0, 24.0];

/// Summary sheet column widths: label, value.
pub const SUMMARY_COLUMN_WIDTHS: [f64; 2] = [28.0, 36.0];

/// A single text cell with optional presentation metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub value: String,
    pub style: Option<StyleRole>,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            style: None,
        }
    }
}

/// A named sheet: ordered rows plus per-column widths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Worksheet {
    pub name: String,
    pub column_widths: Vec<f64>,
    pub rows: Vec<Vec<Cell>>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>, column_widths: &[f64]) -> Self {
        Self {
            name: name.into(),
            column_widths: column_widths.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(values.into_iter().map(Cell::text).collect());
    }

    /// Mutable access to a cell, or `None` when it does not exist.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|cells| cells.get_mut(col))
    }

    /// Number of rows after the header row.
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

/// Ordered worksheets; the first one is the active sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Workbook {
    pub sheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.sheets.iter_mut().find(|sheet| sheet.name == name)
    }
}

/// Builds the unstyled two-sheet report.
pub fn build_workbook(rows: &[DisplayRow], metrics: &[SummaryMetric]) -> Workbook {
    let mut detail = Worksheet::new(DETAIL_SHEET_NAME, &DETAIL_COLUMN_WIDTHS);
    detail.push_row(DETAIL_HEADERS);
    for row in rows {
        detail.push_row(row.cells());
    }

    let mut summary = Worksheet::new(SUMMARY_SHEET_NAME, &SUMMARY_COLUMN_WIDTHS);
    summary.push_row(SUMMARY_HEADERS);
    for metric in metrics {
        summary.push_row([metric.label.as_str(), metric.value.as_str()]);
    }

    tracing::debug!(detail_rows = rows.len(), summary_rows = metrics.len(), "workbook built");

    Workbook {
        sheets: vec![detail, summary],
    }
}
