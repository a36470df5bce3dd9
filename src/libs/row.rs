//! Flattening of eligible payment records into display rows.
//!
//! Each eligible record becomes exactly one [`DisplayRow`]: ten display-ready
//! strings in the fixed column order of the detail worksheet. Mapping is
//! deterministic and total; missing or malformed fields are replaced by
//! placeholders and never abort the export.
//!
//! ## Field Rules
//!
//! | Field          | Source                                        | Fallback     |
//! |----------------|-----------------------------------------------|--------------|
//! | No.            | 1-based position among eligible records       |              |
//! | Name           | `user.fullName`                               | `Unknown`    |
//! | Year           | `user.year` without the `year` token          | `N/A`        |
//! | Block          | `user.block`                                  | `N/A`        |
//! | Semester       | `requirement`                                 | `N/A`        |
//! | Amount         | glyph + two decimals                          | glyph `0.00` |
//! | Payment Method | upper-cased `paymentMethod`                   | `N/A`        |
//! | Reference No.  | `referenceNumber`, then `receiptNumber`       | `-`          |
//! | Receipt        | `receiptPath`, then `Receipt #<receiptNumber>`| `No receipt` |
//! | Payment Date   | civil date-time of `paymentDate`              | `-`          |

use crate::libs::{
    civil_time::CivilTimeFormatter,
    formatter::{self, format_currency, non_blank, or_placeholder, strip_year_token},
    record::PaymentRecord,
};
use serde::Serialize;

/// Column titles of the detail worksheet, in display order.
pub const DETAIL_HEADERS: [&str; DisplayRow::FIELD_COUNT] = [
    "No.",
    "Name",
    "Year",
    "Block",
    "Semester",
    "Amount",
    "Payment Method",
    "Reference No.",
    "Receipt",
    "Payment Date",
];

/// One flattened, formatted record of the detail worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub sequence: usize,
    pub name: String,
    pub year: String,
    pub block: String,
    pub period: String,
    pub amount: String,
    pub payment_method: String,
    pub reference: String,
    pub receipt: String,
    pub payment_date: String,
}

impl DisplayRow {
    pub const FIELD_COUNT: usize = 10;

    /// The row's cell values in column order.
    pub fn cells(&self) -> [String; Self::FIELD_COUNT] {
        [
            self.sequence.to_string(),
            self.name.clone(),
            self.year.clone(),
            self.block.clone(),
            self.period.clone(),
            self.amount.clone(),
            self.payment_method.clone(),
            self.reference.clone(),
            self.receipt.clone(),
            self.payment_date.clone(),
        ]
    }
}

/// Stateless mapper from eligible records to display rows.
#[derive(Debug, Clone)]
pub struct RowMapper<'a> {
    currency_symbol: &'a str,
    clock: &'a CivilTimeFormatter,
}

impl<'a> RowMapper<'a> {
    pub fn new(currency_symbol: &'a str, clock: &'a CivilTimeFormatter) -> Self {
        Self { currency_symbol, clock }
    }

    /// Maps one record at the given 1-based position.
    pub fn map(&self, sequence: usize, record: &PaymentRecord) -> DisplayRow {
        DisplayRow {
            sequence,
            name: or_placeholder(record.full_name(), formatter::UNKNOWN),
            year: year_label(record.year()),
            block: or_placeholder(record.block(), formatter::NOT_AVAILABLE),
            period: or_placeholder(record.requirement.as_deref(), formatter::NOT_AVAILABLE),
            amount: format_currency(self.currency_symbol, record.amount_value()),
            payment_method: non_blank(record.payment_method.as_deref())
                .map_or_else(|| formatter::NOT_AVAILABLE.to_string(), str::to_uppercase),
            reference: reference(record),
            receipt: receipt_descriptor(record),
            payment_date: self.clock.format_or(record.paid_at().as_ref(), formatter::DASH),
        }
    }

    /// Maps the eligible sequence, numbering rows `1..=N` in input order.
    pub fn map_all(&self, eligible: &[&PaymentRecord]) -> Vec<DisplayRow> {
        eligible
            .iter()
            .enumerate()
            .map(|(i, record)| self.map(i + 1, record))
            .collect()
    }
}

fn year_label(year: Option<&str>) -> String {
    non_blank(year)
        .map(strip_year_token)
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| formatter::NOT_AVAILABLE.to_string())
}

fn reference(record: &PaymentRecord) -> String {
    non_blank(record.reference_number.as_deref())
        .or_else(|| non_blank(record.receipt_number.as_deref()))
        .unwrap_or(formatter::DASH)
        .to_string()
}

fn receipt_descriptor(record: &PaymentRecord) -> String {
    if let Some(path) = non_blank(record.receipt_path.as_deref()) {
        return path.to_string();
    }
    match non_blank(record.receipt_number.as_deref()) {
        Some(number) => format!("Receipt #{}", number),
        None => formatter::NO_RECEIPT.to_string(),
    }
}
