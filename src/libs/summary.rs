//! Summary metrics over the eligible payment set.
//!
//! The aggregator makes a single pass over the same eligible slice the row
//! mapper consumes, so the summary sheet can never disagree with the detail
//! sheet about which records were exported.
//!
//! ## Period Counts
//!
//! First- and second-period counts are independent substring matches on the
//! `requirement` label (`"1st"` / `"2nd"`, case-sensitive). They are not a
//! partition of the total: a label such as `"Membership Fee"` matches neither
//! and `"1st & 2nd Semester"` matches both. Labels following any other
//! convention (`"First Semester"`) are silently not counted.

use crate::libs::{civil_time::CivilTimeFormatter, formatter::format_currency, record::PaymentRecord};
use chrono::{DateTime, TimeZone};
use serde::Serialize;

/// Title shown as the first summary metric.
pub const REPORT_TITLE: &str = "Financial Records Report";

/// Substring identifying first-period requirements.
pub const FIRST_PERIOD_TOKEN: &str = "1st";

/// Substring identifying second-period requirements.
pub const SECOND_PERIOD_TOKEN: &str = "2nd";

/// Column titles of the summary worksheet.
pub const SUMMARY_HEADERS: [&str; 2] = ["Metric", "Value"];

/// Raw aggregates over the eligible set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub total_count: usize,
    pub first_period_count: usize,
    pub second_period_count: usize,
    pub total_amount: f64,
}

impl Summary {
    /// Aggregates the eligible records in one pass.
    pub fn from_records(eligible: &[&PaymentRecord]) -> Self {
        eligible.iter().fold(Summary::default(), |mut acc, record| {
            let period = record.requirement.as_deref().unwrap_or_default();
            acc.total_count += 1;
            if period.contains(FIRST_PERIOD_TOKEN) {
                acc.first_period_count += 1;
            }
            if period.contains(SECOND_PERIOD_TOKEN) {
                acc.second_period_count += 1;
            }
            acc.total_amount += record.amount_value();
            acc
        })
    }

    /// Renders the six summary metrics in their fixed display order.
    ///
    /// # Arguments
    ///
    /// * `exported_at` - Generation time, shown in the civil zone
    /// * `clock` - Civil time formatter
    /// * `currency_symbol` - Glyph used for the collected total
    pub fn metrics<Tz: TimeZone>(
        &self,
        exported_at: &DateTime<Tz>,
        clock: &CivilTimeFormatter,
        currency_symbol: &str,
    ) -> Vec<SummaryMetric> {
        vec![
            SummaryMetric::new("Report", REPORT_TITLE),
            SummaryMetric::new("Exported On", clock.format_civil_date_time(exported_at)),
            SummaryMetric::new("Total Paid Members", self.total_count.to_string()),
            SummaryMetric::new("1st Semester Payments", self.first_period_count.to_string()),
            SummaryMetric::new("2nd Semester Payments", self.second_period_count.to_string()),
            SummaryMetric::new("Total Amount Collected", format_currency(currency_symbol, self.total_amount)),
        ]
    }
}

/// One labelled aggregate destined for the summary worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryMetric {
    pub label: String,
    pub value: String,
}

impl SummaryMetric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}
