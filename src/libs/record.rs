//! Payment record model and eligibility filtering.
//!
//! Payment records arrive from the UI layer as loosely shaped JSON objects:
//! any field may be missing, amounts may be numbers or strings, and dates may
//! be strings or epoch milliseconds. This module models that input with
//! explicitly optional fields and exposes total accessors so that later
//! pipeline stages never have to deal with malformed data directly.
//!
//! ## Features
//!
//! - **Lenient Deserialization**: camelCase keys, numbers or strings where the UI mixes them
//! - **Total Accessors**: Amount and date coercion never fail
//! - **Eligibility Filter**: Case-insensitive `paid` status gate
//!
//! ## Usage
//!
//! ```rust
//! use finrec::libs::record::{filter_paid, PaymentRecord};
//!
//! let records: Vec<PaymentRecord> = serde_json::from_str(
//!     r#"[{"paymentStatus": "PAID", "amount": "150"}, {"paymentStatus": "pending"}]"#,
//! ).unwrap();
//!
//! let eligible = filter_paid(&records);
//! assert_eq!(eligible.len(), 1);
//! assert_eq!(eligible[0].amount_value(), 150.0);
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Status value (after lower-casing) that makes a record eligible for the report.
pub const PAID_STATUS: &str = "paid";

/// Member details attached to a payment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default)]
    pub full_name: Option<String>,
    /// Year level label, e.g. `"3rd Year"`. Numeric years are accepted as text.
    #[serde(default, deserialize_with = "text_or_number")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub block: Option<String>,
}

/// A monetary value as supplied by the caller.
///
/// The UI layer sends either a JSON number or a numeric string, so both are
/// kept verbatim and coerced only when the value is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
    /// Any other JSON value; coerces to zero.
    Other(serde_json::Value),
}

impl Amount {
    /// Coerces the amount to a finite `f64`, treating anything unparsable as zero.
    pub fn value(&self) -> f64 {
        let value = match self {
            Amount::Number(n) => *n,
            Amount::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Amount::Other(_) => 0.0,
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

/// A payment date as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentDate {
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    Text(String),
    Other(serde_json::Value),
}

impl PaymentDate {
    /// Resolves the date to an instant, or `None` when it cannot be interpreted.
    ///
    /// Accepted text forms, tried in order:
    /// - RFC 3339 with offset (`2025-01-05T07:07:00Z`, `...+08:00`)
    /// - naive ISO date-time, taken as UTC (`2025-01-05T07:07:00`, `2025-01-05 07:07:00`)
    ///   with or without seconds (`2025-01-05T07:07`, `2025-01-05 07:07`)
    /// - plain date, taken as UTC midnight (`2025-01-05`)
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            PaymentDate::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms),
            PaymentDate::Text(raw) => {
                let raw = raw.trim();
                if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
                    return Some(dt.with_timezone(&Utc));
                }
                for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
                    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
                        return Some(naive.and_utc());
                    }
                }
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
            }
            PaymentDate::Other(_) => None,
        }
    }
}

/// One membership payment as supplied by the caller.
///
/// All fields are optional; placeholder substitution happens in the row
/// mapper, never here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub user: Option<Member>,
    /// Semester or period label, e.g. `"1st Semester"`.
    #[serde(default)]
    pub requirement: Option<String>,
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub receipt_number: Option<String>,
    #[serde(default)]
    pub receipt_path: Option<String>,
    #[serde(default)]
    pub payment_date: Option<PaymentDate>,
}

impl PaymentRecord {
    /// Whether the record's status, lower-cased, is exactly `paid`.
    pub fn is_paid(&self) -> bool {
        self.payment_status
            .as_deref()
            .is_some_and(|status| status.to_lowercase() == PAID_STATUS)
    }

    /// The amount coerced to `f64`; missing or invalid amounts count as zero.
    pub fn amount_value(&self) -> f64 {
        self.amount.as_ref().map_or(0.0, Amount::value)
    }

    /// The payment instant, if present and parsable.
    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        self.payment_date.as_ref().and_then(PaymentDate::instant)
    }

    pub fn full_name(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.full_name.as_deref())
    }

    pub fn year(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.year.as_deref())
    }

    pub fn block(&self) -> Option<&str> {
        self.user.as_ref().and_then(|u| u.block.as_deref())
    }
}

/// Selects the records eligible for the report, preserving input order.
///
/// Records without a status are silently excluded.
pub fn filter_paid(records: &[PaymentRecord]) -> Vec<&PaymentRecord> {
    records.iter().filter(|record| record.is_paid()).collect()
}

/// Accepts a JSON string or number (and `null`) for a text field.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(serde_json::Number),
        Other(serde_json::Value),
    }

    Ok(Option::<Loose>::deserialize(deserializer)?.and_then(|value| match value {
        Loose::Text(s) => Some(s),
        Loose::Number(n) => Some(n.to_string()),
        Loose::Other(_) => None,
    }))
}
