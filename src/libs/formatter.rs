//! Field formatting utilities for report display.
//!
//! This module provides the total (never failing, never panicking) formatting
//! helpers used when payment records are flattened into report rows and
//! summary metrics. Every helper accepts loosely shaped input and falls back
//! to a fixed placeholder instead of returning an error.
//!
//! ## Features
//!
//! - **Currency Formatting**: Fixed two-decimal amounts prefixed with a currency glyph
//! - **Placeholder Substitution**: Missing or blank values become `N/A`, `Unknown` or `-`
//! - **Label Cleanup**: Year labels lose their literal `year` token
//!
//! ## Format Specifications
//!
//! ### Amounts
//! - Always exactly two decimal digits
//! - No thousands separators
//! - Non-finite values are treated as `0.00`
//!
//! ### Examples
//! - `1500` with glyph `₱` → `"₱1500.00"`
//! - `99.999` → `"₱100.00"`
//! - missing → `"₱0.00"`
//!
//! ## Examples
//!
//! ```rust
//! use finrec::libs::formatter::{format_currency, strip_year_token};
//!
//! assert_eq!(format_currency("₱", 1500.0), "₱1500.00");
//! assert_eq!(strip_year_token("3rd Year"), "3rd");
//! ```

/// Placeholder for a missing member name.
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for missing descriptive fields (year, block, period, method).
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for missing reference numbers and payment dates.
pub const DASH: &str = "-";

/// Label used when a record carries neither a receipt path nor a receipt number.
pub const NO_RECEIPT: &str = "No receipt";

/// Formats a monetary value with a currency glyph and exactly two decimals.
///
/// Non-finite values (NaN, infinities) are rendered as zero so a single
/// malformed amount can never leak `NaN` into the spreadsheet.
///
/// # Arguments
///
/// * `symbol` - Currency glyph placed directly before the number
/// * `value` - Amount to format
///
/// # Returns
///
/// A string such as `"₱1500.00"`.
pub fn format_currency(symbol: &str, value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    // Avoid "-0.00" for tiny negative rounding residue
    let rounded = (value * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}{:.2}", symbol, rounded)
}

/// Removes every ASCII-case-insensitive occurrence of `year` from a label.
///
/// Surrounding whitespace is trimmed and inner runs of whitespace left behind
/// by the removal are collapsed, so `"3rd Year"` becomes `"3rd"` and
/// `"Year 2"` becomes `"2"`.
pub fn strip_year_token(label: &str) -> String {
    const TOKEN: &[u8] = b"year";

    let bytes = label.as_bytes();
    let mut kept = String::with_capacity(label.len());
    let mut start = 0;
    let mut i = 0;

    while i + TOKEN.len() <= bytes.len() {
        if bytes[i..i + TOKEN.len()].eq_ignore_ascii_case(TOKEN) {
            // The token is pure ASCII, so both ends are char boundaries
            kept.push_str(&label[start..i]);
            i += TOKEN.len();
            start = i;
        } else {
            i += 1;
        }
    }
    kept.push_str(&label[start..]);

    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the trimmed value, or `None` when it is absent or blank.
///
/// Blank strings are treated exactly like missing values throughout the
/// report so that `""` never shows up in a cell where a placeholder belongs.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Returns the non-blank value or the given placeholder.
pub fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    non_blank(value).unwrap_or(placeholder).to_string()
}
