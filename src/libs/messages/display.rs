//! Display text for [`Message`].

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let s = match self {
            // === EXPORT MESSAGES ===
            Message::ExportStarted(count) => format!("Exporting financial records from {} payment record(s)...", count),
            Message::ExportCompleted(rows, path) => format!("Exported {} paid record(s) to {}", rows, path),
            Message::NoPaidRecords => "No paid records to export".to_string(),
            Message::ExportFailed(e) => format!("Export failed: {}", e),

            // === INPUT MESSAGES ===
            Message::InputReadFailed(path, e) => format!("Failed to read input file '{}': {}", path, e),
            Message::InputParseFailed(path, e) => format!("Input file '{}' is not a JSON array of payment records: {}", path, e),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::ConfigCurrency(symbol) => format!("Currency symbol: {}", symbol),
            Message::ConfigTimeZone(zone) => format!("Civil time zone: {}", zone),
            Message::ConfigOutputDir(dir) => format!("Output directory: {}", dir),

            // === PREVIEW ===
            Message::SummaryHeader => "Summary".to_string(),
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_paid_records_notice() {
        assert_eq!(Message::NoPaidRecords.to_string(), "No paid records to export");
    }

    #[test]
    fn export_completed_mentions_path() {
        let text = Message::ExportCompleted(3, "out/Financial_Records_2025-01-05.xlsx".into()).to_string();
        assert!(text.contains("3 paid record(s)"));
        assert!(text.ends_with("Financial_Records_2025-01-05.xlsx"));
    }
}
