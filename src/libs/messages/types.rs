/// Every message the application shows to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === EXPORT MESSAGES ===
    ExportStarted(usize),           // record count
    ExportCompleted(usize, String), // row count, path
    NoPaidRecords,
    ExportFailed(String), // error message

    // === INPUT MESSAGES ===
    InputReadFailed(String, String),  // path, error message
    InputParseFailed(String, String), // path, error message

    // === CONFIGURATION MESSAGES ===
    ConfigSaved(String), // path
    ConfigCurrency(String),
    ConfigTimeZone(String),
    ConfigOutputDir(String),

    // === PREVIEW ===
    SummaryHeader,
}
