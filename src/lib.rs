//! # Finrec - Financial Records export
//!
//! Turns membership-payment records into a styled Excel workbook with a
//! `Financial Records` detail sheet and a `Summary` sheet.
//!
//! ## Features
//!
//! - **Paid-only Export**: Only records whose status is `paid` are reported
//! - **Display Formatting**: Currency amounts, civil-zone dates, placeholders for missing data
//! - **Summary Metrics**: Member count, per-semester counts and total collected
//! - **Styled Output**: Header, monetary, centered and link-like cell styles
//!
//! ## Usage
//!
//! ```rust,no_run
//! use finrec::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod libs;
