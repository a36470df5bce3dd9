//! Core library modules for finrec.
//!
//! ## Pipeline
//!
//! - **record**: payment record model and the paid-status filter
//! - **row**: flattening of records into display rows
//! - **summary**: aggregate metrics over the paid set
//! - **workbook**: engine-free two-sheet workbook model
//! - **style**: presentation rules and the style pass
//! - **export**: orchestration, spreadsheet engine and artifact delivery
//!
//! ## Support
//!
//! - **civil_time**: fixed-zone date formatting
//! - **formatter**: currency and placeholder helpers
//! - **config** / **data_storage**: persisted settings
//! - **messages** / **view**: console output
//!
//! ## Usage
//!
//! ```rust,no_run
//! use finrec::libs::{config::Config, export::{DirectorySink, Exporter, XlsxEngineLoader}};
//!
//! # async fn run(records: Vec<finrec::libs::record::PaymentRecord>) -> anyhow::Result<()> {
//! let config = Config::read()?;
//! let exporter = Exporter::new(&config, XlsxEngineLoader, DirectorySink::new(config.output_dir()));
//! exporter.export(&records, &chrono::Local::now()).await?;
//! # Ok(())
//! # }
//! ```

pub mod civil_time;
pub mod config;
pub mod data_storage;
pub mod export;
pub mod formatter;
pub mod messages;
pub mod record;
pub mod row;
pub mod style;
pub mod summary;
pub mod view;
pub mod workbook;
