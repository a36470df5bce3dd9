//! User-facing messages.
//!
//! All text shown to the user lives in one [`Message`] enum with a single
//! `Display` implementation; the `msg_*!` macros route it either to stdout /
//! stderr or, in debug mode, to `tracing`.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
