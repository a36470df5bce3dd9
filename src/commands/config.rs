//! Configuration display and initialization command.
//!
//! Prints the effective settings (file values merged over defaults). With
//! `--init` the effective settings are written back to `config.json` so they
//! can be edited by hand.

use crate::{
    libs::{config::Config, messages::Message},
    msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;

/// Command-line arguments for the config command.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Write the effective configuration to the config file
    #[arg(long)]
    init: bool,
}

/// Executes the config command.
///
/// # Arguments
///
/// * `args` - Parsed command-line arguments
///
/// # Returns
///
/// Returns `Ok(())` once the settings were printed (and saved with `--init`),
/// or an error if the configuration cannot be read or written.
pub fn cmd(args: ConfigArgs) -> Result<()> {
    let config = Config::read()?;

    msg_print!(Message::ConfigCurrency(config.currency_symbol.clone()));
    msg_print!(Message::ConfigTimeZone(config.time_zone.to_string()));
    msg_print!(Message::ConfigOutputDir(config.output_dir().display().to_string()));

    if args.init {
        let path = config.save()?;
        msg_success!(Message::ConfigSaved(path.display().to_string()));
    }
    Ok(())
}
