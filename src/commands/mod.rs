pub mod config;
pub mod export;

use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Export paid payment records to a Financial Records workbook")]
    Export(export::ExportArgs),
    #[command(about = "Show or initialize the configuration")]
    Config(config::ConfigArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> anyhow::Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Export(args) => export::cmd(args).await,
            Commands::Config(args) => config::cmd(args),
        }
    }
}
