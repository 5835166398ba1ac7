//! CLI argument definitions using clap.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// RiRs Gateway - route chat and web search through one endpoint
#[derive(Parser, Debug)]
#[command(name = "rirs")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Gateway server URL
    #[arg(
        short = 'u',
        long,
        env = "GATEWAY_URL",
        default_value = "http://localhost:8080",
        global = true
    )]
    pub url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a message or a web search through the gateway
    Chat(commands::chat::ChatArgs),

    /// Check gateway health
    Health(commands::health::HealthArgs),
}

impl Cli {
    /// Execute the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Chat(args) => commands::chat::execute(args, &self.url, self.json).await,
            Commands::Health(args) => commands::health::execute(args, &self.url, self.json).await,
        }
    }
}
