use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod commands;

use commands::serve;

#[derive(Parser)]
#[command(name = "stayease")]
#[command(about = "StayEase apartment-rental backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Address to bind the HTTP listener to
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:5000")]
        bind_address: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { bind_address } => {
                serve(&bind_address).await?;
            }
        }
        Ok(())
    }
}
