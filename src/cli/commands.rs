use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser)]
#[command(name = "salon-chat", version, about = "Amber Salon chat widget", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Override the config file path globally
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the chat page over HTTP
    Serve,

    /// Chat from the terminal with the same quick replies
    Chat,
}
