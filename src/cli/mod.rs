// src/cli/mod.rs
use clap::Parser;

use crate::core::config::Config;

pub mod commands;
pub mod menu;
pub mod handlers;

pub use commands::CliCommand;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate secure and memorable passwords with AI", long_about = None)]
pub struct Args {
    /// Base URL of an OpenAI-compatible model API
    #[arg(long, env = "MODEL_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Model used for suggestions
    #[arg(long, env = "MODEL_NAME")]
    pub model: Option<String>,

    /// Command to execute (defaults to the interactive form)
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl Args {
    /// Command line flags win over environment and defaults.
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.api_base_url {
            config.model_api_base_url = url.clone();
        }
        if let Some(model) = &self.model {
            config.model_name = model.clone();
        }
        if let Some(CliCommand::Serve { port, address }) = &self.command {
            if let Some(port) = port {
                config.web_port = *port;
            }
            if let Some(address) = address {
                config.web_address = address.clone();
            }
        }
    }
}
