use clap::Parser;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

mod api;
mod cli;
mod controller;
mod core;
mod models;
mod presentation;
mod suggest;

use crate::cli::handlers::SuggestOptions;
use crate::cli::{Args, CliCommand};
use crate::core::config::Config;
use crate::suggest::{ChatCompletionsProvider, SuggestionService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    if Path::new(".env").exists() {
        dotenvy::dotenv().ok();
    }

    let args = Args::parse();
    let mut config = Config::load();
    args.apply(&mut config);

    let command = args.command.unwrap_or(CliCommand::Interactive);

    // The interactive form owns the terminal, so its logs go to a file
    let mut logger = env_logger::Builder::new();
    logger
        .filter_level(config.log_level)
        .format_timestamp_secs()
        .format_module_path(true);
    if matches!(command, CliCommand::Interactive) {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        logger.target(env_logger::Target::Pipe(Box::new(log_file)));
    }
    logger.init();

    for warning in &config.warnings {
        log::warn!("{}", warning);
    }

    log::info!("🔒 Starting Aegis Pass (model: {})", config.model_name);
    log::debug!("Loaded config: model={}, base_url={}", config.model_name, config.model_api_base_url);

    let provider = ChatCompletionsProvider::from_config(&config)?;
    let service = Arc::new(SuggestionService::new(Arc::new(provider))?);

    match command {
        CliCommand::Serve { .. } => {
            log::info!("🔒 API-only mode active. CLI interface disabled.");
            api::start_server(service, &config.web_address, config.web_port).await?;
        }
        CliCommand::Suggest { length, complexity, keywords, copy, json } => {
            let options = SuggestOptions { length, complexity, keywords, copy, json };
            cli::handlers::handle_suggest(&service, &config, options).await?;
        }
        CliCommand::Interactive => {
            cli::menu::run_cli_menu(&service, &config).await?;
        }
    }

    log::info!("✅ Aegis Pass shutdown complete.");
    Ok(())
}
