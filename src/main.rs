use actix_web::{web, App, HttpServer};
use clap::Parser;
use std::time::Duration;
use salon_chat::api::{page::PageRenderer, session::SessionStore};
use salon_chat::chat::{Dispatcher, SalonInfo};
use salon_chat::cli::{commands::{Cli, Commands}, run_repl};
use salon_chat::config::AppConfig;
use salon_chat::error::StartupError;
use salon_chat::llm::{models::ChatOptions, ProviderFactory};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn build_dispatcher(config: &AppConfig) -> Result<Dispatcher, StartupError> {
    let salon_info = SalonInfo::load(&config.salon.info_path)?;
    let llm_provider = ProviderFactory::create_default(config)?;

    Ok(Dispatcher::new(llm_provider, salon_info)
        .with_system_prompt(config.llm.system_prompt.clone())
        .with_options(ChatOptions {
            model: Some(config.llm.model.clone()),
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
        }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match AppConfig::load(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let dispatcher = match build_dispatcher(&config) {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to start: {}", e);
            std::process::exit(1);
        }
    };

    if let Commands::Chat = cli.command {
        return run_repl(&dispatcher).await;
    }

    info!("Starting Amber Salon chat server...");

    let renderer = match PageRenderer::new() {
        Ok(r) => web::Data::new(r),
        Err(e) => {
            error!("Failed to start: {}", StartupError::from(e));
            std::process::exit(1);
        }
    };
    let dispatcher = web::Data::new(dispatcher);
    let sessions = web::Data::new(SessionStore::with_idle_timeout(Duration::from_secs(
        config.server.session_idle_secs,
    )));

    let host = config.server.host.clone();
    let port = config.server.port;

    info!("Server listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(dispatcher.clone())
            .app_data(sessions.clone())
            .app_data(renderer.clone())
            .configure(salon_chat::api::routes::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
