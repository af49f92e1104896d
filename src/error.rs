use std::path::PathBuf;
use thiserror::Error;

/// Anything that stops the process before it can serve a single interaction.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("configuration does not contain a GROQ_API_KEY")]
    MissingApiKey,
    #[error("failed to read salon info from {}: {source}", path.display())]
    SalonInfo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to initialise completion client: {0}")]
    Provider(#[from] crate::llm::LlmError),
    #[error("failed to prepare page template: {0}")]
    Template(#[from] minijinja::Error),
}
