use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::StartupError;
use crate::llm::groq::{DEFAULT_API_BASE, DEFAULT_MODEL};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant at a salon.";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Sessions untouched for this long are dropped.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Left to the endpoint's default when unset.
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            system_prompt: default_system_prompt(),
            temperature: None,
            max_tokens: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SalonConfig {
    /// Relative paths resolve against the directory holding the config file.
    #[serde(default = "default_info_path")]
    pub info_path: PathBuf,
}

impl Default for SalonConfig {
    fn default() -> Self {
        Self { info_path: default_info_path() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(rename = "GROQ_API_KEY", alias = "groq_api_key")]
    pub groq_api_key: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub salon: SalonConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StartupError> {
        dotenv::dotenv().ok();

        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .add_source(config::Environment::with_prefix("SALON").separator("__"))
            .build()?;

        let mut app_config: AppConfig = settings.try_deserialize()?;

        // Expand environment variables if present like ${GROQ_API_KEY}
        app_config.groq_api_key = expand_env(&app_config.groq_api_key);
        app_config.server.host = expand_env(&app_config.server.host);
        app_config.llm.api_base = expand_env(&app_config.llm.api_base);

        if app_config.groq_api_key.trim().is_empty() {
            return Err(StartupError::MissingApiKey);
        }

        if app_config.salon.info_path.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            app_config.salon.info_path = base.join(&app_config.salon.info_path);
        }

        Ok(app_config)
    }
}

fn expand_env(val: &str) -> String {
    match val.strip_prefix("${").and_then(|rest| rest.strip_suffix('}')) {
        Some(var_name) => std::env::var(var_name).unwrap_or_default(),
        None => val.to_string(),
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_session_idle_secs() -> u64 {
    60 * 60
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_info_path() -> PathBuf {
    PathBuf::from("salon_info.txt")
}
