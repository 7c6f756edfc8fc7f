use crate::models::AllowedOrigins;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub hugging_face: HuggingFaceSettings,
    pub cors: CorsSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HuggingFaceSettings {
    pub api_token: String,
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HuggingFaceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Comma-separated origin list, as found in `ALLOWED_ORIGINS`
    #[serde(default)]
    pub allowed_origins: String,
}

impl CorsSettings {
    pub fn allowed_origins(&self) -> AllowedOrigins {
        AllowedOrigins::parse(&self.allowed_origins)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_timeout_secs() -> u64 { 30 }
fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "pretty".to_string() }

/// Plain environment variables mapped onto config keys
const ENV_OVERRIDES: [(&str, &str); 3] = [
    ("HF_API_TOKEN", "hugging_face.api_token"),
    ("HF_API_URL", "hugging_face.api_url"),
    ("ALLOWED_ORIGINS", "cors.allowed_origins"),
];

impl Settings {
    /// Load configuration from files and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration files (config/default, config/local)
    /// 3. Environment variables prefixed with RELAY_, e.g. RELAY__SERVER__PORT -> server.port
    /// 4. HF_API_TOKEN, HF_API_URL and ALLOWED_ORIGINS
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(relay_environment());

        Self::from_builder(builder, |key| std::env::var(key).ok())
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(relay_environment());

        Self::from_builder(builder, |key| std::env::var(key).ok())
    }

    /// Finish a builder: apply defaults and well-known env overrides, then validate
    ///
    /// `lookup` resolves plain environment variable names.
    pub fn from_builder<F>(builder: ConfigBuilder<DefaultState>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("hugging_face.timeout_secs", default_timeout_secs() as i64)?
            .set_default("cors.allowed_origins", "")?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.format", default_log_format())?;

        for (var, key) in ENV_OVERRIDES {
            if let Some(value) = lookup(var) {
                builder = builder.set_override(key, value)?;
            }
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.hugging_face.api_token.trim().is_empty() {
            return Err(ConfigError::Message("HF_API_TOKEN must not be empty".into()));
        }
        if let Err(e) = reqwest::Url::parse(&self.hugging_face.api_url) {
            return Err(ConfigError::Message(format!(
                "HF_API_URL is not a valid URL ({}): {}",
                self.hugging_face.api_url, e
            )));
        }
        if self.hugging_face.timeout_secs == 0 {
            return Err(ConfigError::Message("hugging_face.timeout_secs must be positive".into()));
        }
        // CORS only accepts concrete origins
        for origin in self.cors.allowed_origins().iter() {
            if origin == "*" || origin.parse::<actix_web::http::Uri>().is_err() {
                return Err(ConfigError::Message(format!(
                    "ALLOWED_ORIGINS contains an invalid origin: {}",
                    origin
                )));
            }
        }
        Ok(())
    }
}

fn relay_environment() -> Environment {
    Environment::with_prefix("RELAY")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
