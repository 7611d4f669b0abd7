use config::{Config, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub speech: SpeechSettings,
    pub embedding: EmbeddingSettings,
    pub audio: AudioSettings,
    pub auth: AuthSettings,
    pub scratch: ScratchSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub calibration_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingSettings {
    pub model_path: String,
    pub dimension: usize,
    pub analysis_window_secs: u32,
    pub sample_rate: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioSettings {
    pub required_channels: u16,
    pub required_bits_per_sample: u16,
    pub min_sample_rate: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// Minimum cosine similarity for a voiceprint to be accepted. Tunable
    /// per deployment against a labeled acceptance/rejection dataset.
    pub accept_threshold: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScratchSettings {
    pub dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Layered load: `appsettings.{environment}.toml` first, then `APP_`
    /// prefixed environment variables (`APP_AUTH__ACCEPT_THRESHOLD`, ...).
    pub fn load(environment: Environment) -> Result<Self, config::ConfigError> {
        let configuration = Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(EnvironmentSource::with_prefix("APP").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}
