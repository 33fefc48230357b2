use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub backend: BackendConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    pub enable_cors: bool,
    pub enable_tracing: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Backend account/agent identifier. Required; validated at startup.
    pub project_id: String,
    pub base_url: String,
    pub api_token: Option<Secret<String>>,
    pub default_language: String,
    pub audio: AudioConfig,
}

/// Fixed audio parameters for this deployment. Not negotiated per
/// request; a caller-configurable variant is a known limitation.
#[derive(Debug, Deserialize, Clone)]
pub struct AudioConfig {
    pub encoding: String,
    pub sample_rate_hertz: u32,
}

impl AppConfig {
    pub fn load() -> std::result::Result<Self, ConfigError> {
        let env = std::env::var("CONVOGATE_ENV").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("gateway.enable_cors", true)?
            .set_default("gateway.enable_tracing", true)?
            .set_default("backend.project_id", "")?
            .set_default("backend.base_url", "https://dialogflow.googleapis.com")?
            .set_default("backend.default_language", "en")?
            .set_default("backend.audio.encoding", "linear16")?
            .set_default("backend.audio.sample_rate_hertz", 16000)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Map APP__BACKEND__PROJECT_ID=my-agent to backend.project_id
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Startup-time validation. A missing project id is fatal before
    /// serving begins.
    pub fn validate(&self) -> Result<()> {
        if self.backend.project_id.is_empty() {
            return Err(Error::config(
                "backend project id not set (APP__BACKEND__PROJECT_ID)",
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
            },
            gateway: GatewayConfig {
                enable_cors: true,
                enable_tracing: true,
            },
            backend: BackendConfig {
                project_id: String::new(),
                base_url: "https://dialogflow.googleapis.com".into(),
                api_token: None,
                default_language: "en".into(),
                audio: AudioConfig {
                    encoding: "linear16".into(),
                    sample_rate_hertz: 16000,
                },
            },
        }
    }
}
