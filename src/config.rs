use crate::actions::DEFAULT_TOKEN_TTL_SECS;
use crate::error::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub tokens: TokenConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct TokenConfig {
    /// HMAC secret for signing access tokens
    pub secret: String,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the action server
    #[serde(default = "default_action_url")]
    pub action_url: String,
    /// Viewport width used when printing layouts
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            action_url: default_action_url(),
            viewport_width: default_viewport_width(),
        }
    }
}

fn default_ttl_secs() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

fn default_action_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_viewport_width() -> u32 {
    1280
}

impl Config {
    /// Load `path` (any format the config crate knows, extension optional)
    /// with `MEET_` environment overrides, e.g. `MEET_TOKENS__SECRET`.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("MEET").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.service.http.bind, self.service.http.port)
    }
}
