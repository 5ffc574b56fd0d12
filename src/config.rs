use crate::error::AppError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Runtime settings. Sources, lowest priority first:
/// built-in defaults, `config.toml`, `ADDRBOOK_*` environment variables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://db.sqlite3".to_string(),
            listen_addr: "127.0.0.1:5000".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("ADDRBOOK_"))
    }

    pub fn load() -> Result<Self, AppError> {
        Ok(Self::figment().extract()?)
    }
}
