//! Runtime configuration.
//!
//! Merges an optional `greengrocer.toml` with `GREENGROCER_*` environment
//! variables (env wins). The storage path default lives here, not in the
//! store; `FileStore` always receives its directory explicitly.

use std::path::PathBuf;

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory holding the per-category JSON files.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,
    /// Address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Config {
    /// Load configuration from `greengrocer.toml` merged with
    /// `GREENGROCER_*` environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Toml::file("greengrocer.toml"))
            .merge(Env::prefixed("GREENGROCER_"))
            .extract()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            listen_addr: default_listen_addr(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    std::env::temp_dir().join("produces")
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}
