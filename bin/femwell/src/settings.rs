//! Startup configuration: defaults, then `femwell.{toml,yaml,json}`, then `FEMWELL_*` env vars.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub bind_address: String,
    /// ONNX export of the classifier. Missing or unreadable aborts startup.
    pub model_path: PathBuf,
    /// TrueType font for the verdict label; without it a coloured badge is drawn.
    pub font_path: Option<PathBuf>,
    /// Served under `/static`.
    pub static_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub results_dir: PathBuf,
    /// Public path of `results_dir`.
    pub results_url: String,
    pub database_url: String,
    pub max_upload_bytes: usize,
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("bind_address", "127.0.0.1:8080")?
        .set_default("model_path", "bestmodel.onnx")?
        .set_default("static_dir", "static")?
        .set_default("upload_dir", "static/uploads")?
        .set_default("results_dir", "static/results")?
        .set_default("results_url", "/static/results")?
        .set_default("database_url", "sqlite:femwell.db")?
        .set_default("max_upload_bytes", 16_i64 * 1024 * 1024)
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        defaults()?
            .add_source(File::with_name("femwell").required(false))
            .add_source(Environment::with_prefix("FEMWELL"))
            .build()?
            .try_deserialize()
    }
}
