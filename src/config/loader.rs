//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::{ClientError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Exchange credential variables (`COINBASE_API_KEY`, `BINANCE_API_SECRET`, ...)
/// 2. Environment variables prefixed with `APP__` (e.g. `APP__AGENT__PAIR=ETH/USD`)
/// 3. Configuration file (TOML format)
/// 4. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    let mut app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    apply_credential_env(&mut app_config, |key| std::env::var(key).ok());

    Ok(app_config)
}

/// Overlay exchange credentials from the conventional variable names
fn apply_credential_env(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let coinbase = &mut config.exchange.coinbase;
    if let Some(key) = lookup("COINBASE_API_KEY") {
        coinbase.api_key = Some(key);
    }
    if let Some(secret) = lookup("COINBASE_API_SECRET") {
        coinbase.api_secret = Some(secret);
    }

    let binance = &mut config.exchange.binance;
    if let Some(key) = lookup("BINANCE_API_KEY") {
        binance.api_key = Some(key);
    }
    if let Some(secret) = lookup("BINANCE_API_SECRET") {
        binance.api_secret = Some(secret);
    }
}
