//! Configuration types

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::trading::Pair;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Which exchange to trade on and how to reach it
    #[serde(default)]
    pub exchange: ExchangeConfig,
    /// Trading loop parameters
    #[serde(default)]
    pub agent: AgentConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Exchange backend selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExchangeKind {
    /// In-process exchange with fixed prices and balances
    #[default]
    Simulated,
    Coinbase,
    Binance,
}

impl std::fmt::Display for ExchangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExchangeKind::Simulated => write!(f, "simulated"),
            ExchangeKind::Coinbase => write!(f, "coinbase"),
            ExchangeKind::Binance => write!(f, "binance"),
        }
    }
}

/// Exchange configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Backend to use
    #[serde(default)]
    pub kind: ExchangeKind,
    #[serde(default)]
    pub coinbase: CoinbaseConfig,
    #[serde(default)]
    pub binance: BinanceConfig,
}

/// Coinbase Advanced Trade configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinbaseConfig {
    /// API key for authenticated requests
    #[serde(default)]
    pub api_key: Option<String>,
    /// API secret for signing requests
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Base URL for the REST API
    #[serde(default = "default_coinbase_rest_url")]
    pub rest_url: String,
}

impl Default for CoinbaseConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            rest_url: default_coinbase_rest_url(),
        }
    }
}

fn default_coinbase_rest_url() -> String {
    "https://api.coinbase.com".to_string()
}

/// Which Binance deployment the bot talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinanceDomain {
    /// binance.us
    #[default]
    Us,
    /// binance.com
    Com,
}

impl BinanceDomain {
    pub fn base_url(&self) -> &'static str {
        match self {
            BinanceDomain::Us => "https://api.binance.us",
            BinanceDomain::Com => "https://api.binance.com",
        }
    }
}

/// Binance configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BinanceConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    #[serde(default)]
    pub domain: BinanceDomain,
    /// Overrides the domain's base URL
    #[serde(default)]
    pub rest_url: Option<String>,
}

impl BinanceConfig {
    pub fn base_url(&self) -> String {
        self.rest_url
            .clone()
            .unwrap_or_else(|| self.domain.base_url().to_string())
    }
}

/// Trading loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Market to trade
    #[serde(default = "default_pair")]
    pub pair: Pair,
    /// Prefix of every client order id the agent generates
    #[serde(default = "default_client_id_prefix")]
    pub client_id_prefix: String,
    /// Delay between price samples in milliseconds
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// How long a placed order may stay open in milliseconds
    #[serde(default = "default_order_lifetime")]
    pub order_lifetime_ms: u64,
    /// Share of the quote balance committed per order
    #[serde(default = "default_committed_fraction")]
    pub committed_fraction: Decimal,
    /// Multiplier applied to the sampled price to get the limit price
    #[serde(default = "default_price_discount")]
    pub price_discount: Decimal,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            pair: default_pair(),
            client_id_prefix: default_client_id_prefix(),
            tick_interval_ms: default_tick_interval(),
            order_lifetime_ms: default_order_lifetime(),
            committed_fraction: default_committed_fraction(),
            price_discount: default_price_discount(),
        }
    }
}

impl AgentConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn order_lifetime(&self) -> Duration {
        Duration::from_millis(self.order_lifetime_ms)
    }
}

fn default_pair() -> Pair {
    Pair::BTC_USD
}

fn default_client_id_prefix() -> String {
    "trading-bot".to_string()
}

fn default_tick_interval() -> u64 {
    1000
}

fn default_order_lifetime() -> u64 {
    200
}

fn default_committed_fraction() -> Decimal {
    dec!(0.1)
}

fn default_price_discount() -> Decimal {
    dec!(0.5)
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

impl AppSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// API credentials for authenticated requests
#[derive(Debug, Clone)]
pub struct ApiCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl ApiCredentials {
    pub fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
        }
    }
}
