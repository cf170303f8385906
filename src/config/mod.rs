//! Application configuration

pub mod loader;
pub mod types;

pub use loader::load_config;
pub use types::{
    AgentConfig, ApiCredentials, AppConfig, AppSettings, BinanceConfig, BinanceDomain,
    CoinbaseConfig, ExchangeConfig, ExchangeKind,
};
