//! Crypto Trading Bot Library
//!
//! An agent that samples the last price of a trading pair, places a
//! short-lived post-only limit buy below market and cancels it, against
//! Coinbase, Binance or an in-process simulated exchange.

pub mod agent;
pub mod common;
pub mod config;
pub mod exchange;
pub mod generator;
pub mod trading;

// Re-export commonly used types
pub use agent::{Agent, AgentSettings, SizingPolicy};
pub use common::errors::{ClientError, Result};
pub use common::traits::{ExchangeClient, IdGenerator};
pub use common::types::{ExchangeOrder, LimitOrder, Side};
pub use config::types::AppConfig;
pub use exchange::{build_exchange, BinanceClient, CoinbaseClient, SimulatedExchange};
pub use generator::{CompactIdGenerator, UuidGenerator};
pub use trading::{Asset, Pair};
