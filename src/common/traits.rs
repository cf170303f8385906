//! Trait definitions for exchange clients and injected capabilities

use async_trait::async_trait;

use super::errors::Result;
use super::types::{ExchangeOrder, LimitOrder};
use crate::trading::{Asset, Pair};

/// Trait for exchange clients (simulated, Coinbase, Binance, etc.)
///
/// Every backend exposes the same observable behavior: unmapped pairs and
/// assets fail with `UnsupportedPair`/`UnsupportedAsset`, network and decode
/// failures surface as transport errors, and cancellation of an order that
/// is already gone is not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Most recent traded or quoted price for the pair, as a decimal string
    async fn get_last_price(&self, pair: Pair) -> Result<String>;

    /// Available balance of the asset in smallest units
    async fn get_balance(&self, asset: Asset) -> Result<i64>;

    /// Submit a limit order
    ///
    /// The returned record carries the order's `client_id` forward.
    async fn create_limit_order(&self, order: &LimitOrder) -> Result<ExchangeOrder>;

    /// All currently open orders, regardless of who placed them
    async fn list_open_orders(&self) -> Result<Vec<ExchangeOrder>>;

    /// Cancel orders by exchange id
    ///
    /// Ids that are already filled or cancelled are ignored.
    async fn cancel_orders(&self, order_ids: &[String]) -> Result<()>;

    /// Name of the exchange, for logging
    fn name(&self) -> &'static str;
}

/// Produces unique client order identifiers
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    /// Return a fresh id of the form `{prefix}:{unique}`
    fn generate_id(&self, prefix: &str) -> String;
}
