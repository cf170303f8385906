//! In-process exchange used for dry runs and tests

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::common::errors::{ClientError, Result};
use crate::common::traits::ExchangeClient;
use crate::common::types::{ExchangeOrder, LimitOrder};
use crate::trading::{Asset, Pair};

/// Exchange that quotes fixed prices, holds fixed balances and keeps an
/// in-memory book of open orders. Orders never fill.
pub struct SimulatedExchange {
    prices: HashMap<Pair, String>,
    balances: HashMap<Asset, i64>,
    open_orders: RwLock<BTreeMap<String, ExchangeOrder>>,
}

impl SimulatedExchange {
    /// Exchange seeded with BTC/USD and ETH/USD quotes and a small wallet
    pub fn new() -> Self {
        let prices = [
            (Pair::BTC_USD, "17000.00".to_string()),
            (Pair::ETH_USD, "5000".to_string()),
        ];
        let balances = [
            (Asset::Usd, Asset::Usd.unit(50.0)),
            (Asset::Btc, Asset::Btc.unit(0.00001)),
            (Asset::Eth, Asset::Eth.unit(0.05)),
        ];

        Self::with_market(prices, balances)
    }

    /// Exchange with the given quotes and balances; anything else is unsupported
    pub fn with_market(
        prices: impl IntoIterator<Item = (Pair, String)>,
        balances: impl IntoIterator<Item = (Asset, i64)>,
    ) -> Self {
        Self {
            prices: prices.into_iter().collect(),
            balances: balances.into_iter().collect(),
            open_orders: RwLock::new(BTreeMap::new()),
        }
    }

    /// Seed an order as if it had been placed earlier
    pub async fn insert_open_order(&self, order: ExchangeOrder) {
        self.open_orders.write().await.insert(order.id.clone(), order);
    }
}

impl Default for SimulatedExchange {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeClient for SimulatedExchange {
    #[instrument(skip(self))]
    async fn get_last_price(&self, pair: Pair) -> Result<String> {
        self.prices
            .get(&pair)
            .cloned()
            .ok_or(ClientError::UnsupportedPair(pair))
    }

    #[instrument(skip(self))]
    async fn get_balance(&self, asset: Asset) -> Result<i64> {
        self.balances
            .get(&asset)
            .copied()
            .ok_or(ClientError::UnsupportedAsset(asset))
    }

    #[instrument(skip(self), fields(client_id = %order.client_id))]
    async fn create_limit_order(&self, order: &LimitOrder) -> Result<ExchangeOrder> {
        if !self.prices.contains_key(&order.pair) {
            return Err(ClientError::UnsupportedPair(order.pair));
        }
        order.pair.base.unit_str(&order.base_size)?;
        order.pair.quote.unit_str(&order.price)?;

        let placed = ExchangeOrder::accepted(Uuid::new_v4().to_string(), order);
        self.open_orders
            .write()
            .await
            .insert(placed.id.clone(), placed.clone());
        debug!("Simulated order {} opened", placed.id);

        Ok(placed)
    }

    async fn list_open_orders(&self) -> Result<Vec<ExchangeOrder>> {
        Ok(self.open_orders.read().await.values().cloned().collect())
    }

    #[instrument(skip(self))]
    async fn cancel_orders(&self, order_ids: &[String]) -> Result<()> {
        let mut open_orders = self.open_orders.write().await;
        for id in order_ids {
            if open_orders.remove(id).is_none() {
                debug!("Order {} already closed", id);
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
