//! The trading agent
//!
//! # Lifecycle
//!
//! ```text
//!  Reconciling ──► Sampling ──► Ordering ──► Cancelling ─┐
//!   (once)            ▲                                  │
//!                     └──────────────────────────────────┘
//!                  any suspension point ──► ShuttingDown
//! ```
//!
//! - Reconciling: cancel every open order whose client id starts with our
//!   prefix. Failure stops the agent before it trades.
//! - Sampling: every tick, fetch the last price. Failure skips the tick.
//! - Ordering: size a post-only buy below market and place it. Failure stops
//!   the agent.
//! - Cancelling: after the order lifetime, cancel what was placed. Failure
//!   stops the agent.
//!
//! The shutdown token is raced against both sleeps and re-checked before any
//! new exchange call, so once it fires no further requests are started.

pub mod sizing;

use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::common::errors::Result;
use crate::common::traits::{ExchangeClient, IdGenerator};
use crate::common::types::{LimitOrder, Side};
use crate::config::types::AgentConfig;
use crate::generator::UuidGenerator;
use crate::trading::Pair;

pub use sizing::{size_order, OrderSizing, SizingPolicy};

/// Trading loop parameters
#[derive(Debug, Clone, PartialEq)]
pub struct AgentSettings {
    pub pair: Pair,
    pub client_id_prefix: String,
    /// Sleep before each price sample
    pub tick_interval: Duration,
    /// How long a placed order is left open before it is cancelled
    pub order_lifetime: Duration,
    pub sizing: SizingPolicy,
}

impl Default for AgentSettings {
    fn default() -> Self {
        let config = AgentConfig::default();
        Self {
            pair: config.pair,
            client_id_prefix: config.client_id_prefix.clone(),
            tick_interval: config.tick_interval(),
            order_lifetime: config.order_lifetime(),
            sizing: SizingPolicy::default(),
        }
    }
}

impl TryFrom<&AgentConfig> for AgentSettings {
    type Error = crate::common::errors::ClientError;

    fn try_from(config: &AgentConfig) -> Result<Self> {
        Ok(Self {
            pair: config.pair,
            client_id_prefix: config.client_id_prefix.clone(),
            tick_interval: config.tick_interval(),
            order_lifetime: config.order_lifetime(),
            sizing: SizingPolicy::new(config.committed_fraction, config.price_discount)?,
        })
    }
}

/// What a single tick ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickOutcome {
    /// Order placed and cancelled
    Completed,
    /// Nothing worth placing this tick
    Skipped,
    /// Shutdown was requested mid-tick
    ShutDown,
}

/// Samples a price, places one short-lived limit buy per tick and cancels it
pub struct Agent {
    exchange: Arc<dyn ExchangeClient>,
    id_generator: Arc<dyn IdGenerator>,
    settings: AgentSettings,
}

impl Agent {
    /// Create an agent trading BTC/USD with default settings
    pub fn new(exchange: Arc<dyn ExchangeClient>) -> Self {
        Self {
            exchange,
            id_generator: Arc::new(UuidGenerator),
            settings: AgentSettings::default(),
        }
    }

    /// Replace the trading loop parameters
    pub fn with_settings(mut self, settings: AgentSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the client id generator, for tests or for exchanges that
    /// restrict the id format
    pub fn with_id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// Run until `shutdown` fires or a fatal error occurs
    ///
    /// Failures are reported through logs only.
    pub async fn start(&self, shutdown: CancellationToken) {
        let pair = self.settings.pair;
        info!(
            exchange = self.exchange.name(),
            pair = %pair,
            prefix = %self.settings.client_id_prefix,
            "agent starting"
        );

        if let Err(e) = self.clear_old_orders().await {
            error!(error = %e, kind = e.kind(), "could not clear old orders");
            return;
        }

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = sleep(self.settings.tick_interval) => {}
            }

            let price = match self.exchange.get_last_price(pair).await {
                Ok(price) => price,
                Err(e) => {
                    error!(pair = %pair, error = %e, kind = e.kind(), "failed to get price");
                    continue;
                }
            };

            info!(pair = %pair, price = %price, "last price");

            match self.create_and_clear_order(&price, &shutdown).await {
                Ok(TickOutcome::ShutDown) => break,
                Ok(TickOutcome::Completed) | Ok(TickOutcome::Skipped) => {}
                Err(e) => {
                    error!(
                        pair = %pair,
                        price = %price,
                        error = %e,
                        kind = e.kind(),
                        "failed to create and clear order, stopping"
                    );
                    return;
                }
            }
        }

        info!("agent shutting down");
    }

    /// Cancel open orders left behind by an earlier run
    async fn clear_old_orders(&self) -> Result<()> {
        info!("clearing old orders");

        let prefix = &self.settings.client_id_prefix;
        let stale: Vec<String> = self
            .exchange
            .list_open_orders()
            .await?
            .into_iter()
            .filter(|order| order.client_id.starts_with(prefix.as_str()))
            .map(|order| order.id)
            .collect();

        if stale.is_empty() {
            info!("no old orders to clear");
            return Ok(());
        }

        self.exchange.cancel_orders(&stale).await?;
        info!(count = stale.len(), "orders cleared");

        Ok(())
    }

    async fn create_and_clear_order(
        &self,
        price: &str,
        shutdown: &CancellationToken,
    ) -> Result<TickOutcome> {
        if shutdown.is_cancelled() {
            return Ok(TickOutcome::ShutDown);
        }

        let pair = self.settings.pair;
        debug!("loading balance");
        let balance = self.exchange.get_balance(pair.quote).await?;

        let sizing = size_order(pair, balance, price, &self.settings.sizing)?;
        debug!(
            quote_amount = sizing.quote_amount,
            target_price = sizing.target_price,
            base_size = sizing.base_size,
            "sized order"
        );

        if sizing.base_size <= 0 {
            warn!(balance, price = %price, "order size truncates to zero, skipping");
            return Ok(TickOutcome::Skipped);
        }

        let order = LimitOrder {
            client_id: self
                .id_generator
                .generate_id(&self.settings.client_id_prefix),
            pair,
            side: Side::Buy,
            base_size: pair.base.format(sizing.base_size),
            price: pair.quote.format(sizing.target_price),
            post_only: true,
            expires: None,
        };

        if shutdown.is_cancelled() {
            return Ok(TickOutcome::ShutDown);
        }

        info!(order = ?order, "creating order");
        let placed = self.exchange.create_limit_order(&order).await?;
        info!(exchange_order = ?placed, "order created");

        tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                info!(order_id = %placed.id, "shutdown before order lifetime elapsed, order left open");
                return Ok(TickOutcome::ShutDown);
            }
            _ = sleep(self.settings.order_lifetime) => {}
        }

        self.exchange
            .cancel_orders(std::slice::from_ref(&placed.id))
            .await?;
        debug!(order_id = %placed.id, "order cancelled");

        Ok(TickOutcome::Completed)
    }
}
