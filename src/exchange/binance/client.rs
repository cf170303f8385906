//! REST client for the Binance spot API (binance.us and binance.com)

use async_trait::async_trait;
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};
use url::form_urlencoded;

use super::auth::sign_query;
use super::messages::*;
use crate::common::errors::{ClientError, Result};
use crate::common::traits::ExchangeClient;
use crate::common::types::{ExchangeOrder, LimitOrder};
use crate::config::types::{ApiCredentials, BinanceConfig};
use crate::exchange::check_status;
use crate::trading::{Asset, Pair};

/// Symbols for the pairs Binance trades
const SYMBOLS: [(Pair, &str); 4] = [
    (Pair::BTC_USD, "BTCUSD"),
    (Pair::ETH_USD, "ETHUSD"),
    (Pair::BTC_USDT, "BTCUSDT"),
    (Pair::ETH_USDT, "ETHUSDT"),
];

/// Milliseconds a signed request stays valid after its timestamp
const DEFAULT_RECV_WINDOW: u64 = 5000;

/// Either the decoded body or the error Binance returned with a 4xx
type Reply<T> = std::result::Result<T, ApiErrorResponse>;

/// REST client for Binance
#[derive(Debug, Clone)]
pub struct BinanceClient {
    /// HTTP client
    client: Client,
    /// Base URL for the domain in use
    base_url: String,
    /// API credentials for signed endpoints
    credentials: Option<ApiCredentials>,
    recv_window: u64,
}

impl BinanceClient {
    /// Create a new client from configuration
    pub fn new(config: &BinanceConfig) -> Result<Self> {
        Self::with_timeout(config, Duration::from_secs(30))
    }

    /// Create a new client with custom timeout
    pub fn with_timeout(config: &BinanceConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        let credentials = match (&config.api_key, &config.api_secret) {
            (Some(key), Some(secret)) => Some(ApiCredentials::new(key.clone(), secret.clone())),
            _ => None,
        };

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            credentials,
            recv_window: DEFAULT_RECV_WINDOW,
        })
    }

    /// Binance symbol for a pair
    pub fn symbol(pair: Pair) -> Result<&'static str> {
        SYMBOLS
            .iter()
            .find(|(p, _)| *p == pair)
            .map(|(_, symbol)| *symbol)
            .ok_or(ClientError::UnsupportedPair(pair))
    }

    /// Pair for a Binance symbol
    pub fn pair_for_symbol(symbol: &str) -> Result<Pair> {
        SYMBOLS
            .iter()
            .find(|(_, s)| *s == symbol)
            .map(|(pair, _)| *pair)
            .ok_or_else(|| ClientError::InvalidResponse(format!("Unknown symbol: {}", symbol)))
    }

    /// Binance asset code
    pub fn asset_code(asset: Asset) -> Result<&'static str> {
        match asset {
            Asset::Btc => Ok("BTC"),
            Asset::Eth => Ok("ETH"),
            Asset::Usd => Ok("USD"),
            Asset::Usdt => Ok("USDT"),
        }
    }

    /// Cancelling needs the symbol as well as the numeric id, so both are
    /// packed into the id handed out to callers.
    fn order_key(symbol: &str, order_id: u64) -> String {
        format!("{}:{}", symbol, order_id)
    }

    fn split_order_key(key: &str) -> Result<(&str, &str)> {
        key.split_once(':')
            .filter(|(symbol, id)| !symbol.is_empty() && id.parse::<u64>().is_ok())
            .ok_or_else(|| ClientError::Parse(format!("malformed Binance order id {:?}", key)))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<Reply<T>> {
        let status = response.status();

        if status == StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS {
            return Err(ClientError::DomainPrecondition(
                "the Binance domain does not match the location of the bot".to_string(),
            ));
        }

        if status.is_client_error() {
            let body = response.text().await?;
            return match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_error) => Ok(Err(api_error)),
                Err(_) => Err(ClientError::InvalidResponse(format!(
                    "Server returned status {}: {}",
                    status, body
                ))),
            };
        }

        let response = check_status(response).await?;
        let text = response.text().await?;
        Ok(Ok(serde_json::from_str(&text)?))
    }

    async fn public_get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Reply<T>> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url).query(query).send().await?;
        Self::decode(response).await
    }

    async fn signed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Reply<T>> {
        let credentials = self.credentials.as_ref().ok_or_else(|| {
            ClientError::Authentication("Binance API credentials not set".to_string())
        })?;

        // The serializer is not Send, so it must be gone before the request is awaited
        let query = {
            let mut query = form_urlencoded::Serializer::new(String::new());
            query.extend_pairs(params.iter().copied());
            query.append_pair("recvWindow", &self.recv_window.to_string());
            query.append_pair(
                "timestamp",
                &chrono::Utc::now().timestamp_millis().to_string(),
            );
            query.finish()
        };

        // The timestamp is part of the signed payload, so sign per request
        let signature = sign_query(&credentials.api_secret, &query)?;
        let url = format!("{}{}?{}&signature={}", self.base_url, path, query, signature);
        debug!("{} {}{}", method, self.base_url, path);

        let response = self
            .client
            .request(method, &url)
            .header("X-MBX-APIKEY", &credentials.api_key)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn cancel_one(&self, key: &str) -> Result<()> {
        let (symbol, order_id) = Self::split_order_key(key)?;

        let reply: Reply<serde_json::Value> = self
            .signed(
                Method::DELETE,
                "/api/v3/order",
                &[("symbol", symbol), ("orderId", order_id)],
            )
            .await?;

        match reply {
            Ok(_) => Ok(()),
            Err(api_error) if api_error.code == UNKNOWN_ORDER => {
                debug!("Order {} already closed", key);
                Ok(())
            }
            Err(api_error) => Err(api_error.into_rejection()),
        }
    }
}

#[async_trait]
impl ExchangeClient for BinanceClient {
    #[instrument(skip(self))]
    async fn get_last_price(&self, pair: Pair) -> Result<String> {
        let symbol = Self::symbol(pair)?;

        let ticker: TickerPriceResponse = self
            .public_get("/api/v3/ticker/price", &[("symbol", symbol)])
            .await?
            .map_err(ApiErrorResponse::into_client_error)?;
        Ok(ticker.price)
    }

    #[instrument(skip(self))]
    async fn get_balance(&self, asset: Asset) -> Result<i64> {
        let code = Self::asset_code(asset)?;

        let account: AccountResponse = self
            .signed(Method::GET, "/api/v3/account", &[])
            .await?
            .map_err(ApiErrorResponse::into_client_error)?;

        let balance = account
            .balances
            .into_iter()
            .find(|balance| balance.asset == code)
            .ok_or_else(|| ClientError::InvalidResponse(format!("No {} balance returned", code)))?;

        asset.unit_str(&balance.free)
    }

    #[instrument(skip(self), fields(client_id = %order.client_id))]
    async fn create_limit_order(&self, order: &LimitOrder) -> Result<ExchangeOrder> {
        let symbol = Self::symbol(order.pair)?;

        if order.expires.is_some() {
            return Err(ClientError::DomainPrecondition(
                "Binance spot orders cannot carry an expiry".to_string(),
            ));
        }

        let mut params = vec![
            ("symbol", symbol),
            ("side", order.side.as_str()),
            ("quantity", order.base_size.as_str()),
            ("price", order.price.as_str()),
            ("newClientOrderId", order.client_id.as_str()),
            ("newOrderRespType", "ACK"),
        ];
        if order.post_only {
            params.push(("type", "LIMIT_MAKER"));
        } else {
            params.push(("type", "LIMIT"));
            params.push(("timeInForce", "GTC"));
        }

        let placed: NewOrderResponse = self
            .signed(Method::POST, "/api/v3/order", &params)
            .await?
            .map_err(ApiErrorResponse::into_rejection)?;

        Ok(ExchangeOrder::accepted(
            Self::order_key(&placed.symbol, placed.order_id),
            order,
        ))
    }

    #[instrument(skip(self))]
    async fn list_open_orders(&self) -> Result<Vec<ExchangeOrder>> {
        let orders: Vec<OpenOrder> = self
            .signed(Method::GET, "/api/v3/openOrders", &[])
            .await?
            .map_err(ApiErrorResponse::into_client_error)?;

        // Unknown symbols fail the whole listing rather than being skipped
        orders
            .into_iter()
            .map(|order| {
                Ok(ExchangeOrder {
                    id: Self::order_key(&order.symbol, order.order_id),
                    pair: Self::pair_for_symbol(&order.symbol)?,
                    side: order.side.parse()?,
                    client_id: order.client_order_id,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    async fn cancel_orders(&self, order_ids: &[String]) -> Result<()> {
        // Binance has no cross-symbol batch cancel
        for key in order_ids {
            self.cancel_one(key).await?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "binance"
    }
}
