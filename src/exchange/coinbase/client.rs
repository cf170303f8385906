//! REST client for the Coinbase Advanced Trade API

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::auth::generate_auth_headers;
use super::messages::*;
use crate::common::errors::{ClientError, Result};
use crate::common::traits::ExchangeClient;
use crate::common::types::{ExchangeOrder, LimitOrder};
use crate::config::types::{ApiCredentials, CoinbaseConfig};
use crate::exchange::check_status;
use crate::trading::{Asset, Pair};

const BROKERAGE_PATH: &str = "/api/v3/brokerage";

/// Product ids for the pairs Coinbase trades
const PRODUCTS: [(Pair, &str); 2] = [(Pair::BTC_USD, "BTC-USD"), (Pair::ETH_USD, "ETH-USD")];

/// REST client for Coinbase Advanced Trade
#[derive(Debug, Clone)]
pub struct CoinbaseClient {
    /// HTTP client
    client: Client,
    /// Base URL for the REST API
    base_url: String,
    /// Every Coinbase endpoint used here is authenticated
    credentials: ApiCredentials,
}

impl CoinbaseClient {
    /// Create a new client from configuration
    pub fn new(config: &CoinbaseConfig) -> Result<Self> {
        Self::with_timeout(config, Duration::from_secs(30))
    }

    /// Create a new client with custom timeout
    pub fn with_timeout(config: &CoinbaseConfig, timeout: Duration) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ClientError::Configuration("Coinbase API key not set".to_string()))?;
        let api_secret = config
            .api_secret
            .clone()
            .ok_or_else(|| ClientError::Configuration("Coinbase API secret not set".to_string()))?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Internal(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.rest_url.trim_end_matches('/').to_string(),
            credentials: ApiCredentials::new(api_key, api_secret),
        })
    }

    /// Coinbase product id for a pair
    pub fn product_id(pair: Pair) -> Result<&'static str> {
        PRODUCTS
            .iter()
            .find(|(p, _)| *p == pair)
            .map(|(_, id)| *id)
            .ok_or(ClientError::UnsupportedPair(pair))
    }

    /// Pair for a Coinbase product id
    pub fn pair_for_product(product_id: &str) -> Result<Pair> {
        if let Some((pair, _)) = PRODUCTS.iter().find(|(_, id)| *id == product_id) {
            return Ok(*pair);
        }

        match product_id.parse::<Pair>() {
            Ok(pair) => Err(ClientError::UnsupportedPair(pair)),
            Err(_) => Err(ClientError::InvalidResponse(format!(
                "Unknown product id: {}",
                product_id
            ))),
        }
    }

    /// Coinbase currency code for an asset
    pub fn currency(asset: Asset) -> Result<&'static str> {
        match asset {
            Asset::Btc => Ok("BTC"),
            Asset::Eth => Ok("ETH"),
            Asset::Usd => Ok("USD"),
            Asset::Usdt => Err(ClientError::UnsupportedAsset(asset)),
        }
    }

    /// Send a signed request and decode the JSON response
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, &str)],
        body: Option<String>,
    ) -> Result<T> {
        let path = format!("{}{}", BROKERAGE_PATH, endpoint);
        let url = format!("{}{}", self.base_url, path);
        let body = body.unwrap_or_default();

        // The signature embeds a timestamp, so it is produced per request
        let auth = generate_auth_headers(
            &self.credentials.api_key,
            &self.credentials.api_secret,
            method.as_str(),
            &path,
            &body,
        )?;

        debug!("{} {}", method, url);
        let mut request = self.client.request(method, &url).query(query);
        if !body.is_empty() {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = check_status(auth.apply_to_request(request).send().await?).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    fn convert_listed_order(order: ListedOrder) -> Result<ExchangeOrder> {
        Ok(ExchangeOrder {
            pair: Self::pair_for_product(&order.product_id)?,
            side: order.side.parse()?,
            id: order.order_id,
            client_id: order.client_order_id,
        })
    }
}

#[async_trait]
impl ExchangeClient for CoinbaseClient {
    #[instrument(skip(self))]
    async fn get_last_price(&self, pair: Pair) -> Result<String> {
        let product_id = Self::product_id(pair)?;

        let product: ProductResponse = self
            .send(Method::GET, &format!("/products/{}", product_id), &[], None)
            .await?;
        Ok(product.price)
    }

    #[instrument(skip(self))]
    async fn get_balance(&self, asset: Asset) -> Result<i64> {
        let currency = Self::currency(asset)?;

        let response: AccountsResponse = self
            .send(Method::GET, "/accounts", &[("limit", "250")], None)
            .await?;

        let account = response
            .accounts
            .into_iter()
            .find(|account| account.currency == currency)
            .ok_or_else(|| {
                ClientError::InvalidResponse(format!("No {} account returned", currency))
            })?;

        asset.unit_str(&account.available_balance.value)
    }

    #[instrument(skip(self), fields(client_id = %order.client_id))]
    async fn create_limit_order(&self, order: &LimitOrder) -> Result<ExchangeOrder> {
        let product_id = Self::product_id(order.pair)?;

        let order_configuration = match order.expires {
            Some(end_time) => OrderConfiguration::LimitGtd(LimitGtd {
                base_size: order.base_size.clone(),
                limit_price: order.price.clone(),
                end_time,
                post_only: order.post_only,
            }),
            None => OrderConfiguration::LimitGtc(LimitGtc {
                base_size: order.base_size.clone(),
                limit_price: order.price.clone(),
                post_only: order.post_only,
            }),
        };

        let request = CreateOrderRequest {
            client_order_id: order.client_id.clone(),
            product_id: product_id.to_string(),
            side: order.side.as_str().to_string(),
            order_configuration,
        };
        let body = serde_json::to_string(&request)?;

        let response: CreateOrderResponse =
            self.send(Method::POST, "/orders", &[], Some(body)).await?;

        if !response.success {
            return Err(ClientError::OrderRejected(response.failure()));
        }

        let order_id = response.order_id().ok_or_else(|| {
            ClientError::InvalidResponse("Order accepted without an order id".to_string())
        })?;

        Ok(ExchangeOrder::accepted(order_id, order))
    }

    #[instrument(skip(self))]
    async fn list_open_orders(&self) -> Result<Vec<ExchangeOrder>> {
        let response: ListOrdersResponse = self
            .send(
                Method::GET,
                "/orders/historical/batch",
                &[("order_status", "OPEN")],
                None,
            )
            .await?;

        // An order on a product we do not map fails the whole listing, so
        // reconciliation never runs against a partial view of the account
        response
            .orders
            .into_iter()
            .map(Self::convert_listed_order)
            .collect()
    }

    #[instrument(skip(self))]
    async fn cancel_orders(&self, order_ids: &[String]) -> Result<()> {
        if order_ids.is_empty() {
            return Ok(());
        }

        let body = serde_json::to_string(&CancelOrdersRequest {
            order_ids: order_ids.to_vec(),
        })?;

        let response: CancelOrdersResponse = self
            .send(Method::POST, "/orders/batch_cancel", &[], Some(body))
            .await?;

        let refused: Vec<String> = response
            .results
            .iter()
            .filter(|result| !result.is_settled())
            .map(|result| {
                format!(
                    "{}: {}",
                    result.order_id,
                    result.failure_reason.as_deref().unwrap_or("unknown reason")
                )
            })
            .collect();

        for result in response.results.iter().filter(|r| !r.success && r.is_settled()) {
            debug!("Order {} already closed", result.order_id);
        }

        if refused.is_empty() {
            Ok(())
        } else {
            warn!("Coinbase refused {} cancellation(s)", refused.len());
            Err(ClientError::OrderRejected(format!(
                "cancel refused for {}",
                refused.join(", ")
            )))
        }
    }

    fn name(&self) -> &'static str {
        "coinbase"
    }
}
