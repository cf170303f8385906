//! Coinbase Advanced Trade request and response bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /products/{product_id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ProductResponse {
    pub price: String,
}

/// `GET /accounts`
#[derive(Debug, Clone, Deserialize)]
pub struct AccountsResponse {
    #[serde(default)]
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub uuid: String,
    pub currency: String,
    pub available_balance: Balance,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    pub value: String,
    #[serde(default)]
    pub currency: String,
}

/// `POST /orders`
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    pub client_order_id: String,
    pub product_id: String,
    pub side: String,
    pub order_configuration: OrderConfiguration,
}

#[derive(Debug, Clone, Serialize)]
pub enum OrderConfiguration {
    #[serde(rename = "limit_limit_gtc")]
    LimitGtc(LimitGtc),
    #[serde(rename = "limit_limit_gtd")]
    LimitGtd(LimitGtd),
}

#[derive(Debug, Clone, Serialize)]
pub struct LimitGtc {
    pub base_size: String,
    pub limit_price: String,
    pub post_only: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LimitGtd {
    pub base_size: String,
    pub limit_price: String,
    pub end_time: DateTime<Utc>,
    pub post_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
    #[serde(default)]
    pub success_response: Option<SuccessResponse>,
    #[serde(default)]
    pub error_response: Option<ErrorResponse>,
}

impl CreateOrderResponse {
    /// Exchange order id, wherever the API put it
    pub fn order_id(&self) -> Option<&str> {
        self.success_response
            .as_ref()
            .map(|s| s.order_id.as_str())
            .or(self.order_id.as_deref())
    }

    /// Best available description of why the order failed
    pub fn failure(&self) -> String {
        let detail = self.error_response.as_ref().map(|e| {
            [e.error.as_deref(), e.message.as_deref(), e.preview_failure_reason.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(": ")
        });

        match (self.failure_reason.as_deref(), detail) {
            (Some(reason), Some(detail)) if !detail.is_empty() => format!("{} ({})", reason, detail),
            (_, Some(detail)) if !detail.is_empty() => detail,
            (Some(reason), _) => reason.to_string(),
            _ => "unknown failure".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuccessResponse {
    pub order_id: String,
    #[serde(default)]
    pub client_order_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub preview_failure_reason: Option<String>,
}

/// `POST /orders/batch_cancel`
#[derive(Debug, Clone, Serialize)]
pub struct CancelOrdersRequest {
    pub order_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrdersResponse {
    #[serde(default)]
    pub results: Vec<CancelResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelResult {
    pub success: bool,
    #[serde(default)]
    pub failure_reason: Option<String>,
    #[serde(default)]
    pub order_id: String,
}

/// Cancel failures that mean the order is already gone
pub const IDEMPOTENT_CANCEL_FAILURES: [&str; 2] = ["UNKNOWN_CANCEL_ORDER", "DUPLICATE_CANCEL_REQUEST"];

impl CancelResult {
    pub fn is_settled(&self) -> bool {
        self.success
            || self
                .failure_reason
                .as_deref()
                .map_or(false, |reason| IDEMPOTENT_CANCEL_FAILURES.contains(&reason))
    }
}

/// `GET /orders/historical/batch`
#[derive(Debug, Clone, Deserialize)]
pub struct ListOrdersResponse {
    #[serde(default)]
    pub orders: Vec<ListedOrder>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListedOrder {
    pub order_id: String,
    pub product_id: String,
    pub side: String,
    #[serde(default, alias = "client_id")]
    pub client_order_id: String,
}
