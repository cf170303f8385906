//! Binance request and response bodies

use serde::Deserialize;

use crate::common::errors::ClientError;

/// Error code for a cancel of an order the exchange no longer knows
pub const UNKNOWN_ORDER: i64 = -2011;

/// Error codes that mean the key or signature was refused
const AUTH_FAILURES: [i64; 3] = [-1022, -2014, -2015];

/// `GET /api/v3/ticker/price`
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPriceResponse {
    pub symbol: String,
    pub price: String,
}

/// `GET /api/v3/account`
#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    #[serde(default)]
    pub balances: Vec<AssetBalance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetBalance {
    pub asset: String,
    pub free: String,
    #[serde(default)]
    pub locked: String,
}

/// `POST /api/v3/order` acknowledgement
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderResponse {
    pub symbol: String,
    pub order_id: u64,
    #[serde(default)]
    pub client_order_id: String,
}

/// Element of `GET /api/v3/openOrders`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenOrder {
    pub symbol: String,
    pub order_id: u64,
    #[serde(default)]
    pub client_order_id: String,
    pub side: String,
}

/// Error body returned with 4xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub code: i64,
    pub msg: String,
}

impl ApiErrorResponse {
    pub fn is_auth_failure(&self) -> bool {
        AUTH_FAILURES.contains(&self.code)
    }

    /// Map an error on a read endpoint
    pub fn into_client_error(self) -> ClientError {
        if self.is_auth_failure() {
            ClientError::Authentication(format!("{} ({})", self.msg, self.code))
        } else {
            ClientError::InvalidResponse(format!("Binance error {}: {}", self.code, self.msg))
        }
    }

    /// Map an error on an order placement or cancellation
    pub fn into_rejection(self) -> ClientError {
        if self.is_auth_failure() {
            self.into_client_error()
        } else {
            ClientError::OrderRejected(format!("{} ({})", self.msg, self.code))
        }
    }
}
