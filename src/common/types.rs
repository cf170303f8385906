//! Order types shared by the agent and every exchange backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::errors::{ClientError, Result};
use crate::trading::Pair;

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Side {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(ClientError::Parse(format!("unknown order side {:?}", other))),
        }
    }
}

/// A limit order to be submitted
///
/// `base_size` and `price` are already formatted with the decimals of the
/// pair's base and quote assets respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOrder {
    /// Caller-assigned identifier, used to recognize our own orders
    pub client_id: String,
    pub pair: Pair,
    pub side: Side,
    pub base_size: String,
    pub price: String,
    /// Reject rather than match as taker
    pub post_only: bool,
    /// Good-till-date expiry, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

/// The exchange's record of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeOrder {
    /// Exchange-assigned identifier, opaque to callers
    pub id: String,
    pub pair: Pair,
    pub side: Side,
    pub client_id: String,
}

impl ExchangeOrder {
    /// Build the record for an order the exchange just accepted
    pub fn accepted(id: impl Into<String>, order: &LimitOrder) -> Self {
        Self {
            id: id.into(),
            pair: order.pair,
            side: order.side,
            client_id: order.client_id.clone(),
        }
    }
}
