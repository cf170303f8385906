//! Common test utilities and fixtures

#![allow(dead_code)]

use crypto_trading_bot::common::types::{LimitOrder, Side};
use crypto_trading_bot::config::types::{BinanceConfig, CoinbaseConfig};
use crypto_trading_bot::exchange::{BinanceClient, CoinbaseClient};
use crypto_trading_bot::trading::Pair;

pub const API_KEY: &str = "FOO";
pub const API_SECRET: &str = "BAR";

/// Coinbase client pointed at a mock server
pub fn coinbase_client(uri: &str) -> CoinbaseClient {
    CoinbaseClient::new(&CoinbaseConfig {
        api_key: Some(API_KEY.to_string()),
        api_secret: Some(API_SECRET.to_string()),
        rest_url: uri.to_string(),
    })
    .expect("Failed to create Coinbase client")
}

/// Binance client pointed at a mock server
pub fn binance_client(uri: &str) -> BinanceClient {
    BinanceClient::new(&BinanceConfig {
        api_key: Some(API_KEY.to_string()),
        api_secret: Some(API_SECRET.to_string()),
        rest_url: Some(uri.to_string()),
        ..BinanceConfig::default()
    })
    .expect("Failed to create Binance client")
}

/// The order the agent places for a $50 balance at a $1000 price
pub fn sample_order(client_id: &str) -> LimitOrder {
    LimitOrder {
        client_id: client_id.to_string(),
        pair: Pair::BTC_USD,
        side: Side::Buy,
        base_size: "0.01".to_string(),
        price: "500".to_string(),
        post_only: true,
        expires: None,
    }
}

/// Sample Coinbase Advanced Trade responses
pub mod coinbase_responses {
    pub const PRODUCT: &str = r#"{
        "product_id": "BTC-USD",
        "price": "17000.01",
        "price_percentage_change_24h": "-1.2",
        "base_increment": "0.00000001",
        "quote_increment": "0.01"
    }"#;

    pub const ACCOUNTS: &str = r#"{
        "accounts": [
            {
                "uuid": "8bfc20d7-f7c6-4422-bf07-8243ca4169fe",
                "name": "BTC Wallet",
                "currency": "BTC",
                "available_balance": {"value": "0.00001", "currency": "BTC"}
            },
            {
                "uuid": "1b9d1a0c-ec06-4c0f-a2e5-3f2a1c6a5b7d",
                "name": "USD Wallet",
                "currency": "USD",
                "available_balance": {"value": "50.00", "currency": "USD"}
            }
        ],
        "has_next": false,
        "cursor": "",
        "size": 2
    }"#;

    pub const ORDER_CREATED: &str = r#"{
        "success": true,
        "success_response": {
            "order_id": "11111-00000-000000",
            "product_id": "BTC-USD",
            "side": "BUY",
            "client_order_id": "trading-bot:1"
        }
    }"#;

    pub const ORDER_REJECTED: &str = r#"{
        "success": false,
        "failure_reason": "UNKNOWN_FAILURE_REASON",
        "error_response": {
            "error": "INVALID_LIMIT_PRICE_POST_ONLY",
            "message": "Limit price would cross the book",
            "preview_failure_reason": "PREVIEW_INVALID_LIMIT_PRICE_POST_ONLY"
        }
    }"#;

    pub const OPEN_ORDERS: &str = r#"{
        "orders": [
            {
                "order_id": "a",
                "product_id": "BTC-USD",
                "side": "BUY",
                "client_order_id": "trading-bot:1",
                "status": "OPEN"
            },
            {
                "order_id": "b",
                "product_id": "ETH-USD",
                "side": "SELL",
                "client_order_id": "manual-42",
                "status": "OPEN"
            }
        ],
        "has_next": false
    }"#;

    pub const OPEN_ORDERS_UNMAPPED: &str = r#"{
        "orders": [
            {
                "order_id": "a",
                "product_id": "BTC-USD",
                "side": "BUY",
                "client_order_id": "trading-bot:1"
            },
            {
                "order_id": "z",
                "product_id": "SOL-USD",
                "side": "BUY",
                "client_order_id": "manual-7"
            }
        ]
    }"#;

    pub const CANCEL_SETTLED: &str = r#"{
        "results": [
            {"success": true, "failure_reason": "UNKNOWN_CANCEL_FAILURE_REASON", "order_id": "a"},
            {"success": false, "failure_reason": "UNKNOWN_CANCEL_ORDER", "order_id": "b"},
            {"success": false, "failure_reason": "DUPLICATE_CANCEL_REQUEST", "order_id": "c"}
        ]
    }"#;

    pub const CANCEL_REFUSED: &str = r#"{
        "results": [
            {"success": false, "failure_reason": "COMMANDER_REJECTED_CANCEL_ORDER", "order_id": "a"}
        ]
    }"#;
}

/// Sample Binance spot API responses
pub mod binance_responses {
    pub const TICKER: &str = r#"{"symbol": "BTCUSD", "price": "17000.01000000"}"#;

    pub const ACCOUNT: &str = r#"{
        "makerCommission": 10,
        "canTrade": true,
        "balances": [
            {"asset": "BTC", "free": "0.00001000", "locked": "0.00000000"},
            {"asset": "USD", "free": "50.0000", "locked": "12.5000"}
        ]
    }"#;

    pub const ORDER_ACK: &str = r#"{
        "symbol": "BTCUSD",
        "orderId": 28,
        "orderListId": -1,
        "clientOrderId": "trading-bot-6gCrw2kRUAF9CvJDGP16IP",
        "transactTime": 1507725176595
    }"#;

    pub const OPEN_ORDERS: &str = r#"[
        {
            "symbol": "BTCUSD",
            "orderId": 28,
            "orderListId": -1,
            "clientOrderId": "trading-bot-6gCrw2kRUAF9CvJDGP16IP",
            "price": "500.0000",
            "origQty": "0.01000000",
            "status": "NEW",
            "type": "LIMIT_MAKER",
            "side": "BUY"
        },
        {
            "symbol": "ETHUSDT",
            "orderId": 7,
            "orderListId": -1,
            "clientOrderId": "manual-1",
            "price": "2000.00",
            "origQty": "1.0000",
            "status": "NEW",
            "type": "LIMIT",
            "side": "SELL"
        }
    ]"#;

    pub const OPEN_ORDERS_UNMAPPED: &str = r#"[
        {"symbol": "SOLUSDT", "orderId": 3, "clientOrderId": "manual-2", "side": "BUY"}
    ]"#;

    pub const WOULD_TAKE: &str =
        r#"{"code": -2010, "msg": "Order would immediately match and take."}"#;

    pub const UNKNOWN_ORDER: &str = r#"{"code": -2011, "msg": "Unknown order sent."}"#;

    pub const BAD_API_KEY: &str =
        r#"{"code": -2015, "msg": "Invalid API-key, IP, or permissions for action."}"#;
}
