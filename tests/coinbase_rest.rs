//! Wire tests for the Coinbase Advanced Trade backend
//!
//! Each test points a client at a local wiremock server and checks both the
//! request the client sends and how it interprets the reply.

mod common;

use common::coinbase_responses::*;
use common::{coinbase_client, sample_order, API_KEY, API_SECRET};
use crypto_trading_bot::common::errors::ClientError;
use crypto_trading_bot::common::traits::ExchangeClient;
use crypto_trading_bot::common::types::Side;
use crypto_trading_bot::exchange::coinbase::auth::sign_request;
use crypto_trading_bot::trading::{Asset, Pair};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{any, body_partial_json, header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

/// Matches requests whose `CB-ACCESS-SIGN` covers the timestamp, method,
/// path and body exactly as sent
struct SignedRequest;

impl Match for SignedRequest {
    fn matches(&self, request: &Request) -> bool {
        let header = |wanted: &str| {
            request
                .headers
                .iter()
                .find(|(name, _)| name.as_str().eq_ignore_ascii_case(wanted))
                .map(|(_, values)| values.last().as_str().to_string())
        };
        let (Some(signature), Some(timestamp)) =
            (header("CB-ACCESS-SIGN"), header("CB-ACCESS-TIMESTAMP"))
        else {
            return false;
        };
        let Ok(timestamp) = timestamp.parse::<i64>() else {
            return false;
        };

        let body = String::from_utf8_lossy(&request.body);
        sign_request(
            API_SECRET,
            timestamp,
            &request.method.to_string(),
            request.url.path(),
            &body,
        )
        .map_or(false, |expected| expected == signature)
    }
}

fn ok(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(body)
}

#[test_log::test(tokio::test)]
async fn test_get_last_price_signs_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/brokerage/products/BTC-USD"))
        .and(header("CB-ACCESS-KEY", API_KEY))
        .and(SignedRequest)
        .respond_with(ok(PRODUCT))
        .expect(1)
        .mount(&server)
        .await;

    let client = coinbase_client(&server.uri());
    assert_eq!(client.get_last_price(Pair::BTC_USD).await.unwrap(), "17000.01");
}

#[tokio::test]
async fn test_unsupported_pair_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = coinbase_client(&server.uri());
    assert!(matches!(
        client.get_last_price(Pair::BTC_USDT).await,
        Err(ClientError::UnsupportedPair(Pair::BTC_USDT))
    ));
    assert!(matches!(
        client.get_balance(Asset::Usdt).await,
        Err(ClientError::UnsupportedAsset(Asset::Usdt))
    ));
    client.cancel_orders(&[]).await.unwrap();
}

#[tokio::test]
async fn test_get_balance_in_smallest_units() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/brokerage/accounts"))
        .respond_with(ok(ACCOUNTS))
        .mount(&server)
        .await;

    let client = coinbase_client(&server.uri());
    assert_eq!(client.get_balance(Asset::Usd).await.unwrap(), 5000);
    assert_eq!(client.get_balance(Asset::Btc).await.unwrap(), 1000);

    assert!(matches!(
        client.get_balance(Asset::Eth).await,
        Err(ClientError::InvalidResponse(_))
    ));
}

#[tokio::test]
async fn test_create_limit_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/brokerage/orders"))
        .and(SignedRequest)
        .and(body_partial_json(json!({
            "client_order_id": "trading-bot:1",
            "product_id": "BTC-USD",
            "side": "BUY",
            "order_configuration": {
                "limit_limit_gtc": {
                    "base_size": "0.01",
                    "limit_price": "500",
                    "post_only": true
                }
            }
        })))
        .respond_with(ok(ORDER_CREATED))
        .expect(1)
        .mount(&server)
        .await;

    let client = coinbase_client(&server.uri());
    let placed = client
        .create_limit_order(&sample_order("trading-bot:1"))
        .await
        .unwrap();

    assert_eq!(placed.id, "11111-00000-000000");
    assert_eq!(placed.client_id, "trading-bot:1");
    assert_eq!(placed.pair, Pair::BTC_USD);
    assert_eq!(placed.side, Side::Buy);
}

#[tokio::test]
async fn test_expiring_order_uses_gtd() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/brokerage/orders"))
        .and(body_partial_json(json!({
            "order_configuration": {
                "limit_limit_gtd": {
                    "base_size": "0.01",
                    "limit_price": "500",
                    "end_time": "2030-01-01T00:00:00Z",
                    "post_only": true
                }
            }
        })))
        .respond_with(ok(ORDER_CREATED))
        .expect(1)
        .mount(&server)
        .await;

    let mut order = sample_order("trading-bot:1");
    order.expires = Some("2030-01-01T00:00:00Z".parse().unwrap());

    let client = coinbase_client(&server.uri());
    client.create_limit_order(&order).await.unwrap();
}

#[tokio::test]
async fn test_rejected_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/brokerage/orders"))
        .respond_with(ok(ORDER_REJECTED))
        .mount(&server)
        .await;

    let client = coinbase_client(&server.uri());
    let err = client
        .create_limit_order(&sample_order("trading-bot:1"))
        .await
        .unwrap_err();

    match err {
        ClientError::OrderRejected(reason) => {
            assert!(reason.contains("INVALID_LIMIT_PRICE_POST_ONLY"), "{}", reason)
        }
        other => panic!("expected a rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_open_orders() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/brokerage/orders/historical/batch"))
        .and(query_param("order_status", "OPEN"))
        .and(SignedRequest)
        .respond_with(ok(OPEN_ORDERS))
        .expect(1)
        .mount(&server)
        .await;

    let client = coinbase_client(&server.uri());
    let orders = client.list_open_orders().await.unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, "a");
    assert_eq!(orders[0].client_id, "trading-bot:1");
    assert_eq!(orders[1].pair, Pair::ETH_USD);
    assert_eq!(orders[1].side, Side::Sell);
}

#[tokio::test]
async fn test_cancel_treats_closed_orders_as_cancelled() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/brokerage/orders/batch_cancel"))
        .and(body_partial_json(json!({"order_ids": ["a", "b", "c"]})))
        .respond_with(ok(CANCEL_SETTLED))
        .expect(1)
        .mount(&server)
        .await;

    let client = coinbase_client(&server.uri());
    let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
    client.cancel_orders(&ids).await.unwrap();
}

#[tokio::test]
async fn test_cancel_refused() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/brokerage/orders/batch_cancel"))
        .respond_with(ok(CANCEL_REFUSED))
        .mount(&server)
        .await;

    let client = coinbase_client(&server.uri());
    assert!(matches!(
        client.cancel_orders(&["a".to_string()]).await,
        Err(ClientError::OrderRejected(_))
    ));
}

#[tokio::test]
async fn test_http_errors() {
    let server = MockServer::start().await;
    Mock::given(path("/api/v3/brokerage/accounts"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;
    Mock::given(path("/api/v3/brokerage/products/BTC-USD"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(path("/api/v3/brokerage/products/ETH-USD"))
        .respond_with(ok("not json"))
        .mount(&server)
        .await;

    let client = coinbase_client(&server.uri());

    let err = client.get_balance(Asset::Usd).await.unwrap_err();
    assert!(matches!(err, ClientError::Authentication(_)));

    let err = client.get_last_price(Pair::BTC_USD).await.unwrap_err();
    assert!(err.is_transport(), "{:?}", err);

    let err = client.get_last_price(Pair::ETH_USD).await.unwrap_err();
    assert!(matches!(err, ClientError::JsonParse(_)));
    assert_eq!(err.kind(), "transport");
}

#[tokio::test]
async fn test_open_order_on_unmapped_product_fails_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/brokerage/orders/historical/batch"))
        .respond_with(ok(OPEN_ORDERS_UNMAPPED))
        .mount(&server)
        .await;

    let client = coinbase_client(&server.uri());
    assert!(matches!(
        client.list_open_orders().await,
        Err(ClientError::InvalidResponse(_))
    ));
}
