//! Exchange backends
//!
//! Each backend translates the crate's [`Pair`](crate::trading::Pair),
//! [`Asset`](crate::trading::Asset) and order types into one exchange's wire
//! protocol behind the [`ExchangeClient`] trait.

pub mod binance;
pub mod coinbase;
pub mod simulated;

use reqwest::{Response, StatusCode};
use std::sync::Arc;

use crate::common::errors::{ClientError, Result};
use crate::common::traits::ExchangeClient;
use crate::config::types::{ExchangeConfig, ExchangeKind};

pub use binance::BinanceClient;
pub use coinbase::CoinbaseClient;
pub use simulated::SimulatedExchange;

/// Build the backend selected by configuration
pub fn build_exchange(
    config: &ExchangeConfig,
    request_timeout: std::time::Duration,
) -> Result<Arc<dyn ExchangeClient>> {
    let exchange: Arc<dyn ExchangeClient> = match config.kind {
        ExchangeKind::Simulated => Arc::new(SimulatedExchange::new()),
        ExchangeKind::Coinbase => Arc::new(CoinbaseClient::with_timeout(
            &config.coinbase,
            request_timeout,
        )?),
        ExchangeKind::Binance => Arc::new(BinanceClient::with_timeout(
            &config.binance,
            request_timeout,
        )?),
    };

    Ok(exchange)
}

/// Turn a non-success HTTP status into an error
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Authentication(
            format!("Server returned status {}: {}", status, body),
        )),
        _ => Err(ClientError::InvalidResponse(format!(
            "Server returned status {}: {}",
            status, body
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CoinbaseConfig;
    use std::time::Duration;

    #[test]
    fn test_build_selected_exchange() {
        let config = ExchangeConfig::default();
        let exchange = build_exchange(&config, Duration::from_secs(5)).unwrap();
        assert_eq!(exchange.name(), "simulated");

        let config = ExchangeConfig {
            kind: ExchangeKind::Binance,
            ..ExchangeConfig::default()
        };
        assert_eq!(build_exchange(&config, Duration::from_secs(5)).unwrap().name(), "binance");
    }

    #[test]
    fn test_coinbase_requires_credentials() {
        let config = ExchangeConfig {
            kind: ExchangeKind::Coinbase,
            coinbase: CoinbaseConfig::default(),
            ..ExchangeConfig::default()
        };
        assert!(matches!(
            build_exchange(&config, Duration::from_secs(5)),
            Err(ClientError::Configuration(_))
        ));
    }
}
