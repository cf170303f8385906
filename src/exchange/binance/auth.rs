//! Request signing for the Binance REST API

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::common::errors::{ClientError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Hex HMAC-SHA256 of the full query string, timestamp included
pub fn sign_query(secret: &str, query_string: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ClientError::Authentication(format!("Failed to create HMAC: {}", e)))?;
    mac.update(query_string.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}
