use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::common::errors::{ClientError, Result};

/// A coin or currency used in trading pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Asset {
    Btc,
    Eth,
    Usd,
    Usdt,
}

impl Asset {
    /// Every asset known to the bot
    pub const ALL: [Asset; 4] = [Asset::Btc, Asset::Eth, Asset::Usd, Asset::Usdt];

    /// Number of fractional digits in the asset's smallest unit
    pub const fn decimals(&self) -> u32 {
        match self {
            Asset::Btc => 8,
            Asset::Eth => 18,
            Asset::Usd => 2,
            Asset::Usdt => 6,
        }
    }

    /// Ticker code used in logs and configuration
    pub const fn code(&self) -> &'static str {
        match self {
            Asset::Btc => "BTC",
            Asset::Eth => "ETH",
            Asset::Usd => "USD",
            Asset::Usdt => "USDT",
        }
    }

    /// Convert a float amount into smallest units, truncating toward zero.
    ///
    /// For USD, `50.01` becomes `5001` cents and `0.019` becomes `1`.
    pub fn unit(&self, value: f64) -> i64 {
        // The shortest round-trip rendering of the float is what the caller
        // meant, so scale that exactly instead of the binary approximation.
        Decimal::from_str(&value.to_string())
            .ok()
            .and_then(|d| self.scale(d))
            .unwrap_or_else(|| (value * 10f64.powi(self.decimals() as i32)).trunc() as i64)
    }

    /// Parse a decimal string into smallest units, truncating toward zero
    pub fn unit_str(&self, value: &str) -> Result<i64> {
        let trimmed = value.trim();
        if !is_decimal_numeral(trimmed) {
            return Err(ClientError::Parse(format!(
                "invalid {} amount {:?}: not a decimal number",
                self, value
            )));
        }

        let parsed = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|e| ClientError::Parse(format!("invalid {} amount {:?}: {}", self, value, e)))?;

        self.scale(parsed).ok_or_else(|| {
            ClientError::Parse(format!("{} amount {:?} is out of range", self, value))
        })
    }

    /// Render smallest units as a plain decimal string with no trailing zeros
    pub fn format(&self, units: i64) -> String {
        Decimal::from_i128_with_scale(units as i128, self.decimals())
            .normalize()
            .to_string()
    }

    fn factor(&self) -> Decimal {
        Decimal::from(10u64.pow(self.decimals()))
    }

    fn scale(&self, value: Decimal) -> Option<i64> {
        value.checked_mul(self.factor())?.trunc().to_i64()
    }
}

/// `[+-]digits[.digits][(e|E)[+-]digits]`, with digits on at least one side of the point
fn is_decimal_numeral(s: &str) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || !digits(fraction) || whole.len() + fraction.len() == 0 {
        return false;
    }

    exponent.map_or(true, |exponent| {
        let exponent = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        !exponent.is_empty() && digits(exponent)
    })
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Asset {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Asset::ALL
            .into_iter()
            .find(|asset| asset.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClientError::Parse(format!("unknown asset {:?}", s)))
    }
}
