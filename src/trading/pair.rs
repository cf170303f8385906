use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Asset;
use crate::common::errors::{ClientError, Result};

/// A base/quote asset pairing that can be traded on an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pair {
    pub base: Asset,
    pub quote: Asset,
}

impl Pair {
    pub const BTC_USD: Pair = Pair::new(Asset::Btc, Asset::Usd);
    pub const ETH_USD: Pair = Pair::new(Asset::Eth, Asset::Usd);
    pub const BTC_USDT: Pair = Pair::new(Asset::Btc, Asset::Usdt);
    pub const ETH_USDT: Pair = Pair::new(Asset::Eth, Asset::Usdt);

    pub const fn new(base: Asset, quote: Asset) -> Self {
        Self { base, quote }
    }
}

impl std::fmt::Display for Pair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for Pair {
    type Err = ClientError;

    /// Accepts `BTC/USD` or `BTC-USD`
    fn from_str(s: &str) -> Result<Self> {
        let (base, quote) = s
            .split_once(['/', '-'])
            .ok_or_else(|| ClientError::Parse(format!("pair {:?} is not BASE/QUOTE", s)))?;

        Ok(Pair::new(base.parse()?, quote.parse()?))
    }
}

impl TryFrom<String> for Pair {
    type Error = ClientError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Pair> for String {
    fn from(pair: Pair) -> Self {
        pair.to_string()
    }
}
