//! Converting a balance and a sampled price into order parameters

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::common::errors::{ClientError, Result};
use crate::trading::Pair;

/// Share of the quote balance committed to each order
pub const DEFAULT_COMMITTED_FRACTION: Decimal = dec!(0.1);

/// Limit price as a share of the sampled price
pub const DEFAULT_PRICE_DISCOUNT: Decimal = dec!(0.5);

/// How much of the balance to commit and how far below market to bid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizingPolicy {
    pub committed_fraction: Decimal,
    pub price_discount: Decimal,
}

impl SizingPolicy {
    /// Both fractions must lie in `(0, 1]`
    pub fn new(committed_fraction: Decimal, price_discount: Decimal) -> Result<Self> {
        for (name, value) in [
            ("committed_fraction", committed_fraction),
            ("price_discount", price_discount),
        ] {
            if value <= Decimal::ZERO || value > Decimal::ONE {
                return Err(ClientError::Configuration(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(Self {
            committed_fraction,
            price_discount,
        })
    }
}

impl Default for SizingPolicy {
    fn default() -> Self {
        Self {
            committed_fraction: DEFAULT_COMMITTED_FRACTION,
            price_discount: DEFAULT_PRICE_DISCOUNT,
        }
    }
}

/// Order parameters, all in smallest units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderSizing {
    /// Quote units committed to the order
    pub quote_amount: i64,
    /// Limit price in quote units per whole base unit
    pub target_price: i64,
    /// Base units to buy
    pub base_size: i64,
}

/// Size a buy order from the quote balance and the last sampled price
///
/// Every step truncates toward zero, so the order never commits more than
/// the configured fraction of the balance.
pub fn size_order(pair: Pair, balance: i64, price: &str, policy: &SizingPolicy) -> Result<OrderSizing> {
    let quote_amount = apply_fraction(balance, policy.committed_fraction)?;

    let sampled = pair.quote.unit_str(price)?;
    let target_price = apply_fraction(sampled, policy.price_discount)?;
    if target_price <= 0 {
        return Err(ClientError::DomainPrecondition(format!(
            "price {} for {} leaves no positive limit price",
            price, pair
        )));
    }

    let base_factor = 10i128.pow(pair.base.decimals());
    let base_size = (quote_amount as i128 * base_factor) / target_price as i128;
    let base_size = i64::try_from(base_size).map_err(|_| {
        ClientError::DomainPrecondition(format!("order size overflows for {}", pair))
    })?;

    Ok(OrderSizing {
        quote_amount,
        target_price,
        base_size,
    })
}

fn apply_fraction(units: i64, fraction: Decimal) -> Result<i64> {
    (Decimal::from(units) * fraction)
        .trunc()
        .to_i64()
        .ok_or_else(|| ClientError::Internal(format!("{} x {} overflows", units, fraction)))
}
