//! Assets and trading pairs
//!
//! A centralized representation of the currencies the bot knows about and
//! the markets built from them. Every balance and size is carried as an
//! integer count of an asset's smallest unit; decimal strings only appear
//! at the exchange boundary.

mod asset;
mod pair;

pub use asset::Asset;
pub use pair::Pair;
