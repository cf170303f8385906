//! Generators for non-deterministic values
//!
//! Kept behind the [`IdGenerator`] trait so tests can pin the values.

use uuid::Uuid;

use crate::common::traits::IdGenerator;

/// Separator between the prefix and the unique part of a client id
pub const ID_SEPARATOR: char = ':';

/// Longest client order id Binance accepts
pub const COMPACT_ID_MAX_LEN: usize = 36;

/// Fewest random hex digits a compact id keeps, however long the prefix
const COMPACT_MIN_RANDOM: usize = 8;

/// Generates ids from random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate_id(&self, prefix: &str) -> String {
        format!("{}{}{}", prefix, ID_SEPARATOR, Uuid::new_v4())
    }
}

/// Generates ids limited to `[A-Za-z0-9_-]` and 36 characters
///
/// Binance rejects client order ids outside that format, so the prefix is
/// joined with `-` and the random part is cut down to fit.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactIdGenerator;

impl IdGenerator for CompactIdGenerator {
    fn generate_id(&self, prefix: &str) -> String {
        let unique = Uuid::new_v4().simple().to_string();
        let room = COMPACT_ID_MAX_LEN
            .saturating_sub(prefix.len() + 1)
            .clamp(COMPACT_MIN_RANDOM, unique.len());

        format!("{}-{}", prefix, &unique[..room])
    }
}
