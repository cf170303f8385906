//! Types and traits shared across the crate

pub mod errors;
pub mod traits;
pub mod types;
