//! Error types for config generation.

use crate::models::Ipv4;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenError>;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(
        "Ran out of IPs in {range} after {emitted} objects. Use a larger network (e.g. 10.0.0.0/8)."
    )]
    AddressSpaceExhausted { range: Ipv4, emitted: u64 },

    #[error("Phase '{phase}' hit the safety limit of {limit} entries without reaching its target")]
    IterationLimit { phase: String, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
