use thiserror::Error;

/// Errors raised while configuring indexers or validating their inputs.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid indexer configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{axis} coordinate {value} is outside valid range [{min}, {max}]")]
    CoordinateOutOfRange {
        axis: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("address index {address} is outside valid range [0, {max}]")]
    AddressOutOfRange { address: u32, max: u32 },

    #[error("bits per value must be 1, 2, 4, 8, 16, 32, or 64, got {0}")]
    InvalidBitsPerValue(u32),
}
