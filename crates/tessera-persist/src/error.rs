use thiserror::Error;

/// Errors that can occur while loading or saving maps.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("corrupt map data: {0}")]
    Corrupt(String),

    #[error("stored bits-per-value {found} does not match expected {expected}")]
    BitsPerValueMismatch { expected: u32, found: u32 },
}

/// Classifies a decoder failure: malformed or truncated input is corruption,
/// anything else is an I/O failure.
pub(crate) fn decode_error(e: std::io::Error) -> PersistError {
    use std::io::ErrorKind;
    match e.kind() {
        ErrorKind::InvalidData | ErrorKind::UnexpectedEof => PersistError::Corrupt(e.to_string()),
        _ => PersistError::Io(e),
    }
}
