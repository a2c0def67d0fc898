use thiserror::Error;

/// Errors returned by poem parsing and rendering.
///
/// Note: this error type lives in an internal module; the example is
/// illustrative and not compiled as a public doctest.
///
/// # Examples
/// ```text
/// use bitpoetry_core::poem::error::PoemError;
///
/// let err = PoemError::InvalidCategory { value: 0x04 };
/// assert!(err.to_string().contains("invalid category"));
/// ```
#[derive(Debug, Error)]
pub enum PoemError {
    #[error("invalid poem size: need at least {needed} bytes, got {actual}")]
    InvalidStreamSize { needed: usize, actual: usize },
    #[error("invalid record size: need exactly {needed} bytes, got {actual}")]
    InvalidRecordSize { needed: usize, actual: usize },
    #[error("invalid category byte: {value:#04x}")]
    InvalidCategory { value: u8 },
    #[error("dictionary index out of range: index {index}, list length {len}")]
    IndexOutOfRange { index: u8, len: usize },
}
