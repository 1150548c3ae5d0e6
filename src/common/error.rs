use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    #[error("invalid version {0}, expected 1..=40")]
    InvalidVersion(usize),
    #[error("invalid reed-solomon degree {0}, expected 1..=255")]
    InvalidDegree(usize),
    #[error("invalid masking pattern {0}, expected 0..=7")]
    InvalidMaskingPattern(u8),
    #[error("symbol is already masked with pattern {0}")]
    AlreadyMasked(u8),
    #[error("invalid error correction level {0:?}")]
    InvalidECLevel(char),
    #[error("invalid character {0:?} in bit string")]
    InvalidChar(char),
    #[error("data too long: {bits} bits exceeds capacity of {capacity} bits")]
    DataTooLong { bits: usize, capacity: usize },
    #[error("invalid format info detected")]
    InvalidFormatInfo,
    #[error("invalid version info detected")]
    InvalidVersionInfo,
}

pub type QRResult<T> = Result<T, QRError>;
