//! Error types.
use core::fmt;

/// Errors reported when the cipher is given malformed input.
///
/// Every error is detected before any cipher state is created or any output
/// is written.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The key is empty or longer than 32 bytes.
    InvalidKeyLength,
    /// The IV is not exactly 16 bytes long.
    InvalidIvLength,
    /// The keystream is shorter than the data it should be combined with.
    InsufficientKeystream,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidKeyLength => "invalid key length: expected 1 to 32 bytes",
            Error::InvalidIvLength => "invalid IV length: expected 16 bytes",
            Error::InsufficientKeystream => "keystream is shorter than the data",
        })
    }
}

impl core::error::Error for Error {}
