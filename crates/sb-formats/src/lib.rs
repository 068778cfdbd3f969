//! WAV container support for sidblaster.
//!
//! Writes the canonical 44-byte PCM header in a single pass, followed by raw
//! sample data, and parses that header back for verification.

mod wav;

pub use wav::{open_for_write, parse_header, WavHeader, WavWriter, WAV_HEADER_LEN};

use sb_engine::ConfigError;
use thiserror::Error;

/// Error type for WAV encoding and decoding.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Header bytes are not a canonical PCM WAV header
    #[error("invalid WAV header: {0}")]
    InvalidHeader(String),
    /// Header is well formed but describes a format we do not produce
    #[error("unsupported WAV format: {0}")]
    Unsupported(#[from] ConfigError),
    /// More PCM bytes were offered than the header declared
    #[error("PCM data overruns declared length: {declared} bytes declared, {attempted} offered")]
    Overrun { declared: u32, attempted: u64 },
    /// Stream closed before the declared length was reached
    #[error("PCM data length mismatch: {declared} bytes declared, {written} written")]
    LengthMismatch { declared: u32, written: u64 },
}

impl From<binrw::Error> for FormatError {
    fn from(err: binrw::Error) -> Self {
        match err {
            binrw::Error::Io(e) => FormatError::Io(e),
            other => FormatError::InvalidHeader(other.to_string()),
        }
    }
}
