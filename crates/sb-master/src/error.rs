//! Error type for output sessions.

use sb_audio::AudioError;
use sb_engine::{ConfigError, EngineFault};
use sb_formats::FormatError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// Invalid or contradictory format parameters
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// Output sink could not be opened or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("WAV output error: {0}")]
    Format(FormatError),
    /// Live audio subsystem failed to start
    #[error("audio output error: {0}")]
    Audio(#[from] AudioError),
    #[error(transparent)]
    EngineFault(#[from] EngineFault),
}

impl From<FormatError> for PlayerError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::Io(e) => PlayerError::Io(e),
            FormatError::Unsupported(e) => PlayerError::Config(e),
            other => PlayerError::Format(other),
        }
    }
}
