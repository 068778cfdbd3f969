//! Player preferences.

use sb_engine::{AudioFormat, ConfigError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PlayerError;

/// Output preferences, loadable from a TOML file.
///
/// ```toml
/// stereo = true
/// audio16bit = true
/// samplerate = 44100
/// time = 60
/// outfile = "song.wav"
/// hardware = false
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    pub stereo: bool,
    pub audio16bit: bool,
    /// Output sample rate in Hz
    pub samplerate: u32,
    /// Length of a file render in seconds
    pub time: u32,
    /// Render to this WAV file instead of playing
    pub outfile: Option<PathBuf>,
    /// Drive the chip hardware directly
    #[serde(alias = "cwsid")]
    pub hardware: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            stereo: true,
            audio16bit: true,
            samplerate: 44100,
            time: 60,
            outfile: None,
            hardware: false,
        }
    }
}

impl PlayerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlayerError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| PlayerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, PlayerError> {
        Ok(toml::from_str(text)?)
    }

    pub fn channels(&self) -> u16 {
        if self.stereo { 2 } else { 1 }
    }

    pub fn bits_per_sample(&self) -> u16 {
        if self.audio16bit { 16 } else { 8 }
    }

    pub fn audio_format(&self) -> Result<AudioFormat, ConfigError> {
        AudioFormat::new(self.channels(), self.bits_per_sample(), self.samplerate)
    }
}
