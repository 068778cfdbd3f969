//! PCM output format.

use thiserror::Error;

/// Rejected format or output parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported channel count {0} (expected 1 or 2)")]
    Channels(u16),
    #[error("unsupported sample size {0} bits (expected 8 or 16)")]
    BitsPerSample(u16),
    #[error("sample rate must be positive")]
    ZeroSampleRate,
    #[error("sample rate {0} Hz is too high")]
    SampleRateTooHigh(u32),
    #[error("{seconds}s at {bytes_per_second} bytes/s does not fit in a WAV file")]
    DataTooLarge { seconds: u32, bytes_per_second: u32 },
}

/// Channel count, sample size and rate of the rendered PCM stream.
///
/// Only constructible through [`AudioFormat::new`], so every value satisfies
/// `bytes_per_frame() >= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AudioFormat {
    channels: u16,
    bits_per_sample: u16,
    sample_rate: u32,
}

impl AudioFormat {
    pub fn new(channels: u16, bits_per_sample: u16, sample_rate: u32) -> Result<Self, ConfigError> {
        if !(1..=2).contains(&channels) {
            return Err(ConfigError::Channels(channels));
        }
        if bits_per_sample != 8 && bits_per_sample != 16 {
            return Err(ConfigError::BitsPerSample(bits_per_sample));
        }
        if sample_rate == 0 {
            return Err(ConfigError::ZeroSampleRate);
        }
        // Keep bytes_per_second within u32 for the WAV byte-rate field.
        if sample_rate.checked_mul(u32::from(channels * bits_per_sample / 8)).is_none() {
            return Err(ConfigError::SampleRateTooHigh(sample_rate));
        }
        Ok(Self { channels, bits_per_sample, sample_rate })
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn bytes_per_sample(&self) -> u16 {
        self.bits_per_sample / 8
    }

    pub fn bytes_per_frame(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    pub fn bytes_per_second(&self) -> u32 {
        self.sample_rate * u32::from(self.bytes_per_frame())
    }

    /// PCM byte count for `seconds` of audio, checked against the 32-bit
    /// RIFF size fields (which also hold 36 bytes of header overhead).
    pub fn data_length(&self, seconds: u32) -> Result<u32, ConfigError> {
        let too_large = || ConfigError::DataTooLarge {
            seconds,
            bytes_per_second: self.bytes_per_second(),
        };
        let length = seconds.checked_mul(self.bytes_per_second()).ok_or_else(too_large)?;
        length.checked_add(36).ok_or_else(too_large)?;
        Ok(length)
    }
}
