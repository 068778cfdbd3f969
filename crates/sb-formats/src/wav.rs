//! Canonical PCM WAV writing.

use binrw::{binrw, BinRead, BinWrite};
use sb_engine::AudioFormat;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use crate::FormatError;

/// Size of the RIFF, fmt and data chunk headers together.
pub const WAV_HEADER_LEN: usize = 44;

/// RIFF/WAVE header with a single 16-byte fmt chunk and a data chunk.
///
/// Every multi-byte field is little-endian on disk.
#[binrw]
#[brw(little)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WavHeader {
    #[br(assert(riff_id == *b"RIFF", "missing RIFF id"))]
    riff_id: [u8; 4],
    /// Total file size minus 8
    pub chunk_size: u32,
    #[br(assert(wave_id == *b"WAVE", "missing WAVE id"))]
    wave_id: [u8; 4],
    #[br(assert(fmt_id == *b"fmt ", "fmt chunk must come first"))]
    fmt_id: [u8; 4],
    #[br(assert(fmt_size == 16, "fmt chunk is {} bytes, expected 16", fmt_size))]
    pub fmt_size: u32,
    #[br(assert(audio_format == 1, "format code {} is not PCM", audio_format))]
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    #[br(assert(data_id == *b"data", "data chunk must follow fmt"))]
    data_id: [u8; 4],
    pub data_size: u32,
}

impl WavHeader {
    /// Header for `data_size` bytes of PCM in `format`.
    ///
    /// `data_size` should come from [`AudioFormat::data_length`] so that
    /// `36 + data_size` cannot overflow.
    pub fn new(format: AudioFormat, data_size: u32) -> Self {
        Self {
            riff_id: *b"RIFF",
            chunk_size: data_size.saturating_add(36),
            wave_id: *b"WAVE",
            fmt_id: *b"fmt ",
            fmt_size: 16,
            audio_format: 1,
            channels: format.channels(),
            sample_rate: format.sample_rate(),
            byte_rate: format.bytes_per_second(),
            block_align: format.bytes_per_frame(),
            bits_per_sample: format.bits_per_sample(),
            data_id: *b"data",
            data_size,
        }
    }

    /// The audio format this header describes.
    pub fn format(&self) -> Result<AudioFormat, FormatError> {
        let format = AudioFormat::new(self.channels, self.bits_per_sample, self.sample_rate)?;
        if format.bytes_per_second() != self.byte_rate || format.bytes_per_frame() != self.block_align {
            return Err(FormatError::InvalidHeader(format!(
                "byte rate {} / block align {} disagree with {:?}",
                self.byte_rate, self.block_align, format
            )));
        }
        Ok(format)
    }

    pub fn to_bytes(&self) -> [u8; WAV_HEADER_LEN] {
        let mut cursor = Cursor::new([0u8; WAV_HEADER_LEN]);
        self.write_le(&mut cursor)
            .expect("header fits its fixed-size buffer");
        cursor.into_inner()
    }
}

/// Parse the 44-byte header at the start of `data`.
pub fn parse_header(data: &[u8]) -> Result<WavHeader, FormatError> {
    if data.len() < WAV_HEADER_LEN {
        return Err(FormatError::InvalidHeader(format!(
            "{} bytes is shorter than a WAV header",
            data.len()
        )));
    }
    let header = WavHeader::read_le(&mut Cursor::new(&data[..WAV_HEADER_LEN]))?;
    Ok(header)
}

/// Create or truncate `path` for binary output.
pub fn open_for_write(path: impl AsRef<Path>) -> Result<BufWriter<File>, FormatError> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Single-pass WAV writer.
///
/// The header is written up front with the final data length, so the caller
/// must know in advance exactly how many PCM bytes it will supply.
pub struct WavWriter<W: Write> {
    sink: W,
    declared: u32,
    written: u64,
}

impl<W: Write> WavWriter<W> {
    /// Write the header for `data_size` bytes of `format` audio to `sink`.
    pub fn new(mut sink: W, format: AudioFormat, data_size: u32) -> Result<Self, FormatError> {
        sink.write_all(&WavHeader::new(format, data_size).to_bytes())?;
        Ok(Self { sink, declared: data_size, written: 0 })
    }

    /// Append little-endian PCM bytes verbatim.
    pub fn write_pcm(&mut self, buf: &[u8]) -> Result<(), FormatError> {
        let attempted = self.written + buf.len() as u64;
        if attempted > u64::from(self.declared) {
            return Err(FormatError::Overrun { declared: self.declared, attempted });
        }
        self.sink.write_all(buf)?;
        self.written = attempted;
        Ok(())
    }

    pub fn written_len(&self) -> u64 {
        self.written
    }

    /// Flush and hand back the sink, checking the declared length was met.
    pub fn finish(mut self) -> Result<W, FormatError> {
        self.sink.flush()?;
        if self.written != u64::from(self.declared) {
            return Err(FormatError::LengthMismatch {
                declared: self.declared,
                written: self.written,
            });
        }
        Ok(self.sink)
    }
}
