//! Offline rendering to a WAV file.

use sb_engine::{AudioFormat, RenderEngine};
use sb_formats::{open_for_write, WavWriter};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::PlayerError;
use crate::events::EventReceiver;
use crate::mode::OutputStrategy;
use crate::session::RenderSession;

/// Byte order of the host's native samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    pub const NATIVE: Endian = if cfg!(target_endian = "big") { Endian::Big } else { Endian::Little };
}

/// Convert native-order samples in `buf` to the little-endian order WAV requires.
pub fn to_little_endian(buf: &mut [u8], format: AudioFormat, host: Endian) {
    if host == Endian::Big && format.bits_per_sample() > 8 {
        for pair in buf.chunks_exact_mut(2) {
            pair.swap(0, 1);
        }
    }
}

/// Render `seconds` of audio from `engine` as a complete WAV stream into `sink`.
///
/// The engine is asked for one second of audio at a time. Returns the sink
/// once the declared data length has been written in full.
pub fn render_wav<W, E>(
    sink: W,
    format: AudioFormat,
    seconds: u32,
    engine: &mut E,
    session: &mut RenderSession,
) -> Result<W, PlayerError>
where
    W: Write,
    E: RenderEngine + ?Sized,
{
    let data_length = format.data_length(seconds)?;
    let mut writer = WavWriter::new(sink, format, data_length)?;
    let mut buf = vec![0u8; format.bytes_per_second() as usize];

    for second in 0..seconds {
        engine.fill_buffer(&mut buf);
        if let Some(fault) = engine.take_fault() {
            return Err(fault.into());
        }
        to_little_endian(&mut buf, format, Endian::NATIVE);
        writer.write_pcm(&buf)?;
        session.record_bytes(buf.len());
        debug!(second = second + 1, of = seconds, "rendered");
    }

    Ok(writer.finish()?)
}

/// Writes a fixed-length WAV file as fast as the engine can fill buffers.
#[derive(Debug)]
pub struct FileRender {
    path: PathBuf,
    seconds: u32,
}

impl FileRender {
    /// Fails if `seconds` of `format` audio cannot be described by a WAV header.
    pub fn new(path: PathBuf, format: AudioFormat, seconds: u32) -> Result<Self, PlayerError> {
        format.data_length(seconds)?;
        Ok(Self { path, seconds })
    }

}

impl OutputStrategy for FileRender {
    fn run<E>(self, session: &mut RenderSession, mut engine: E, _events: &EventReceiver) -> Result<(), PlayerError>
    where
        E: RenderEngine + Send + 'static,
    {
        // Open before rendering so a bad path costs no engine time.
        let sink = open_for_write(&self.path)?;
        info!(path = %self.path.display(), seconds = self.seconds, "rendering to file");

        let format = session.format();
        render_wav(sink, format, self.seconds, &mut engine, session)?;
        info!(path = %self.path.display(), "output written");
        Ok(())
    }
}
