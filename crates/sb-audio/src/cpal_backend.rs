//! CPAL-based audio output backend.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, Device, SampleFormat, SampleRate, SizedSample, Stream, StreamConfig};
use sb_engine::{AudioFormat, EngineFault, RenderEngine};
use tracing::{debug, error, info, warn};

use crate::traits::{AudioBackend, AudioError};

/// Scratch space preallocated for the callback (enough for typical device periods).
const SCRATCH_BYTES: usize = 16 * 1024;

/// Plays through the default output device of the default host.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpalBackend;

impl CpalBackend {
    pub fn new() -> Self {
        Self
    }
}

/// A running output stream. Dropping it stops playback.
pub struct AudioSubsystemHandle {
    stream: Stream,
    device_name: String,
}

impl Drop for AudioSubsystemHandle {
    fn drop(&mut self) {
        if let Err(e) = self.stream.pause() {
            warn!("failed to pause audio stream: {}", e);
        }
        debug!(device = %self.device_name, "audio subsystem released");
    }
}

impl AudioBackend for CpalBackend {
    type Handle = AudioSubsystemHandle;

    fn start<E, F>(&self, format: AudioFormat, engine: E, on_fault: F) -> Result<Self::Handle, AudioError>
    where
        E: RenderEngine + Send + 'static,
        F: FnMut(EngineFault) + Send + 'static,
    {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let device_name = device.name().unwrap_or_else(|_| "<unknown>".into());

        let config = StreamConfig {
            channels: format.channels(),
            sample_rate: SampleRate(format.sample_rate()),
            buffer_size: BufferSize::Default,
        };
        let native = if format.bits_per_sample() == 8 { SampleFormat::U8 } else { SampleFormat::I16 };
        let sample_format = match device.supported_output_configs() {
            Ok(ranges) => {
                let offers = ranges.map(|r| {
                    (r.channels(), r.min_sample_rate().0, r.max_sample_rate().0, r.sample_format())
                });
                choose_sample_format(native, config.channels, config.sample_rate.0, offers).ok_or_else(|| {
                    AudioError::StreamCreate(format!(
                        "{} does not support {} channel(s) at {} Hz",
                        device_name, config.channels, config.sample_rate.0
                    ))
                })?
            }
            Err(e) => {
                warn!("could not query supported output configs: {}", e);
                native
            }
        };
        info!(device = %device_name, ?config, ?sample_format, "opening output stream");

        let stream = match (format.bits_per_sample(), sample_format) {
            (8, SampleFormat::F32) => build_stream::<f32, _, _>(&device, &config, 1, engine, on_fault, u8_to_f32)?,
            (8, _) => build_stream::<u8, _, _>(&device, &config, 1, engine, on_fault, copy_u8)?,
            (_, SampleFormat::F32) => {
                build_stream::<f32, _, _>(&device, &config, 2, engine, on_fault, native_i16_to_f32)?
            }
            _ => build_stream::<i16, _, _>(&device, &config, 2, engine, on_fault, native_to_i16)?,
        };
        stream.play().map_err(|e| AudioError::Playback(e.to_string()))?;

        Ok(AudioSubsystemHandle { stream, device_name })
    }
}

/// Pick the stream sample format for `channels` at `rate` among the device's
/// offered `(channels, min_rate, max_rate, format)` ranges. The engine's own
/// format wins; `f32` is the fallback.
fn choose_sample_format<I>(native: SampleFormat, channels: u16, rate: u32, offers: I) -> Option<SampleFormat>
where
    I: IntoIterator<Item = (u16, u32, u32, SampleFormat)>,
{
    let mut float = false;
    for (ch, min, max, sample_format) in offers {
        if ch != channels || rate < min || rate > max {
            continue;
        }
        if sample_format == native {
            return Some(native);
        }
        float |= sample_format == SampleFormat::F32;
    }
    float.then_some(SampleFormat::F32)
}

fn build_stream<T, E, F>(
    device: &Device,
    config: &StreamConfig,
    bytes_per_sample: usize,
    mut engine: E,
    mut on_fault: F,
    convert: fn(&[u8], &mut [T]),
) -> Result<Stream, AudioError>
where
    T: SizedSample + 'static,
    E: RenderEngine + Send + 'static,
    F: FnMut(EngineFault) + Send + 'static,
{
    let mut scratch = vec![0u8; SCRATCH_BYTES];
    let mut faulted = false;

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                if faulted {
                    data.fill(T::EQUILIBRIUM);
                    return;
                }
                let len = data.len() * bytes_per_sample;
                if scratch.len() < len {
                    scratch.resize(len, 0);
                }
                engine.fill_buffer(&mut scratch[..len]);
                convert(&scratch[..len], data);

                if let Some(fault) = engine.take_fault() {
                    faulted = true;
                    on_fault(fault);
                }
            },
            |err| error!("audio stream error: {}", err),
            None,
        )
        .map_err(|e| AudioError::StreamCreate(e.to_string()))
}

fn copy_u8(bytes: &[u8], out: &mut [u8]) {
    out.copy_from_slice(bytes);
}

fn native_to_i16(bytes: &[u8], out: &mut [i16]) {
    for (sample, pair) in out.iter_mut().zip(bytes.chunks_exact(2)) {
        *sample = i16::from_ne_bytes([pair[0], pair[1]]);
    }
}

fn u8_to_f32(bytes: &[u8], out: &mut [f32]) {
    for (sample, &b) in out.iter_mut().zip(bytes) {
        *sample = (b as f32 - 128.0) / 128.0;
    }
}

fn native_i16_to_f32(bytes: &[u8], out: &mut [f32]) {
    for (sample, pair) in out.iter_mut().zip(bytes.chunks_exact(2)) {
        *sample = i16::from_ne_bytes([pair[0], pair[1]]) as f32 / 32768.0;
    }
}
