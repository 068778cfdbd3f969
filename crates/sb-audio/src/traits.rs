//! Audio backend trait and error types.

use sb_engine::{AudioFormat, EngineFault, RenderEngine};
use thiserror::Error;

/// Error type for audio operations.
#[derive(Debug, Error)]
pub enum AudioError {
    /// No output device available
    #[error("no audio output device available")]
    NoDevice,
    /// Failed to create audio stream
    #[error("stream create error: {0}")]
    StreamCreate(String),
    /// Failed to start or stop playback
    #[error("playback error: {0}")]
    Playback(String),
}

/// A live audio subsystem that pulls PCM from an engine on its own thread.
pub trait AudioBackend {
    /// Keeps playback running; dropping it stops the stream.
    type Handle;

    /// Open the output and start playback.
    ///
    /// The engine moves onto the subsystem's callback thread and is only
    /// touched there. `on_fault` is called from that thread the first time the
    /// engine reports a fault, after which the callback renders silence.
    /// The engine is not called before the device and stream are open.
    fn start<E, F>(&self, format: AudioFormat, engine: E, on_fault: F) -> Result<Self::Handle, AudioError>
    where
        E: RenderEngine + Send + 'static,
        F: FnMut(EngineFault) + Send + 'static;
}
