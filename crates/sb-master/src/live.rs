//! Live playback through the audio subsystem.

use sb_audio::AudioBackend;
use sb_engine::RenderEngine;
use tracing::{info, warn};

use crate::error::PlayerError;
use crate::events::{EventReceiver, PlayerEvent};
use crate::mode::OutputStrategy;
use crate::session::RenderSession;

/// Hands the engine to the audio subsystem, which pulls buffers on its own
/// schedule, and waits for a quit event.
pub struct LivePlayback<B> {
    backend: B,
}

impl<B: AudioBackend> LivePlayback<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: AudioBackend> OutputStrategy for LivePlayback<B> {
    fn run<E>(self, session: &mut RenderSession, engine: E, events: &EventReceiver) -> Result<(), PlayerError>
    where
        E: RenderEngine + Send + 'static,
    {
        let faults = events.sender();
        let handle = self.backend.start(session.format(), engine, move |fault| {
            faults.send(PlayerEvent::Fault(fault));
        })?;
        info!("live playback started");

        let result = match events.wait() {
            PlayerEvent::Quit => Ok(()),
            PlayerEvent::Fault(fault) => {
                warn!(%fault, "stopping live playback");
                Err(fault.into())
            }
        };
        drop(handle);
        info!("live playback stopped");
        result
    }
}
