//! Output orchestrator for sidblaster.
//!
//! Chooses how a session gets its audio out (a WAV file, the chip hardware,
//! or the live audio subsystem), drives the engine for that strategy and
//! reports what happened.

mod config;
mod error;
mod events;
mod file_render;
mod hardware;
mod live;
mod mode;
mod session;

use sb_audio::AudioBackend;
use sb_engine::RenderEngine;
use tracing::info;

pub use config::PlayerConfig;
pub use error::PlayerError;
pub use events::{event_channel, EventReceiver, EventSender, PlayerEvent};
pub use file_render::{render_wav, to_little_endian, Endian, FileRender};
pub use hardware::DirectHardware;
pub use live::LivePlayback;
pub use mode::{OutputMode, OutputStrategy};
pub use session::{ModeKind, RenderSession, SessionSummary};

// Re-export common types so callers don't need the lower crates directly.
pub use sb_audio::{AudioError, CpalBackend};
pub use sb_engine::{AudioFormat, ConfigError, EngineFault};

/// Run one output session to completion.
///
/// Configuration problems are reported before any sink is opened, and sink
/// failures before the engine is first called.
pub fn run_session<E, B>(
    config: &PlayerConfig,
    engine: E,
    backend: B,
    events: &EventReceiver,
) -> Result<SessionSummary, PlayerError>
where
    E: RenderEngine + Send + 'static,
    B: AudioBackend,
{
    let mode = OutputMode::resolve(config, backend)?;
    let mut session = RenderSession::new(config.audio_format()?, mode.kind());
    mode.run(&mut session, engine, events)?;

    let summary = session.summary();
    info!(
        mode = %summary.mode,
        bytes = summary.bytes_rendered,
        quanta = summary.quanta,
        elapsed_ms = summary.elapsed_micros / 1000,
        "session finished"
    );
    Ok(summary)
}
