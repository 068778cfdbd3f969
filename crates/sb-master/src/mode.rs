//! Output strategy selection.

use sb_audio::AudioBackend;
use sb_engine::RenderEngine;
use tracing::debug;

use crate::config::PlayerConfig;
use crate::error::PlayerError;
use crate::events::EventReceiver;
use crate::file_render::FileRender;
use crate::hardware::DirectHardware;
use crate::live::LivePlayback;
use crate::session::{ModeKind, RenderSession};

/// One way of getting audio out of the engine.
pub trait OutputStrategy {
    /// Drive `engine` until the output is complete or a quit event arrives.
    fn run<E>(self, session: &mut RenderSession, engine: E, events: &EventReceiver) -> Result<(), PlayerError>
    where
        E: RenderEngine + Send + 'static;
}

/// The strategy chosen for a session, fixed once resolved.
pub enum OutputMode<B> {
    FileRender(FileRender),
    DirectHardware(DirectHardware),
    LivePlayback(LivePlayback<B>),
}

impl<B: AudioBackend> OutputMode<B> {
    /// Pick the strategy from `config`: an output file wins over the hardware
    /// flag, which wins over live playback.
    ///
    /// All format parameters are validated here, before any sink is opened.
    pub fn resolve(config: &PlayerConfig, backend: B) -> Result<Self, PlayerError> {
        let format = config.audio_format()?;
        let mode = if let Some(path) = &config.outfile {
            OutputMode::FileRender(FileRender::new(path.clone(), format, config.time)?)
        } else if config.hardware {
            OutputMode::DirectHardware(DirectHardware)
        } else {
            OutputMode::LivePlayback(LivePlayback::new(backend))
        };
        debug!(mode = %mode.kind(), ?format, "output mode resolved");
        Ok(mode)
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            OutputMode::FileRender(_) => ModeKind::FileRender,
            OutputMode::DirectHardware(_) => ModeKind::DirectHardware,
            OutputMode::LivePlayback(_) => ModeKind::LivePlayback,
        }
    }
}

impl<B: AudioBackend> OutputStrategy for OutputMode<B> {
    fn run<E>(self, session: &mut RenderSession, engine: E, events: &EventReceiver) -> Result<(), PlayerError>
    where
        E: RenderEngine + Send + 'static,
    {
        match self {
            OutputMode::FileRender(s) => s.run(session, engine, events),
            OutputMode::DirectHardware(s) => s.run(session, engine, events),
            OutputMode::LivePlayback(s) => s.run(session, engine, events),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sb_audio::AudioError;
    use sb_engine::{AudioFormat, EngineFault};
    use std::path::PathBuf;

    struct NoBackend;

    impl AudioBackend for NoBackend {
        type Handle = ();

        fn start<E, F>(&self, _: AudioFormat, _: E, _: F) -> Result<(), AudioError>
        where
            E: RenderEngine + Send + 'static,
            F: FnMut(EngineFault) + Send + 'static,
        {
            Err(AudioError::NoDevice)
        }
    }

    fn resolve(config: &PlayerConfig) -> ModeKind {
        OutputMode::resolve(config, NoBackend).unwrap().kind()
    }

    #[test]
    fn live_playback_is_the_default() {
        assert_eq!(resolve(&PlayerConfig::default()), ModeKind::LivePlayback);
    }

    #[test]
    fn hardware_flag_selects_direct_hardware() {
        let config = PlayerConfig { hardware: true, ..Default::default() };
        assert_eq!(resolve(&config), ModeKind::DirectHardware);
    }

    #[test]
    fn output_file_wins_over_hardware() {
        let config = PlayerConfig {
            outfile: Some(PathBuf::from("out.wav")),
            hardware: true,
            ..Default::default()
        };
        assert_eq!(resolve(&config), ModeKind::FileRender);
    }

    #[test]
    fn invalid_format_fails_every_mode() {
        for (outfile, hardware) in [(Some(PathBuf::from("out.wav")), false), (None, true), (None, false)] {
            let config = PlayerConfig { samplerate: 0, outfile, hardware, ..Default::default() };
            assert!(matches!(
                OutputMode::resolve(&config, NoBackend),
                Err(PlayerError::Config(_))
            ));
        }
    }
}
