//! Bookkeeping for one output run.

use sb_engine::AudioFormat;
use std::fmt;

/// Which output strategy a session ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeKind {
    FileRender,
    DirectHardware,
    LivePlayback,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeKind::FileRender => write!(f, "file render"),
            ModeKind::DirectHardware => write!(f, "direct hardware"),
            ModeKind::LivePlayback => write!(f, "live playback"),
        }
    }
}

/// State of one output run, from strategy start to completion.
///
/// Bytes are counted only where the orchestrator moves the audio itself;
/// during live playback the audio subsystem pulls from the engine directly.
#[derive(Debug)]
pub struct RenderSession {
    format: AudioFormat,
    mode: ModeKind,
    started_at: u64,
    bytes_rendered: u64,
    quanta: u64,
}

impl RenderSession {
    pub fn new(format: AudioFormat, mode: ModeKind) -> Self {
        Self {
            format,
            mode,
            started_at: sb_clock::now_micros(),
            bytes_rendered: 0,
            quanta: 0,
        }
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn record_bytes(&mut self, count: usize) {
        self.bytes_rendered += count as u64;
    }

    pub fn record_quantum(&mut self) {
        self.quanta += 1;
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            mode: self.mode,
            format: self.format,
            bytes_rendered: self.bytes_rendered,
            quanta: self.quanta,
            elapsed_micros: sb_clock::now_micros().saturating_sub(self.started_at),
        }
    }
}

/// What a finished session did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub mode: ModeKind,
    pub format: AudioFormat,
    pub bytes_rendered: u64,
    pub quanta: u64,
    pub elapsed_micros: u64,
}

impl SessionSummary {
    /// Seconds of audio represented by `bytes_rendered`.
    pub fn audio_seconds(&self) -> f64 {
        self.bytes_rendered as f64 / self.format.bytes_per_second() as f64
    }
}
