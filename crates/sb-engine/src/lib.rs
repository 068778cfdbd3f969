//! Rendering engine contract for sidblaster.
//!
//! The orchestrator only ever talks to an engine through [`RenderEngine`]:
//! fill a PCM buffer, or advance the chip by one scheduling quantum.

mod format;
mod port;
mod tone;

pub use format::{AudioFormat, ConfigError};
pub use port::{LogPort, RegisterPort};
pub use tone::{Tune, ToneEngine, TUNES};

use thiserror::Error;

/// Fault raised by an engine that cannot continue rendering.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("engine fault: {0}")]
pub struct EngineFault(pub String);

/// Entry points of a sound-chip engine.
pub trait RenderEngine {
    /// Fill `buf` completely with PCM audio, continuing from wherever
    /// generation left off. Multi-byte samples are in native byte order.
    fn fill_buffer(&mut self, buf: &mut [u8]);

    /// Advance the chip by one quantum, writing any hardware registers.
    /// Implementations pace themselves against real time.
    fn advance_quantum(&mut self);

    /// Report a fault raised since the last call, if any.
    fn take_fault(&mut self) -> Option<EngineFault> {
        None
    }
}

impl<E: RenderEngine + ?Sized> RenderEngine for Box<E> {
    fn fill_buffer(&mut self, buf: &mut [u8]) {
        (**self).fill_buffer(buf)
    }

    fn advance_quantum(&mut self) {
        (**self).advance_quantum()
    }

    fn take_fault(&mut self) -> Option<EngineFault> {
        (**self).take_fault()
    }
}
