//! Live audio output backends for sidblaster.

mod cpal_backend;
mod traits;

pub use cpal_backend::{AudioSubsystemHandle, CpalBackend};
pub use traits::{AudioBackend, AudioError};
