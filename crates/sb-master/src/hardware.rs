//! Direct chip hardware output.

use sb_engine::RenderEngine;
use tracing::{info, warn};

use crate::error::PlayerError;
use crate::events::{EventReceiver, PlayerEvent};
use crate::mode::OutputStrategy;
use crate::session::RenderSession;

/// Steps the engine one quantum at a time; the engine writes the chip
/// registers and keeps real time itself. Runs until a quit event.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectHardware;

impl OutputStrategy for DirectHardware {
    fn run<E>(self, session: &mut RenderSession, mut engine: E, events: &EventReceiver) -> Result<(), PlayerError>
    where
        E: RenderEngine + Send + 'static,
    {
        info!("driving hardware directly");
        loop {
            engine.advance_quantum();
            session.record_quantum();
            if let Some(fault) = engine.take_fault() {
                warn!(%fault, "stopping hardware output");
                return Err(fault.into());
            }

            match events.poll() {
                Some(PlayerEvent::Quit) => break,
                Some(PlayerEvent::Fault(fault)) => {
                    warn!(%fault, "stopping hardware output");
                    return Err(fault.into());
                }
                None => {}
            }
        }
        info!(quanta = session.summary().quanta, "hardware output stopped");
        Ok(())
    }
}
