//! Quit and fault notifications delivered to the output loop.

use sb_engine::EngineFault;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerEvent {
    /// Stop output and return
    Quit,
    /// The engine cannot continue
    Fault(EngineFault),
}

/// Cloneable handle for posting events from any thread.
#[derive(Clone, Debug)]
pub struct EventSender(Sender<PlayerEvent>);

impl EventSender {
    pub fn send(&self, event: PlayerEvent) {
        // The receiver is gone once the session has ended; nothing to notify.
        let _ = self.0.send(event);
    }

    pub fn quit(&self) {
        self.send(PlayerEvent::Quit);
    }
}

/// Receiving end, owned by the thread running the output loop.
#[derive(Debug)]
pub struct EventReceiver {
    rx: Receiver<PlayerEvent>,
    tx: EventSender,
}

impl EventReceiver {
    /// Next pending event, without blocking.
    pub fn poll(&self) -> Option<PlayerEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(PlayerEvent::Quit),
        }
    }

    /// Block until an event arrives.
    pub fn wait(&self) -> PlayerEvent {
        self.rx.recv().unwrap_or(PlayerEvent::Quit)
    }

    /// A sender feeding this receiver, e.g. for an audio callback thread.
    pub fn sender(&self) -> EventSender {
        self.tx.clone()
    }
}

pub fn event_channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::channel();
    let tx = EventSender(tx);
    (tx.clone(), EventReceiver { rx, tx })
}
