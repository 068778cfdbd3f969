//! Destination for direct chip register writes.

use tracing::{debug, trace};

/// A write-only chip register bank (a hardware card, or a stand-in).
pub trait RegisterPort: Send {
    fn write(&mut self, register: u8, value: u8);
}

/// Port that only traces the writes it receives.
#[derive(Debug, Default)]
pub struct LogPort {
    writes: u64,
}

impl LogPort {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Drop for LogPort {
    fn drop(&mut self) {
        debug!(writes = self.writes, "register port closed");
    }
}

impl RegisterPort for LogPort {
    fn write(&mut self, register: u8, value: u8) {
        self.writes += 1;
        trace!(register, value, "register write");
    }
}
