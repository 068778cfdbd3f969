//! Microsecond clock and delay primitives for sidblaster.
//!
//! Hardware output has no audio callback to pace it, so the engine times
//! itself against this clock instead of the OS scheduler tick.

mod pacer;

pub use pacer::Pacer;

use std::sync::OnceLock;
use std::thread;
use std::time::{Duration, Instant};

/// Process-wide reference point for [`now_micros`].
static ORIGIN: OnceLock<Instant> = OnceLock::new();

/// Current time in microseconds since the first call in this process.
///
/// Backed by the monotonic clock, so successive readings never decrease.
pub fn now_micros() -> u64 {
    let origin = ORIGIN.get_or_init(Instant::now);
    origin.elapsed().as_micros() as u64
}

/// Block the calling thread for at least `usec` microseconds.
///
/// Intended for sub-second delays. An early wake-up is absorbed by measuring
/// the time already spent and sleeping again for the remainder.
pub fn delay_micros(usec: u32) {
    let wanted = u64::from(usec);
    let start = now_micros();
    loop {
        let elapsed = now_micros().saturating_sub(start);
        if elapsed >= wanted {
            break;
        }
        thread::sleep(Duration::from_micros(wanted - elapsed));
    }
}
