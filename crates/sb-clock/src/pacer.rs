//! Fixed-period pacing for self-timed output.

use crate::{delay_micros, now_micros};

/// Keeps a loop running at a fixed period against [`now_micros`].
///
/// Deadlines advance by exactly one period per call, so a late iteration is
/// followed by shorter waits until the schedule is caught up.
#[derive(Clone, Debug)]
pub struct Pacer {
    period: u32,
    next: u64,
}

impl Pacer {
    /// Create a pacer whose first deadline is one period from now.
    pub fn new(period_micros: u32) -> Self {
        Self {
            period: period_micros,
            next: now_micros() + u64::from(period_micros),
        }
    }

    pub fn period_micros(&self) -> u32 {
        self.period
    }

    /// Block until the current deadline, then schedule the next one.
    ///
    /// If the schedule has fallen more than one period behind it is reset
    /// rather than replayed in a burst.
    pub fn wait(&mut self) {
        let now = now_micros();
        if self.next > now {
            delay_micros((self.next - now).min(u64::from(self.period)) as u32);
            self.next += u64::from(self.period);
        } else if now - self.next > u64::from(self.period) {
            self.next = now + u64::from(self.period);
        } else {
            self.next += u64::from(self.period);
        }
    }
}
