//! Test doubles for the engine and audio subsystem.

#![allow(dead_code)]

use sb_audio::{AudioBackend, AudioError};
use sb_engine::{AudioFormat, EngineFault, RenderEngine};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Call counters shared between a test and the engine it handed out.
#[derive(Clone, Default)]
pub struct Calls {
    fills: Arc<AtomicUsize>,
    quanta: Arc<AtomicUsize>,
}

impl Calls {
    pub fn fills(&self) -> usize {
        self.fills.load(Ordering::SeqCst)
    }

    pub fn quanta(&self) -> usize {
        self.quanta.load(Ordering::SeqCst)
    }
}

/// Engine that writes a byte ramp and counts every call.
pub struct ProbeEngine {
    calls: Calls,
    next: u8,
    fault_after_fills: Option<usize>,
    fault_after_quanta: Option<usize>,
    faulted: bool,
}

impl ProbeEngine {
    pub fn new() -> (Self, Calls) {
        let calls = Calls::default();
        let engine = Self {
            calls: calls.clone(),
            next: 0,
            fault_after_fills: None,
            fault_after_quanta: None,
            faulted: false,
        };
        (engine, calls)
    }

    pub fn fault_after_fills(mut self, n: usize) -> Self {
        self.fault_after_fills = Some(n);
        self
    }

    pub fn fault_after_quanta(mut self, n: usize) -> Self {
        self.fault_after_quanta = Some(n);
        self
    }
}

impl RenderEngine for ProbeEngine {
    fn fill_buffer(&mut self, buf: &mut [u8]) {
        self.calls.fills.fetch_add(1, Ordering::SeqCst);
        for b in buf {
            *b = self.next;
            self.next = self.next.wrapping_add(1);
        }
    }

    fn advance_quantum(&mut self) {
        self.calls.quanta.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(1));
    }

    fn take_fault(&mut self) -> Option<EngineFault> {
        if self.faulted {
            return None;
        }
        let hit = |limit: Option<usize>, count: usize| limit.is_some_and(|n| count >= n);
        if hit(self.fault_after_fills, self.calls.fills()) || hit(self.fault_after_quanta, self.calls.quanta()) {
            self.faulted = true;
            return Some(EngineFault("probe fault".into()));
        }
        None
    }
}

/// Audio subsystem that pulls from the engine on a plain thread every millisecond.
#[derive(Clone, Default)]
pub struct FakeBackend {
    fail: bool,
    started: Arc<AtomicBool>,
    released: Arc<AtomicBool>,
}

impl FakeBackend {
    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    pub fn started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> bool {
        self.released.load(Ordering::SeqCst)
    }
}

pub struct FakeHandle {
    stop: Arc<AtomicBool>,
    released: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        self.released.store(true, Ordering::SeqCst);
    }
}

impl AudioBackend for FakeBackend {
    type Handle = FakeHandle;

    fn start<E, F>(&self, format: AudioFormat, mut engine: E, mut on_fault: F) -> Result<FakeHandle, AudioError>
    where
        E: RenderEngine + Send + 'static,
        F: FnMut(EngineFault) + Send + 'static,
    {
        if self.fail {
            return Err(AudioError::NoDevice);
        }
        self.started.store(true, Ordering::SeqCst);

        let stop = Arc::new(AtomicBool::new(false));
        let running = stop.clone();
        let period = vec![0u8; 64 * format.bytes_per_frame() as usize];
        let thread = thread::spawn(move || {
            let mut buf = period;
            let mut faulted = false;
            while !running.load(Ordering::SeqCst) {
                if !faulted {
                    engine.fill_buffer(&mut buf);
                    if let Some(fault) = engine.take_fault() {
                        faulted = true;
                        on_fault(fault);
                    }
                }
                thread::sleep(Duration::from_millis(1));
            }
        });

        Ok(FakeHandle {
            stop,
            released: self.released.clone(),
            thread: Some(thread),
        })
    }
}

/// Send a quit event from another thread after `ms` milliseconds.
pub fn quit_after(events: &sb_master::EventReceiver, ms: u64) -> JoinHandle<()> {
    let sender = events.sender();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(ms));
        sender.quit();
    })
}
