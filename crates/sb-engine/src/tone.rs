//! Built-in square-wave engine.
//!
//! Plays short looping arpeggios so the player has something to render
//! without a module decoder. Register writes follow the SID voice 1 layout.

use sb_clock::Pacer;

use crate::format::AudioFormat;
use crate::port::{LogPort, RegisterPort};
use crate::RenderEngine;

/// Quanta per second (one PAL video frame each).
const QUANTUM_HZ: u32 = 50;
/// PAL chip clock used to convert note frequencies to register values.
const CHIP_CLOCK_HZ: u64 = 985_248;

const REG_FREQ_LO: u8 = 0x00;
const REG_FREQ_HI: u8 = 0x01;
const REG_CONTROL: u8 = 0x04;
const CONTROL_PULSE_GATE: u8 = 0x41;
const CONTROL_PULSE: u8 = 0x40;

/// A looping note sequence. A frequency of 0 is a rest.
#[derive(Debug)]
pub struct Tune {
    pub name: &'static str,
    pub notes: &'static [u32],
    pub quanta_per_note: u32,
}

pub const TUNES: &[Tune] = &[
    Tune {
        name: "C major arpeggio",
        notes: &[262, 330, 392, 523, 392, 330],
        quanta_per_note: 4,
    },
    Tune {
        name: "A minor broken chord",
        notes: &[220, 262, 330, 440, 0, 330, 262, 0],
        quanta_per_note: 3,
    },
    Tune {
        name: "Octave bass",
        notes: &[110, 220, 98, 196, 131, 262, 123, 247],
        quanta_per_note: 6,
    },
];

/// Square-wave voice stepping through a [`Tune`].
pub struct ToneEngine {
    format: AudioFormat,
    tune: &'static Tune,
    port: Box<dyn RegisterPort>,
    pacer: Option<Pacer>,
    /// Quanta elapsed since the tune started.
    quantum: u64,
    /// Samples rendered within the current quantum.
    quantum_samples: u32,
    samples_per_quantum: u32,
    /// Highest frequency below Nyquist for the output rate.
    max_freq: u32,
    phase: u32,
    /// Frame bytes not yet handed out by the previous `fill_buffer`.
    pending: [u8; 4],
    pending_pos: usize,
}

impl ToneEngine {
    /// Create an engine playing `tune`, with register writes going to a [`LogPort`].
    pub fn new(format: AudioFormat, tune: &'static Tune) -> Self {
        Self::with_port(format, tune, Box::new(LogPort::new()))
    }

    pub fn with_port(format: AudioFormat, tune: &'static Tune, port: Box<dyn RegisterPort>) -> Self {
        let frame_len = format.bytes_per_frame() as usize;
        Self {
            format,
            tune,
            port,
            pacer: None,
            quantum: 0,
            quantum_samples: 0,
            samples_per_quantum: (format.sample_rate() / QUANTUM_HZ).max(1),
            max_freq: (format.sample_rate() - 1) / 2,
            phase: 0,
            pending: [0; 4],
            pending_pos: frame_len,
        }
    }

    /// Frequency of the note sounding at the current quantum.
    pub fn current_note(&self) -> u32 {
        if self.tune.notes.is_empty() {
            return 0;
        }
        let step = self.quantum / u64::from(self.tune.quanta_per_note.max(1));
        self.tune.notes[(step % self.tune.notes.len() as u64) as usize]
    }

    fn next_frame(&mut self) {
        let note = self.current_note();
        let high = self.phase < u32::MAX / 2;
        // Below Nyquist the increment stays under 2^31.
        let freq = note.min(self.max_freq);
        let inc = (u64::from(freq) << 32) / u64::from(self.format.sample_rate());
        self.phase = self.phase.wrapping_add(inc as u32);

        let frame_len = self.format.bytes_per_frame() as usize;
        let sample_len = self.format.bytes_per_sample() as usize;
        let mut sample = [0u8; 2];
        if self.format.bits_per_sample() == 8 {
            sample[0] = match (note, high) {
                (0, _) => 128,
                (_, true) => 160,
                (_, false) => 96,
            };
        } else {
            let value: i16 = match (note, high) {
                (0, _) => 0,
                (_, true) => 8000,
                (_, false) => -8000,
            };
            sample = value.to_ne_bytes();
        }
        for chunk in self.pending[..frame_len].chunks_exact_mut(sample_len) {
            chunk.copy_from_slice(&sample[..sample_len]);
        }
        self.pending_pos = 0;

        self.quantum_samples += 1;
        if self.quantum_samples >= self.samples_per_quantum {
            self.quantum_samples = 0;
            self.quantum += 1;
        }
    }
}

impl RenderEngine for ToneEngine {
    fn fill_buffer(&mut self, buf: &mut [u8]) {
        let frame_len = self.format.bytes_per_frame() as usize;
        let mut pos = 0;
        while pos < buf.len() {
            if self.pending_pos == frame_len {
                self.next_frame();
            }
            let n = (buf.len() - pos).min(frame_len - self.pending_pos);
            buf[pos..pos + n].copy_from_slice(&self.pending[self.pending_pos..self.pending_pos + n]);
            self.pending_pos += n;
            pos += n;
        }
    }

    fn advance_quantum(&mut self) {
        let note = self.current_note();
        let freq = (u64::from(note) << 24) / CHIP_CLOCK_HZ;
        self.port.write(REG_FREQ_LO, freq as u8);
        self.port.write(REG_FREQ_HI, (freq >> 8) as u8);
        self.port.write(REG_CONTROL, if note == 0 { CONTROL_PULSE } else { CONTROL_PULSE_GATE });
        self.quantum += 1;

        self.pacer
            .get_or_insert_with(|| Pacer::new(1_000_000 / QUANTUM_HZ))
            .wait();
    }
}
