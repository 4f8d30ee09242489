//! Sound generators for the sample-accurate backend
//!
//! Closed-form counters that advance once per comparator visit (every fourth
//! chip cycle):
//! - Tone generators (3 channels)
//! - Noise generator (shared LFSR, half rate)
//! - Envelope generator (table driven)

use crate::gate::{lfsr_output, lfsr_step};
use crate::tables::{ENVELOPE_TABLE, ENVELOPE_TABLE_LEN};

/// Square-wave counter of one channel.
///
/// The sign toggles every `max(period, 1)` visits.
#[derive(Clone, Debug, Default)]
pub struct ToneGenerator {
    counter: u32,
    period: u32,
    sign: bool,
}

impl ToneGenerator {
    /// Tone generator with a cleared counter and sign
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the 12-bit period from register values
    #[inline]
    pub fn set_period(&mut self, period: u32) {
        self.period = period;
    }

    /// Current square-wave sign
    #[inline]
    pub fn sign(&self) -> bool {
        self.sign
    }

    /// Count one visit, returns the sign
    #[inline]
    pub fn tick(&mut self) -> bool {
        self.counter += 1;
        if self.counter >= self.period.max(1) {
            self.sign = !self.sign;
            self.counter = 0;
        }
        self.sign
    }
}

/// Noise generator using the 17-bit LFSR
///
/// Runs at half the visit rate; a frozen generator (test pin low) keeps
/// counting but does not shift.
#[derive(Clone, Debug, Default)]
pub struct NoiseGenerator {
    counter: u32,
    period: u32,
    lfsr: u32,
    half_tick: bool,
}

impl NoiseGenerator {
    /// Noise generator with an all-zero register
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the 5-bit divider period
    #[inline]
    pub fn set_period(&mut self, period: u32) {
        self.period = period;
    }

    /// Count one visit; the register only shifts when `running`
    #[inline]
    pub fn tick(&mut self, running: bool) {
        self.half_tick = !self.half_tick;
        if self.half_tick {
            return;
        }
        self.counter += 1;
        if self.counter >= self.period.max(1) {
            if running {
                self.lfsr = lfsr_step(self.lfsr);
            }
            self.counter = 0;
        }
    }

    /// Current output bit
    #[inline]
    pub fn output(&self) -> bool {
        lfsr_output(self.lfsr)
    }
}

/// Table-driven envelope walking one of the 16 shape waveforms
#[derive(Clone, Debug, Default)]
pub struct EnvelopeGenerator {
    counter: u32,
    period: u32,
    /// Position in the shape (-64 to 63, starts at -64 on trigger)
    position: i32,
    shape: usize,
}

impl EnvelopeGenerator {
    /// Envelope parked at the start of shape 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the 16-bit step period
    #[inline]
    pub fn set_period(&mut self, period: u32) {
        self.period = period;
    }

    /// Set the envelope shape from register R13 and restart it
    #[inline]
    pub fn set_shape(&mut self, shape: u8) {
        self.shape = (shape & 0x0F) as usize;
        self.position = -64;
        self.counter = 0;
    }

    /// Count one visit, stepping the waveform when the period elapses
    #[inline]
    pub fn tick(&mut self) {
        self.counter += 1;
        if self.counter >= self.period.max(1) {
            self.position += 1;
            if self.position > 0 {
                self.position &= 63;
            }
            self.counter = 0;
        }
    }

    /// Level (0-31) at the current waveform position
    #[inline]
    pub fn level(&self) -> u8 {
        let index = (self.position + 64) as usize;
        debug_assert!(index < ENVELOPE_TABLE_LEN, "envelope index {index} out of bounds");
        ENVELOPE_TABLE[self.shape][index]
    }
}
