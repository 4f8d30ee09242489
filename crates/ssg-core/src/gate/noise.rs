//! Noise divider and shift register.
//!
//! A 6-bit divider counts tone C slot visits; its low bit halves the rate, so
//! the LFSR steps once every `2 * max(N, 1)` visits. The shift register
//! shifts while the step strobe is low and commits its new value on the
//! strobe.

use super::latch::Latch;

/// Width of the modelled shift register
const LFSR_MASK: u32 = 0x7F_FFFF;
/// Bits that take part in the sequence
const LFSR_SEQUENCE_MASK: u32 = 0x1_FFFF;

/// Advance the noise shift register by one bit.
///
/// Feedback is bit 16 XOR bit 13; an all-zero sequence part feeds a one so
/// the register cannot lock up. The low 17 bits run through all 2^17 - 1
/// non-zero states.
#[inline]
pub fn lfsr_step(state: u32) -> u32 {
    let mut bit = ((state >> 16) ^ (state >> 13)) & 1;
    if state & LFSR_SEQUENCE_MASK == 0 {
        bit = 1;
    }
    ((state << 1) | bit) & LFSR_MASK
}

/// Output bit of a shift register state
#[inline]
pub fn lfsr_output(state: u32) -> bool {
    (state >> 16) & 1 != 0
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoiseUnit {
    divider: Latch<u8>,
    count: bool,
    low_bit: bool,
    step: bool,
    lfsr: Latch<u32>,
    output: bool,
}

impl NoiseUnit {
    /// Noise bit fed to the mixer
    #[inline]
    pub fn output(&self) -> bool {
        self.output
    }

    pub fn phase_zero(&mut self, on_tone_c: bool, period: u8, test: bool) {
        self.count = on_tone_c;
        self.divider.sample();
        let elapsed = period <= self.divider.d >> 1;
        self.step = (elapsed && self.low_bit) || !test;
    }

    pub fn phase_one(&mut self) {
        self.divider.d = if self.step {
            0
        } else {
            (self.divider.q + self.count as u8) & 0x3F
        };
        self.low_bit = self.divider.q & 1 != 0 && self.count;
    }

    /// Shift register update, run on both phases.
    #[inline]
    pub fn shift(&mut self, ic: bool) {
        if !self.step {
            self.lfsr.d = lfsr_step(self.lfsr.q);
        } else {
            self.lfsr.q = if ic { 0 } else { self.lfsr.d };
        }
    }

    /// Latch the output bit (phase one).
    #[inline]
    pub fn sample_output(&mut self) {
        self.output = lfsr_output(self.lfsr.q);
    }
}
