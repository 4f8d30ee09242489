//! Shared frequency counter and comparator.
//!
//! The four period counters (tone C, B, A and the low 12 bits of the
//! envelope) circulate through an eight-stage ring, two stages per slot, and
//! pass a single incrementer. The envelope owns a second four-stage-per-cycle
//! ring for its upper four bits. A counter is cleared when its compare fires,
//! and the envelope counter is also cleared by a retrigger.

use super::latch::Latch;

const RING_STAGES: usize = 8;
const LOW_MASK: u16 = 0x0FFF;
const LOW_CARRY: u16 = 0x1000;

#[derive(Debug, Clone, Default)]
pub struct FrequencyComparator {
    /// Low 12-bit counters
    ring: [u16; RING_STAGES],
    /// High 4-bit envelope counter
    ring_hi: [u8; RING_STAGES],
    /// Period of the slot being compared
    period: u16,
    /// High nibble of that period, held for the next phase-zero compare
    period_hi: u8,
    /// Low compare result, held for the next phase-zero compare
    low_match: bool,
    /// Carry into the high ring
    hi_carry: bool,
    /// Counter clear for the high ring
    hi_clear: bool,
    /// A tone compare fired (or reset)
    tone_clear: bool,
    /// Envelope retrigger reload
    reload: bool,
    /// Slot history: last slot was the envelope
    env_slot: Latch<bool>,
    /// Low compare history, newest in bit 0
    low_history: Latch<u32>,
    /// Full envelope compare history, newest in bit 0
    env_history: Latch<u8>,
}

impl FrequencyComparator {
    /// Full envelope compare from two cycles back, consumed as the step
    /// strobe of the envelope counter.
    #[inline]
    pub fn envelope_step(&self) -> bool {
        self.env_history.q & 0b100 != 0
    }

    /// Low compare results of the last three slots (tone C, B, A when read on
    /// the envelope slot).
    #[inline]
    pub fn tone_matches(&self) -> u8 {
        (self.low_history.d & 0b111) as u8
    }

    pub fn phase_zero(&mut self, on_envelope: bool, period: u16) {
        self.period = period;

        let next = self.ring[7] + 1;
        let carry = next & LOW_CARRY != 0;
        self.ring[0] = next & LOW_MASK;
        self.ring[4] = self.ring[3];
        self.ring[6] = self.ring[5];

        self.low_history.sample();

        self.ring_hi[1] = self.ring_hi[0];
        self.ring_hi[3] = self.ring_hi[2];
        self.ring_hi[5] = self.ring_hi[4];
        self.ring_hi[7] = self.ring_hi[6];

        let hi_match = !self.reload
            && (self.period_hi as i32 - self.low_match as i32) < self.ring_hi[0] as i32;
        self.hi_carry = on_envelope && carry;
        self.env_slot.d = on_envelope;
        self.env_history.d = (self.env_history.q << 1) | hi_match as u8;

        let clear = self.tone_clear || ((hi_match || self.reload) && self.env_slot.q);
        self.ring[2] = if clear { 0 } else { self.ring[1] };
        self.hi_clear = clear;
    }

    pub fn phase_one(&mut self, ic: bool, retrigger: bool) {
        self.ring[1] = self.ring[0];
        self.ring[3] = self.ring[2];
        self.ring[5] = self.ring[4];
        self.ring[7] = self.ring[6];

        let low_match = (self.period & LOW_MASK) <= self.ring[0];
        self.low_match = low_match;
        self.period_hi = ((self.period >> 12) & 0xF) as u8;
        self.low_history.d = (self.low_history.q << 1) | low_match as u32;

        let next = self.ring_hi[7] + self.hi_carry as u8;
        self.ring_hi[0] = next & 0xF;
        self.ring_hi[2] = if self.hi_clear { 0 } else { self.ring_hi[1] };
        self.ring_hi[4] = self.ring_hi[3];
        self.ring_hi[6] = self.ring_hi[5];

        self.env_slot.sample();
        self.tone_clear = (!self.env_slot.d && low_match) || ic;
        self.reload = self.env_slot.d && retrigger;
        self.env_history.sample();
    }
}
