//! Envelope counter and shape state machine.
//!
//! A 5-bit up-counter steps whenever the comparator reports a full 16-bit
//! envelope compare. Its carry out drives the shape logic: ALTERNATE flips
//! the direction, HOLD freezes the counter at 31, and any carry marks the
//! first ramp as done. The output level is derived from those bits and the
//! ATTACK/CONTINUE bits of the shape register.

use super::latch::Latch;
use crate::types::ShapeBits;

#[derive(Debug, Clone, Copy, Default)]
pub struct EnvelopeUnit {
    counter: Latch<u8>,
    direction: Latch<bool>,
    hold: Latch<bool>,
    ramp_done: Latch<bool>,
    step: bool,
    /// Retrigger request raised by a shape write or reset
    retrigger: bool,
    /// Request as seen by this cycle's logic
    retrigger_seen: bool,
    /// The slot was the envelope when the request was sampled
    seen_on_slot: bool,
    /// Request has been serviced and can be dropped
    retrigger_done: bool,
}

impl EnvelopeUnit {
    /// Raise a retrigger request.
    #[inline]
    pub fn arm(&mut self) {
        self.retrigger = true;
    }

    /// Drop the request once it has been serviced.
    #[inline]
    pub fn acknowledge(&mut self) {
        if self.retrigger_done {
            self.retrigger = false;
        }
    }

    /// Retrigger request sampled in the current cycle
    #[inline]
    pub fn retrigger_seen(&self) -> bool {
        self.retrigger_seen
    }

    pub fn phase_zero(&mut self, on_envelope: bool, compare: bool) {
        self.step = compare && on_envelope;
        self.counter.q = if self.hold.d { 31 } else { self.counter.d };
        self.direction.sample();
        self.hold.sample();
        self.ramp_done.sample();
        self.retrigger_seen = self.retrigger;
        self.seen_on_slot = on_envelope;
    }

    pub fn phase_one(&mut self, shape: ShapeBits) {
        let sum = self.counter.q + self.step as u8;
        let carry = sum & 0x20 != 0;

        if self.retrigger_seen {
            self.counter.d = 0;
            self.direction.d = false;
            self.hold.d = false;
            self.ramp_done.d = false;
        } else {
            self.counter.d = sum & 0x1F;
            self.direction.d = self.direction.q
                ^ (carry && shape.contains(ShapeBits::ALTERNATE) && !self.hold.q);
            self.hold.d = self.hold.q || (carry && shape.contains(ShapeBits::HOLD));
            self.ramp_done.d = self.ramp_done.q || carry;
        }

        self.retrigger_done = self.retrigger_seen && self.seen_on_slot;
    }

    /// Output level (0-31) for the given shape.
    pub fn level(&self, shape: ShapeBits) -> u8 {
        let mut level = if self.hold.d { 31 } else { self.counter.d };
        if self.direction.d == shape.contains(ShapeBits::ATTACK) {
            level ^= 0x1F;
        }
        if self.ramp_done.d && !shape.contains(ShapeBits::CONTINUE) {
            level = 0;
        }
        level
    }
}
