//! Rotating selector that time-shares the comparator.
//!
//! One slot is visited per full cycle, in the order tone C, tone B, tone A,
//! envelope. A new rotation only starts after the envelope slot (or from an
//! empty selector), and never while reset is asserted.

use super::latch::Latch;
use crate::types::Channel;

/// Generator the comparator serves this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Channel C tone counter
    ToneC,
    /// Channel B tone counter
    ToneB,
    /// Channel A tone counter
    ToneA,
    /// Envelope period counter
    Envelope,
}

impl Slot {
    /// Tone channel served by this slot
    pub fn channel(self) -> Option<Channel> {
        match self {
            Slot::ToneA => Some(Channel::A),
            Slot::ToneB => Some(Channel::B),
            Slot::ToneC => Some(Channel::C),
            Slot::Envelope => None,
        }
    }
}

/// Slot that follows `current`.
#[inline]
pub fn advance(current: Option<Slot>, ic: bool) -> Option<Slot> {
    match current {
        Some(Slot::ToneC) => Some(Slot::ToneB),
        Some(Slot::ToneB) => Some(Slot::ToneA),
        Some(Slot::ToneA) => Some(Slot::Envelope),
        Some(Slot::Envelope) | None if ic => None,
        Some(Slot::Envelope) | None => Some(Slot::ToneC),
    }
}

/// Selector register
#[derive(Debug, Clone, Copy, Default)]
pub struct Selector {
    slot: Latch<Option<Slot>>,
}

impl Selector {
    /// Slot driving the comparator this cycle
    #[inline]
    pub fn current(&self) -> Option<Slot> {
        self.slot.q
    }

    #[inline]
    pub fn phase_zero(&mut self, ic: bool) {
        self.slot.d = advance(self.slot.q, ic);
    }

    #[inline]
    pub fn phase_one(&mut self) {
        self.slot.sample();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_order() {
        let mut slot = None;
        let mut seen = Vec::new();
        for _ in 0..8 {
            slot = advance(slot, false);
            seen.push(slot);
        }
        assert_eq!(
            seen,
            vec![
                Some(Slot::ToneC),
                Some(Slot::ToneB),
                Some(Slot::ToneA),
                Some(Slot::Envelope),
                Some(Slot::ToneC),
                Some(Slot::ToneB),
                Some(Slot::ToneA),
                Some(Slot::Envelope),
            ]
        );
    }

    #[test]
    fn test_reset_blocks_new_rotation() {
        assert_eq!(advance(None, true), None);
        assert_eq!(advance(Some(Slot::Envelope), true), None);
        // A rotation already in flight keeps going
        assert_eq!(advance(Some(Slot::ToneB), true), Some(Slot::ToneA));
    }

    #[test]
    fn test_selector_updates_on_phase_one() {
        let mut sel = Selector::default();
        sel.phase_zero(false);
        assert_eq!(sel.current(), None);
        sel.phase_one();
        assert_eq!(sel.current(), Some(Slot::ToneC));
    }

    #[test]
    fn test_slot_channels() {
        assert_eq!(Slot::ToneA.channel(), Some(Channel::A));
        assert_eq!(Slot::Envelope.channel(), None);
    }
}
