//! Tone sign register for the three channels.
//!
//! The comparator's low-compare history is applied to all three signs at
//! once, on the cycle the selector reaches the envelope slot.

use super::latch::Latch;

#[derive(Debug, Clone, Copy, Default)]
pub struct ToneSigns {
    sign: Latch<u8>,
    toggle: u8,
}

impl ToneSigns {
    /// Current signs, bit 0 = A, bit 1 = B, bit 2 = C
    #[inline]
    pub fn signs(&self) -> u8 {
        self.sign.d
    }

    #[inline]
    pub fn phase_zero(&mut self, on_envelope: bool, matches: u8) {
        self.toggle = if on_envelope { matches & 0b111 } else { 0 };
        self.sign.sample();
    }

    #[inline]
    pub fn phase_one(&mut self, ic: bool) {
        self.sign.d = if ic { 0 } else { self.sign.q ^ self.toggle };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_only_on_envelope_slot() {
        let mut tones = ToneSigns::default();
        tones.phase_zero(false, 0b111);
        tones.phase_one(false);
        assert_eq!(tones.signs(), 0);

        tones.phase_zero(true, 0b101);
        tones.phase_one(false);
        assert_eq!(tones.signs(), 0b101);

        tones.phase_zero(true, 0b001);
        tones.phase_one(false);
        assert_eq!(tones.signs(), 0b100);
    }

    #[test]
    fn test_reset_clears_signs() {
        let mut tones = ToneSigns::default();
        tones.phase_zero(true, 0b111);
        tones.phase_one(false);
        tones.phase_zero(true, 0b000);
        tones.phase_one(true);
        assert_eq!(tones.signs(), 0);
    }
}
