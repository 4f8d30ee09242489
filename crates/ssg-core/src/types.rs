//! Small shared value types: clock phase, channel index, chip variant and
//! envelope shape bits.

use std::fmt;

use bitflags::bitflags;

use crate::constants::{
    AY8910_FULL_SCALE, AY8910_VOLUME_TABLE, YM2149_FULL_SCALE, YM2149_VOLUME_TABLE,
};

/// One half of the non-overlapping two-phase clock.
///
/// Callers alternate `Zero`, `One`, `Zero`, ... ; each pair is one chip cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// First half-cycle (the "clk1" strobe is active)
    #[default]
    Zero,
    /// Second half-cycle (the "clk2" strobe is active)
    One,
}

impl Phase {
    /// Build a phase from the low bit of a clock line value.
    #[inline]
    pub fn from_bit(bit: u8) -> Self {
        if bit & 1 == 0 {
            Phase::Zero
        } else {
            Phase::One
        }
    }

    /// The phase that must follow this one.
    #[inline]
    pub fn next(self) -> Self {
        match self {
            Phase::Zero => Phase::One,
            Phase::One => Phase::Zero,
        }
    }
}

/// Tone channel of the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Channel A (registers 0/1, level 8, mode bits 0 and 3)
    A = 0,
    /// Channel B (registers 2/3, level 9, mode bits 1 and 4)
    B = 1,
    /// Channel C (registers 4/5, level 10, mode bits 2 and 5)
    C = 2,
}

impl Channel {
    /// All channels in register order.
    pub const ALL: [Channel; 3] = [Channel::A, Channel::B, Channel::C];

    /// Channel for an index 0..=2.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Index used for per-channel arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::A => write!(f, "A"),
            Channel::B => write!(f, "B"),
            Channel::C => write!(f, "C"),
        }
    }
}

bitflags! {
    /// Chip variant mask passed to `set_type`.
    ///
    /// Only bit 0 is decoded: set selects the AY-3-8910 volume curve, clear
    /// selects the YM2149 curve. Other bits are kept but ignored.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChipType: u8 {
        /// General Instrument AY-3-8910 volume curve
        const AY8910 = 0b0000_0001;
        const _ = !0;
    }
}

impl ChipType {
    /// Yamaha YM2149 (the empty mask)
    pub const YM2149: ChipType = ChipType::empty();

    /// Whether the AY-3-8910 curve is selected.
    #[inline]
    pub fn is_ay(self) -> bool {
        self.contains(ChipType::AY8910)
    }

    /// Volume lookup table for this variant, indexed by the 5-bit level.
    #[inline]
    pub fn volume_table(self) -> &'static [u16; 32] {
        if self.is_ay() {
            &AY8910_VOLUME_TABLE
        } else {
            &YM2149_VOLUME_TABLE
        }
    }

    /// Scale that maps a normalized curve value of 1.0 to native units.
    #[inline]
    pub fn full_scale(self) -> u16 {
        if self.is_ay() {
            AY8910_FULL_SCALE
        } else {
            YM2149_FULL_SCALE
        }
    }
}

bitflags! {
    /// Envelope shape register (R13) bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShapeBits: u8 {
        /// Keep cycling after the first ramp
        const CONTINUE = 0b1000;
        /// First ramp rises instead of falling
        const ATTACK = 0b0100;
        /// Reverse direction at every ramp boundary
        const ALTERNATE = 0b0010;
        /// Freeze after the first ramp
        const HOLD = 0b0001;
    }
}

impl ShapeBits {
    /// Decode the low nibble of a shape register value.
    #[inline]
    pub fn from_register(value: u8) -> Self {
        ShapeBits::from_bits_truncate(value & 0x0F)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_alternation() {
        assert_eq!(Phase::Zero.next(), Phase::One);
        assert_eq!(Phase::One.next(), Phase::Zero);
        assert_eq!(Phase::from_bit(0), Phase::Zero);
        assert_eq!(Phase::from_bit(3), Phase::One);
    }

    #[test]
    fn test_chip_type_selects_table() {
        assert!(!ChipType::YM2149.is_ay());
        assert!(ChipType::from_bits_retain(0x81).is_ay());
        assert_eq!(ChipType::AY8910.full_scale(), 11806);
        assert_eq!(ChipType::YM2149.full_scale(), 10922);
        assert_eq!(ChipType::YM2149.volume_table()[31], 10922);
    }

    #[test]
    fn test_shape_bits_ignore_high_nibble() {
        let shape = ShapeBits::from_register(0xFA);
        assert!(shape.contains(ShapeBits::CONTINUE | ShapeBits::ALTERNATE));
        assert!(!shape.contains(ShapeBits::ATTACK));
        assert!(!shape.contains(ShapeBits::HOLD));
    }

    #[test]
    fn test_channel_indexing() {
        assert_eq!(Channel::from_index(2), Some(Channel::C));
        assert_eq!(Channel::from_index(3), None);
        assert_eq!(Channel::B.index(), 1);
    }
}
