//! SSG Register Definitions
//!
//! Defines the 16 registers (R0-R13, R14-R15 for I/O ports) that control
//! the chip, and the register file that holds their latched values.

use std::fmt;

use crate::constants::NUM_REGISTERS;
use crate::types::{Channel, ShapeBits};

/// Bits each register keeps when written.
pub const WRITE_MASKS: [u8; NUM_REGISTERS] = [
    0xFF, 0x0F, 0xFF, 0x0F, 0xFF, 0x0F, 0x1F, 0xFF, 0x1F, 0x1F, 0x1F, 0xFF, 0xFF, 0x0F, 0xFF, 0xFF,
];

/// Bits each register drives onto the data bus during a read cycle.
///
/// Port A only drives its low nibble; the upper bits keep whatever the bus
/// last carried.
pub const READ_MASKS: [u8; NUM_REGISTERS] = [
    0xFF, 0x0F, 0xFF, 0x0F, 0xFF, 0x0F, 0x1F, 0xFF, 0x1F, 0x1F, 0x1F, 0xFF, 0xFF, 0x0F, 0x0F, 0xFF,
];

/// SSG Register Address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// Channel A period (low byte) - R0
    ToneALo = 0x00,
    /// Channel A period (high nibble) - R1
    ToneAHi = 0x01,
    /// Channel B period (low byte) - R2
    ToneBLo = 0x02,
    /// Channel B period (high nibble) - R3
    ToneBHi = 0x03,
    /// Channel C period (low byte) - R4
    ToneCLo = 0x04,
    /// Channel C period (high nibble) - R5
    ToneCHi = 0x05,
    /// Noise period - R6
    NoisePeriod = 0x06,
    /// Tone/noise disable mask - R7
    Mode = 0x07,
    /// Channel A level - R8
    LevelA = 0x08,
    /// Channel B level - R9
    LevelB = 0x09,
    /// Channel C level - R10
    LevelC = 0x0A,
    /// Envelope period (low byte) - R11
    EnvelopeLo = 0x0B,
    /// Envelope period (high byte) - R12
    EnvelopeHi = 0x0C,
    /// Envelope shape - R13
    EnvelopeShape = 0x0D,
    /// I/O Port A - R14
    PortA = 0x0E,
    /// I/O Port B - R15
    PortB = 0x0F,
}

impl Register {
    /// Convert a raw register number to a Register (masked to 4 bits)
    pub fn from_addr(addr: u8) -> Self {
        match addr & 0x0F {
            0x00 => Register::ToneALo,
            0x01 => Register::ToneAHi,
            0x02 => Register::ToneBLo,
            0x03 => Register::ToneBHi,
            0x04 => Register::ToneCLo,
            0x05 => Register::ToneCHi,
            0x06 => Register::NoisePeriod,
            0x07 => Register::Mode,
            0x08 => Register::LevelA,
            0x09 => Register::LevelB,
            0x0A => Register::LevelC,
            0x0B => Register::EnvelopeLo,
            0x0C => Register::EnvelopeHi,
            0x0D => Register::EnvelopeShape,
            0x0E => Register::PortA,
            _ => Register::PortB,
        }
    }

    /// Get the register address value
    pub fn addr(&self) -> u8 {
        *self as u8
    }

    /// Bits kept when this register is written
    pub fn write_mask(&self) -> u8 {
        WRITE_MASKS[*self as usize]
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Register::ToneALo => write!(f, "R0 (Tone A Period Low)"),
            Register::ToneAHi => write!(f, "R1 (Tone A Period High)"),
            Register::ToneBLo => write!(f, "R2 (Tone B Period Low)"),
            Register::ToneBHi => write!(f, "R3 (Tone B Period High)"),
            Register::ToneCLo => write!(f, "R4 (Tone C Period Low)"),
            Register::ToneCHi => write!(f, "R5 (Tone C Period High)"),
            Register::NoisePeriod => write!(f, "R6 (Noise Period)"),
            Register::Mode => write!(f, "R7 (Mode)"),
            Register::LevelA => write!(f, "R8 (Level A)"),
            Register::LevelB => write!(f, "R9 (Level B)"),
            Register::LevelC => write!(f, "R10 (Level C)"),
            Register::EnvelopeLo => write!(f, "R11 (Envelope Period Low)"),
            Register::EnvelopeHi => write!(f, "R12 (Envelope Period High)"),
            Register::EnvelopeShape => write!(f, "R13 (Envelope Shape)"),
            Register::PortA => write!(f, "R14 (I/O Port A)"),
            Register::PortB => write!(f, "R15 (I/O Port B)"),
        }
    }
}

/// Latched register values.
///
/// Every store is masked to the register's width, so the file never holds
/// bits the silicon does not have.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterFile {
    registers: [u8; NUM_REGISTERS],
}

impl RegisterFile {
    /// Create a register file with every register cleared
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, masked to the register's width.
    ///
    /// Returns `true` when the store hit the envelope shape register, which
    /// retriggers the envelope.
    #[inline]
    pub fn store(&mut self, addr: u8, value: u8) -> bool {
        let reg = (addr & 0x0F) as usize;
        self.registers[reg] = value & WRITE_MASKS[reg];
        reg == Register::EnvelopeShape as usize
    }

    /// Load every register from the same bus value (reset path).
    pub fn fill(&mut self, value: u8) {
        for (reg, mask) in self.registers.iter_mut().zip(WRITE_MASKS) {
            *reg = value & mask;
        }
    }

    /// Latched value of a register
    #[inline]
    pub fn read(&self, addr: u8) -> u8 {
        self.registers[(addr & 0x0F) as usize]
    }

    /// Value a bus read cycle drives for `addr`, before merging with the bus.
    ///
    /// The I/O port registers return the input pins, not the output latch.
    #[inline]
    pub fn bus_value(&self, addr: u8, gpio_input: [u8; 2]) -> u8 {
        match Register::from_addr(addr) {
            Register::PortA => gpio_input[0],
            Register::PortB => gpio_input[1],
            reg => self.registers[reg as usize],
        }
    }

    /// 12-bit tone period for a channel
    #[inline]
    pub fn tone_period(&self, channel: Channel) -> u16 {
        let base = channel.index() * 2;
        ((self.registers[base + 1] as u16) << 8) | self.registers[base] as u16
    }

    /// 5-bit noise period
    #[inline]
    pub fn noise_period(&self) -> u8 {
        self.registers[Register::NoisePeriod as usize]
    }

    /// Mode byte (tone disable bits 0-2, noise disable bits 3-5)
    #[inline]
    pub fn mode(&self) -> u8 {
        self.registers[Register::Mode as usize]
    }

    /// Whether the tone term of a channel is forced high
    #[inline]
    pub fn tone_disabled(&self, channel: Channel) -> bool {
        self.mode() & (1 << channel.index()) != 0
    }

    /// Whether the noise term of a channel is forced high
    #[inline]
    pub fn noise_disabled(&self, channel: Channel) -> bool {
        self.mode() & (8 << channel.index()) != 0
    }

    /// 5-bit level register of a channel (bit 4 selects the envelope)
    #[inline]
    pub fn level(&self, channel: Channel) -> u8 {
        self.registers[Register::LevelA as usize + channel.index()]
    }

    /// 16-bit envelope period
    #[inline]
    pub fn envelope_period(&self) -> u16 {
        ((self.registers[Register::EnvelopeHi as usize] as u16) << 8)
            | self.registers[Register::EnvelopeLo as usize] as u16
    }

    /// Envelope shape bits
    #[inline]
    pub fn shape(&self) -> ShapeBits {
        ShapeBits::from_register(self.registers[Register::EnvelopeShape as usize])
    }

    /// Output latches of the two I/O ports
    #[inline]
    pub fn gpio_output(&self) -> [u8; 2] {
        [
            self.registers[Register::PortA as usize],
            self.registers[Register::PortB as usize],
        ]
    }

    /// Get all registers as a slice
    pub fn as_slice(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_conversion() {
        assert_eq!(Register::from_addr(0x00), Register::ToneALo);
        assert_eq!(Register::from_addr(0x0D), Register::EnvelopeShape);
        assert_eq!(Register::from_addr(0x0F), Register::PortB);
        assert_eq!(Register::from_addr(0x10), Register::ToneALo); // Should wrap
    }

    #[test]
    fn test_store_masks_to_width() {
        let mut regs = RegisterFile::new();
        regs.store(0x01, 0xFF);
        regs.store(0x06, 0xFF);
        regs.store(0x08, 0xFF);
        regs.store(0x0D, 0xFF);
        assert_eq!(regs.read(0x01), 0x0F);
        assert_eq!(regs.read(0x06), 0x1F);
        assert_eq!(regs.read(0x08), 0x1F);
        assert_eq!(regs.read(0x0D), 0x0F);
    }

    #[test]
    fn test_store_reports_shape_write() {
        let mut regs = RegisterFile::new();
        assert!(!regs.store(0x0C, 0x10));
        assert!(regs.store(0x0D, 0x0E));
        assert!(regs.store(0x1D, 0x0E));
    }

    #[test]
    fn test_composite_periods() {
        let mut regs = RegisterFile::new();
        regs.store(0x02, 0x34);
        regs.store(0x03, 0x12);
        regs.store(0x0B, 0xCD);
        regs.store(0x0C, 0xAB);
        assert_eq!(regs.tone_period(Channel::B), 0x234);
        assert_eq!(regs.envelope_period(), 0xABCD);
    }

    #[test]
    fn test_mode_bits() {
        let mut regs = RegisterFile::new();
        regs.store(0x07, 0b0011_0110);
        assert!(!regs.tone_disabled(Channel::A));
        assert!(regs.tone_disabled(Channel::B));
        assert!(!regs.noise_disabled(Channel::A));
        assert!(regs.noise_disabled(Channel::B));
        assert!(regs.noise_disabled(Channel::C));
    }

    #[test]
    fn test_bus_value_reads_port_inputs() {
        let mut regs = RegisterFile::new();
        regs.store(0x0E, 0x55);
        assert_eq!(regs.bus_value(0x0E, [0xAB, 0xCD]), 0xAB);
        assert_eq!(regs.bus_value(0x0F, [0xAB, 0xCD]), 0xCD);
        assert_eq!(regs.gpio_output(), [0x55, 0x00]);
    }
}
