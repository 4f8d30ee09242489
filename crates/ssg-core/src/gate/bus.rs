//! Host bus pins and the address/data latches behind them.

use crate::registers::READ_MASKS;

/// Pin levels driven by the host.
///
/// Strobes are active-low as on the package: `cs`, `rd` and `wr` are
/// asserted when `false`, and the chip is held in reset while `ic_n` is
/// `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusPins {
    /// Chip select (active low)
    pub cs: bool,
    /// Read strobe (active low)
    pub rd: bool,
    /// Write strobe (active low)
    pub wr: bool,
    /// Initial clear (active low reset)
    pub ic_n: bool,
    /// Test pin; low freezes the noise generator
    pub test: bool,
    /// Address lines
    pub address: u8,
    /// Data lines
    pub data: u8,
}

/// Strobes decoded from the pins for the current half-cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusCycle {
    /// Reset is asserted
    pub ic: bool,
    /// Register write strobe (also raised by reset)
    pub write: bool,
    /// Register read strobe
    pub read: bool,
}

/// Bus interface: pins, data latch, internal data bus and address latch.
#[derive(Debug, Clone, Default)]
pub struct BusInterface {
    pins: BusPins,
    data_latch: u8,
    internal: u8,
    address: Option<u8>,
    read_active: bool,
    readback: u8,
}

impl BusInterface {
    /// Pin levels currently driven
    pub fn pins(&self) -> &BusPins {
        &self.pins
    }

    /// Mutable access to the pins
    pub fn pins_mut(&mut self) -> &mut BusPins {
        &mut self.pins
    }

    /// Whether chip select is released
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pins.cs
    }

    /// Drive a write cycle onto the pins.
    pub fn drive_write(&mut self, addr: u8, value: u8) {
        self.pins.cs = false;
        self.pins.rd = true;
        self.pins.wr = false;
        self.pins.address = addr;
        self.pins.data = value;
    }

    /// Drive a read cycle onto the pins.
    pub fn drive_read(&mut self) {
        self.pins.cs = false;
        self.pins.rd = false;
        self.pins.wr = true;
    }

    /// Decode the strobes and update the data and address latches.
    pub fn decode(&mut self) -> BusCycle {
        let ic = !self.pins.ic_n;
        let selected = !self.pins.cs;
        let read = !ic && !self.pins.rd && selected;
        let write = !self.pins.wr && selected;

        if write {
            self.data_latch = self.pins.data;
        }
        if !read && !ic {
            self.internal = self.data_latch;
        }

        if ic {
            self.address = None;
        } else if write {
            self.address = Some(self.pins.address & 0x1F);
        }

        self.read_active = read;
        BusCycle {
            ic,
            write: (!ic && write) || ic,
            read,
        }
    }

    /// Value on the internal data bus
    #[inline]
    pub fn internal(&self) -> u8 {
        self.internal
    }

    /// Latched register address, if one has been loaded since reset
    #[inline]
    pub fn latched_address(&self) -> Option<u8> {
        self.address
    }

    /// Drive a register onto the internal bus during a read cycle.
    ///
    /// Only the register's implemented bits are driven; the rest keep the
    /// bus's previous charge.
    pub fn drive_register(&mut self, reg: usize, value: u8) {
        let mask = READ_MASKS[reg];
        self.internal = (self.internal & !mask) | (value & mask);
    }

    /// Update the output drivers and end the host cycle on phase one.
    pub fn finish(&mut self, end_of_cycle: bool) {
        self.readback = if self.read_active { self.internal } else { 0 };
        if end_of_cycle {
            self.pins.cs = true;
        }
    }

    /// Byte driven on the data pins
    #[inline]
    pub fn readback(&self) -> u8 {
        self.readback
    }
}
