//! Backend trait abstraction for SSG implementations
//!
//! Both the gate-accurate core and the cheaper sample-accurate model are
//! driven through this interface, so a host can pick the fidelity it needs
//! at construction time.

use crate::constants::{NUM_CHANNELS, NUM_REGISTERS};
use crate::types::{ChipType, Phase};

/// Common interface for SSG backends
///
/// Time only advances through [`SsgBackend::clock`]. Callers alternate
/// `Phase::Zero` and `Phase::One`; each pair is one chip cycle. Calling the
/// phases out of order is a caller bug and trips a debug assertion.
///
/// # Example
///
/// ```
/// use ssg::{GateSsg, Phase, SsgBackend};
///
/// fn play_note<B: SsgBackend>(chip: &mut B) {
///     chip.write_register(0x00, 0x64); // Channel A period low
///     chip.write_register(0x07, 0x3E); // Mode: tone A only
///     chip.write_register(0x08, 0x0F); // Channel A level
///
///     chip.clock(Phase::Zero);
///     chip.clock(Phase::One);
///     let _outputs = chip.analog_output();
/// }
///
/// play_note(&mut GateSsg::new());
/// ```
pub trait SsgBackend: Send {
    /// Run the power-on sequence.
    ///
    /// Clears registers and generator state. Chip type and channel mutes
    /// survive a reset.
    fn reset(&mut self);

    /// Write to a register
    ///
    /// # Arguments
    ///
    /// * `addr` - Register address, masked to 4 bits
    /// * `value` - Register value, masked to the register's width
    fn write_register(&mut self, addr: u8, value: u8);

    /// Read the latched value of a register (address masked to 4 bits).
    fn read_register(&self, addr: u8) -> u8;

    /// Write all 16 registers in address order
    fn load_registers(&mut self, regs: &[u8; NUM_REGISTERS]) {
        for (addr, &value) in regs.iter().enumerate() {
            self.write_register(addr as u8, value);
        }
    }

    /// Dump all 16 latched registers
    fn dump_registers(&self) -> [u8; NUM_REGISTERS] {
        let mut regs = [0u8; NUM_REGISTERS];
        for (addr, reg) in regs.iter_mut().enumerate() {
            *reg = self.read_register(addr as u8);
        }
        regs
    }

    /// Advance one half-cycle
    fn clock(&mut self, phase: Phase);

    /// Run `cycles` full chip cycles
    fn run_cycles(&mut self, cycles: usize) {
        for _ in 0..cycles {
            self.clock(Phase::Zero);
            self.clock(Phase::One);
        }
    }

    /// Select the volume curve (bit 0 set = AY-3-8910)
    fn set_chip_type(&mut self, chip: ChipType);

    /// Currently selected chip variant
    fn chip_type(&self) -> ChipType;

    /// Per-channel output magnitude in native units
    fn analog_output(&self) -> [u16; NUM_CHANNELS];

    /// Get individual channel outputs
    ///
    /// # Returns
    ///
    /// Tuple of (channel_a, channel_b, channel_c), each `analog / full_scale`
    fn get_channel_outputs(&self) -> (f32, f32, f32) {
        let scale = self.chip_type().full_scale() as f32;
        let [a, b, c] = self.analog_output();
        (a as f32 / scale, b as f32 / scale, c as f32 / scale)
    }

    /// Mean of the three normalized channel outputs
    fn get_sample(&self) -> f32 {
        let (a, b, c) = self.get_channel_outputs();
        (a + b + c) / NUM_CHANNELS as f32
    }

    /// Mute or unmute a channel
    ///
    /// Muting only forces the channel's output to the table's zero entry;
    /// generator state keeps running.
    ///
    /// # Arguments
    ///
    /// * `channel` - Channel index (0=A, 1=B, 2=C)
    /// * `mute` - true to mute, false to unmute
    fn set_channel_mute(&mut self, channel: usize, mute: bool);

    /// Check if a channel is muted
    fn is_channel_muted(&self, channel: usize) -> bool;

    /// Start a bus read cycle of the last latched address.
    ///
    /// The value shows up in [`SsgBackend::data_bus_readback`] during the
    /// next full cycle.
    fn begin_read(&mut self);

    /// Byte driven on the data bus during the last half-cycle (0 when idle)
    fn data_bus_readback(&self) -> u8;

    /// Drive the input pins of GPIO port 0 (A) or 1 (B)
    fn set_gpio_input(&mut self, port: usize, value: u8);

    /// Output latches of GPIO ports A and B
    fn gpio_output(&self) -> [u8; 2];

    /// Drive the test pin. Low freezes the noise generator.
    fn set_test_pin(&mut self, high: bool);

    /// Current envelope level (0-31)
    fn envelope_level(&self) -> u8;

    /// Internal tone signs, bit 0 = A, bit 1 = B, bit 2 = C
    fn tone_signs(&self) -> u8;

    /// Internal noise output bit
    fn noise_output(&self) -> bool;
}
