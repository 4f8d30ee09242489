//! Gate-accurate SSG core
//!
//! Every call to [`GateSsg::clock`] evaluates one half-cycle of the chip's
//! logic in silicon order: bus decode, register latch, then the phase-zero
//! or phase-one half of each unit, then the shift register, then the
//! combinational outputs. Units keep their two-phase storage in
//! [`latch::Latch`] pairs, so a value computed in one phase is only seen by
//! the next stage in the following phase.

mod bus;
mod comparator;
mod envelope;
mod latch;
mod noise;
mod selector;
mod tone;

use std::collections::VecDeque;

use self::bus::{BusCycle, BusInterface};
use self::comparator::FrequencyComparator;
use self::envelope::EnvelopeUnit;
use self::noise::NoiseUnit;
use self::tone::ToneSigns;
use crate::backend::SsgBackend;
use crate::constants::{NUM_CHANNELS, NUM_REGISTERS};
use crate::mixer::Mixer;
use crate::registers::RegisterFile;
use crate::types::{ChipType, Phase};

pub use self::noise::{lfsr_output, lfsr_step};
pub use self::selector::Slot;
use self::selector::Selector;

/// Queued writes at which the backlog is compacted to one write per register
pub const MAX_PENDING_WRITES: usize = 1024;

/// Gate-accurate AY-3-8910/YM2149 SSG
#[derive(Clone, Debug)]
pub struct GateSsg {
    bus: BusInterface,
    registers: RegisterFile,
    selector: Selector,
    comparator: FrequencyComparator,
    tones: ToneSigns,
    envelope: EnvelopeUnit,
    noise: NoiseUnit,
    mixer: Mixer,
    chip_type: ChipType,
    gpio_input: [u8; 2],
    pending: VecDeque<(u8, u8)>,
    expected_phase: Phase,
    envelope_level: u8,
    analog: [u16; NUM_CHANNELS],
}

impl GateSsg {
    /// Create a chip and run the power-on sequence (YM2149 curve)
    pub fn new() -> Self {
        Self::with_chip_type(ChipType::YM2149)
    }

    /// Create a chip with the given volume curve
    pub fn with_chip_type(chip_type: ChipType) -> Self {
        let mut chip = Self {
            bus: BusInterface::default(),
            registers: RegisterFile::new(),
            selector: Selector::default(),
            comparator: FrequencyComparator::default(),
            tones: ToneSigns::default(),
            envelope: EnvelopeUnit::default(),
            noise: NoiseUnit::default(),
            mixer: Mixer::new(),
            chip_type,
            gpio_input: [0; 2],
            pending: VecDeque::new(),
            expected_phase: Phase::Zero,
            envelope_level: 0,
            analog: [0; NUM_CHANNELS],
        };
        chip.reset();
        chip
    }

    /// Slot the comparator serves in the current cycle
    pub fn selector_slot(&self) -> Option<Slot> {
        self.selector.current()
    }

    /// Writes queued but not yet driven onto the bus
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// Drive the active-low reset pin directly.
    ///
    /// While held low the chip clears its registers from the internal bus,
    /// clears the tone signs and the shift register, and arms an envelope
    /// retrigger. [`SsgBackend::reset`] runs the full power-on sequence.
    pub fn set_reset_pin(&mut self, high: bool) {
        self.bus.pins_mut().ic_n = high;
    }

    /// Keep only the newest queued value of each register, in the order the
    /// registers were first queued.
    fn compact_pending(&mut self) {
        let mut latest = [None; NUM_REGISTERS];
        for &(addr, value) in &self.pending {
            latest[addr as usize] = Some(value);
        }
        let before = self.pending.len();
        let mut kept = VecDeque::with_capacity(NUM_REGISTERS);
        for &(addr, _) in &self.pending {
            if let Some(value) = latest[addr as usize].take() {
                kept.push_back((addr, value));
            }
        }
        log::warn!(
            "SSG write backlog of {before} compacted to {} writes",
            kept.len()
        );
        self.pending = kept;
    }

    fn full_cycle(&mut self) {
        self.clock(Phase::Zero);
        self.clock(Phase::One);
    }

    fn latch_register(&mut self, cycle: BusCycle) {
        if cycle.ic {
            self.registers.fill(self.bus.internal());
            self.envelope.arm();
            return;
        }
        if !cycle.write {
            return;
        }
        if let Some(addr) = self.bus.latched_address() {
            if (addr as usize) < NUM_REGISTERS {
                let value = self.bus.internal();
                log::trace!("SSG R{addr} <- {value:#04x}");
                if self.registers.store(addr, value) {
                    self.envelope.arm();
                }
            }
        }
    }

    fn drive_read(&mut self, cycle: BusCycle) {
        if !cycle.read {
            return;
        }
        if let Some(addr) = self.bus.latched_address() {
            if (addr as usize) < NUM_REGISTERS {
                let value = self.registers.bus_value(addr, self.gpio_input);
                self.bus.drive_register(addr as usize, value);
            }
        }
    }

    fn phase_zero(&mut self, ic: bool) {
        let slot = self.selector.current();
        let on_envelope = slot == Some(Slot::Envelope);

        self.envelope
            .phase_zero(on_envelope, self.comparator.envelope_step());
        self.selector.phase_zero(ic);

        let period = match slot {
            Some(Slot::Envelope) => self.registers.envelope_period(),
            Some(tone) => tone
                .channel()
                .map_or(0, |channel| self.registers.tone_period(channel)),
            None => 0,
        };
        self.comparator.phase_zero(on_envelope, period);
        self.tones
            .phase_zero(on_envelope, self.comparator.tone_matches());
        self.noise.phase_zero(
            slot == Some(Slot::ToneC),
            self.registers.noise_period(),
            self.bus.pins().test,
        );
    }

    fn phase_one(&mut self, ic: bool) {
        self.envelope.phase_one(self.registers.shape());
        self.selector.phase_one();
        self.comparator
            .phase_one(ic, self.envelope.retrigger_seen());
        self.tones.phase_one(ic);
        self.noise.phase_one();
    }

    fn update_outputs(&mut self) {
        self.envelope_level = self.envelope.level(self.registers.shape());
        self.analog = self.mixer.mix(
            &self.registers,
            self.envelope_level,
            self.tones.signs(),
            self.noise.output(),
            self.chip_type,
        );
    }
}

impl Default for GateSsg {
    fn default() -> Self {
        Self::new()
    }
}

impl SsgBackend for GateSsg {
    fn reset(&mut self) {
        log::debug!("SSG gate core reset (chip type {:?})", self.chip_type);

        self.bus = BusInterface::default();
        self.registers = RegisterFile::new();
        self.selector = Selector::default();
        self.comparator = FrequencyComparator::default();
        self.tones = ToneSigns::default();
        self.envelope = EnvelopeUnit::default();
        self.noise = NoiseUnit::default();
        self.gpio_input = [0; 2];
        self.pending.clear();
        self.expected_phase = Phase::Zero;
        self.envelope_level = 0;
        self.analog = [0; NUM_CHANNELS];

        self.bus.pins_mut().test = true;
        self.set_reset_pin(true);
        self.full_cycle();
        self.set_reset_pin(false);
        self.full_cycle();
        self.set_reset_pin(true);
        self.full_cycle();
        self.bus.pins_mut().cs = true;
    }

    /// Queue a register write.
    ///
    /// Writes are driven onto the bus one per cycle, at the start of the
    /// next phase-zero call with the bus idle, and are latched by the end of
    /// that cycle. A host that outruns the bus until [`MAX_PENDING_WRITES`]
    /// are queued loses the intermediate values: the backlog is reduced to
    /// the newest value of each register.
    fn write_register(&mut self, addr: u8, value: u8) {
        log::trace!("SSG queue R{} <- {value:#04x}", addr & 0x0F);
        self.pending.push_back((addr & 0x0F, value));
        if self.pending.len() >= MAX_PENDING_WRITES {
            self.compact_pending();
        }
    }

    fn read_register(&self, addr: u8) -> u8 {
        self.registers.read(addr)
    }

    fn clock(&mut self, phase: Phase) {
        debug_assert_eq!(
            phase, self.expected_phase,
            "clock phases must alternate Zero, One, Zero, ..."
        );
        self.expected_phase = phase.next();

        if phase == Phase::Zero && self.bus.is_idle() {
            if let Some((addr, value)) = self.pending.pop_front() {
                self.bus.drive_write(addr, value);
            }
        }

        let cycle = self.bus.decode();
        self.envelope.acknowledge();
        self.latch_register(cycle);
        self.drive_read(cycle);

        match phase {
            Phase::Zero => self.phase_zero(cycle.ic),
            Phase::One => self.phase_one(cycle.ic),
        }

        self.noise.shift(cycle.ic);
        if phase == Phase::One {
            self.noise.sample_output();
        }

        self.update_outputs();
        self.bus.finish(phase == Phase::One);
    }

    fn set_chip_type(&mut self, chip: ChipType) {
        log::debug!("SSG chip type {chip:?}");
        self.chip_type = chip;
    }

    fn chip_type(&self) -> ChipType {
        self.chip_type
    }

    fn analog_output(&self) -> [u16; NUM_CHANNELS] {
        self.analog
    }

    fn set_channel_mute(&mut self, channel: usize, mute: bool) {
        log::debug!("SSG channel {channel} mute={mute}");
        self.mixer.set_mute(channel, mute);
    }

    fn is_channel_muted(&self, channel: usize) -> bool {
        self.mixer.is_muted(channel)
    }

    fn begin_read(&mut self) {
        self.bus.drive_read();
    }

    fn data_bus_readback(&self) -> u8 {
        self.bus.readback()
    }

    fn set_gpio_input(&mut self, port: usize, value: u8) {
        if let Some(pins) = self.gpio_input.get_mut(port) {
            *pins = value;
        }
    }

    fn gpio_output(&self) -> [u8; 2] {
        self.registers.gpio_output()
    }

    fn set_test_pin(&mut self, high: bool) {
        self.bus.pins_mut().test = high;
    }

    fn envelope_level(&self) -> u8 {
        self.envelope_level
    }

    fn tone_signs(&self) -> u8 {
        self.tones.signs()
    }

    fn noise_output(&self) -> bool {
        self.noise.output()
    }
}
