//! Sample-accurate SSG backend
//!
//! Same registers, mixer and output units as the gate core, but the
//! generators are plain counters stepped once per comparator visit. Register
//! writes take effect immediately and pipeline offsets are not modelled, so
//! output agrees with the gate core to within one multiplexed step.

mod generators;

pub use generators::{EnvelopeGenerator, NoiseGenerator, ToneGenerator};

use crate::backend::SsgBackend;
use crate::constants::{CYCLES_PER_SLOT_VISIT, NUM_CHANNELS};
use crate::mixer::Mixer;
use crate::registers::{Register, RegisterFile, READ_MASKS};
use crate::types::{Channel, ChipType, Phase};

/// Sample-accurate AY-3-8910/YM2149 SSG
#[derive(Clone, Debug)]
pub struct SampleSsg {
    registers: RegisterFile,
    tones: [ToneGenerator; NUM_CHANNELS],
    noise: NoiseGenerator,
    envelope: EnvelopeGenerator,
    mixer: Mixer,
    chip_type: ChipType,
    visit_phase: u32,
    expected_phase: Phase,
    test_pin: bool,
    gpio_input: [u8; 2],
    address: u8,
    bus: u8,
    read_pending: bool,
    read_active: bool,
    readback: u8,
    envelope_level: u8,
    analog: [u16; NUM_CHANNELS],
}

impl SampleSsg {
    /// Create a chip in its reset state (YM2149 curve)
    pub fn new() -> Self {
        Self::with_chip_type(ChipType::YM2149)
    }

    /// Create a chip with the given volume curve
    pub fn with_chip_type(chip_type: ChipType) -> Self {
        let mut chip = Self {
            registers: RegisterFile::new(),
            tones: Default::default(),
            noise: NoiseGenerator::new(),
            envelope: EnvelopeGenerator::new(),
            mixer: Mixer::new(),
            chip_type,
            visit_phase: 0,
            expected_phase: Phase::Zero,
            test_pin: true,
            gpio_input: [0; 2],
            address: 0,
            bus: 0,
            read_pending: false,
            read_active: false,
            readback: 0,
            envelope_level: 0,
            analog: [0; NUM_CHANNELS],
        };
        chip.reset();
        chip
    }

    fn apply_register(&mut self, reg: Register) {
        match reg {
            Register::ToneALo | Register::ToneAHi => self.apply_tone_period(Channel::A),
            Register::ToneBLo | Register::ToneBHi => self.apply_tone_period(Channel::B),
            Register::ToneCLo | Register::ToneCHi => self.apply_tone_period(Channel::C),
            Register::NoisePeriod => {
                self.noise.set_period(self.registers.noise_period() as u32);
            }
            Register::EnvelopeLo | Register::EnvelopeHi => {
                self.envelope
                    .set_period(self.registers.envelope_period() as u32);
            }
            Register::EnvelopeShape => {
                self.envelope.set_shape(self.registers.shape().bits());
            }
            Register::Mode
            | Register::LevelA
            | Register::LevelB
            | Register::LevelC
            | Register::PortA
            | Register::PortB => {}
        }
    }

    fn apply_tone_period(&mut self, channel: Channel) {
        self.tones[channel.index()].set_period(self.registers.tone_period(channel) as u32);
    }

    fn visit(&mut self) {
        for tone in &mut self.tones {
            tone.tick();
        }
        self.noise.tick(self.test_pin);
        self.envelope.tick();
    }

    fn update_outputs(&mut self) {
        self.envelope_level = self.envelope.level();
        self.analog = self.mixer.mix(
            &self.registers,
            self.envelope_level,
            self.tone_signs(),
            self.noise.output(),
            self.chip_type,
        );
    }
}

impl Default for SampleSsg {
    fn default() -> Self {
        Self::new()
    }
}

impl SsgBackend for SampleSsg {
    fn reset(&mut self) {
        log::debug!("SSG sample core reset (chip type {:?})", self.chip_type);

        self.registers = RegisterFile::new();
        self.tones = Default::default();
        self.noise = NoiseGenerator::new();
        self.envelope = EnvelopeGenerator::new();
        self.envelope.set_shape(0);
        self.visit_phase = 0;
        self.expected_phase = Phase::Zero;
        self.test_pin = true;
        self.gpio_input = [0; 2];
        self.address = 0;
        self.bus = 0;
        self.read_pending = false;
        self.read_active = false;
        self.readback = 0;
        self.update_outputs();
    }

    fn write_register(&mut self, addr: u8, value: u8) {
        let reg = Register::from_addr(addr);
        log::trace!("SSG {reg} <- {value:#04x}");
        self.address = reg.addr();
        self.bus = value;
        self.registers.store(reg.addr(), value);
        self.apply_register(reg);
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

        match phase {
            Phase::Zero => {
                self.read_active = self.read_pending;
                self.read_pending = false;
                if self.read_active {
                    let reg = self.address as usize;
                    let value = self.registers.bus_value(self.address, self.gpio_input);
                    self.bus = (self.bus & !READ_MASKS[reg]) | (value & READ_MASKS[reg]);
                }
            }
            Phase::One => {
                self.visit_phase += 1;
                if self.visit_phase == CYCLES_PER_SLOT_VISIT {
                    self.visit_phase = 0;
                    self.visit();
                }
                self.update_outputs();
            }
        }
        self.readback = if self.read_active { self.bus } else { 0 };
        if phase == Phase::One {
            self.read_active = false;
        }
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
        self.read_pending = true;
    }

    fn data_bus_readback(&self) -> u8 {
        self.readback
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
        self.test_pin = high;
    }

    fn envelope_level(&self) -> u8 {
        self.envelope_level
    }

    fn tone_signs(&self) -> u8 {
        self.tones
            .iter()
            .enumerate()
            .fold(0, |acc, (i, tone)| acc | ((tone.sign() as u8) << i))
    }

    fn noise_output(&self) -> bool {
        self.noise.output()
    }
}
