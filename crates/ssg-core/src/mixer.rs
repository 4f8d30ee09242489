//! Channel mixer and output stage
//!
//! Combines each channel's tone bit, the shared noise bit and the R7 disable
//! bits into a gate, then maps the selected level through the chip variant's
//! volume table. Both backends share this stage.

use crate::constants::{fixed_level_index, NUM_CHANNELS};
use crate::registers::RegisterFile;
use crate::types::{Channel, ChipType};

/// Per-channel mixer state
#[derive(Clone, Debug, Default)]
pub struct ChannelState {
    /// User mute flag
    pub muted: bool,
}

/// Audio mixer and output stage
#[derive(Clone, Debug, Default)]
pub struct Mixer {
    /// Per-channel state
    pub channels: [ChannelState; NUM_CHANNELS],
}

impl Mixer {
    /// Create a new mixer
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate equation for one channel.
    ///
    /// `tone_bit` and `noise_bit` are the active-high generator terms; a
    /// disabled term is forced high.
    #[inline]
    pub fn output_high(
        tone_disabled: bool,
        tone_bit: bool,
        noise_disabled: bool,
        noise_bit: bool,
    ) -> bool {
        (tone_disabled || tone_bit) && (noise_disabled || noise_bit)
    }

    /// 5-bit volume index a level register selects.
    #[inline]
    pub fn volume_index(level_reg: u8, envelope_level: u8) -> u8 {
        if level_reg & 0x10 != 0 {
            envelope_level & 0x1F
        } else {
            fixed_level_index(level_reg)
        }
    }

    /// Compute the three analog outputs in native units.
    ///
    /// # Arguments
    ///
    /// * `regs` - Latched register file (mode and level registers)
    /// * `envelope_level` - Shared envelope level (0-31)
    /// * `tone_signs` - Internal tone signs, bit 0 = A, bit 1 = B, bit 2 = C
    /// * `noise` - Internal noise output
    /// * `chip` - Volume curve selection
    ///
    /// The internal signs and noise output are active-low: the generator term
    /// fed to the gate is their complement.
    #[inline]
    pub fn mix(
        &self,
        regs: &RegisterFile,
        envelope_level: u8,
        tone_signs: u8,
        noise: bool,
        chip: ChipType,
    ) -> [u16; NUM_CHANNELS] {
        let table = chip.volume_table();
        let mut out = [table[0]; NUM_CHANNELS];
        for channel in Channel::ALL {
            let i = channel.index();
            let high = Self::output_high(
                regs.tone_disabled(channel),
                tone_signs & (1 << i) == 0,
                regs.noise_disabled(channel),
                !noise,
            );
            if high && !self.channels[i].muted {
                out[i] = table[Self::volume_index(regs.level(channel), envelope_level) as usize];
            }
        }
        out
    }

    /// Set mute state for a channel
    #[inline]
    pub fn set_mute(&mut self, channel: usize, muted: bool) {
        if channel < NUM_CHANNELS {
            self.channels[channel].muted = muted;
        }
    }

    /// Check if channel is muted
    #[inline]
    pub fn is_muted(&self, channel: usize) -> bool {
        self.channels.get(channel).is_some_and(|c| c.muted)
    }
}
