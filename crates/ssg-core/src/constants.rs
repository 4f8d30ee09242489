//! SSG Hardware Constants
//!
//! Volume curves, their fixed-point renderings and timing figures shared by
//! both backends.

/// Number of tone channels
pub const NUM_CHANNELS: usize = 3;

/// Number of addressable registers (R0-R15)
pub const NUM_REGISTERS: usize = 16;

/// Full cycles between two visits of the shared comparator to the same slot
pub const CYCLES_PER_SLOT_VISIT: u32 = 4;

/// Envelope steps in one ramp (5-bit counter)
pub const ENVELOPE_STEPS: usize = 32;

/// Maximal sequence length of the 17-bit noise LFSR
pub const NOISE_LFSR_PERIOD: u32 = (1 << 17) - 1;

/// Native output value that a normalized AY-3-8910 curve value of 1.0 maps to
pub const AY8910_FULL_SCALE: u16 = 11806;

/// Native output value that a normalized YM2149 curve value of 1.0 maps to
pub const YM2149_FULL_SCALE: u16 = 10922;

/// AY-3-8910 DAC curve, normalized. The AY only has 16 distinct steps, so
/// every value appears twice in the 5-bit index space.
pub const AY8910_VOLUME_CURVE: [f32; 32] = [
    0.0000, 0.0000, 0.0106, 0.0106, 0.0150, 0.0150, 0.0222, 0.0222, 0.0320, 0.0320, 0.0466,
    0.0466, 0.0665, 0.0665, 0.1039, 0.1039, 0.1237, 0.1237, 0.1986, 0.1986, 0.2803, 0.2803,
    0.3548, 0.3548, 0.4702, 0.4702, 0.6030, 0.6030, 0.7530, 0.7530, 0.9250, 0.9250,
];

/// YM2149 DAC curve, normalized (32 distinct steps).
pub const YM2149_VOLUME_CURVE: [f32; 32] = [
    0.0000, 0.0000, 0.0049, 0.0075, 0.0105, 0.0131, 0.0156, 0.0183, 0.0228, 0.0276, 0.0321,
    0.0367, 0.0448, 0.0535, 0.0626, 0.0713, 0.0884, 0.1057, 0.1225, 0.1392, 0.1691, 0.2013,
    0.2348, 0.2670, 0.3307, 0.3951, 0.4573, 0.5196, 0.6316, 0.7528, 0.8787, 1.0000,
];

/// `AY8910_VOLUME_CURVE * AY8910_FULL_SCALE`, each `f32` product truncated.
pub const AY8910_VOLUME_TABLE: [u16; 32] = [
    0, 0, 125, 125, 177, 177, 262, 262, 377, 377, 550, 550, 785, 785, 1226, 1226, 1460, 1460,
    2344, 2344, 3309, 3309, 4188, 4188, 5551, 5551, 7119, 7119, 8889, 8889, 10920, 10920,
];

/// `YM2149_VOLUME_CURVE * YM2149_FULL_SCALE`, each `f32` product truncated.
pub const YM2149_VOLUME_TABLE: [u16; 32] = [
    0, 0, 53, 81, 114, 143, 170, 199, 249, 301, 350, 400, 489, 584, 683, 778, 965, 1154, 1337,
    1520, 1846, 2198, 2564, 2916, 3611, 4315, 4994, 5675, 6898, 8222, 9597, 10922,
];

/// 5-bit volume index for a fixed 4-bit channel level.
#[inline]
pub fn fixed_level_index(level: u8) -> u8 {
    ((level & 0x0F) << 1) | 1
}
