//! Compile-time envelope waveform table for the sample-accurate backend.
//!
//! Each shape holds 128 levels: entries 0..64 are the first two ramps after
//! a trigger, entries 64..128 are the repeating part. Playback positions run
//! from -64 to 63 and wrap inside the second half, so a position maps to
//! `ENVELOPE_TABLE[shape][position + 64]`.

use crate::constants::ENVELOPE_STEPS;
use crate::types::ShapeBits;

/// Levels per shape
pub const ENVELOPE_TABLE_LEN: usize = 128;

/// Envelope level (0-31) for every shape register value and step
pub const ENVELOPE_TABLE: [[u8; ENVELOPE_TABLE_LEN]; 16] = build_envelope_table();

/// Level of a ramp at position `pos` (0-31) in the given direction.
const fn ramp(rising: bool, pos: u8) -> u8 {
    if rising {
        pos
    } else {
        31 - pos
    }
}

/// Level of `shape` after `step` envelope steps since the trigger.
pub const fn envelope_step_level(shape: u8, step: usize) -> u8 {
    let attack = shape & ShapeBits::ATTACK.bits() != 0;
    let alternate = shape & ShapeBits::ALTERNATE.bits() != 0;
    let hold = shape & ShapeBits::HOLD.bits() != 0;
    let cont = shape & ShapeBits::CONTINUE.bits() != 0;

    let ramp_index = step / ENVELOPE_STEPS;
    let pos = (step % ENVELOPE_STEPS) as u8;

    if ramp_index == 0 {
        ramp(attack, pos)
    } else if !cont {
        0
    } else if hold {
        if attack != alternate {
            31
        } else {
            0
        }
    } else {
        let flipped = alternate && ramp_index % 2 == 1;
        ramp(attack != flipped, pos)
    }
}

const fn build_envelope_table() -> [[u8; ENVELOPE_TABLE_LEN]; 16] {
    let mut table = [[0u8; ENVELOPE_TABLE_LEN]; 16];
    let mut shape = 0;
    while shape < 16 {
        let mut step = 0;
        while step < ENVELOPE_TABLE_LEN {
            table[shape][step] = envelope_step_level(shape as u8, step);
            step += 1;
        }
        shape += 1;
    }
    table
}
