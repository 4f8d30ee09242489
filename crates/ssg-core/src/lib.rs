//! AY-3-8910 / YM2149 SSG emulator
//!
//! A gate-level model of the AY-3-8910/YM2149 programmable sound generator,
//! driven by an external two-phase clock. Register latches, the shared
//! frequency comparator, the noise shift register and the envelope state
//! machine are evaluated half-cycle by half-cycle in the order the silicon
//! does, so output is bit-identical for any given sequence of writes and
//! clock phases.
//!
//! # Features
//! - Gate-accurate core ([`GateSsg`]) with bus protocol, GPIO ports and test pin
//! - Sample-accurate core ([`SampleSsg`]) behind the same [`SsgBackend`] trait
//! - AY-3-8910 and YM2149 volume curves in native fixed-point units
//! - Per-channel mute that never touches generator state
//! - JSON configuration ([`SsgConfig`])
//!
//! # Quick start
//! ```
//! use ssg::{GateSsg, SsgBackend};
//!
//! let mut chip = GateSsg::new();
//! chip.write_register(0x00, 100); // Tone A period low
//! chip.write_register(0x07, 0x3E); // Mode: tone A only
//! chip.write_register(0x08, 0x0F); // Level A
//!
//! // Each cycle is a Phase::Zero then a Phase::One call
//! chip.run_cycles(3200);
//! let [a, b, c] = chip.analog_output();
//! assert_eq!((b, c), (0, 0));
//! assert!(a == 0 || a == 10922);
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod config;
pub mod constants;
pub mod gate;
pub mod mixer;
pub mod registers;
pub mod sample;
pub mod tables;
pub mod types;

/// Error types for SSG configuration and construction
///
/// Chip emulation itself never fails: out-of-range inputs are masked the way
/// the hardware masks them.
#[derive(thiserror::Error, Debug)]
pub enum SsgError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Malformed JSON configuration
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for SsgError {
    /// Converts a String into `SsgError::Other`.
    ///
    /// Prefer `SsgError::ConfigError(msg)` for configuration problems.
    fn from(msg: String) -> Self {
        SsgError::Other(msg)
    }
}

impl From<&str> for SsgError {
    /// Converts a string slice into `SsgError::Other`.
    fn from(msg: &str) -> Self {
        SsgError::Other(msg.to_string())
    }
}

/// Result type for SSG operations
pub type Result<T> = std::result::Result<T, SsgError>;

// Public API exports
pub use backend::SsgBackend;
pub use config::{ChipModel, Fidelity, SsgConfig};
pub use gate::{lfsr_step, GateSsg, Slot};
pub use mixer::Mixer;
pub use registers::{Register, RegisterFile};
pub use sample::SampleSsg;
pub use types::{Channel, ChipType, Phase, ShapeBits};
