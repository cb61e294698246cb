//! Additive synthesis of the ten-harmonic timbre.
//!
//! Everything here is a pure function of its input: no audio device, no
//! drawing surface. The runtime layer decides when to call it.

/// Harmonic sum into a one-second stereo buffer.
pub mod additive;
/// The ten-element volume vector and its labels.
pub mod harmonics;
/// Built-in instrument presets.
pub mod preset;

pub use additive::{synthesize, synthesize_with, SampleBuffer, SynthParams};
pub use harmonics::{clamp_volume, harmonic_label, HarmonicVector, ParseHarmonicsError, HARMONIC_COUNT};
pub use preset::{Preset, PRESETS};
