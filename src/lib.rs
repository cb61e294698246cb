pub mod io; // Audio sink and drawing surface interfaces
pub mod runtime; // Controller and realtime loop playback
pub mod synth; // Additive synthesis of harmonic partials

/// Sample rate of the synthesized buffer (Hz). The buffer holds one second.
pub const SR: u32 = 48_000;
/// Fundamental frequency of the synthesized tone (Hz).
pub const FREQ: f32 = 440.0;
/// Width of the waveform surface in pixels; also the number of samples drawn.
pub const WIDTH: u32 = 480;
/// Height of the waveform surface in pixels.
pub const HEIGHT: u32 = 120;
