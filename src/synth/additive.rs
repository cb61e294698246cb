use std::f64::consts::TAU;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{synth::harmonics::HarmonicVector, FREQ, SR};

/*
Additive Synthesis
==================

Additive synthesis builds a timbre by summing sine waves ("partials") at
integer multiples of a fundamental frequency. Each partial gets its own
volume, so the harmonic vector is literally the recipe of the sound.

With a 440 Hz fundamental the ten partials sit at:
  harmonic 1 (fundamental):  440 Hz
  harmonic 2 (1st overtone): 880 Hz
  harmonic 3 (2nd overtone): 1320 Hz
  ...
  harmonic 10 (9th overtone): 4400 Hz

The Sum
-------

    sample[i] = amp * Σ_j volume[j] * sin(2π * freq * (j + 1) * i / sr)

    amp = 1 / Σ_j volume[j]      (0 when every volume is 0)

`amp` makes the *volumes* add up to 1, it does not normalize the peak. For
non-negative volumes |sample| <= 1 by the triangle inequality, and the bound
is only reached if every partial peaks at the same instant, so most mixes
play quieter than full scale. Volumes outside the slider range (negative ones
in particular) break the bound; `SampleBuffer::peak` reports the result and
nothing is clipped here.

An all-zero vector would divide by zero. Instead `amp` becomes 0 and the
buffer is silence.

Buffer Length
-------------

The buffer holds `sr` samples (one second), not one cycle. A 440 Hz cycle at
48 kHz is 48000 / 440 ≈ 109.09 samples, so the buffer is not a whole number
of cycles in samples. It is looped as-is. Whether the wrap point lines up in
phase depends only on whether `freq` completes whole cycles in one second:
440 Hz does, a fractional frequency passed through `SynthParams` does not and
clicks once per loop.

Precision
---------

Phases are computed in f64 (`i * freq * k` reaches ~2e8 radians for the top
partial) and the mixed sample is stored as f32, the format audio devices take.
*/

/// Sample rate and fundamental used by [`synthesize_with`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthParams {
    /// Samples per second; also the buffer length.
    pub sample_rate: u32,
    /// Fundamental frequency in Hz.
    pub frequency: f32,
}

impl SynthParams {
    pub fn sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn frequency(mut self, frequency: f32) -> Self {
        self.frequency = frequency;
        self
    }
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            sample_rate: SR,
            frequency: FREQ,
        }
    }
}

/// One second of synthesized stereo audio. Both channels hold the same samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    sample_rate: u32,
    left: Vec<f32>,
    right: Vec<f32>,
}

impl SampleBuffer {
    /// Build a stereo buffer by duplicating a mono signal.
    pub fn from_mono(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            right: samples.clone(),
            left: samples,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Frames per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    pub fn left(&self) -> &[f32] {
        &self.left
    }

    pub fn right(&self) -> &[f32] {
        &self.right
    }

    /// Channel by index: 0 is left, 1 is right.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        match index {
            0 => Some(&self.left),
            1 => Some(&self.right),
            _ => None,
        }
    }

    /// Largest absolute sample value across both channels.
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(self.right.iter())
            .fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }
}

/// Synthesize one second at the default 48 kHz / 440 Hz.
pub fn synthesize(volumes: &HarmonicVector) -> SampleBuffer {
    synthesize_with(volumes, SynthParams::default())
}

/// Mix the ten harmonics of `params.frequency` into a `params.sample_rate`-long buffer.
pub fn synthesize_with(volumes: &HarmonicVector, params: SynthParams) -> SampleBuffer {
    let started = Instant::now();

    let sum: f64 = volumes.iter().map(|&v| v as f64).sum();
    let amp = if sum == 0.0 { 0.0 } else { 1.0 / sum };

    let sr = params.sample_rate as f64;
    let freq = params.frequency as f64;

    let samples: Vec<f32> = (0..params.sample_rate)
        .map(|i| {
            let t = i as f64 / sr;
            let value: f64 = volumes
                .iter()
                .enumerate()
                .map(|(j, &volume)| {
                    let partial = freq * (j + 1) as f64;
                    (t * partial * TAU).sin() * volume as f64 * amp
                })
                .sum();
            value as f32
        })
        .collect();

    let buffer = SampleBuffer::from_mono(params.sample_rate, samples);
    log::debug!(
        "synthesized {} samples at {} Hz in {:?} (peak {:.3})",
        buffer.len(),
        params.frequency,
        started.elapsed(),
        buffer.peak()
    );
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_spans_one_second() {
        let buffer = synthesize(&HarmonicVector::default());
        assert_eq!(buffer.len(), SR as usize);
        assert_eq!(buffer.right().len(), SR as usize);
        assert_eq!(buffer.sample_rate(), SR);
    }

    #[test]
    fn valid_sine() {
        let buffer = synthesize(&HarmonicVector::fundamental());

        // sample n should be sin(2pi f n / sr)
        for sample_index in [0usize, 1, 12, 109, 24_000, 47_999] {
            let expected = (TAU * 440.0 * sample_index as f64 / 48_000.0).sin() as f32;
            let actual = buffer.left()[sample_index];
            assert!(
                (actual - expected).abs() < 1e-6,
                "sample {sample_index}: expected {expected}, got {actual}"
            );
        }
    }

    #[test]
    fn silence_when_every_volume_is_zero() {
        let buffer = synthesize(&HarmonicVector::silent());
        assert!(buffer.left().iter().all(|&s| s == 0.0));
        assert!(buffer.right().iter().all(|&s| s == 0.0));
        assert_eq!(buffer.peak(), 0.0);
    }

    #[test]
    fn normalizes_by_volume_sum() {
        // A lone second harmonic at half volume still comes out at full scale.
        let mut volumes = HarmonicVector::silent();
        volumes[1] = 0.5;
        let buffer = synthesize(&volumes);
        let i = 7;
        let expected = (TAU * 880.0 * i as f64 / 48_000.0).sin() as f32;
        assert!((buffer.left()[i] - expected).abs() < 1e-6);
    }

    #[test]
    fn params_change_rate_and_pitch() {
        let params = SynthParams::default().sample_rate(8_000).frequency(100.0);
        let buffer = synthesize_with(&HarmonicVector::fundamental(), params);
        assert_eq!(buffer.len(), 8_000);
        assert_eq!(buffer.sample_rate(), 8_000);
        // Quarter cycle of 100 Hz at 8 kHz is sample 20.
        assert!((buffer.left()[20] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn channel_lookup() {
        let buffer = SampleBuffer::from_mono(4, vec![0.0, 0.5, -0.75, 0.25]);
        assert_eq!(buffer.channel(0), Some(buffer.left()));
        assert_eq!(buffer.channel(1), Some(buffer.right()));
        assert_eq!(buffer.channel(2), None);
        assert_eq!(buffer.peak(), 0.75);
    }
}
