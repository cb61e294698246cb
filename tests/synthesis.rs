use std::f64::consts::TAU;

use overtone::{
    synth::{synthesize, HarmonicVector, PRESETS},
    SR,
};

fn sample_vectors() -> Vec<HarmonicVector> {
    let mut vectors: Vec<HarmonicVector> = PRESETS.iter().map(|p| p.volumes).collect();
    vectors.push(HarmonicVector::new([1.0; 10]));
    vectors.push(HarmonicVector::new([0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.01]));
    vectors
}

#[test]
fn channels_are_identical() {
    for volumes in sample_vectors() {
        let buffer = synthesize(&volumes);
        assert_eq!(buffer.left(), buffer.right(), "channels differ for {volumes}");
    }
}

#[test]
fn all_zero_volumes_give_exact_silence() {
    let buffer = synthesize(&HarmonicVector::silent());
    assert_eq!(buffer.len(), SR as usize);
    assert!(buffer.left().iter().chain(buffer.right()).all(|&s| s == 0.0));
}

#[test]
fn fundamental_only_is_a_sine_over_the_whole_buffer() {
    let buffer = synthesize(&HarmonicVector::new([
        1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
    ]));
    for (i, &sample) in buffer.left().iter().enumerate() {
        let expected = (TAU * 440.0 * i as f64 / 48_000.0).sin();
        assert!(
            (sample as f64 - expected).abs() < 1e-6,
            "sample {i}: expected {expected}, got {sample}"
        );
    }
}

#[test]
fn synthesis_is_deterministic() {
    for volumes in sample_vectors() {
        let a = synthesize(&volumes);
        let b = synthesize(&volumes);
        assert!(a
            .left()
            .iter()
            .zip(b.left())
            .all(|(x, y)| x.to_bits() == y.to_bits()));
    }
}

#[test]
fn slider_range_volumes_stay_within_full_scale() {
    for volumes in sample_vectors() {
        let peak = synthesize(&volumes).peak();
        assert!(peak <= 1.0 + 1e-6, "{volumes} peaked at {peak}");
        assert!(peak > 0.0);
    }
}

#[test]
fn scaling_every_volume_does_not_change_the_wave() {
    let violin = PRESETS[0].volumes;
    let mut half = violin;
    for i in 0..10 {
        half[i] = violin[i] * 0.5;
    }
    let a = synthesize(&violin);
    let b = synthesize(&half);
    for (x, y) in a.left().iter().zip(b.left()).step_by(97) {
        assert!((x - y).abs() < 1e-5);
    }
}
