//! Built-in timbres approximating acoustic instruments.

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::synth::harmonics::HarmonicVector;

/// A named harmonic recipe. Presets are read-only; applying one copies its
/// volumes into the live vector.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub label: &'static str,
    pub volumes: HarmonicVector,
}

pub const PRESETS: [Preset; 3] = [
    Preset {
        label: "Violin",
        volumes: HarmonicVector::new([1.0, 0.45, 0.12, 0.32, 0.19, 0.19, 0.67, 0.22, 0.0, 0.0]),
    },
    Preset {
        label: "Clarinet",
        // Odd harmonics dominate, like a cylindrical bore.
        volumes: HarmonicVector::new([0.5, 0.0, 1.0, 0.3, 0.0, 0.07, 0.0, 0.0, 0.0, 0.0]),
    },
    Preset {
        label: "Sine",
        volumes: HarmonicVector::fundamental(),
    },
];

impl Preset {
    /// Look up a built-in preset by label, ignoring case.
    pub fn find(label: &str) -> Option<&'static Preset> {
        PRESETS.iter().find(|p| p.label.eq_ignore_ascii_case(label))
    }
}
