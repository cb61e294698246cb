//! The harmonic-volume vector that drives synthesis.

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of partials mixed by the synthesizer: the fundamental plus nine overtones.
pub const HARMONIC_COUNT: usize = 10;

/// Amplitudes of the ten harmonics. Index `i` is harmonic `i + 1`.
///
/// The vector never changes length. Values are expected in `[0, 1]`; the
/// input surfaces clamp with [`clamp_volume`] before writing, the synthesizer
/// itself accepts any finite value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicVector([f32; HARMONIC_COUNT]);

impl HarmonicVector {
    pub const fn new(volumes: [f32; HARMONIC_COUNT]) -> Self {
        Self(volumes)
    }

    /// Pure sine: fundamental at full volume, every overtone silent.
    pub const fn fundamental() -> Self {
        Self([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
    }

    pub const fn silent() -> Self {
        Self([0.0; HARMONIC_COUNT])
    }

    pub fn sum(&self) -> f32 {
        self.0.iter().sum()
    }

    pub fn as_array(&self) -> &[f32; HARMONIC_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.0.iter()
    }

    /// Overwrite every element with the matching element of `other`.
    pub fn assign(&mut self, other: &HarmonicVector) {
        self.0.copy_from_slice(&other.0);
    }
}

impl Default for HarmonicVector {
    fn default() -> Self {
        Self::fundamental()
    }
}

impl From<[f32; HARMONIC_COUNT]> for HarmonicVector {
    fn from(volumes: [f32; HARMONIC_COUNT]) -> Self {
        Self(volumes)
    }
}

impl Index<usize> for HarmonicVector {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        &self.0[index]
    }
}

impl IndexMut<usize> for HarmonicVector {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        &mut self.0[index]
    }
}

impl fmt::Display for HarmonicVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Errors from parsing a comma-separated harmonic list.
#[derive(Debug, Error, PartialEq)]
pub enum ParseHarmonicsError {
    /// Wrong number of comma-separated values.
    #[error("expected {expected} volumes, found {found}")]
    WrongLength {
        /// Number of values required.
        expected: usize,
        /// Number of values found.
        found: usize,
    },

    /// A value was not a number.
    #[error("volume {index} ('{text}') is not a number")]
    NotANumber {
        /// Position in the list.
        index: usize,
        /// The offending text.
        text: String,
    },

    /// A value was NaN or infinite.
    #[error("volume {index} is not finite")]
    NotFinite {
        /// Position in the list.
        index: usize,
    },
}

/// Parses `"1,0.45,0.12,..."`. Values are clamped to `[0, 1]` like a slider would.
impl FromStr for HarmonicVector {
    type Err = ParseHarmonicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != HARMONIC_COUNT {
            return Err(ParseHarmonicsError::WrongLength {
                expected: HARMONIC_COUNT,
                found: parts.len(),
            });
        }

        let mut volumes = [0.0; HARMONIC_COUNT];
        for (index, (slot, text)) in volumes.iter_mut().zip(parts).enumerate() {
            let value: f32 = text.parse().map_err(|_| ParseHarmonicsError::NotANumber {
                index,
                text: text.to_string(),
            })?;
            if !value.is_finite() {
                return Err(ParseHarmonicsError::NotFinite { index });
            }
            *slot = clamp_volume(value);
        }
        Ok(Self(volumes))
    }
}

/// Clamp a volume to the `[0, 1]` range the input surfaces allow.
#[inline]
pub fn clamp_volume(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Display label for a harmonic slot: "fundamental", "1st overtone", ...
pub fn harmonic_label(index: usize) -> String {
    if index == 0 {
        return "fundamental".to_string();
    }
    let suffix = match (index % 10, index % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{index}{suffix} overtone")
}
