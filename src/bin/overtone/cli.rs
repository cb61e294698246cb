//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{eyre, Result as EyreResult};
use overtone::{
    synth::{HarmonicVector, Preset},
    FREQ,
};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "overtone")]
#[command(about = "Mix ten harmonics, hear the tone, watch the waveform", long_about = None)]
pub struct Args {
    /// Start from a built-in preset: violin, clarinet, sine
    #[arg(long, value_name = "NAME", conflicts_with = "volumes")]
    pub preset: Option<String>,

    /// Start from ten comma-separated volumes, e.g. 1,0.5,0,0,0,0,0,0,0,0
    #[arg(long, value_name = "LIST")]
    pub volumes: Option<HarmonicVector>,

    /// Fundamental frequency (Hz)
    #[arg(long, value_name = "HZ", default_value_t = FREQ, value_parser = parse_frequency)]
    pub frequency: f32,

    /// Run without opening an audio device
    #[arg(long)]
    pub mute: bool,

    /// Write log records to this file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Print the built-in presets and exit
    #[arg(long)]
    pub list_presets: bool,
}

impl Args {
    /// Starting harmonic vector: explicit volumes, a preset, or a pure sine.
    pub fn initial_volumes(&self) -> EyreResult<HarmonicVector> {
        if let Some(volumes) = self.volumes {
            return Ok(volumes);
        }
        match &self.preset {
            Some(name) => Preset::find(name)
                .map(|p| p.volumes)
                .ok_or_else(|| eyre!("unknown preset '{name}', see --list-presets")),
            None => Ok(HarmonicVector::default()),
        }
    }
}

fn parse_frequency(s: &str) -> Result<f32, String> {
    let hz: f32 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if hz.is_finite() && hz > 0.0 {
        Ok(hz)
    } else {
        Err(format!("frequency must be positive, got {hz}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_lookup() {
        let args = Args::parse_from(["overtone", "--preset", "Clarinet"]);
        assert_eq!(args.initial_volumes().unwrap()[2], 1.0);

        let args = Args::parse_from(["overtone", "--preset", "kazoo"]);
        assert!(args.initial_volumes().is_err());
    }

    #[test]
    fn explicit_volumes() {
        let args = Args::parse_from(["overtone", "--volumes", "0,1,0,0,0,0,0,0,0,0"]);
        assert_eq!(args.initial_volumes().unwrap()[1], 1.0);
        assert!(Args::try_parse_from(["overtone", "--volumes", "1,2,3"]).is_err());
    }

    #[test]
    fn rejects_non_positive_frequency() {
        assert!(Args::try_parse_from(["overtone", "--frequency", "0"]).is_err());
        assert_eq!(Args::parse_from(["overtone"]).frequency, FREQ);
    }
}
