//! Overtone - application builder and runner

use color_eyre::eyre::Result as EyreResult;
use overtone::{
    io::{audio::NullSink, AudioSink, PixelCanvas},
    runtime::Controller,
    synth::{HarmonicVector, SynthParams},
    HEIGHT, WIDTH,
};

use super::audio::{CpalSink, OutputInfo};
use super::ui::UiApp;

/// Main application builder
pub struct Overtone {
    volumes: HarmonicVector,
    params: SynthParams,
    mute: bool,
}

impl Overtone {
    pub fn new() -> Self {
        Self {
            volumes: HarmonicVector::default(),
            params: SynthParams::default(),
            mute: false,
        }
    }

    /// Harmonic vector to start from
    pub fn volumes(mut self, volumes: HarmonicVector) -> Self {
        self.volumes = volumes;
        self
    }

    /// Fundamental frequency in Hz
    pub fn frequency(mut self, frequency: f32) -> Self {
        self.params = self.params.frequency(frequency);
        self
    }

    /// Skip opening the audio device
    pub fn mute(mut self, mute: bool) -> Self {
        self.mute = mute;
        self
    }

    /// Run the application (takes over the terminal until quit)
    pub fn run(self) -> EyreResult<()> {
        if self.mute {
            log::info!("audio disabled by --mute");
            return self.run_with(NullSink, None);
        }

        match CpalSink::open() {
            Ok((sink, info)) => self.run_with(sink, Some(info)),
            Err(err) => {
                // Keep the editor usable without sound.
                log::warn!("audio output unavailable, continuing muted: {err:#}");
                self.run_with(NullSink, None)
            }
        }
    }

    fn run_with<A: AudioSink>(self, sink: A, output: Option<OutputInfo>) -> EyreResult<()> {
        let mut controller = Controller::new(sink)
            .with_params(self.params)
            .with_volumes(self.volumes);
        controller.mount(PixelCanvas::new(WIDTH, HEIGHT));

        let mut terminal = ratatui::init();
        let res = UiApp::new(controller, output).run(&mut terminal);
        ratatui::restore();
        res
    }
}

impl Default for Overtone {
    fn default() -> Self {
        Self::new()
    }
}
