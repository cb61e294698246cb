//! Controller - owns the live harmonic vector and sequences synthesis,
//! playback and drawing.
//!
//! Every mutator re-synthesizes and redraws before returning. Playback is
//! snapshot-at-start: a looping source keeps the buffer it was started with
//! until the next `play()`.

use std::sync::Arc;

use crate::{
    io::{AudioSink, Rgb, Surface},
    synth::{synthesize_with, HarmonicVector, SampleBuffer, SynthParams, HARMONIC_COUNT},
};

/// Waveform background.
pub const BACKGROUND: Rgb = Rgb::from_hex(0x040720);
/// Waveform trace colour.
pub const TRACE: Rgb = Rgb::from_hex(0x00ffff);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}

/// The single looping source the controller may hold.
struct PlaybackHandle<S> {
    id: u64,
    source: S,
}

pub struct Controller<A: AudioSink, S: Surface> {
    volumes: HarmonicVector,
    params: SynthParams,
    /// `None` until the first synthesis.
    buffer: Option<Arc<SampleBuffer>>,
    /// Bumped on every synthesis.
    generation: u64,
    sink: A,
    surface: Option<S>,
    handle: Option<PlaybackHandle<A::Source>>,
    handles_created: u64,
}

impl<A: AudioSink, S: Surface> Controller<A, S> {
    /// A stopped controller holding a pure fundamental. Nothing is synthesized
    /// until `mount` or the first mutation.
    pub fn new(sink: A) -> Self {
        Self {
            volumes: HarmonicVector::fundamental(),
            params: SynthParams::default(),
            buffer: None,
            generation: 0,
            sink,
            surface: None,
            handle: None,
            handles_created: 0,
        }
    }

    /// Synthesize with a different sample rate or fundamental.
    pub fn with_params(mut self, params: SynthParams) -> Self {
        self.params = params;
        self
    }

    /// Start from `volumes` instead of the pure fundamental.
    pub fn with_volumes(mut self, volumes: HarmonicVector) -> Self {
        self.volumes = volumes;
        self
    }

    /// Startup hook: attach the drawing surface, synthesize and draw.
    pub fn mount(&mut self, surface: S) {
        self.surface = Some(surface);
        self.regenerate();
    }

    /// Set one harmonic's volume. A playing source keeps its old buffer.
    ///
    /// Indices past the last harmonic are ignored.
    pub fn update_harmonic(&mut self, index: usize, value: f32) {
        if index >= HARMONIC_COUNT {
            log::warn!("ignoring volume for harmonic {index}, only {HARMONIC_COUNT} exist");
            return;
        }
        self.volumes[index] = value;
        self.regenerate();
    }

    /// Loop the current buffer, replacing any source already playing.
    pub fn play(&mut self) {
        self.stop_handle();

        if self.buffer.is_none() {
            self.regenerate();
        }
        let Some(buffer) = self.buffer.clone() else {
            return;
        };

        let mut source = self.sink.create_source(buffer);
        self.sink.set_loop(&mut source, true);
        self.sink.connect(&mut source);
        self.sink.start(&mut source);

        self.handles_created += 1;
        let id = self.handles_created;
        log::info!("playback {id} started (generation {})", self.generation);
        self.handle = Some(PlaybackHandle { id, source });
    }

    /// Stop the playing source, if any.
    pub fn stop(&mut self) {
        self.stop_handle();
    }

    /// Stop playback and return to a pure fundamental.
    pub fn reset(&mut self) {
        self.stop_handle();
        self.volumes = HarmonicVector::fundamental();
        self.regenerate();
    }

    /// Copy a preset's volumes into the live vector. Playback continues.
    pub fn apply_preset(&mut self, volumes: &HarmonicVector) {
        self.volumes.assign(volumes);
        self.regenerate();
    }

    /// Paint the first `width` left-channel samples as a point trace.
    ///
    /// Without a surface this does nothing; without a buffer only the
    /// background is painted.
    pub fn draw(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let (width, height) = surface.size();
        let (w, h) = (width as f32, height as f32);

        surface.clear_rect(0.0, 0.0, w, h);
        surface.set_fill_color(BACKGROUND);
        surface.fill_rect(0.0, 0.0, w, h);

        let Some(buffer) = self.buffer.as_deref() else {
            return;
        };
        surface.set_fill_color(TRACE);
        for (i, &sample) in buffer.left().iter().take(width as usize).enumerate() {
            surface.fill_rect(i as f32, sample * h / 4.0 + h / 2.0, 1.0, 1.0);
        }
    }

    pub fn volumes(&self) -> &HarmonicVector {
        &self.volumes
    }

    pub fn params(&self) -> SynthParams {
        self.params
    }

    /// The most recently synthesized buffer.
    pub fn buffer(&self) -> Option<&Arc<SampleBuffer>> {
        self.buffer.as_ref()
    }

    /// Number of syntheses performed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn playback_state(&self) -> PlaybackState {
        if self.handle.is_some() {
            PlaybackState::Playing
        } else {
            PlaybackState::Stopped
        }
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut A {
        &mut self.sink
    }

    fn regenerate(&mut self) {
        self.buffer = Some(Arc::new(synthesize_with(&self.volumes, self.params)));
        self.generation += 1;
        self.draw();
    }

    fn stop_handle(&mut self) {
        if let Some(PlaybackHandle { id, source }) = self.handle.take() {
            self.sink.stop(source);
            log::info!("playback {id} stopped");
        }
    }
}

impl<A: AudioSink, S: Surface> Drop for Controller<A, S> {
    fn drop(&mut self) {
        self.stop_handle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{audio::NullSink, PixelCanvas};
    use crate::{HEIGHT, WIDTH};

    fn mounted() -> Controller<NullSink, PixelCanvas> {
        let mut controller = Controller::new(NullSink);
        controller.mount(PixelCanvas::new(WIDTH, HEIGHT));
        controller
    }

    #[test]
    fn starts_stopped_and_unsynthesized() {
        let controller: Controller<NullSink, PixelCanvas> = Controller::new(NullSink);
        assert_eq!(controller.playback_state(), PlaybackState::Stopped);
        assert!(controller.buffer().is_none());
        assert_eq!(controller.generation(), 0);
        assert_eq!(controller.volumes(), &HarmonicVector::fundamental());
    }

    #[test]
    fn draw_without_surface_or_buffer_is_harmless() {
        let mut controller: Controller<NullSink, PixelCanvas> = Controller::new(NullSink);
        controller.draw();
        assert!(controller.surface().is_none());
        assert!(controller.buffer().is_none());
    }

    #[test]
    fn mount_synthesizes_and_draws() {
        let controller = mounted();
        assert_eq!(controller.generation(), 1);
        let canvas = controller.surface().unwrap();
        // One trace point per column.
        assert_eq!(canvas.points_with(TRACE).count(), WIDTH as usize);
        assert_eq!(
            canvas.points_with(BACKGROUND).count(),
            (WIDTH * HEIGHT - WIDTH) as usize
        );
        // sin(0) = 0 sits on the centre line.
        assert_eq!(canvas.pixel(0, HEIGHT / 2), Some(TRACE));
    }

    #[test]
    fn update_ignores_out_of_range_index() {
        let mut controller = mounted();
        controller.update_harmonic(HARMONIC_COUNT, 0.5);
        assert_eq!(controller.generation(), 1);
        assert_eq!(controller.volumes(), &HarmonicVector::fundamental());

        controller.update_harmonic(4, 0.25);
        assert_eq!(controller.generation(), 2);
        assert_eq!(controller.volumes()[4], 0.25);
    }

    #[test]
    fn play_before_mount_synthesizes_first() {
        let mut controller: Controller<NullSink, PixelCanvas> = Controller::new(NullSink);
        controller.play();
        assert_eq!(controller.playback_state(), PlaybackState::Playing);
        assert_eq!(controller.generation(), 1);
    }

    #[test]
    fn state_machine() {
        let mut controller = mounted();
        controller.play();
        assert_eq!(controller.playback_state(), PlaybackState::Playing);
        controller.play();
        assert_eq!(controller.playback_state(), PlaybackState::Playing);
        controller.apply_preset(&HarmonicVector::silent());
        assert_eq!(controller.playback_state(), PlaybackState::Playing);
        controller.stop();
        assert_eq!(controller.playback_state(), PlaybackState::Stopped);
        controller.stop();
        assert_eq!(controller.playback_state(), PlaybackState::Stopped);
        controller.play();
        controller.reset();
        assert_eq!(controller.playback_state(), PlaybackState::Stopped);
    }
}
