use std::sync::Arc;

use crate::synth::SampleBuffer;

/// Audio output the controller plays through.
///
/// Mirrors a buffer-source style API: a source is created over a buffer,
/// configured, connected to the output and started. The sink does not limit
/// how many sources run at once; the controller keeps it to one.
///
/// Sources take an `Arc` snapshot of the buffer, so re-synthesizing in the
/// controller never changes what an already-started source plays.
pub trait AudioSink {
    type Source;

    /// Create a source that will play `buffer`.
    fn create_source(&mut self, buffer: Arc<SampleBuffer>) -> Self::Source;

    /// Whether the source restarts from the beginning when it reaches the end.
    fn set_loop(&mut self, source: &mut Self::Source, looping: bool);

    /// Route the source to the device output.
    fn connect(&mut self, source: &mut Self::Source);

    /// Begin playback immediately.
    fn start(&mut self, source: &mut Self::Source);

    /// Stop playback. The source is consumed; stopped sources cannot restart.
    fn stop(&mut self, source: Self::Source);
}

/// A sink that plays nothing, for running the controller without a device.
#[derive(Debug, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    type Source = Arc<SampleBuffer>;

    fn create_source(&mut self, buffer: Arc<SampleBuffer>) -> Self::Source {
        buffer
    }

    fn set_loop(&mut self, _source: &mut Self::Source, _looping: bool) {}

    fn connect(&mut self, _source: &mut Self::Source) {}

    fn start(&mut self, _source: &mut Self::Source) {}

    fn stop(&mut self, _source: Self::Source) {}
}
