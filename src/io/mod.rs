// Purpose - external interfaces the controller drives: audio output and a drawing surface

pub mod audio;
pub mod surface;

pub use audio::AudioSink;
pub use surface::{PixelCanvas, Rgb, Surface};
