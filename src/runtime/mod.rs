//! Runtime: the controller the UI talks to and the realtime loop player the
//! audio device pulls from.
//!
//! # Example
//!
//! ```
//! use overtone::{
//!     io::{audio::NullSink, PixelCanvas},
//!     runtime::{Controller, PlaybackState},
//!     synth::PRESETS,
//!     HEIGHT, WIDTH,
//! };
//!
//! let mut controller = Controller::new(NullSink);
//! controller.mount(PixelCanvas::new(WIDTH, HEIGHT));
//! controller.apply_preset(&PRESETS[0].volumes);
//! controller.play();
//! assert_eq!(controller.playback_state(), PlaybackState::Playing);
//! ```

mod controller;
pub mod looper;

pub use controller::{Controller, PlaybackState, BACKGROUND, TRACE};
pub use looper::{CommandReceiver, LoopPlayer, PlayerCommand, RetireQueue};
