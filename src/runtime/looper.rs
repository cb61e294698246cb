use std::{collections::VecDeque, sync::Arc};

#[cfg(feature = "rtrb")]
use rtrb::{Consumer, Producer};

use crate::synth::SampleBuffer;

/*
Loop Player
===========

The realtime half of playback. The control thread sends `PlayerCommand`s;
the audio callback calls `LoopPlayer::render` with the device's interleaved
output slice and the player mixes every started source into it.

Realtime rules:
  - no allocation: source slots are reserved up front and buffers arrive as
    `Arc`s inside the command
  - no deallocation: a source that stops or finishes hands its `Arc` to the
    retire queue so the last reference is dropped on the control thread
  - no locks, no logging

Rate Conversion
---------------

Buffers carry their own sample rate (48 kHz). When the device runs at a
different rate the read position advances by

    step = buffer_rate / device_rate

per output frame, reading between samples with linear interpolation. A
looping source wraps its position modulo the buffer length, interpolating
across the seam; a one-shot source stops at the end.

Channel Mapping
---------------

Device channel `c` takes buffer channel `c % 2`: left, right, left, ...
A mono device therefore hears the left channel.
*/

/// Maximum sources mixed at once. Starts beyond this are dropped.
pub const MAX_SOURCES: usize = 8;

/// Control-thread → audio-thread message.
#[derive(Debug, Clone)]
pub enum PlayerCommand {
    Start {
        id: u64,
        buffer: Arc<SampleBuffer>,
        looping: bool,
    },
    SetLoop {
        id: u64,
        looping: bool,
    },
    Stop {
        id: u64,
    },
}

impl PlayerCommand {
    /// Source the command addresses.
    pub fn id(&self) -> u64 {
        match self {
            PlayerCommand::Start { id, .. }
            | PlayerCommand::SetLoop { id, .. }
            | PlayerCommand::Stop { id } => *id,
        }
    }
}

/// Where the player reads commands from.
pub trait CommandReceiver {
    fn pop(&mut self) -> Option<PlayerCommand>;
}

/// Where the player hands buffers it no longer needs.
pub trait RetireQueue {
    fn retire(&mut self, buffer: Arc<SampleBuffer>);
}

#[cfg(feature = "rtrb")]
impl CommandReceiver for Consumer<PlayerCommand> {
    fn pop(&mut self) -> Option<PlayerCommand> {
        Consumer::pop(self).ok()
    }
}

#[cfg(feature = "rtrb")]
impl RetireQueue for Producer<Arc<SampleBuffer>> {
    fn retire(&mut self, buffer: Arc<SampleBuffer>) {
        // Full ring: the buffer is dropped here instead.
        let _ = self.push(buffer);
    }
}

impl CommandReceiver for VecDeque<PlayerCommand> {
    fn pop(&mut self) -> Option<PlayerCommand> {
        self.pop_front()
    }
}

impl RetireQueue for Vec<Arc<SampleBuffer>> {
    fn retire(&mut self, buffer: Arc<SampleBuffer>) {
        self.push(buffer);
    }
}

struct ActiveSource {
    id: u64,
    buffer: Arc<SampleBuffer>,
    looping: bool,
    position: f64,
    step: f64,
    finished: bool,
}

impl ActiveSource {
    fn frame(&self, channel: usize) -> f32 {
        let samples = self.buffer.channel(channel % 2).unwrap_or_default();
        let len = samples.len();
        if len == 0 {
            return 0.0;
        }

        let index = self.position as usize;
        let frac = (self.position - index as f64) as f32;
        let current = samples.get(index).copied().unwrap_or(0.0);
        let next = match samples.get(index + 1) {
            Some(&s) => s,
            None if self.looping => samples[0],
            None => 0.0,
        };
        current + (next - current) * frac
    }

    fn advance(&mut self) {
        let len = self.buffer.len() as f64;
        self.position += self.step;
        if self.position >= len {
            if self.looping && len > 0.0 {
                self.position = self.position.rem_euclid(len);
            } else {
                self.finished = true;
            }
        }
    }
}

pub struct LoopPlayer<C: CommandReceiver, Q: RetireQueue> {
    commands: C,
    retired: Q,
    sources: Vec<ActiveSource>,
    device_rate: f32,
}

impl<C: CommandReceiver, Q: RetireQueue> LoopPlayer<C, Q> {
    pub fn new(device_rate: f32, commands: C, retired: Q) -> Self {
        Self {
            commands,
            retired,
            sources: Vec::with_capacity(MAX_SOURCES),
            device_rate,
        }
    }

    /// Apply pending commands, then overwrite `out` (interleaved, `channels`
    /// samples per frame) with the mix of every running source.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        self.process_commands();
        out.fill(0.0);

        if channels == 0 {
            return;
        }

        for frame in out.chunks_mut(channels) {
            for source in self.sources.iter_mut().filter(|s| !s.finished) {
                for (channel, sample) in frame.iter_mut().enumerate() {
                    *sample += source.frame(channel);
                }
                source.advance();
            }
        }

        self.retire_finished();
    }

    /// Number of sources currently producing sound.
    pub fn active_sources(&self) -> usize {
        self.sources.len()
    }

    pub fn is_playing(&self, id: u64) -> bool {
        self.sources.iter().any(|s| s.id == id)
    }

    pub fn retired(&self) -> &Q {
        &self.retired
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.commands.pop() {
            match command {
                PlayerCommand::Start {
                    id,
                    buffer,
                    looping,
                } => {
                    if self.sources.len() == MAX_SOURCES {
                        self.retired.retire(buffer);
                        continue;
                    }
                    let step = buffer.sample_rate() as f64 / self.device_rate as f64;
                    self.sources.push(ActiveSource {
                        id,
                        buffer,
                        looping,
                        position: 0.0,
                        step,
                        finished: false,
                    });
                }
                PlayerCommand::SetLoop { id, looping } => {
                    if let Some(source) = self.sources.iter_mut().find(|s| s.id == id) {
                        source.looping = looping;
                    }
                }
                PlayerCommand::Stop { id } => {
                    if let Some(source) = self.sources.iter_mut().find(|s| s.id == id) {
                        source.finished = true;
                    }
                }
            }
        }
        self.retire_finished();
    }

    fn retire_finished(&mut self) {
        let mut i = 0;
        while i < self.sources.len() {
            if self.sources[i].finished {
                let source = self.sources.swap_remove(i);
                self.retired.retire(source.buffer);
            } else {
                i += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(len: usize, rate: u32) -> Arc<SampleBuffer> {
        Arc::new(SampleBuffer::from_mono(
            rate,
            (0..len).map(|i| i as f32).collect(),
        ))
    }

    type TestPlayer = LoopPlayer<VecDeque<PlayerCommand>, Vec<Arc<SampleBuffer>>>;

    fn player(device_rate: f32) -> TestPlayer {
        LoopPlayer::new(device_rate, VecDeque::new(), Vec::new())
    }

    fn start(p: &mut TestPlayer, id: u64, buffer: Arc<SampleBuffer>, looping: bool) {
        p.commands.push_back(PlayerCommand::Start {
            id,
            buffer,
            looping,
        });
    }

    #[test]
    fn silent_without_sources() {
        let mut p = player(4.0);
        let mut out = vec![1.0; 8];
        p.render(&mut out, 2);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn loops_at_matching_rate() {
        let mut p = player(4.0);
        start(&mut p, 1, ramp(4, 4), true);

        let mut out = vec![0.0; 6];
        p.render(&mut out, 1);
        assert_eq!(out, vec![0.0, 1.0, 2.0, 3.0, 0.0, 1.0]);
        assert!(p.is_playing(1));
    }

    #[test]
    fn one_shot_stops_and_retires() {
        let mut p = player(4.0);
        start(&mut p, 1, ramp(3, 4), false);

        let mut out = vec![0.0; 5];
        p.render(&mut out, 1);
        assert_eq!(out, vec![0.0, 1.0, 2.0, 0.0, 0.0]);
        assert_eq!(p.active_sources(), 0);
        assert_eq!(p.retired().len(), 1);
    }

    #[test]
    fn duplicates_stereo_into_interleaved_frames() {
        let mut p = player(4.0);
        start(&mut p, 1, ramp(4, 4), true);

        let mut out = vec![0.0; 6];
        p.render(&mut out, 2);
        assert_eq!(out, vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn interpolates_when_device_is_faster() {
        // Buffer at 4 Hz on an 8 Hz device: half-sample steps.
        let mut p = player(8.0);
        start(&mut p, 1, ramp(4, 4), true);

        let mut out = vec![0.0; 9];
        p.render(&mut out, 1);
        // Across the seam the loop interpolates from 3 back toward 0.
        assert_eq!(out, vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 1.5, 0.0]);
    }

    #[test]
    fn stop_retires_source() {
        let mut p = player(4.0);
        start(&mut p, 7, ramp(4, 4), true);
        let mut out = vec![0.0; 2];
        p.render(&mut out, 1);

        p.commands.push_back(PlayerCommand::Stop { id: 7 });
        p.render(&mut out, 1);
        assert_eq!(out, vec![0.0, 0.0]);
        assert!(!p.is_playing(7));
        assert_eq!(p.retired().len(), 1);
    }

    #[test]
    fn mixes_concurrent_sources() {
        let mut p = player(4.0);
        start(&mut p, 1, ramp(4, 4), true);
        start(&mut p, 2, ramp(4, 4), true);

        let mut out = vec![0.0; 3];
        p.render(&mut out, 1);
        assert_eq!(out, vec![0.0, 2.0, 4.0]);
        assert_eq!(p.active_sources(), 2);
    }

    #[test]
    fn set_loop_turns_a_loop_into_a_one_shot() {
        let mut p = player(4.0);
        start(&mut p, 1, ramp(2, 4), true);
        p.commands.push_back(PlayerCommand::SetLoop {
            id: 1,
            looping: false,
        });

        let mut out = vec![0.0; 4];
        p.render(&mut out, 1);
        assert_eq!(out, vec![0.0, 1.0, 0.0, 0.0]);
        assert_eq!(p.active_sources(), 0);
    }

    #[test]
    fn drops_starts_beyond_capacity() {
        let mut p = player(4.0);
        for id in 0..(MAX_SOURCES as u64 + 2) {
            start(&mut p, id, ramp(4, 4), true);
        }
        let mut out = vec![0.0; 1];
        p.render(&mut out, 1);
        assert_eq!(p.active_sources(), MAX_SOURCES);
        assert_eq!(p.retired().len(), 2);
    }
}
