//! cpal output device wrapped as an `AudioSink`.
//!
//! The device callback owns a `LoopPlayer`; this side only pushes commands
//! into a ring and drops the buffers the callback hands back.

use std::sync::Arc;

use color_eyre::eyre::{bail, eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    FromSample, Sample, SampleFormat, SizedSample,
};
use overtone::{
    io::AudioSink,
    runtime::{LoopPlayer, PlayerCommand},
    synth::SampleBuffer,
};
use rtrb::{Consumer, Producer, PushError, RingBuffer};

/// Frames rendered per inner block of the device callback.
const MAX_BLOCK_FRAMES: usize = 2048;
const COMMAND_CAPACITY: usize = 64;
const RETIRE_CAPACITY: usize = 64;

type DevicePlayer = LoopPlayer<Consumer<PlayerCommand>, Producer<Arc<SampleBuffer>>>;

/// What the device negotiated, for display.
#[derive(Debug, Clone)]
pub struct OutputInfo {
    pub device: String,
    pub sample_rate: u32,
    pub channels: u16,
}

pub struct CpalSink {
    commands: Producer<PlayerCommand>,
    retired: Consumer<Arc<SampleBuffer>>,
    next_id: u64,
    _stream: cpal::Stream,
}

/// A buffer source on the cpal device.
pub struct CpalSource {
    id: u64,
    /// Moved into the start command.
    buffer: Option<Arc<SampleBuffer>>,
    looping: bool,
    connected: bool,
    started: bool,
}

impl CpalSink {
    /// Open the default output device and start its (silent) stream.
    pub fn open() -> EyreResult<(Self, OutputInfo)> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_format = config.sample_format();
        let stream_config: cpal::StreamConfig = config.into();
        let info = OutputInfo {
            device: device.name().unwrap_or_else(|_| "unknown device".to_string()),
            sample_rate: stream_config.sample_rate.0,
            channels: stream_config.channels,
        };

        if info.channels == 0 {
            bail!("output device {} reports no channels", info.device);
        }

        let (commands, command_rx) = RingBuffer::<PlayerCommand>::new(COMMAND_CAPACITY);
        let (retire_tx, retired) = RingBuffer::<Arc<SampleBuffer>>::new(RETIRE_CAPACITY);
        let player = LoopPlayer::new(info.sample_rate as f32, command_rx, retire_tx);

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, player)?,
            SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, player)?,
            SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, player)?,
            other => bail!("unsupported sample format {other:?}"),
        };
        stream.play().wrap_err("failed to start output stream")?;

        log::info!(
            "audio output: {} at {} Hz, {} channels, {:?}",
            info.device,
            info.sample_rate,
            info.channels,
            sample_format
        );

        Ok((
            Self {
                commands,
                retired,
                next_id: 0,
                _stream: stream,
            },
            info,
        ))
    }

    fn send(&mut self, command: PlayerCommand) {
        if let Err(PushError::Full(command)) = self.commands.push(command) {
            log::error!(
                "audio command ring full, dropping command for source {}",
                command.id()
            );
        }
    }

    /// Drop buffers the audio thread has finished with.
    fn collect_retired(&mut self) {
        while let Ok(buffer) = self.retired.pop() {
            drop(buffer);
        }
    }
}

impl AudioSink for CpalSink {
    type Source = CpalSource;

    fn create_source(&mut self, buffer: Arc<SampleBuffer>) -> CpalSource {
        self.collect_retired();
        self.next_id += 1;
        CpalSource {
            id: self.next_id,
            buffer: Some(buffer),
            looping: false,
            connected: false,
            started: false,
        }
    }

    fn set_loop(&mut self, source: &mut CpalSource, looping: bool) {
        source.looping = looping;
        if source.started {
            self.send(PlayerCommand::SetLoop {
                id: source.id,
                looping,
            });
        }
    }

    fn connect(&mut self, source: &mut CpalSource) {
        source.connected = true;
    }

    fn start(&mut self, source: &mut CpalSource) {
        if !source.connected {
            log::warn!("source {} is not connected to the output, not starting", source.id);
            return;
        }
        let Some(buffer) = source.buffer.take() else {
            log::warn!("source {} was already started", source.id);
            return;
        };
        self.send(PlayerCommand::Start {
            id: source.id,
            buffer,
            looping: source.looping,
        });
        source.started = true;
    }

    fn stop(&mut self, source: CpalSource) {
        if source.started {
            self.send(PlayerCommand::Stop { id: source.id });
        }
        self.collect_retired();
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    mut player: DevicePlayer,
) -> EyreResult<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;
    let mut mix = vec![0.0f32; MAX_BLOCK_FRAMES * channels];

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                for chunk in data.chunks_mut(mix.len()) {
                    let block = &mut mix[..chunk.len()];
                    player.render(block, channels);
                    for (out, &sample) in chunk.iter_mut().zip(block.iter()) {
                        *out = T::from_sample(sample);
                    }
                }
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )
        .wrap_err("failed to build output stream")
}
