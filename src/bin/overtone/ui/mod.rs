//! TUI module for overtone
//!
//! Sliders for the ten harmonics, preset buttons, transport and the
//! waveform canvas. Every key maps to one controller operation.

mod harmonics;
mod presets;
mod transport;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use std::time::Duration;

use overtone::{
    io::{AudioSink, PixelCanvas},
    runtime::Controller,
    synth::{clamp_volume, HARMONIC_COUNT, PRESETS},
};

use super::audio::OutputInfo;
use harmonics::render_harmonics;
use presets::render_presets;
use transport::render_transport;
use waveform::render_waveform;

/// Slider resolution.
const FINE_STEP: f32 = 0.01;
const COARSE_STEP: f32 = 0.1;

/// UI application state
pub struct UiApp<A: AudioSink> {
    controller: Controller<A, PixelCanvas>,
    /// Device the sink plays on; `None` when muted
    output: Option<OutputInfo>,
    /// Harmonic the arrow keys adjust
    selected: usize,
    /// Preset last applied, until a slider moves
    preset: Option<usize>,
    should_quit: bool,
}

impl<A: AudioSink> UiApp<A> {
    pub fn new(controller: Controller<A, PixelCanvas>, output: Option<OutputInfo>) -> Self {
        Self {
            controller,
            output,
            selected: 0,
            preset: None,
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(HARMONIC_COUNT - 1),
            KeyCode::Left => self.nudge(-FINE_STEP),
            KeyCode::Right => self.nudge(FINE_STEP),
            KeyCode::PageDown => self.nudge(-COARSE_STEP),
            KeyCode::PageUp => self.nudge(COARSE_STEP),
            KeyCode::Char('0') => self.set_selected(0.0),
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => self.controller.play(),
            KeyCode::Char('s') | KeyCode::Char('S') => self.controller.stop(),
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.controller.reset();
                self.preset = None;
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(preset) = PRESETS.get(index) {
                    self.controller.apply_preset(&preset.volumes);
                    self.preset = Some(index);
                }
            }
            _ => {}
        }
    }

    fn nudge(&mut self, delta: f32) {
        let current = self.controller.volumes()[self.selected];
        self.set_selected(current + delta);
    }

    /// Clamp and snap to the slider step, like a range input would.
    fn set_selected(&mut self, value: f32) {
        let snapped = (clamp_volume(value) / FINE_STEP).round() * FINE_STEP;
        self.controller.update_harmonic(self.selected, snapped);
        self.preset = None;
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),                         // Transport bar
                Constraint::Length(HARMONIC_COUNT as u16 + 2), // Harmonic sliders
                Constraint::Length(3),                         // Presets
                Constraint::Min(8),                            // Waveform
                Constraint::Length(1),                         // Help bar
            ])
            .split(area);

        render_transport(
            frame,
            chunks[0],
            &self.controller,
            self.output.as_ref(),
        );
        render_harmonics(frame, chunks[1], self.controller.volumes(), self.selected);
        render_presets(frame, chunks[2], self.preset);
        if let Some(canvas) = self.controller.surface() {
            render_waveform(frame, chunks[3], canvas);
        }

        let help = Paragraph::new(
            " [↑↓] Select  [←→] ±0.01  [PgUp/PgDn] ±0.1  [0] Mute harmonic  [1-3] Preset  [Space] Play  [S] Stop  [R] Reset  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[4]);
    }
}
