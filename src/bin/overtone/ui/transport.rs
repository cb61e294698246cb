//! Transport bar widget - play state, pitch, device and buffer peak

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use overtone::{
    io::{AudioSink, Surface},
    runtime::{Controller, PlaybackState},
};

use crate::audio::OutputInfo;

/// Render the transport bar
pub fn render_transport<A: AudioSink, S: Surface>(
    frame: &mut Frame,
    area: Rect,
    controller: &Controller<A, S>,
    output: Option<&OutputInfo>,
) {
    let block = Block::default().title(" overtone ").borders(Borders::ALL);

    let playing = controller.playback_state() == PlaybackState::Playing;
    let (play_symbol, play_state_str) = if playing {
        ("▶", "Playing")
    } else {
        ("■", "Stopped")
    };

    let params = controller.params();
    let peak = controller.buffer().map(|b| b.peak()).unwrap_or(0.0);

    let device = match output {
        Some(info) => format!(
            "{} {:.1}kHz {}ch  ",
            info.device,
            info.sample_rate as f32 / 1000.0,
            info.channels
        ),
        None => "muted  ".to_string(),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} {}  ", play_symbol, play_state_str),
            Style::default().fg(if playing { Color::Green } else { Color::Yellow }),
        ),
        Span::styled(
            format!("{:.1} Hz  ", params.frequency),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(device, Style::default().fg(Color::DarkGray)),
        // The volume sum is normalized, not the peak: flag anything past full scale.
        Span::styled(
            format!("Peak: {:.2}", peak),
            Style::default().fg(if peak > 1.0 { Color::Red } else { Color::Magenta }),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
