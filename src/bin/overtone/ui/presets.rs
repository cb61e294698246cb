//! Preset bar

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use overtone::synth::PRESETS;

/// Render the preset buttons, highlighting the one last applied
pub fn render_presets(frame: &mut Frame, area: Rect, active: Option<usize>) {
    let block = Block::default().title(" Presets ").borders(Borders::ALL);

    let mut spans = vec![Span::raw(" ")];
    for (i, preset) in PRESETS.iter().enumerate() {
        let style = if active == Some(i) {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}] {}", i + 1, preset.label), style));
        spans.push(Span::raw("  "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
