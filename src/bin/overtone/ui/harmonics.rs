//! Harmonic slider list

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use overtone::synth::{harmonic_label, HarmonicVector};

const LABEL_WIDTH: usize = 14;
const VALUE_WIDTH: usize = 6;

/// Render one slider row per harmonic
pub fn render_harmonics(frame: &mut Frame, area: Rect, volumes: &HarmonicVector, selected: usize) {
    let block = Block::default().title(" Harmonics ").borders(Borders::ALL);
    let inner_width = block.inner(area).width as usize;
    let bar_width = inner_width.saturating_sub(LABEL_WIDTH + VALUE_WIDTH + 4);

    let lines: Vec<Line> = volumes
        .iter()
        .enumerate()
        .map(|(i, &volume)| {
            let is_selected = i == selected;
            let filled =
                ((volume.clamp(0.0, 1.0) * bar_width as f32).round() as usize).min(bar_width);

            let label_style = if is_selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            Line::from(vec![
                Span::styled(if is_selected { "› " } else { "  " }, label_style),
                Span::styled(
                    format!("{:>width$} ", harmonic_label(i), width = LABEL_WIDTH),
                    label_style,
                ),
                Span::styled("█".repeat(filled), Style::default().fg(Color::Cyan)),
                Span::styled(
                    "─".repeat(bar_width - filled),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    format!(" {:>width$.2}", volume, width = VALUE_WIDTH),
                    label_style,
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
