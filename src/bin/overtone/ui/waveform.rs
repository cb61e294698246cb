//! Waveform view - shows the controller's pixel canvas

use ratatui::{
    layout::Rect,
    style::Color,
    symbols,
    widgets::{
        canvas::{Canvas, Points},
        Block, Borders,
    },
    Frame,
};

use overtone::{
    io::{PixelCanvas, Rgb},
    runtime::{BACKGROUND, TRACE},
};

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// Render the waveform canvas, flipping rows so pixel y grows downwards
pub fn render_waveform(frame: &mut Frame, area: Rect, pixels: &PixelCanvas) {
    let block = Block::default()
        .title(format!(" Waveform (first {} samples) ", pixels.width()))
        .borders(Borders::ALL);

    let height = pixels.height() as f64;
    let points: Vec<(f64, f64)> = pixels
        .points_with(TRACE)
        .map(|(x, y)| (x as f64, height - 1.0 - y as f64))
        .collect();

    let canvas = Canvas::default()
        .block(block)
        .marker(symbols::Marker::Braille)
        .background_color(to_color(BACKGROUND))
        .x_bounds([0.0, pixels.width().saturating_sub(1) as f64])
        .y_bounds([0.0, height - 1.0])
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &points,
                color: to_color(TRACE),
            });
        });

    frame.render_widget(canvas, area);
}
