//! Drawing surface the waveform is rendered onto.

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// From `0xRRGGBB`.
    pub const fn from_hex(hex: u32) -> Self {
        Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

/// A fixed-size 2D pixel surface with canvas-style rectangle operations.
///
/// Coordinates are in pixels with the origin at the top-left and y growing
/// downwards. Rectangles may be fractional or extend past the edges; the
/// implementation decides how to rasterize and clip them.
pub trait Surface {
    /// `(width, height)` in pixels.
    fn size(&self) -> (u32, u32);

    /// Colour used by subsequent `fill_rect` calls.
    fn set_fill_color(&mut self, color: Rgb);

    /// Reset the rectangle to transparent.
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Paint the rectangle with the current fill colour.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
}

/// In-memory framebuffer. `None` pixels are transparent.
///
/// A pixel is covered by a rectangle when its centre lies inside it, so a
/// 1×1 rectangle at a fractional position lights exactly one pixel.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    width: u32,
    height: u32,
    fill: Rgb,
    pixels: Vec<Option<Rgb>>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fill: Rgb(0, 0, 0),
            pixels: vec![None; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[self.offset(x, y)]
    }

    /// Coordinates of every pixel painted exactly `color`, row by row.
    pub fn points_with(&self, color: Rgb) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width.max(1);
        self.pixels
            .iter()
            .enumerate()
            .filter(move |(_, p)| **p == Some(color))
            .map(move |(i, _)| (i as u32 % width, i as u32 / width))
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Pixel span whose centres fall in `[start, start + len)`, clipped to `limit`.
    fn span(start: f32, len: f32, limit: u32) -> std::ops::Range<u32> {
        if !start.is_finite() || !len.is_finite() || len <= 0.0 {
            return 0..0;
        }
        let first = (start - 0.5).ceil().max(0.0);
        let end = (start + len - 0.5).ceil().min(limit as f32);
        if end <= first {
            return 0..0;
        }
        first as u32..end as u32
    }

    fn paint(&mut self, x: f32, y: f32, width: f32, height: f32, value: Option<Rgb>) {
        let xs = Self::span(x, width, self.width);
        for py in Self::span(y, height, self.height) {
            for px in xs.clone() {
                let offset = self.offset(px, py);
                self.pixels[offset] = value;
            }
        }
    }
}

impl Surface for PixelCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.paint(x, y, width, height, None);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let fill = self.fill;
        self.paint(x, y, width, height, Some(fill));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::from_hex(0xff0000);

    #[test]
    fn hex_colors() {
        assert_eq!(Rgb::from_hex(0x040720), Rgb(0x04, 0x07, 0x20));
        assert_eq!(Rgb::from_hex(0x00ffff), Rgb(0, 255, 255));
    }

    #[test]
    fn unit_rect_lights_one_pixel() {
        let mut canvas = PixelCanvas::new(8, 8);
        canvas.set_fill_color(RED);
        canvas.fill_rect(2.0, 3.3, 1.0, 1.0);
        assert_eq!(canvas.points_with(RED).collect::<Vec<_>>(), vec![(2, 3)]);

        canvas.fill_rect(5.0, 4.7, 1.0, 1.0);
        assert_eq!(canvas.pixel(5, 5), Some(RED));
        assert_eq!(canvas.pixel(5, 4), None);
    }

    #[test]
    fn rects_clip_to_bounds() {
        let mut canvas = PixelCanvas::new(4, 4);
        canvas.set_fill_color(RED);
        canvas.fill_rect(-10.0, -10.0, 100.0, 100.0);
        assert_eq!(canvas.points_with(RED).count(), 16);

        canvas.clear_rect(0.0, 0.0, 2.0, 4.0);
        assert_eq!(canvas.points_with(RED).count(), 8);
        assert_eq!(canvas.pixel(0, 0), None);

        // Entirely outside, or not a number: ignored.
        canvas.fill_rect(3.0, 200.0, 1.0, 1.0);
        canvas.fill_rect(f32::NAN, 1.0, 1.0, 1.0);
        assert_eq!(canvas.points_with(RED).count(), 8);
    }
}
