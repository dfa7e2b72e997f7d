use super::Surface;
use crate::config::Rgb;
use crate::geometry::Rect;

const TRANSPARENT: u32 = 0;

/// Software raster: one packed RGBA value per pixel, row-major.
///
/// Used for headless rendering. Lines are one pixel wide and everything is
/// clipped to the buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![TRANSPARENT; width as usize * height as usize],
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Number of pixels holding exactly `color`.
    pub fn count(&self, color: Rgb) -> usize {
        let packed = color.to_rgba();
        self.pixels.iter().filter(|&&p| p == packed).count()
    }

    fn plot(&mut self, x: i64, y: i64, value: u32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.pixels[y as usize * self.width as usize + x as usize] = value;
    }

    fn span(&mut self, rect: Rect, value: u32) {
        let x0 = rect.x.floor().max(0.0) as i64;
        let y0 = rect.y.floor().max(0.0) as i64;
        let x1 = (rect.x + rect.w).ceil().min(self.width as f64) as i64;
        let y1 = (rect.y + rect.h).ceil().min(self.height as f64) as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                self.plot(x, y, value);
            }
        }
    }
}

impl Surface for PixelSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.span(rect, TRANSPARENT);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.span(rect, color.to_rgba());
    }

    fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb) {
        let value = color.to_rgba();
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil() as i64;
        if steps == 0 {
            self.plot(x0.floor() as i64, y0.floor() as i64, value);
            return;
        }
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = x0 + (x1 - x0) * t;
            let y = y0 + (y1 - y0) * t;
            self.plot(x.floor() as i64, y.floor() as i64, value);
        }
    }
}
