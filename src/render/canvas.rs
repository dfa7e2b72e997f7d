use web_sys::{CanvasRenderingContext2d, HtmlElement};

use super::{Surface, TextSink};
use crate::config::Rgb;
use crate::geometry::Rect;

/// Browser canvas backend.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn stroke_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.begin_path();
        self.ctx.move_to(x0, y0);
        self.ctx.line_to(x1, y1);
        self.ctx.stroke();
    }
}

impl TextSink for HtmlElement {
    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }
}
