use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::error::{CardError, Result};
use crate::rain::{GLYPH_COLOR, RainField, RainFrame, TRAIL_OVERLAY};

pub const CANVAS_ID: &str = "rain-canvas";

/// Full-viewport canvas behind the card.
pub struct RainCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl RainCanvas {
    /// Create / reuse the canvas, sized once to `width` x `height`.
    pub fn mount(doc: &Document, width: u32, height: u32) -> Result<Self> {
        let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
            el.dyn_into().map_err(|_| CardError::MissingElement(CANVAS_ID.into()))?
        } else {
            let c: HtmlCanvasElement = doc
                .create_element("canvas")?
                .dyn_into()
                .map_err(|_| CardError::NoCanvasContext)?;
            c.set_id(CANVAS_ID);
            doc.body().ok_or(CardError::NoBody)?.append_child(&c)?;
            c
        };
        canvas.set_width(width);
        canvas.set_height(height);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(CardError::NoCanvasContext)?
            .dyn_into()
            .map_err(|_| CardError::NoCanvasContext)?;
        Ok(Self { canvas, ctx })
    }

    /// Fade what is there, then draw this tick's glyphs on top.
    pub fn paint(&self, field: &RainField, frame: &RainFrame) -> Result<()> {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.set_fill_style_str(TRAIL_OVERLAY);
        self.ctx.fill_rect(0.0, 0.0, w, h);
        self.ctx.set_fill_style_str(GLYPH_COLOR);
        self.ctx.set_font(&field.font());
        let mut buf = [0u8; 4];
        for g in &frame.glyphs {
            self.ctx.fill_text(g.ch.encode_utf8(&mut buf), g.x, g.y)?;
        }
        Ok(())
    }

    pub fn remove(&self) {
        self.canvas.remove();
    }
}
