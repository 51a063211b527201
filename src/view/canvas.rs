use glam::Vec3;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::model::Dimensions;
use super::render::{Renderer, SpriteLayout};

/// Draws the sprite layout onto a 2D canvas context
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    painter: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let painter = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("2d context has unexpected type"))?;
        Ok(Self {
            canvas: canvas.clone(),
            painter,
        })
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, transform: Vec3, dimensions: Dimensions) {
        let (width, height) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.painter.clear_rect(0.0, 0.0, width, height);

        for (rect, paint) in SpriteLayout::new(transform, dimensions).layers() {
            self.painter.set_fill_style_str(paint.css());
            self.painter
                .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
        }
    }
}
