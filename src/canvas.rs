// Surface backed by an HtmlCanvasElement's 2d context

use crate::color::Color;
use crate::error::{FieldError, Result};
use crate::particle::Size;
use crate::surface::Surface;
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    // Grabs the 2d context, a canvas that refuses one is treated as unavailable
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let context = canvas
            .get_context("2d")?
            .ok_or(FieldError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FieldError::ContextUnavailable)?;
        Ok(CanvasSurface { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn size(&self) -> Size {
        Size::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn resize(&mut self, size: Size) {
        self.canvas.set_width(size.width as u32);
        self.canvas.set_height(size.height as u32);
    }

    fn clear(&mut self) -> std::result::Result<(), JsValue> {
        let size = self.size();
        self.context.clear_rect(0.0, 0.0, size.width, size.height);
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
        alpha: f64,
    ) -> std::result::Result<(), JsValue> {
        let ctx = &self.context;
        ctx.save();
        ctx.set_global_alpha(alpha);
        ctx.set_fill_style_str(&color.to_css());
        ctx.begin_path();
        let drawn = ctx.arc(center[0], center[1], radius, 0.0, PI * 2.0);
        if drawn.is_ok() {
            ctx.fill();
        }
        ctx.restore();
        drawn
    }

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        alpha: f64,
        width: f64,
    ) -> std::result::Result<(), JsValue> {
        let ctx = &self.context;
        ctx.save();
        ctx.set_global_alpha(alpha);
        ctx.set_stroke_style_str(&color.to_css());
        ctx.set_line_width(width);
        ctx.begin_path();
        ctx.move_to(from[0], from[1]);
        ctx.line_to(to[0], to[1]);
        ctx.stroke();
        ctx.restore();
        Ok(())
    }
}
