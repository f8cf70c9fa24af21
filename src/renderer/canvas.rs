//! `Surface` on a browser 2D canvas context

use std::f64::consts::TAU;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Color, Stroke, Surface};
use crate::polar_to_cartesian;

/// Dash pattern for dashed strokes (on, off)
const DASH: [f64; 2] = [5.0, 5.0];

pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Canvas2dSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn apply_stroke(&self, stroke: Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.css());
        self.ctx.set_line_width(stroke.width as f64);
        let dash = js_sys::Array::new();
        if stroke.dashed {
            for d in DASH {
                dash.push(&JsValue::from_f64(d));
            }
        }
        let _ = self.ctx.set_line_dash(&dash);
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.close_path();
    }

    fn polygon_path(&self, center: Vec2, radius: f32, sides: u32) {
        self.ctx.begin_path();
        for i in 0..sides {
            let theta = std::f32::consts::TAU * i as f32 / sides as f32;
            let p = polar_to_cartesian(center, radius, theta);
            if i == 0 {
                self.ctx.move_to(p.x as f64, p.y as f64);
            } else {
                self.ctx.line_to(p.x as f64, p.y as f64);
            }
        }
        self.ctx.close_path();
    }
}

impl Surface for Canvas2dSurface {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.circle_path(center, radius);
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke) {
        self.circle_path(center, radius);
        self.apply_stroke(stroke);
        self.ctx.stroke();
        let _ = self.ctx.set_line_dash(&js_sys::Array::new());
    }

    fn fill_polygon(&mut self, center: Vec2, radius: f32, sides: u32, color: Color) {
        self.polygon_path(center, radius, sides);
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn stroke_polygon(&mut self, center: Vec2, radius: f32, sides: u32, stroke: Stroke) {
        self.polygon_path(center, radius, sides);
        self.apply_stroke(stroke);
        self.ctx.stroke();
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        // Crossing trails brighten each other
        let _ = self.ctx.set_global_composite_operation("lighter");
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.apply_stroke(Stroke::solid(color, width));
        self.ctx.stroke();
        let _ = self.ctx.set_global_composite_operation("source-over");
    }
}
