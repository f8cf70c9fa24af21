//! Browser bindings
//!
//! The page owns the DOM (knobs, buttons, the animation-frame callback) and
//! forwards events here. Pointer events are queued and applied at the start
//! of the next `frame`.

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::audio::WebAudioSink;
use crate::renderer::{Canvas2dSurface, draw_frame};
use crate::settings::Settings;
use crate::sim::{PointerEvent, SimPhase, SimState, TickInput, tick};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Circular Notes (web) starting...");
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// One toy instance bound to a canvas
#[wasm_bindgen]
pub struct CircularNotes {
    state: SimState,
    audio: WebAudioSink,
    surface: Canvas2dSurface,
    pending: TickInput,
}

#[wasm_bindgen]
impl CircularNotes {
    /// `settings_json` overrides the default layout and knobs; the canvas
    /// size always wins over the scene's width and height
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        settings_json: Option<String>,
    ) -> Result<CircularNotes, JsValue> {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(canvas_id))
            .ok_or_else(|| JsValue::from_str("canvas not found"))?
            .dyn_into::<HtmlCanvasElement>()?;

        let mut settings = match settings_json {
            Some(json) => Settings::from_json(&json).map_err(to_js)?,
            None => Settings::default(),
        };
        settings.scene.width = canvas.width() as f32;
        settings.scene.height = canvas.height() as f32;
        settings.validate().map_err(to_js)?;

        Ok(Self {
            state: SimState::new(&settings),
            audio: WebAudioSink::new(),
            surface: Canvas2dSurface::new(&canvas)?,
            pending: TickInput::default(),
        })
    }

    /// Advance one frame and redraw; `now_ms` is the animation-frame timestamp
    pub fn frame(&mut self, now_ms: f64) {
        let input = std::mem::take(&mut self.pending);
        let now = now_ms / 1000.0;
        tick(&mut self.state, &input, now, &self.audio);
        self.state.prune_trails(now);
        draw_frame(&self.state, &mut self.surface, now);
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.audio.resume();
        self.pending
            .pointer
            .push(PointerEvent::Down(glam::Vec2::new(x, y)));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.pending
            .pointer
            .push(PointerEvent::Move(glam::Vec2::new(x, y)));
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.pending
            .pointer
            .push(PointerEvent::Up(glam::Vec2::new(x, y)));
    }

    pub fn start(&mut self) {
        self.pending.start = true;
    }

    pub fn pause(&mut self) {
        self.pending.pause = true;
    }

    pub fn reset(&mut self) {
        self.pending.reset = true;
    }

    pub fn is_paused(&self) -> bool {
        self.state.phase == SimPhase::Paused
    }

    pub fn set_speed(&mut self, value: &str) -> Result<(), JsValue> {
        self.state.set_speed_str(value).map_err(to_js)
    }

    pub fn set_chaos(&mut self, value: &str) -> Result<(), JsValue> {
        self.state.set_chaos_str(value).map_err(to_js)
    }

    pub fn set_volume(&mut self, value: &str) -> Result<(), JsValue> {
        self.state.set_volume_str(value).map_err(to_js)
    }

    pub fn set_shape(&mut self, name: &str) -> Result<(), JsValue> {
        self.state.set_shape_str(name).map_err(to_js)
    }
}
