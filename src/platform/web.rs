//! Browser front end: 2D canvas drawing, keyboard capture and the
//! requestAnimationFrame loop

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

use crate::config::MatchConfig;
use crate::input::KeyState;
use crate::platform::to_device;
use crate::renderer::{Canvas, css_color};
use crate::sim::{Match, TickInput, Vector, tick};

/// [`Canvas`] over a `CanvasRenderingContext2d`
pub struct WebCanvas {
    element: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl WebCanvas {
    pub fn new(element: HtmlCanvasElement, width: f64, height: f64) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = element
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        let mut canvas = Self {
            element,
            ctx,
            width,
            height,
        };
        canvas.resize(width, height);
        Ok(canvas)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.element.set_width(width as u32);
        self.element.set_height(height as u32);
    }

    fn trace(&self, points: &[Vector]) {
        self.ctx.begin_path();
        for (i, &p) in points.iter().enumerate() {
            let (x, y) = to_device(self, p);
            if i == 0 {
                self.ctx.move_to(x, y);
            } else {
                self.ctx.line_to(x, y);
            }
        }
    }
}

impl Canvas for WebCanvas {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn line(&mut self, from: Vector, to: Vector, color: [f32; 4]) {
        self.trace(&[from, to]);
        self.ctx.set_stroke_style_str(&css_color(color));
        self.ctx.stroke();
    }

    fn circle(&mut self, center: Vector, radius: f64, color: [f32; 4]) {
        let (x, y) = to_device(&*self, center);
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, radius, 0.0, TAU);
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.fill();
    }

    fn polygon(&mut self, points: &[Vector], color: [f32; 4]) {
        self.trace(points);
        self.ctx.close_path();
        self.ctx.set_fill_style_str(&css_color(color));
        self.ctx.fill();
    }
}

/// Everything the frame callback touches
struct WebGame {
    game: Match,
    canvas: WebCanvas,
    keys: KeyState,
    /// One-shot input gathered between frames
    pending: TickInput,
}

fn window_size(window: &web_sys::Window) -> Option<(f64, f64)> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width, height))
}

/// Build a match sized to the window and start the frame loop
pub fn run(mut config: MatchConfig) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let element: HtmlCanvasElement = document
        .get_element_by_id(&config.canvas_id)
        .ok_or_else(|| JsValue::from_str("no canvas"))?
        .dyn_into()?;

    if let Some((width, height)) = window_size(&window) {
        config.width = width;
        config.height = height;
    }
    if config.seed == 0 {
        config.seed = js_sys::Date::now() as u64;
    }

    let canvas = WebCanvas::new(element, config.width, config.height)?;
    let game = Match::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let mut keys = KeyState::new();
    keys.start_listening();

    let state = Rc::new(RefCell::new(WebGame {
        game,
        canvas,
        keys,
        pending: TickInput::default(),
    }));

    setup_input_handlers(&window, state.clone());
    {
        let mut g = state.borrow_mut();
        let g = &mut *g;
        g.game.draw(&mut g.canvas);
    }
    request_animation_frame(state);

    log::info!("Poly Pong running, click to play");
    Ok(())
}

fn setup_input_handlers(window: &web_sys::Window, state: Rc<RefCell<WebGame>>) {
    // Keyboard
    {
        let state = state.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            state.borrow_mut().keys.press(&event.code());
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let state = state.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            state.borrow_mut().keys.release(&event.code());
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Click toggles play
    {
        let state = state.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            state.borrow_mut().pending.toggle_play = true;
        });
        let _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Resize
    {
        let state = state.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(size) = web_sys::window().as_ref().and_then(window_size) {
                state.borrow_mut().pending.resize = Some(size);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Window blur: held keys would never see their keyup
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = state.borrow_mut();
            g.keys.stop_listening();
            g.keys.start_listening();
            if g.game.is_playing() {
                g.game.pause();
                log::info!("Auto-paused (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn request_animation_frame(state: Rc<RefCell<WebGame>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |_time: f64| {
        game_loop(state);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(state: Rc<RefCell<WebGame>>) {
    {
        let mut g = state.borrow_mut();
        let g = &mut *g;

        let mut input = std::mem::take(&mut g.pending);
        input.keys = g.keys.snapshot();
        if let Some((width, height)) = input.resize {
            g.canvas.resize(width, height);
        }

        tick(&mut g.game, &input);
        g.game.draw(&mut g.canvas);
    }

    request_animation_frame(state);
}
