//! Platform-agnostic pointer and keyboard handling for the canvas
use bitflags::bitflags;

bitflags! {
    /// Modifier keys held during a pointer event. Meta is folded into CTRL.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1;
        const ALT   = 2;
        const CTRL  = 4;
    }
}

impl Modifiers {
    pub fn from_keys(shift: bool, alt: bool, ctrl: bool, meta: bool) -> Self {
        let mut m = Modifiers::empty();
        m.set(Modifiers::SHIFT, shift);
        m.set(Modifiers::ALT, alt);
        m.set(Modifiers::CTRL, ctrl || meta);
        m
    }
}

/// Pointer position in client (page) pixels plus button and modifier state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub client_x: i32,
    pub client_y: i32,
    pub button: i16,
    pub modifiers: Modifiers,
}

impl PointerInput {
    pub fn at(client_x: i32, client_y: i32) -> Self {
        Self {
            client_x,
            client_y,
            button: 0,
            modifiers: Modifiers::empty(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Platform-independent input events
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMove(PointerInput),
    PointerDown(PointerInput),
    PointerUp,
    KeyPress(char),
    /// Raw wheel delta in browser units; positive rolls away from the user
    Wheel { delta: f32 },
}

/// Cursor, drag, key and canvas geometry state of the UI
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    pub cursor_x: f32,
    pub cursor_y: f32,
    pub start_x: f32,
    pub start_y: f32,
    pub button: i16,
    pub modifier: Modifiers,
    pub dragging: bool,
    /// Last key pressed and not yet dispatched
    pub key_press: Option<char>,
    pub wheel_delta: f32,
    /// Page offset of the canvas' upper-left corner
    pub off_top: i32,
    pub off_left: i32,
    pub width: u32,
    pub height: u32,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            cursor_x: -1.0,
            cursor_y: -1.0,
            start_x: -1.0,
            start_y: -1.0,
            button: -1,
            modifier: Modifiers::empty(),
            dragging: false,
            key_press: None,
            wheel_delta: 0.0,
            off_top: 0,
            off_left: 0,
            width: 0,
            height: 0,
        }
    }

    /// Back to the initial sentinels; the canvas size is kept
    pub fn reset(&mut self) {
        *self = Self {
            width: self.width,
            height: self.height,
            ..Self::new()
        };
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent, wheel_unit: f32) {
        match event {
            InputEvent::PointerMove(p) => self.on_pointer_move(p),
            InputEvent::PointerDown(p) => self.on_pointer_down(p),
            InputEvent::PointerUp => self.on_pointer_up(),
            InputEvent::KeyPress(c) => self.on_key_press(*c),
            InputEvent::Wheel { delta } => self.on_wheel(*delta, wheel_unit),
        }
    }

    /// Client pixels to canvas coordinates with the origin at the bottom-left
    pub fn to_canvas(&self, client_x: i32, client_y: i32) -> (f32, f32) {
        let x = client_x - (self.off_left + 1);
        let y = self.height as i32 - client_y + self.off_top + 1;
        (x as f32, y as f32)
    }

    pub fn on_pointer_move(&mut self, p: &PointerInput) {
        let (x, y) = self.to_canvas(p.client_x, p.client_y);
        self.cursor_x = x;
        self.cursor_y = y;
        self.modifier = p.modifiers;
    }

    pub fn on_pointer_down(&mut self, p: &PointerInput) {
        let (x, y) = self.to_canvas(p.client_x, p.client_y);
        self.start_x = x;
        self.start_y = y;
        self.dragging = true;
        self.button = p.button;
        self.modifier = p.modifiers;
    }

    /// Button and modifier stay as they were until the next down/move
    pub fn on_pointer_up(&mut self) {
        self.dragging = false;
    }

    pub fn on_key_press(&mut self, key: char) {
        self.key_press = Some(key);
    }

    pub fn on_wheel(&mut self, delta: f32, wheel_unit: f32) {
        self.wheel_delta += delta / wheel_unit;
    }

    pub fn take_key(&mut self) -> Option<char> {
        self.key_press.take()
    }

    /// Start the next incremental drag step from the current cursor
    pub fn rebase_drag(&mut self) {
        self.start_x = self.cursor_x;
        self.start_y = self.cursor_y;
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

pub mod wasm {
    use super::*;
    use web_sys::{Event, KeyboardEvent, MouseEvent};

    pub fn pointer_from_mouse(e: &MouseEvent) -> PointerInput {
        PointerInput {
            client_x: e.client_x(),
            client_y: e.client_y(),
            button: e.button(),
            modifiers: Modifiers::from_keys(e.shift_key(), e.alt_key(), e.ctrl_key(), e.meta_key()),
        }
    }

    pub fn mouse_move_to_input(e: &MouseEvent) -> InputEvent {
        InputEvent::PointerMove(pointer_from_mouse(e))
    }

    pub fn mouse_down_to_input(e: &MouseEvent) -> InputEvent {
        InputEvent::PointerDown(pointer_from_mouse(e))
    }

    /// Only printable single-character keys are forwarded
    pub fn key_press_to_input(e: &KeyboardEvent) -> Option<InputEvent> {
        let key = e.key();
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(InputEvent::KeyPress(c)),
            _ => None,
        }
    }

    /// Prefers the legacy `wheelDelta` (positive = away from user), falling
    /// back to the negated standard `deltaY`
    pub fn mouse_wheel_to_input(e: &Event) -> Option<InputEvent> {
        let js_val = wasm_bindgen::JsValue::from(e.clone());
        if let Ok(wheel_delta) = js_sys::Reflect::get(&js_val, &wasm_bindgen::JsValue::from_str("wheelDelta")) {
            if let Some(d) = wheel_delta.as_f64() {
                return Some(InputEvent::Wheel { delta: d as f32 });
            }
        }
        if let Ok(delta_y) = js_sys::Reflect::get(&js_val, &wasm_bindgen::JsValue::from_str("deltaY")) {
            if let Some(dy) = delta_y.as_f64() {
                return Some(InputEvent::Wheel { delta: -dy as f32 });
            }
        }
        None
    }
}
