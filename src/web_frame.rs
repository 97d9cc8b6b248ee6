//! Browser wiring: DOM listeners, the status timer and the JS-facing frame object.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, HtmlCanvasElement, KeyboardEvent, MessageEvent, MouseEvent, WebSocket, Window};

use crate::controller::input::wasm as dom;
use crate::controller::{InputController, InputEvent};
use crate::error::{describe, FrameError};
use crate::model::{GPrim, Picked, PlotAttrs, ViewerState};
use crate::view::render_context::web::{CanvasRenderContext, JsRenderContext, WebSocketChannel};
use crate::view::{RenderContext, StatusLine};

/// State shared between the frame object and its event callbacks
struct Frame {
    state: ViewerState,
    controller: InputController,
    status: StatusLine,
}

impl Frame {
    fn handle(&mut self, event: &InputEvent) {
        self.controller.handle_event(&mut self.state, event);
    }
}

/// Mouse/keyboard UI for a WV canvas, driven by the page's render loop.
///
/// Per frame the page calls `update_ui`, draws with `model_view_matrix`,
/// then calls `update_view` and `update_canvas`.
#[wasm_bindgen]
pub struct WvCanvasFrame {
    frame: Rc<RefCell<Frame>>,
    window: Window,
    render_ctx: CanvasRenderContext,
    channel: WebSocketChannel,
}

#[wasm_bindgen]
impl WvCanvasFrame {
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        status_id: &str,
        socket_url: &str,
        render_ctx: JsRenderContext,
    ) -> Result<WvCanvasFrame, JsValue> {
        let window = web_sys::window().ok_or(FrameError::MissingGlobal("window"))?;
        let document = window.document().ok_or(FrameError::MissingGlobal("document"))?;

        let canvas = find_element(&document, canvas_id)?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FrameError::WrongElementType(canvas_id.to_string(), "canvas"))?;
        let status_elem = find_element(&document, status_id)?;

        let socket = WebSocket::new(socket_url).map_err(|e| FrameError::Socket {
            url: socket_url.to_string(),
            reason: describe(&e),
        })?;

        let controller = InputController::default();
        let mut state = ViewerState::new();
        controller.initialize(&mut state);
        let status = StatusLine::new(controller.config.framerate_samples);
        let interval = controller.config.status_interval_ms;

        let frame = Rc::new(RefCell::new(Frame { state, controller, status }));

        setup_input_listeners(&document, &canvas, frame.clone())?;
        setup_server_messages(&socket, frame.clone());
        start_status_timer(&window, status_elem, frame.clone(), interval)?;

        tracing::info!(canvas_id, status_id, socket_url, "canvas frame attached");

        Ok(Self {
            frame,
            window,
            render_ctx: CanvasRenderContext { canvas, ctx: render_ctx },
            channel: WebSocketChannel { socket },
        })
    }

    pub fn init_ui(&self) {
        let mut guard = self.frame.borrow_mut();
        let f = &mut *guard;
        f.controller.initialize(&mut f.state);
    }

    /// Apply pending input to the camera and scene
    pub fn update_ui(&self) {
        let mut guard = self.frame.borrow_mut();
        let f = &mut *guard;
        f.controller.apply_tick(&mut f.state, &self.channel);
    }

    pub fn update_view(&self) {
        let mut guard = self.frame.borrow_mut();
        let f = &mut *guard;
        f.controller.compose_view(&mut f.state);
    }

    /// Call once per completed render
    pub fn update_canvas(&self) {
        let now = self.window.performance().map(|p| p.now()).unwrap_or(0.0);
        self.frame.borrow_mut().status.record_tick(now);
    }

    pub fn reshape(&mut self) -> bool {
        let layout = self.render_ctx.layout(&self.window);
        let mut guard = self.frame.borrow_mut();
        let f = &mut *guard;
        f.controller.reshape(&mut f.state, &mut self.render_ctx, layout)
    }

    pub fn jack(&mut self, x: f32, y: f32, z: f32, delta: f32) {
        let mut guard = self.frame.borrow_mut();
        let f = &mut *guard;
        f.controller.jack(&mut f.state, &mut self.render_ctx, x, y, z, delta);
    }

    pub fn server_message(&self, text: &str) {
        self.frame.borrow().controller.server_message(text);
    }

    /// Column-major model-view matrix
    pub fn model_view_matrix(&self) -> Vec<f32> {
        self.frame.borrow().state.camera.mv_matrix.to_cols_array().to_vec()
    }

    pub fn perspective_matrix(&self) -> Vec<f32> {
        self.frame.borrow().state.camera.perspective_matrix.to_cols_array().to_vec()
    }

    pub fn set_perspective_matrix(&self, cols: &[f32]) {
        if cols.len() != 16 {
            tracing::warn!(len = cols.len(), "perspective matrix needs 16 values");
            return;
        }
        self.frame.borrow_mut().state.camera.perspective_matrix.m = glam::Mat4::from_cols_slice(cols);
    }

    pub fn zoom_scale(&self) -> f32 {
        self.frame.borrow().state.camera.scale
    }

    pub fn scene_updated(&self) -> bool {
        self.frame.borrow().state.scene_upd
    }

    pub fn clear_scene_update(&self) {
        self.frame.borrow_mut().state.scene_upd = false;
    }

    pub fn center_view_requested(&self) -> bool {
        self.frame.borrow().state.center_view
    }

    pub fn clear_center_view(&self) {
        self.frame.borrow_mut().state.center_view = false;
    }

    pub fn pick_enabled(&self) -> bool {
        self.frame.borrow().state.pick
    }

    pub fn locate_enabled(&self) -> bool {
        self.frame.borrow().state.locate
    }

    /// Cursor in canvas coordinates, origin bottom-left
    pub fn cursor(&self) -> Vec<f32> {
        let f = self.frame.borrow();
        vec![f.state.input.cursor_x, f.state.input.cursor_y]
    }

    pub fn set_picked(&self, gprim: &str, strip: i32, kind: i32) {
        self.frame.borrow_mut().state.picked = Some(Picked {
            gprim: gprim.to_string(),
            strip,
            kind,
        });
    }

    pub fn clear_picked(&self) {
        self.frame.borrow_mut().state.picked = None;
    }

    pub fn set_located(&self, x: f32, y: f32, z: f32) {
        self.frame.borrow_mut().state.located = Some([x, y, z]);
    }

    pub fn clear_located(&self) {
        self.frame.borrow_mut().state.located = None;
    }

    pub fn active(&self) -> Option<String> {
        self.frame.borrow().state.active.clone()
    }

    /// Register a primitive; unknown attribute bits are dropped
    pub fn add_gprim(&self, name: &str, attrs: u32) {
        let gprim = GPrim::new(PlotAttrs::from_bits_truncate(attrs));
        self.frame.borrow_mut().state.scene.insert(name, gprim);
    }

    pub fn gprim_attrs(&self, name: &str) -> Option<u32> {
        self.frame.borrow().state.scene.get(name).map(|g| g.attrs.bits())
    }

    pub fn remove_gprim(&mut self, name: &str) {
        let removed = self.frame.borrow_mut().state.scene.remove(name);
        if let Some(gprim) = removed {
            self.render_ctx.delete_buffers(&gprim.lines);
        }
    }
}

fn find_element(document: &Document, id: &str) -> Result<Element, FrameError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| FrameError::MissingElement(id.to_string()))
}

fn listener_error(event: &'static str) -> impl Fn(JsValue) -> FrameError {
    move |e| FrameError::Listener { event, reason: describe(&e) }
}

/// Pointer events on the canvas, key presses on the whole document
fn setup_input_listeners(
    document: &Document,
    canvas: &HtmlCanvasElement,
    frame: Rc<RefCell<Frame>>,
) -> Result<(), FrameError> {
    // Mouse move
    {
        let frame = frame.clone();
        let mm = Closure::wrap(Box::new(move |e: MouseEvent| {
            frame.borrow_mut().handle(&dom::mouse_move_to_input(&e));
        }) as Box<dyn FnMut(MouseEvent)>);
        canvas
            .add_event_listener_with_callback("mousemove", mm.as_ref().unchecked_ref())
            .map_err(listener_error("mousemove"))?;
        mm.forget();
    }

    // Mouse down - start dragging
    {
        let frame = frame.clone();
        let mousedown = Closure::wrap(Box::new(move |e: MouseEvent| {
            frame.borrow_mut().handle(&dom::mouse_down_to_input(&e));
        }) as Box<dyn FnMut(MouseEvent)>);
        canvas
            .add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref())
            .map_err(listener_error("mousedown"))?;
        mousedown.forget();
    }

    // Mouse up - stop dragging
    {
        let frame = frame.clone();
        let mouseup = Closure::wrap(Box::new(move |_e: MouseEvent| {
            frame.borrow_mut().handle(&InputEvent::PointerUp);
        }) as Box<dyn FnMut(MouseEvent)>);
        canvas
            .add_event_listener_with_callback("mouseup", mouseup.as_ref().unchecked_ref())
            .map_err(listener_error("mouseup"))?;
        mouseup.forget();
    }

    // Mouse wheel - zoom
    {
        let frame = frame.clone();
        let wheel = Closure::wrap(Box::new(move |e: Event| {
            if let Some(event) = dom::mouse_wheel_to_input(&e) {
                frame.borrow_mut().handle(&event);
                e.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>);
        canvas
            .add_event_listener_with_callback("wheel", wheel.as_ref().unchecked_ref())
            .map_err(listener_error("wheel"))?;
        wheel.forget();
    }

    // Key press - one pending command per tick
    {
        let keypress = Closure::wrap(Box::new(move |e: KeyboardEvent| {
            if let Some(event) = dom::key_press_to_input(&e) {
                frame.borrow_mut().handle(&event);
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        document
            .add_event_listener_with_callback("keypress", keypress.as_ref().unchecked_ref())
            .map_err(listener_error("keypress"))?;
        keypress.forget();
    }

    Ok(())
}

/// Log text messages pushed by the server
fn setup_server_messages(socket: &WebSocket, frame: Rc<RefCell<Frame>>) {
    let onmessage = Closure::wrap(Box::new(move |e: MessageEvent| {
        if let Some(text) = e.data().as_string() {
            frame.borrow().controller.server_message(&text);
        }
    }) as Box<dyn FnMut(MessageEvent)>);
    socket.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));
    onmessage.forget();
}

/// Refresh the status element on a fixed timer, independent of rendering
fn start_status_timer(
    window: &Window,
    status_elem: Element,
    frame: Rc<RefCell<Frame>>,
    interval_ms: i32,
) -> Result<(), FrameError> {
    let refresh = Closure::wrap(Box::new(move || {
        let f = frame.borrow();
        f.status.refresh_display(&f.state, &status_elem);
    }) as Box<dyn FnMut()>);
    window
        .set_interval_with_callback_and_timeout_and_arguments_0(refresh.as_ref().unchecked_ref(), interval_ms)
        .map_err(|e| FrameError::Timer(describe(&e)))?;
    refresh.forget();
    Ok(())
}
