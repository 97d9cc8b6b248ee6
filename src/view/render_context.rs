use crate::model::BufferId;

/// Renderer-side operations the frame needs
pub trait RenderContext {
    /// Upload a flat xyz vertex array as a line buffer
    fn create_vbo(&mut self, vertices: &[f32]) -> BufferId;

    /// Release GPU resources of a primitive's buffers
    fn delete_buffers(&mut self, buffers: &[BufferId]);

    /// Resize the drawing surface and its viewport
    fn resize(&mut self, width: u32, height: u32);

    /// Rebuild size-dependent draw buffers
    fn init_draw(&mut self);
}

/// Text channel to the tessellation server
pub trait MessageChannel {
    fn send(&self, message: &str);
}

/// Canvas placement and window size as measured from the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasLayout {
    pub off_top: i32,
    pub off_left: i32,
    pub window_width: i32,
    pub window_height: i32,
}

pub mod web {
    use super::*;
    use js_sys::Float32Array;
    use wasm_bindgen::prelude::wasm_bindgen;
    use web_sys::{HtmlCanvasElement, WebSocket, Window};

    #[wasm_bindgen]
    extern "C" {
        /// Render context object supplied by the page's viewer
        pub type JsRenderContext;

        #[wasm_bindgen(method, js_name = createVBO)]
        fn js_create_vbo(this: &JsRenderContext, vertices: &Float32Array) -> u32;

        #[wasm_bindgen(method, js_name = deleteVBO)]
        fn js_delete_vbo(this: &JsRenderContext, id: u32);

        #[wasm_bindgen(method, js_name = viewport)]
        fn js_viewport(this: &JsRenderContext, x: i32, y: i32, width: u32, height: u32);

        #[wasm_bindgen(method, js_name = initDraw)]
        fn js_init_draw(this: &JsRenderContext);
    }

    /// The page canvas together with the viewer's render context
    pub struct CanvasRenderContext {
        pub canvas: HtmlCanvasElement,
        pub ctx: JsRenderContext,
    }

    impl RenderContext for CanvasRenderContext {
        fn create_vbo(&mut self, vertices: &[f32]) -> BufferId {
            let array = Float32Array::from(vertices);
            BufferId(self.ctx.js_create_vbo(&array))
        }

        fn delete_buffers(&mut self, buffers: &[BufferId]) {
            for b in buffers {
                self.ctx.js_delete_vbo(b.0);
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.ctx.js_viewport(0, 0, width, height);
        }

        fn init_draw(&mut self) {
            self.ctx.js_init_draw();
        }
    }

    impl CanvasRenderContext {
        /// Measure canvas offsets and the window's inner size
        pub fn layout(&self, window: &Window) -> CanvasLayout {
            let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
                v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as i32
            };
            CanvasLayout {
                off_top: self.canvas.offset_top(),
                off_left: self.canvas.offset_left(),
                window_width: dim(window.inner_width()),
                window_height: dim(window.inner_height()),
            }
        }
    }

    /// WebSocket used for tessellation requests
    pub struct WebSocketChannel {
        pub socket: WebSocket,
    }

    impl MessageChannel for WebSocketChannel {
        fn send(&self, message: &str) {
            if let Err(e) = self.socket.send_with_str(message) {
                tracing::warn!(request = message, error = ?e, "tessellation request not sent");
            }
        }
    }
}
