// Re-export all public modules so the viewer page and tests can use them
pub mod logging;
pub mod config;
pub mod error;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

#[cfg(target_arch = "wasm32")]
mod web_frame;

pub use config::ViewerConfig;
pub use error::FrameError;
pub use controller::{InputController, InputEvent, InputState, KeyCommand, Modifiers, PointerInput};
pub use model::{BufferId, CameraState, GPrim, Matrix4, Picked, PlotAttrs, SceneGraph, ViewerState};
pub use view::{CanvasLayout, MessageChannel, RenderContext, StatusLine, StatusSink};
#[cfg(target_arch = "wasm32")]
pub use web_frame::WvCanvasFrame;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
    tracing::info!("WV canvas frame loaded");
}
