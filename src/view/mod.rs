// VIEW: Renderer collaborators and the status line
pub mod render_context;
pub mod status_line;

pub use render_context::{CanvasLayout, MessageChannel, RenderContext};
pub use status_line::{StatusLine, StatusSink};
