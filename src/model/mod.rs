// MODEL: Viewer state, camera matrices and the scene graph
pub mod matrix;
pub mod scene;
pub mod state;

pub use matrix::Matrix4;
pub use scene::{BufferId, GPrim, PlotAttrs, SceneGraph};
pub use state::{CameraState, Picked, ViewerState};
