use crate::controller::InputState;
use crate::model::{Matrix4, SceneGraph};

/// Camera matrices shared with the renderer
#[derive(Debug, Clone)]
pub struct CameraState {
    /// Persistent model-view matrix; holds only the current tick's
    /// increment between `apply_tick` and `compose_view`
    pub mv_matrix: Matrix4,
    /// Scratch copy of the model-view matrix taken at the start of a tick
    pub ui_matrix: Matrix4,
    pub perspective_matrix: Matrix4,
    /// Cumulative zoom factor
    pub scale: f32,
}

impl CameraState {
    pub fn new() -> Self {
        Self {
            mv_matrix: Matrix4::identity(),
            ui_matrix: Matrix4::identity(),
            perspective_matrix: Matrix4::identity(),
            scale: 1.0,
        }
    }
}

/// Current pick result reported by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picked {
    pub gprim: String,
    pub strip: i32,
    pub kind: i32,
}

/// Everything the UI frame reads and writes, owned by the viewer
#[derive(Debug, Clone)]
pub struct ViewerState {
    pub input: InputState,
    pub camera: CameraState,
    pub scene: SceneGraph,
    pub active: Option<String>,
    pub picked: Option<Picked>,
    pub located: Option<[f32; 3]>,
    pub pick: bool,
    pub locate: bool,
    pub center_view: bool,
    /// Set whenever the scene must be redrawn
    pub scene_upd: bool,
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            input: InputState::new(),
            camera: CameraState::new(),
            scene: SceneGraph::new(),
            active: None,
            picked: None,
            located: None,
            pick: false,
            locate: false,
            center_view: false,
            scene_upd: false,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.scene_upd = true;
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}
