use std::f32::consts::PI;
use tracing::{debug, info};

use crate::config::ViewerConfig;
use crate::controller::commands::KeyCommand;
use crate::controller::input::{InputEvent, Modifiers};
use crate::model::{GPrim, Matrix4, PlotAttrs, ViewerState};
use crate::view::{CanvasLayout, MessageChannel, RenderContext};

/// Turns pending mouse/keyboard input into camera and scene changes
#[derive(Debug, Clone, Default)]
pub struct InputController {
    pub config: ViewerConfig,
}

impl InputController {
    pub fn new(config: ViewerConfig) -> Self {
        Self { config }
    }

    /// Reset the UI fields and the scratch matrix
    pub fn initialize(&self, state: &mut ViewerState) {
        state.input.reset();
        state.camera.ui_matrix = Matrix4::identity();
    }

    pub fn handle_event(&self, state: &mut ViewerState, event: &InputEvent) {
        state.input.process_event(event, self.config.wheel_unit);
    }

    /// Per-frame update: pending key, then wheel, then drag.
    ///
    /// Afterwards `mv_matrix` holds only this tick's screen-space increment
    /// and `ui_matrix` the transform accumulated before it, until
    /// `compose_view` folds them back together.
    pub fn apply_tick(&self, state: &mut ViewerState, channel: &dyn MessageChannel) {
        if let Some(key) = state.input.take_key() {
            self.dispatch_key(state, key, channel);
        }

        // UI is in screen coordinates (not object)
        let camera = &mut state.camera;
        camera.ui_matrix.load(&camera.mv_matrix);
        camera.mv_matrix.make_identity();

        if state.input.wheel_delta != 0.0 {
            let scale = (state.input.wheel_delta / self.config.wheel_zoom_divisor).exp();
            self.zoom(state, scale);
            state.input.wheel_delta = 0.0;
        }

        if state.input.dragging {
            self.apply_drag(state);
            state.input.rebase_drag();
        }
    }

    /// Fold this tick's increment into the persistent model-view matrix
    pub fn compose_view(&self, state: &mut ViewerState) {
        let camera = &mut state.camera;
        camera.mv_matrix.multiply(&camera.ui_matrix);
    }

    pub fn dispatch_key(&self, state: &mut ViewerState, key: char, channel: &dyn MessageChannel) {
        let Some(command) = KeyCommand::from_key(key) else {
            debug!(?key, "ignoring unbound key");
            return;
        };
        debug!(?key, ?command, "key command");

        match command {
            KeyCommand::CenterView => state.center_view = true,
            KeyCommand::Coarser | KeyCommand::Finer => {
                if let Some(request) = command.server_request() {
                    channel.send(request);
                }
            }
            KeyCommand::ToggleLocate => state.locate = !state.locate,
            KeyCommand::TogglePick => {
                state.pick = !state.pick;
                if state.pick {
                    state.mark_dirty();
                }
            }
            KeyCommand::ToggleAttr(attr) => self.toggle_active(state, attr),
            KeyCommand::Home => {
                state.camera.mv_matrix.make_identity();
                state.camera.scale = 1.0;
                state.mark_dirty();
            }
            KeyCommand::NextActive => {
                state.active = state.scene.next_after(state.active.as_deref());
            }
            KeyCommand::SelectPicked => {
                if let Some(picked) = &state.picked {
                    state.active = Some(picked.gprim.clone());
                }
            }
        }
    }

    fn toggle_active(&self, state: &mut ViewerState, attr: PlotAttrs) {
        let Some(active) = state.active.as_deref() else {
            return;
        };
        if let Some(gprim) = state.scene.get_mut(active) {
            gprim.toggle(attr);
            state.scene_upd = true;
        }
    }

    fn zoom(&self, state: &mut ViewerState, scale: f32) {
        state.camera.mv_matrix.scale(scale, scale, scale);
        state.camera.scale *= scale;
        state.mark_dirty();
    }

    /// Only the exact single-modifier (or no-modifier) cases move the camera
    fn apply_drag(&self, state: &mut ViewerState) {
        let modifier = state.input.modifier;
        if modifier == Modifiers::CTRL {
            self.orbit(state);
        } else if modifier == Modifiers::ALT {
            self.roll(state);
        } else if modifier == Modifiers::SHIFT {
            self.dolly(state);
        } else if modifier.is_empty() {
            self.pan(state);
        }
    }

    fn orbit(&self, state: &mut ViewerState) {
        let input = &state.input;
        let angle_x = (input.start_y - input.cursor_y) / self.config.orbit_divisor;
        let angle_y = -(input.start_x - input.cursor_x) / self.config.orbit_divisor;
        if angle_x != 0.0 || angle_y != 0.0 {
            state.camera.mv_matrix.rotate(angle_x, 1.0, 0.0, 0.0);
            state.camera.mv_matrix.rotate(angle_y, 0.0, 1.0, 0.0);
            state.mark_dirty();
        }
    }

    fn roll(&self, state: &mut ViewerState) {
        let input = &state.input;
        let cx = input.width as f32 / 2.0;
        let cy = input.height as f32 / 2.0;

        let (x0, y0) = (input.start_x - cx, input.start_y - cy);
        let (x1, y1) = (input.cursor_x - cx, input.cursor_y - cy);
        if (x0 == 0.0 && y0 == 0.0) || (x1 == 0.0 && y1 == 0.0) {
            return;
        }

        let dtheta = y1.atan2(x1) - y0.atan2(x0);
        if dtheta.abs() < self.config.roll_guard {
            let angle_z = self.config.roll_gain * dtheta / PI;
            state.camera.mv_matrix.rotate(angle_z, 0.0, 0.0, 1.0);
            state.mark_dirty();
        }
    }

    fn dolly(&self, state: &mut ViewerState) {
        let input = &state.input;
        if input.cursor_y != input.start_y {
            let scale = ((input.cursor_y - input.start_y) / self.config.dolly_divisor).exp();
            self.zoom(state, scale);
        }
    }

    fn pan(&self, state: &mut ViewerState) {
        let input = &state.input;
        let trans_x = (input.cursor_x - input.start_x) / self.config.pan_divisor;
        let trans_y = (input.cursor_y - input.start_y) / self.config.pan_divisor;
        if trans_x != 0.0 || trans_y != 0.0 {
            state.camera.mv_matrix.translate(trans_x, trans_y, 0.0);
            state.mark_dirty();
        }
    }

    /// Track canvas relocation and window resizes; true when the size changed
    pub fn reshape(&self, state: &mut ViewerState, ctx: &mut dyn RenderContext, layout: CanvasLayout) -> bool {
        let input = &mut state.input;
        if input.off_top != layout.off_top || input.off_left != layout.off_left {
            input.off_top = layout.off_top;
            input.off_left = layout.off_left;
        }

        let width = (layout.window_width - self.config.chrome_width).max(0) as u32;
        let height = (layout.window_height - self.config.chrome_height).max(0) as u32;
        if width == input.width && height == input.height {
            return false;
        }

        input.width = width;
        input.height = height;
        ctx.resize(width, height);
        state.camera.perspective_matrix = Matrix4::identity();
        state.mark_dirty();
        ctx.init_draw();

        info!(width, height, "canvas resized");
        true
    }

    /// Place a 3-axis cross-hair marker centered at (x, y, z)
    pub fn jack(&self, state: &mut ViewerState, ctx: &mut dyn RenderContext, x: f32, y: f32, z: f32, delta: f32) {
        let key = self.config.marker_key.as_str();
        if let Some(old) = state.scene.remove(key) {
            ctx.delete_buffers(&old.lines);
        }

        let mut vertices = [[x, y, z]; 6];
        vertices[0][0] -= delta;
        vertices[1][0] += delta;
        vertices[2][1] -= delta;
        vertices[3][1] += delta;
        vertices[4][2] -= delta;
        vertices[5][2] += delta;

        let vbo = ctx.create_vbo(bytemuck::cast_slice(&vertices[..]));
        let mut gprim = GPrim::new(PlotAttrs::ON);
        gprim.lines.push(vbo);
        gprim.line_width = self.config.marker_line_width;
        gprim.line_color = self.config.marker_color;
        state.scene.insert(key, gprim);
    }

    /// Text pushed by the server over the message channel
    pub fn server_message(&self, text: &str) {
        info!(" Server Message: {}", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BufferId, Picked};
    use glam::{Mat4, Vec3};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Channel(RefCell<Vec<String>>);

    impl MessageChannel for Channel {
        fn send(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    #[derive(Default)]
    struct Ctx {
        next: u32,
        uploads: Vec<Vec<f32>>,
        deleted: Vec<BufferId>,
        resized: Vec<(u32, u32)>,
        init_draws: usize,
    }

    impl RenderContext for Ctx {
        fn create_vbo(&mut self, vertices: &[f32]) -> BufferId {
            self.next += 1;
            self.uploads.push(vertices.to_vec());
            BufferId(self.next)
        }

        fn delete_buffers(&mut self, buffers: &[BufferId]) {
            self.deleted.extend_from_slice(buffers);
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.resized.push((width, height));
        }

        fn init_draw(&mut self) {
            self.init_draws += 1;
        }
    }

    fn dragging(modifier: Modifiers, start: (f32, f32), cursor: (f32, f32)) -> ViewerState {
        let mut state = ViewerState::new();
        state.input.width = 200;
        state.input.height = 200;
        state.input.dragging = true;
        state.input.modifier = modifier;
        (state.input.start_x, state.input.start_y) = start;
        (state.input.cursor_x, state.input.cursor_y) = cursor;
        state
    }

    fn tick(state: &mut ViewerState) {
        InputController::default().apply_tick(state, &Channel::default());
    }

    fn press(state: &mut ViewerState, key: char) {
        state.input.on_key_press(key);
        tick(state);
    }

    #[test]
    fn test_orbit() {
        let mut state = dragging(Modifiers::CTRL, (100.0, 100.0), (104.0, 96.0));
        tick(&mut state);

        let expected = Mat4::from_rotation_x(1f32.to_radians()) * Mat4::from_rotation_y(1f32.to_radians());
        assert!(state.camera.mv_matrix.m.abs_diff_eq(expected, 1e-6));
        assert!(state.scene_upd);
        assert_eq!((state.input.start_x, state.input.start_y), (104.0, 96.0));
    }

    #[test]
    fn test_roll() {
        let mut state = dragging(Modifiers::ALT, (200.0, 100.0), (200.0, 200.0));
        tick(&mut state);

        let expected = Mat4::from_rotation_z(32f32.to_radians());
        assert!(state.camera.mv_matrix.m.abs_diff_eq(expected, 1e-5));
        assert!(state.scene_upd);
    }

    #[test]
    fn test_roll_ignores_wraparound() {
        let mut state = dragging(Modifiers::ALT, (0.0, 101.0), (0.0, 99.0));
        tick(&mut state);
        assert!(state.camera.mv_matrix.is_identity());
        assert!(!state.scene_upd);
    }

    #[test]
    fn test_roll_skips_canvas_center() {
        let mut state = dragging(Modifiers::ALT, (100.0, 100.0), (150.0, 120.0));
        tick(&mut state);
        assert!(state.camera.mv_matrix.is_identity());
    }

    #[test]
    fn test_dolly() {
        let mut state = dragging(Modifiers::SHIFT, (50.0, 100.0), (80.0, 612.0));
        tick(&mut state);

        let e = std::f32::consts::E;
        assert!((state.camera.scale - e).abs() < 1e-5);
        assert!(state.camera.mv_matrix.m.abs_diff_eq(Mat4::from_scale(Vec3::splat(e)), 1e-5));
    }

    #[test]
    fn test_pan_is_incremental() {
        let mut state = dragging(Modifiers::empty(), (0.0, 0.0), (128.0, 64.0));
        tick(&mut state);
        let expected = Mat4::from_translation(Vec3::new(0.5, 0.25, 0.0));
        assert!(state.camera.mv_matrix.m.abs_diff_eq(expected, 1e-6));

        // No cursor movement since the last tick: no increment
        state.scene_upd = false;
        tick(&mut state);
        assert!(state.camera.mv_matrix.is_identity());
        assert!(!state.scene_upd);
    }

    #[test]
    fn test_combined_modifiers_do_nothing() {
        for m in [
            Modifiers::CTRL | Modifiers::SHIFT,
            Modifiers::CTRL | Modifiers::ALT,
            Modifiers::ALT | Modifiers::SHIFT,
            Modifiers::all(),
        ] {
            let mut state = dragging(m, (10.0, 10.0), (90.0, 40.0));
            tick(&mut state);
            assert!(state.camera.mv_matrix.is_identity(), "{m:?}");
            assert!(!state.scene_upd, "{m:?}");
            assert_eq!((state.input.start_x, state.input.start_y), (90.0, 40.0));
        }
    }

    #[test]
    fn test_wheel_zoom_resets_delta() {
        let mut state = ViewerState::new();
        state.input.on_wheel(1920.0, 120.0);
        tick(&mut state);

        let e = std::f32::consts::E;
        assert!((state.camera.scale - e).abs() < 1e-5);
        assert_eq!(state.input.wheel_delta, 0.0);
        assert!(state.scene_upd);
    }

    #[test]
    fn test_tick_splits_and_compose_restores() {
        let ctl = InputController::default();
        let mut state = ViewerState::new();
        state.camera.mv_matrix.translate(1.0, 2.0, 3.0);
        let before = state.camera.mv_matrix;

        ctl.apply_tick(&mut state, &Channel::default());
        assert!(state.camera.mv_matrix.is_identity());
        assert_eq!(state.camera.ui_matrix, before);

        ctl.compose_view(&mut state);
        assert_eq!(state.camera.mv_matrix, before);
    }

    #[test]
    fn test_attribute_toggles() {
        let mut state = ViewerState::new();
        state.scene.insert("a", GPrim::new(PlotAttrs::ON));
        state.active = Some("a".into());

        for (key, attr) in [
            ('c', PlotAttrs::SHADING),
            ('l', PlotAttrs::LINES),
            ('o', PlotAttrs::ORIENTATION),
            ('p', PlotAttrs::POINTS),
            ('r', PlotAttrs::ON),
            ('t', PlotAttrs::TRANSPARENT),
        ] {
            state.scene_upd = false;
            press(&mut state, key);
            assert_eq!(state.scene.get("a").map(|g| g.attrs), Some(PlotAttrs::ON ^ attr));
            assert!(state.scene_upd);
            press(&mut state, key);
            assert_eq!(state.scene.get("a").map(|g| g.attrs), Some(PlotAttrs::ON));
        }
    }

    #[test]
    fn test_toggle_without_active_is_noop() {
        let mut state = ViewerState::new();
        state.scene.insert("a", GPrim::new(PlotAttrs::ON));
        press(&mut state, 'l');
        assert_eq!(state.scene.get("a").map(|g| g.attrs), Some(PlotAttrs::ON));
        assert!(!state.scene_upd);
        assert_eq!(state.input.key_press, None);
    }

    #[test]
    fn test_mode_flags() {
        let mut state = ViewerState::new();
        press(&mut state, 'L');
        assert!(state.locate);
        press(&mut state, 'L');
        assert!(!state.locate);
        assert!(!state.scene_upd);

        press(&mut state, 'P');
        assert!(state.pick);
        assert!(state.scene_upd);

        state.scene_upd = false;
        press(&mut state, 'P');
        assert!(!state.pick);
        assert!(!state.scene_upd);

        press(&mut state, '*');
        assert!(state.center_view);
    }

    #[test]
    fn test_tessellation_requests() {
        let ctl = InputController::default();
        let channel = Channel::default();
        let mut state = ViewerState::new();

        state.input.on_key_press('<');
        ctl.apply_tick(&mut state, &channel);
        state.input.on_key_press('>');
        ctl.apply_tick(&mut state, &channel);
        state.input.on_key_press('x');
        ctl.apply_tick(&mut state, &channel);

        assert_eq!(*channel.0.borrow(), vec!["coarser".to_string(), "finer".to_string()]);
    }

    #[test]
    fn test_home_resets_zoom() {
        let mut state = ViewerState::new();
        state.camera.mv_matrix.rotate(30.0, 0.0, 1.0, 0.0);
        state.camera.scale = 4.0;
        press(&mut state, 'h');
        InputController::default().compose_view(&mut state);

        assert!(state.camera.mv_matrix.is_identity());
        assert_eq!(state.camera.scale, 1.0);
        assert!(state.scene_upd);
    }

    #[test]
    fn test_select_picked() {
        let mut state = ViewerState::new();
        press(&mut state, 's');
        assert_eq!(state.active, None);

        state.picked = Some(Picked { gprim: "Face 3".into(), strip: 0, kind: 2 });
        press(&mut state, 's');
        assert_eq!(state.active.as_deref(), Some("Face 3"));
    }

    #[test]
    fn test_reshape() {
        let ctl = InputController::default();
        let mut ctx = Ctx::default();
        let mut state = ViewerState::new();
        state.camera.perspective_matrix.translate(0.0, 0.0, -5.0);

        let layout = CanvasLayout { off_top: 8, off_left: 12, window_width: 820, window_height: 640 };
        assert!(ctl.reshape(&mut state, &mut ctx, layout));
        assert_eq!((state.input.width, state.input.height), (800, 600));
        assert_eq!((state.input.off_top, state.input.off_left), (8, 12));
        assert_eq!(ctx.resized, vec![(800, 600)]);
        assert_eq!(ctx.init_draws, 1);
        assert!(state.camera.perspective_matrix.is_identity());
        assert!(state.scene_upd);

        // Same size, moved canvas: offsets only
        state.scene_upd = false;
        let moved = CanvasLayout { off_top: 30, ..layout };
        assert!(!ctl.reshape(&mut state, &mut ctx, moved));
        assert_eq!(state.input.off_top, 30);
        assert_eq!(ctx.resized.len(), 1);
        assert!(!state.scene_upd);
    }

    #[test]
    fn test_jack_replaces_marker() {
        let ctl = InputController::default();
        let mut ctx = Ctx::default();
        let mut state = ViewerState::new();
        state.scene.insert("a", GPrim::new(PlotAttrs::ON));

        ctl.jack(&mut state, &mut ctx, 1.0, 2.0, 3.0, 0.5);
        assert_eq!(
            ctx.uploads[0],
            vec![
                0.5, 2.0, 3.0, 1.5, 2.0, 3.0,
                1.0, 1.5, 3.0, 1.0, 2.5, 3.0,
                1.0, 2.0, 2.5, 1.0, 2.0, 3.5,
            ]
        );
        let marker = state.scene.get("jack").cloned();
        assert_eq!(
            marker,
            Some(GPrim {
                attrs: PlotAttrs::ON,
                lines: vec![BufferId(1)],
                line_width: 3.0,
                line_color: [0.0, 0.0, 1.0],
            })
        );

        ctl.jack(&mut state, &mut ctx, 0.0, 0.0, 0.0, 1.0);
        assert_eq!(ctx.deleted, vec![BufferId(1)]);
        assert_eq!(state.scene.len(), 2);
        assert_eq!(state.scene.get("jack").map(|g| g.lines.clone()), Some(vec![BufferId(2)]));
    }
}
