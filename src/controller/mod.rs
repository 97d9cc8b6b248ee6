// CONTROLLER: Input capture, key commands and the per-tick camera update
pub mod input;
pub mod commands;
pub mod camera_controller;

pub use input::{InputEvent, InputState, Modifiers, PointerInput};
pub use commands::KeyCommand;
pub use camera_controller::InputController;
