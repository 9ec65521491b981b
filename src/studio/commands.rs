//! Keyboard Edit Commands
//!
//! Maps key presses to edits of the selected object. Decoupled from any
//! windowing system: keys arrive as their DOM-style names.

use glam::Vec3;

use super::config::EditConfig;

/// An edit applied to the selected object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditCommand {
    /// `r`: rotate about Y
    RotateY,
    /// `u`: rotate about Z
    RotateZ,
    /// `+`
    ScaleUp,
    /// `-`
    ScaleDown,
    /// `Delete` / `Backspace`
    Delete,
}

impl EditCommand {
    /// Look up the command bound to a key name. Case-insensitive.
    pub fn from_key(key: &str) -> Option<EditCommand> {
        match key.to_ascii_lowercase().as_str() {
            "r" => Some(EditCommand::RotateY),
            "u" => Some(EditCommand::RotateZ),
            "+" => Some(EditCommand::ScaleUp),
            "-" => Some(EditCommand::ScaleDown),
            "delete" | "backspace" => Some(EditCommand::Delete),
            _ => None,
        }
    }
}

/// Rotation after applying a rotate command. Other commands leave it as is.
pub fn rotated(rotation: Vec3, command: EditCommand, config: &EditConfig) -> Vec3 {
    match command {
        EditCommand::RotateY => rotation + Vec3::new(0.0, config.rotation_step, 0.0),
        EditCommand::RotateZ => rotation + Vec3::new(0.0, 0.0, config.rotation_step),
        _ => rotation,
    }
}

/// Scale after applying a scale command. Scaling down stops at `min_scale`;
/// scaling up is unbounded.
pub fn rescaled(scale: f32, command: EditCommand, config: &EditConfig) -> f32 {
    match command {
        EditCommand::ScaleUp => scale * config.scale_up_factor,
        EditCommand::ScaleDown => (scale * config.scale_down_factor).max(config.min_scale),
        _ => scale,
    }
}
