//! UI module - camera and the status HUD.

mod hud;
mod plugin;

pub use hud::{status_text, HudRoot, HudText};
pub use plugin::UiPlugin;
