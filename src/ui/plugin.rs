//! UI plugin - camera and HUD.

use bevy::prelude::*;

use super::hud;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app.add_systems(Startup, spawn_camera);
    }
}

/// The wall view and HUD are UI nodes, so a 2D camera is all we need.
fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
