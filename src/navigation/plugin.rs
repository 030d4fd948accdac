//! Navigation plugin - player position and movement input.

use bevy::prelude::*;

use super::movement;

/// Navigation plugin - places the player and moves it on key presses and clicks.
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        movement::setup_movement_systems(app);
    }
}
