//! Editor plugin - object placement and editing while in `GameState::Editing`.

use bevy::prelude::*;

use super::systems;

/// Editor plugin - selection, dragging and map edit requests.
pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_editor_systems(app);
    }
}
