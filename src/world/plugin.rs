//! World plugin - map loading at startup.

use bevy::prelude::*;

use crate::core::{load_game_config, GameConfig, GameState};

use super::data::load_map_or_default;

/// World plugin - loads the map named by the config and leaves the loading state.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_map.after(load_game_config));
    }
}

/// Insert the [`GameMap`](super::GameMap) resource and start playing.
///
/// A missing or invalid map file never aborts startup; the default map is used.
pub fn load_map(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let map = load_map_or_default(&config.map_path);
    info!(
        "Map ready: {}x{} cells, {} rooms",
        map.grid().max_x(),
        map.grid().max_y(),
        map.grid().rooms().count()
    );
    commands.insert_resource(map);
    next_state.set(GameState::Playing);
}
