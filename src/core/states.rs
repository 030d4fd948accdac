//! Game state definitions that control which input handling runs.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` until the map resource exists
/// - `Playing` walks the map, and clicks on linked objects open them
/// - `Editing` walks the map too, but clicks select objects for moving and resizing
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Config and map are being loaded
    #[default]
    Loading,
    /// Normal navigation
    Playing,
    /// Map editor
    Editing,
}

impl GameState {
    /// Whether the player can move in this state.
    pub fn is_interactive(&self) -> bool {
        matches!(self, GameState::Playing | GameState::Editing)
    }
}

/// Run condition: true once the map is loaded, in either mode.
pub fn in_interactive_state(state: Option<Res<State<GameState>>>) -> bool {
    state.is_some_and(|state| state.get().is_interactive())
}
