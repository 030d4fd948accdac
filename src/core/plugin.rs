//! Core plugin that sets up game states, events, and configuration.

use bevy::prelude::*;

use super::config::load_game_config;
use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, Playing, Editing)
/// - Global events (PositionChanged, MapUpdated, ObjectActivated)
/// - Config loading at startup
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            .init_state::<GameState>()

            .add_event::<PositionChanged>()
            .add_event::<MapUpdated>()
            .add_event::<ObjectActivated>()

            .add_systems(Startup, load_game_config)

            // Toggle the editor with F2
            .add_systems(
                Update,
                handle_mode_toggle.run_if(in_interactive_state),
            );
    }
}

/// Handle F2 to switch between playing and editing.
fn handle_mode_toggle(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::F2) {
        match current_state.get() {
            GameState::Playing => next_state.set(GameState::Editing),
            GameState::Editing => next_state.set(GameState::Playing),
            GameState::Loading => {}
        }
    }
}
