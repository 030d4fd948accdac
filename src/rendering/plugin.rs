//! Rendering plugin - wall queries and the facing-wall view.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use super::cache::WallQueryCache;
use super::layout::ViewLayout;
use super::view;
use crate::core::{in_interactive_state, GameConfig, GameState, MapUpdated};

/// Rendering plugin - owns the wall query cache and keeps the view layout in
/// step with the window.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WallQueryCache>()
            .init_resource::<ViewLayout>()
            .add_systems(OnExit(GameState::Loading), size_view)
            .add_systems(
                Update,
                (invalidate_on_map_update, follow_window_size)
                    .run_if(in_interactive_state),
            );

        view::setup_view_systems(app);
    }
}

/// Start from the primary window size, or the configured size without one.
fn size_view(
    config: Res<GameConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut layout: ResMut<ViewLayout>,
) {
    *layout = match windows.get_single() {
        Ok(window) => ViewLayout::new(window.width(), window.height()),
        Err(_) => ViewLayout::new(config.view_width, config.view_height),
    };
    debug!("View size {}x{}", layout.width, layout.height);
}

fn follow_window_size(mut resized: EventReader<WindowResized>, mut layout: ResMut<ViewLayout>) {
    if let Some(event) = resized.read().last() {
        *layout = ViewLayout::new(event.width, event.height);
    }
}

/// Drop cached wall info for every wall reported as mutated.
pub fn invalidate_on_map_update(mut updated: EventReader<MapUpdated>, mut cache: ResMut<WallQueryCache>) {
    for event in updated.read() {
        cache.invalidate(event.x, event.y, event.direction);
    }
}
