//! Room Walk - walk a grid of rooms one wall at a time, in Bevy.
//!
//! The map is a grid of cells, each belonging to a room. Walls stand between
//! cells of different rooms and at the grid edge; some of them have doors, and
//! any of them can carry pictures that open resources or questions.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, config, walking animation
//! - **World**: Room grid, wall registry, map file loading and validation
//! - **Navigation**: Player position, turns, door crossing, movement input
//! - **Rendering**: Wall query cache, image loading, the facing-wall view
//! - **Editor**: Placing, moving, resizing and removing wall objects
//! - **UI**: Camera and status HUD

pub mod core;
pub mod editor;
pub mod navigation;
pub mod rendering;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct RoomwalkPlugin;

impl Plugin for RoomwalkPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Map loading
            .add_plugins(world::WorldPlugin)

            // Wall cache and view
            .add_plugins(rendering::RenderingPlugin)

            // Player movement
            .add_plugins(navigation::NavigationPlugin)

            // Edit mode
            .add_plugins(editor::EditorPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
