//! Room Walk - Entry Point
//!
//! Controls:
//! - Arrow Up: Go through the door ahead
//! - Arrow Down: Step back through the door behind
//! - Arrow Left/Right: Turn or walk along the room
//! - Mouse: Click doors, side walls and linked pictures
//! - F2: Toggle the editor
//! - Delete: Remove the selected picture (editor)
//! - F5: Save the map (editor)

use bevy::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Room Walk".to_string(),
                resolution: (1200.0, 900.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Our game plugin
        .add_plugins(roomwalk::RoomwalkPlugin)

        .run();
}
