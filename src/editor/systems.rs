//! Editor systems - mouse selection, dragging, deletion and edit requests.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::ops;
use super::selection::{DragEdit, EditorSelection};
use crate::core::{GameConfig, GameState, MapUpdated, PositionChanged};
use crate::navigation::NavigationState;
use crate::rendering::{ClickTarget, ViewLayout, WallQueryCache};
use crate::world::{GameMap, MapError, ObjectKind, RoomId};

/// Place an image on the wall ahead.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct PlaceObjectRequest {
    pub image_file_name: String,
    pub link: Option<(String, ObjectKind)>,
}

/// Rename a room; `None` means the room the player stands in.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct RenameRoomRequest {
    pub room: Option<RoomId>,
    pub name: String,
}

/// Declare a door on the wall ahead.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct DeclareDoorRequest {
    pub door_id: String,
}

/// Configure editor systems.
pub fn setup_editor_systems(app: &mut App) {
    app.init_resource::<EditorSelection>()
        .add_event::<PlaceObjectRequest>()
        .add_event::<RenameRoomRequest>()
        .add_event::<DeclareDoorRequest>()
        .add_systems(OnExit(GameState::Editing), clear_selection)
        .add_systems(
            Update,
            (
                select_on_press,
                drag_selected,
                release_selection,
                remove_selected,
                place_requested_objects,
                rename_requested_rooms,
                declare_requested_doors,
                save_map,
                deselect_on_move,
            )
                .chain()
                .run_if(in_state(GameState::Editing)),
        );
}

fn cursor(windows: &Query<&Window, With<PrimaryWindow>>) -> Option<Vec2> {
    windows.get_single().ok().and_then(Window::cursor_position)
}

fn report(result: Result<MapUpdated, MapError>, updated: &mut EventWriter<MapUpdated>) {
    match result {
        Ok(event) => {
            updated.send(event);
        }
        Err(e) => warn!("Edit rejected: {}", e),
    }
}

fn select_on_press(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    map: Res<GameMap>,
    layout: Res<ViewLayout>,
    nav: Res<NavigationState>,
    mut cache: ResMut<WallQueryCache>,
    mut selection: ResMut<EditorSelection>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(cursor) = cursor(&windows) else {
        return;
    };
    let Ok(info) = cache.get(&map, nav.x, nav.y, nav.direction) else {
        return;
    };

    let target = layout.classify(info, nav.direction, cursor.x, cursor.y);
    let origin = match target {
        ClickTarget::Object(index) | ClickTarget::ResizeHandle(index) => info
            .objects
            .iter()
            .find(|resolved| resolved.index == index)
            .map(|resolved| {
                let rect = layout.object_rect(resolved);
                Vec2::new(rect.x, rect.y)
            })
            .unwrap_or(cursor),
        _ => cursor,
    };
    selection.press(target, cursor, origin);
}

#[allow(clippy::too_many_arguments)]
fn drag_selected(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    config: Res<GameConfig>,
    layout: Res<ViewLayout>,
    nav: Res<NavigationState>,
    selection: Res<EditorSelection>,
    mut map: ResMut<GameMap>,
    mut cache: ResMut<WallQueryCache>,
    mut updated: EventWriter<MapUpdated>,
    mut last_cursor: Local<Option<Vec2>>,
) {
    if !mouse.pressed(MouseButton::Left) || mouse.just_pressed(MouseButton::Left) {
        *last_cursor = None;
        return;
    }
    let Some(cursor) = cursor(&windows) else {
        return;
    };
    if *last_cursor == Some(cursor) {
        return;
    }
    let first_sample = last_cursor.is_none();
    *last_cursor = Some(cursor);
    if first_sample {
        return;
    }

    let result = match selection.drag(cursor) {
        Some(DragEdit::Move { index, origin }) => {
            let (wall_x, wall_y) = layout.view_to_wall(origin.x, origin.y);
            ops::move_object(&mut map, &mut cache, *nav, index, wall_x, wall_y)
        }
        Some(DragEdit::Resize { index, grow }) => {
            ops::resize_object(&mut map, &mut cache, *nav, index, grow, &config)
        }
        None => return,
    };
    report(result, &mut updated);
}

fn release_selection(mouse: Res<ButtonInput<MouseButton>>, mut selection: ResMut<EditorSelection>) {
    if mouse.just_released(MouseButton::Left) {
        selection.release();
    }
}

fn remove_selected(
    keyboard: Res<ButtonInput<KeyCode>>,
    nav: Res<NavigationState>,
    mut selection: ResMut<EditorSelection>,
    mut map: ResMut<GameMap>,
    mut cache: ResMut<WallQueryCache>,
    mut updated: EventWriter<MapUpdated>,
) {
    if !keyboard.just_pressed(KeyCode::Delete) {
        return;
    }
    let Some(index) = selection.selected_index() else {
        return;
    };
    report(ops::remove_object_at(&mut map, &mut cache, *nav, index), &mut updated);
    selection.clear();
}

fn place_requested_objects(
    mut requests: EventReader<PlaceObjectRequest>,
    config: Res<GameConfig>,
    nav: Res<NavigationState>,
    mut map: ResMut<GameMap>,
    mut cache: ResMut<WallQueryCache>,
    mut updated: EventWriter<MapUpdated>,
) {
    for request in requests.read() {
        let result = ops::place_object(
            &mut map,
            &mut cache,
            *nav,
            &request.image_file_name,
            request.link.clone(),
            &config,
        );
        report(result, &mut updated);
    }
}

fn rename_requested_rooms(
    mut requests: EventReader<RenameRoomRequest>,
    nav: Res<NavigationState>,
    mut map: ResMut<GameMap>,
    mut updated: EventWriter<MapUpdated>,
) {
    for request in requests.read() {
        let room = match request.room {
            Some(room) => Ok(room),
            None => map.room_at(nav.x, nav.y),
        };
        match room.and_then(|room| ops::rename_room(&mut map, room, &request.name)) {
            // Room names are not part of wall info; listeners just need to redraw
            Ok(()) => {
                updated.send(MapUpdated {
                    x: nav.x,
                    y: nav.y,
                    direction: nav.direction,
                });
            }
            Err(e) => warn!("Rename rejected: {}", e),
        }
    }
}

fn declare_requested_doors(
    mut requests: EventReader<DeclareDoorRequest>,
    nav: Res<NavigationState>,
    mut map: ResMut<GameMap>,
    mut cache: ResMut<WallQueryCache>,
    mut updated: EventWriter<MapUpdated>,
) {
    for request in requests.read() {
        report(ops::declare_door(&mut map, &mut cache, *nav, &request.door_id), &mut updated);
    }
}

/// F5 writes the map back to the configured file.
fn save_map(keyboard: Res<ButtonInput<KeyCode>>, config: Res<GameConfig>, map: Res<GameMap>) {
    if !keyboard.just_pressed(KeyCode::F5) {
        return;
    }
    match map.to_data().save(&config.map_path) {
        Ok(()) => info!("Map saved to {}", config.map_path),
        Err(e) => error!("Could not save map: {}", e),
    }
}

fn deselect_on_move(mut moved: EventReader<PositionChanged>, mut selection: ResMut<EditorSelection>) {
    if moved.read().count() > 0 {
        selection.clear();
    }
}

fn clear_selection(mut selection: ResMut<EditorSelection>) {
    selection.clear();
}
