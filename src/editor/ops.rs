//! Map edits made from the editor.
//!
//! Every edit that touches a wall drops that wall's cached info and returns the
//! [`MapUpdated`] event to broadcast. Edits always apply to the wall the player
//! is facing.

use bevy::prelude::*;

use crate::core::{GameConfig, MapUpdated};
use crate::navigation::NavigationState;
use crate::rendering::WallQueryCache;
use crate::world::{GameMap, MapError, ObjectKind, RoomId, WallObject};

fn touched(cache: &mut WallQueryCache, at: NavigationState) -> MapUpdated {
    cache.invalidate(at.x, at.y, at.direction);
    MapUpdated {
        x: at.x,
        y: at.y,
        direction: at.direction,
    }
}

fn not_found(at: NavigationState) -> MapError {
    MapError::ObjectNotFound {
        x: at.x,
        y: at.y,
        direction: at.direction,
    }
}

/// Put a new image in the middle of the wall ahead, optionally linked to a
/// resource or question.
pub fn place_object(
    map: &mut GameMap,
    cache: &mut WallQueryCache,
    at: NavigationState,
    image_file_name: &str,
    link: Option<(String, ObjectKind)>,
    config: &GameConfig,
) -> Result<MapUpdated, MapError> {
    let mut object = WallObject::new(image_file_name, 50.0, 50.0, config.object_default_scale);
    if let Some((id, kind)) = link {
        object = object.linked(id, kind);
    }
    map.add_object(at.x, at.y, at.direction, object)?;
    info!("Placed {} on ({}, {}, {})", image_file_name, at.x, at.y, at.direction);
    Ok(touched(cache, at))
}

/// Remove the object at `index` from the wall ahead.
pub fn remove_object_at(
    map: &mut GameMap,
    cache: &mut WallQueryCache,
    at: NavigationState,
    index: usize,
) -> Result<MapUpdated, MapError> {
    let object = map
        .wall(at.x, at.y, at.direction)?
        .and_then(|record| record.objects().get(index))
        .cloned()
        .ok_or_else(|| not_found(at))?;
    if !map.remove_object(at.x, at.y, at.direction, &object)? {
        return Err(not_found(at));
    }
    info!("Removed {} from ({}, {}, {})", object.image_file_name, at.x, at.y, at.direction);
    Ok(touched(cache, at))
}

/// Move the object at `index` to a percent-of-wall position, clamped to 0-100.
pub fn move_object(
    map: &mut GameMap,
    cache: &mut WallQueryCache,
    at: NavigationState,
    index: usize,
    wall_x: f32,
    wall_y: f32,
) -> Result<MapUpdated, MapError> {
    let object = map
        .object_mut(at.x, at.y, at.direction, index)
        .ok_or_else(|| not_found(at))?;
    object.wall_x = wall_x.clamp(0.0, 100.0);
    object.wall_y = wall_y.clamp(0.0, 100.0);
    Ok(touched(cache, at))
}

/// Grow the object at `index` by one scale step, or shrink it by one step without
/// going below the minimum scale.
pub fn resize_object(
    map: &mut GameMap,
    cache: &mut WallQueryCache,
    at: NavigationState,
    index: usize,
    grow: bool,
    config: &GameConfig,
) -> Result<MapUpdated, MapError> {
    let object = map
        .object_mut(at.x, at.y, at.direction, index)
        .ok_or_else(|| not_found(at))?;
    if grow {
        object.wall_scale += config.object_scale_step;
    } else if object.wall_scale > config.object_min_scale {
        object.wall_scale = (object.wall_scale - config.object_scale_step).max(config.object_min_scale);
    }
    Ok(touched(cache, at))
}

/// Give a room a display name. An empty name clears it.
pub fn rename_room(map: &mut GameMap, id: RoomId, name: &str) -> Result<(), MapError> {
    map.set_room_name(id, name)?;
    info!("Room {} is now named {:?}", id, name);
    Ok(())
}

/// Declare a door on the wall ahead.
///
/// Only this side is recorded; the far side sees it through the mirrored lookup.
pub fn declare_door(
    map: &mut GameMap,
    cache: &mut WallQueryCache,
    at: NavigationState,
    door_id: &str,
) -> Result<MapUpdated, MapError> {
    map.add_door(at.x, at.y, at.direction, door_id)?;
    info!("Door {} declared on ({}, {}, {})", door_id, at.x, at.y, at.direction);
    Ok(touched(cache, at))
}
