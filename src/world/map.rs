//! The loaded map: room grid plus wall registry behind one owned store.

use bevy::prelude::*;

use super::data::{MapData, RoomData, WallData};
use super::direction::Direction;
use super::error::{DataLoadError, MapError};
use super::grid::{Room, RoomGrid, RoomId};
use super::walls::{WallKey, WallObject, WallRecord, WallRegistry};

/// Resource holding the current map.
///
/// All wall mutation goes through here so callers cannot bypass the
/// "no wall inside a room" rule. Callers that cache wall queries must invalidate
/// the touched key after every mutation.
#[derive(Resource, Debug, Clone)]
pub struct GameMap {
    grid: RoomGrid,
    walls: WallRegistry,
}

impl Default for GameMap {
    fn default() -> Self {
        Self::from_data(MapData::default_map()).unwrap_or_else(|e| {
            error!("Built-in map is invalid: {}. Using a single empty room.", e);
            Self::new(RoomGrid::single(Room::new('A', (0.7, 0.8, 0.7))), WallRegistry::new())
        })
    }
}

impl GameMap {
    pub fn new(grid: RoomGrid, walls: WallRegistry) -> Self {
        Self { grid, walls }
    }

    /// Validate a document and build the map from it.
    pub fn from_data(data: MapData) -> Result<Self, DataLoadError> {
        let actual_width = data.cells.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        if data.max_x == 0
            || data.max_y == 0
            || data.cells.len() != data.max_y
            || data.cells.iter().any(|row| row.chars().count() != data.max_x)
        {
            return Err(DataLoadError::GridMismatch {
                expected_width: data.max_x,
                expected_height: data.max_y,
                actual_width,
                actual_height: data.cells.len(),
            });
        }

        let mut rooms = Vec::with_capacity(data.rooms.len());
        for (key, room_data) in &data.rooms {
            let mut chars = key.chars();
            let (Some(id), None) = (chars.next(), chars.next()) else {
                return Err(DataLoadError::ParseError {
                    path: "<map>".to_string(),
                    details: format!("room id '{}' must be a single character", key),
                });
            };
            let mut room = Room::new(id, room_data.wall_color);
            if let Some(name) = &room_data.room_name {
                room.set_name(name);
            }
            rooms.push(room);
        }

        let grid = RoomGrid::from_rows(&data.cells, rooms)?;
        let mut walls = WallRegistry::new();

        for wall in data.walls {
            let (x, y, direction) = wall.position;
            let invalid = |reason: &str| DataLoadError::InvalidWall {
                x,
                y,
                direction,
                reason: reason.to_string(),
            };
            match walls.wall_exists(&grid, x, y, direction) {
                Ok(true) => {}
                Ok(false) => return Err(invalid("both sides belong to the same room")),
                Err(_) => return Err(invalid("outside the grid")),
            }
            for door in wall.doors {
                walls
                    .add_door(&grid, x, y, direction, door)
                    .map_err(|e| invalid(&e.to_string()))?;
            }
            for object in wall.objects {
                object.validate().map_err(|e| DataLoadError::InvalidObject {
                    x,
                    y,
                    direction,
                    reason: e.to_string(),
                })?;
                walls
                    .add_object(&grid, x, y, direction, object)
                    .map_err(|e| invalid(&e.to_string()))?;
            }
        }

        Ok(Self { grid, walls })
    }

    /// Produce the document form. Walls with nothing declared are omitted.
    pub fn to_data(&self) -> MapData {
        let rooms = self
            .grid
            .rooms()
            .map(|room| {
                (
                    room.id().to_string(),
                    RoomData {
                        wall_color: room.wall_color(),
                        room_name: room.name().map(str::to_string),
                    },
                )
            })
            .collect();

        let mut records: Vec<(&WallKey, &WallRecord)> =
            self.walls.records().filter(|(_, r)| !r.is_empty()).collect();
        records.sort_by_key(|(k, _)| (k.y, k.x, k.direction.as_char()));
        let walls = records
            .into_iter()
            .map(|(key, record)| WallData {
                position: (key.x, key.y, key.direction),
                doors: record.doors.clone(),
                objects: record.objects.clone(),
            })
            .collect();

        MapData {
            max_x: self.grid.max_x(),
            max_y: self.grid.max_y(),
            rooms,
            cells: self.grid.rows(),
            walls,
        }
    }

    pub fn grid(&self) -> &RoomGrid {
        &self.grid
    }

    pub fn walls(&self) -> &WallRegistry {
        &self.walls
    }

    pub fn room_at(&self, x: i32, y: i32) -> Result<RoomId, MapError> {
        self.grid.room_at(x, y)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.grid.contains(x, y)
    }

    pub fn neighbor(&self, x: i32, y: i32, direction: Direction) -> Option<(i32, i32)> {
        self.grid.neighbor(x, y, direction)
    }

    pub fn next_room(&self, x: i32, y: i32, direction: Direction) -> Option<RoomId> {
        self.grid.next_room(x, y, direction)
    }

    pub fn wall_exists(&self, x: i32, y: i32, direction: Direction) -> Result<bool, MapError> {
        self.walls.wall_exists(&self.grid, x, y, direction)
    }

    pub fn wall(&self, x: i32, y: i32, direction: Direction) -> Result<Option<&WallRecord>, MapError> {
        self.walls.get(&self.grid, x, y, direction)
    }

    pub fn have_door(&self, x: i32, y: i32, direction: Direction) -> Result<bool, MapError> {
        self.walls.have_door(&self.grid, x, y, direction)
    }

    pub fn add_object(&mut self, x: i32, y: i32, direction: Direction, object: WallObject) -> Result<(), MapError> {
        object.validate()?;
        self.walls.add_object(&self.grid, x, y, direction, object)
    }

    pub fn remove_object(&mut self, x: i32, y: i32, direction: Direction, object: &WallObject) -> Result<bool, MapError> {
        self.walls.remove_object(&self.grid, x, y, direction, object)
    }

    pub fn add_door(&mut self, x: i32, y: i32, direction: Direction, door_id: impl Into<String>) -> Result<(), MapError> {
        self.walls.add_door(&self.grid, x, y, direction, door_id)
    }

    pub fn object_mut(&mut self, x: i32, y: i32, direction: Direction, index: usize) -> Option<&mut WallObject> {
        self.walls.object_mut(x, y, direction, index)
    }

    /// Wall color of the room containing `(x, y)`.
    pub fn wall_color(&self, x: i32, y: i32) -> Result<(f32, f32, f32), MapError> {
        let id = self.grid.room_at(x, y)?;
        Ok(self.grid.room(id)?.wall_color())
    }

    /// Room display name, empty when unnamed.
    pub fn room_name(&self, id: RoomId) -> Result<&str, MapError> {
        Ok(self.grid.room(id)?.name().unwrap_or(""))
    }

    pub fn set_room_name(&mut self, id: RoomId, name: &str) -> Result<(), MapError> {
        self.grid.room_mut(id)?.set_name(name);
        Ok(())
    }
}
