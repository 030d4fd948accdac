//! Sparse storage of wall records (doors and placed objects).
//!
//! A wall only exists between cells of different rooms or at the grid edge. Records
//! are materialized lazily: a missing record at a real wall means "plain wall, no
//! doors, no objects", which is different from "no wall" at a same-room boundary.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::direction::Direction;
use super::error::MapError;
use super::grid::RoomGrid;

/// Identifies one side of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WallKey {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

impl WallKey {
    pub fn new(x: i32, y: i32, direction: Direction) -> Self {
        Self { x, y, direction }
    }
}

/// What a linked wall object opens when clicked in play mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Resource,
    Question,
}

fn default_scale() -> f32 {
    0.2
}

/// An image placed on a wall.
///
/// Placement is in percent of the wall (0-100), scale is relative to the view height.
/// Equality is by value, which is how removal finds its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallObject {
    pub image_file_name: String,
    pub wall_x: f32,
    pub wall_y: f32,
    #[serde(default = "default_scale")]
    pub wall_scale: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_object: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_object: Option<ObjectKind>,
}

impl WallObject {
    /// A decoration at the given placement with no link.
    pub fn new(image_file_name: impl Into<String>, wall_x: f32, wall_y: f32, wall_scale: f32) -> Self {
        Self {
            image_file_name: image_file_name.into(),
            wall_x,
            wall_y,
            wall_scale,
            id_object: None,
            type_object: None,
        }
    }

    /// Link the object to a resource or question.
    pub fn linked(mut self, id: impl Into<String>, kind: ObjectKind) -> Self {
        self.id_object = Some(id.into());
        self.type_object = Some(kind);
        self
    }

    /// The `(id, kind)` link when both halves are present.
    pub fn link(&self) -> Option<(&str, ObjectKind)> {
        match (&self.id_object, self.type_object) {
            (Some(id), Some(kind)) => Some((id.as_str(), kind)),
            _ => None,
        }
    }

    /// Check placement and scale ranges.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.image_file_name.is_empty() {
            return Err(MapError::InvalidObject("empty image file name".to_string()));
        }
        for (name, value) in [("wall_x", self.wall_x), ("wall_y", self.wall_y)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(MapError::InvalidObject(format!(
                    "{} = {} is outside 0-100",
                    name, value
                )));
            }
        }
        if !(self.wall_scale > 0.0 && self.wall_scale.is_finite()) {
            return Err(MapError::InvalidObject(format!(
                "wall_scale = {} must be positive",
                self.wall_scale
            )));
        }
        Ok(())
    }
}

/// Doors and objects declared on one wall.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WallRecord {
    pub doors: Vec<String>,
    pub objects: Vec<WallObject>,
}

impl WallRecord {
    pub fn doors(&self) -> &[String] {
        &self.doors
    }

    pub fn objects(&self) -> &[WallObject] {
        &self.objects
    }

    pub fn has_door(&self) -> bool {
        !self.doors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.doors.is_empty() && self.objects.is_empty()
    }
}

/// Sparse wall store keyed by cell and direction.
///
/// Wall existence is a property of the [`RoomGrid`], so every query takes the grid.
#[derive(Debug, Clone, Default)]
pub struct WallRegistry {
    records: HashMap<WallKey, WallRecord>,
}

impl WallRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// False only for a boundary interior to a room.
    pub fn wall_exists(&self, grid: &RoomGrid, x: i32, y: i32, direction: Direction) -> Result<bool, MapError> {
        let here = grid.room_at(x, y)?;
        Ok(grid.next_room(x, y, direction) != Some(here))
    }

    /// The record at a wall, `None` when there is no wall.
    ///
    /// A real wall with nothing declared on it yields an empty record.
    pub fn get(&self, grid: &RoomGrid, x: i32, y: i32, direction: Direction) -> Result<Option<&WallRecord>, MapError> {
        static EMPTY: WallRecord = WallRecord {
            doors: Vec::new(),
            objects: Vec::new(),
        };

        if !self.wall_exists(grid, x, y, direction)? {
            return Ok(None);
        }
        Ok(Some(
            self.records
                .get(&WallKey::new(x, y, direction))
                .unwrap_or(&EMPTY),
        ))
    }

    /// Whether a door is visible on this wall from either side.
    pub fn have_door(&self, grid: &RoomGrid, x: i32, y: i32, direction: Direction) -> Result<bool, MapError> {
        if !self.wall_exists(grid, x, y, direction)? {
            return Ok(false);
        }
        if self
            .records
            .get(&WallKey::new(x, y, direction))
            .is_some_and(WallRecord::has_door)
        {
            return Ok(true);
        }
        // Doors declared only on the far side count too.
        let Some((nx, ny)) = grid.neighbor(x, y, direction) else {
            return Ok(false);
        };
        Ok(self
            .records
            .get(&WallKey::new(nx, ny, direction.reverse()))
            .is_some_and(WallRecord::has_door))
    }

    /// Append an object to a wall. Rejected with `NoWallAtPosition` inside a room.
    pub fn add_object(
        &mut self,
        grid: &RoomGrid,
        x: i32,
        y: i32,
        direction: Direction,
        object: WallObject,
    ) -> Result<(), MapError> {
        self.record_mut(grid, x, y, direction)?.objects.push(object);
        Ok(())
    }

    /// Remove the first object equal to `object`. Returns whether one was removed.
    pub fn remove_object(
        &mut self,
        grid: &RoomGrid,
        x: i32,
        y: i32,
        direction: Direction,
        object: &WallObject,
    ) -> Result<bool, MapError> {
        grid.room_at(x, y)?;
        let key = WallKey::new(x, y, direction);
        let Some(record) = self.records.get_mut(&key) else {
            return Ok(false);
        };
        let Some(index) = record.objects.iter().position(|o| o == object) else {
            return Ok(false);
        };
        record.objects.remove(index);
        if record.is_empty() {
            self.records.remove(&key);
        }
        Ok(true)
    }

    /// Declare a door on a wall. Rejected with `NoWallAtPosition` inside a room.
    pub fn add_door(
        &mut self,
        grid: &RoomGrid,
        x: i32,
        y: i32,
        direction: Direction,
        door_id: impl Into<String>,
    ) -> Result<(), MapError> {
        let door_id = door_id.into();
        let record = self.record_mut(grid, x, y, direction)?;
        if !record.doors.contains(&door_id) {
            record.doors.push(door_id);
        }
        Ok(())
    }

    /// Mutable access to one placed object, for in-place move and resize.
    pub fn object_mut(&mut self, x: i32, y: i32, direction: Direction, index: usize) -> Option<&mut WallObject> {
        self.records
            .get_mut(&WallKey::new(x, y, direction))?
            .objects
            .get_mut(index)
    }

    /// All materialized records.
    pub fn records(&self) -> impl Iterator<Item = (&WallKey, &WallRecord)> {
        self.records.iter()
    }

    /// Number of materialized records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record_mut(
        &mut self,
        grid: &RoomGrid,
        x: i32,
        y: i32,
        direction: Direction,
    ) -> Result<&mut WallRecord, MapError> {
        if !self.wall_exists(grid, x, y, direction)? {
            return Err(MapError::NoWallAtPosition { x, y, direction });
        }
        Ok(self.records.entry(WallKey::new(x, y, direction)).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::grid::Room;

    fn grid() -> RoomGrid {
        // A A B
        // C C B
        let rooms = "ABC".chars().map(|c| Room::new(c, (1.0, 1.0, 1.0)));
        RoomGrid::from_rows(&["AAB", "CCB"], rooms).unwrap()
    }

    fn picture(name: &str) -> WallObject {
        WallObject::new(name, 50.0, 50.0, 0.2)
    }

    #[test]
    fn walls_exist_only_between_rooms_and_at_edges() {
        let g = grid();
        let walls = WallRegistry::new();
        assert!(!walls.wall_exists(&g, 0, 0, Direction::E).unwrap());
        assert!(walls.wall_exists(&g, 1, 0, Direction::E).unwrap());
        assert!(walls.wall_exists(&g, 0, 0, Direction::N).unwrap());
        assert!(walls.wall_exists(&g, 0, 0, Direction::S).unwrap());
        assert_eq!(
            walls.wall_exists(&g, 5, 0, Direction::N),
            Err(MapError::OutOfBounds { x: 5, y: 0 })
        );
    }

    #[test]
    fn get_distinguishes_no_wall_from_empty_wall() {
        let g = grid();
        let walls = WallRegistry::new();
        assert_eq!(walls.get(&g, 0, 0, Direction::E).unwrap(), None);
        let record = walls.get(&g, 0, 0, Direction::N).unwrap().unwrap();
        assert!(record.is_empty());
        assert!(walls.is_empty());
    }

    #[test]
    fn add_object_inside_a_room_is_rejected() {
        let g = grid();
        let mut walls = WallRegistry::new();
        let err = walls.add_object(&g, 0, 0, Direction::E, picture("a.png")).unwrap_err();
        assert_eq!(err, MapError::NoWallAtPosition { x: 0, y: 0, direction: Direction::E });
        assert!(walls.is_empty());
        assert_eq!(walls.get(&g, 0, 0, Direction::E).unwrap(), None);
    }

    #[test]
    fn objects_keep_insertion_order_and_remove_by_value() {
        let g = grid();
        let mut walls = WallRegistry::new();
        for name in ["a.png", "b.png", "a.png"] {
            walls.add_object(&g, 0, 0, Direction::N, picture(name)).unwrap();
        }
        let names: Vec<_> = walls.get(&g, 0, 0, Direction::N).unwrap().unwrap().objects()
            .iter()
            .map(|o| o.image_file_name.as_str())
            .collect();
        assert_eq!(names, ["a.png", "b.png", "a.png"]);

        assert!(walls.remove_object(&g, 0, 0, Direction::N, &picture("a.png")).unwrap());
        let names: Vec<_> = walls.get(&g, 0, 0, Direction::N).unwrap().unwrap().objects()
            .iter()
            .map(|o| o.image_file_name.as_str())
            .collect();
        assert_eq!(names, ["b.png", "a.png"]);

        assert!(!walls.remove_object(&g, 0, 0, Direction::N, &picture("zzz.png")).unwrap());
        assert!(!walls.remove_object(&g, 1, 1, Direction::S, &picture("b.png")).unwrap());
    }

    #[test]
    fn emptied_records_are_dropped() {
        let g = grid();
        let mut walls = WallRegistry::new();
        walls.add_object(&g, 0, 0, Direction::N, picture("a.png")).unwrap();
        assert_eq!(walls.len(), 1);
        walls.remove_object(&g, 0, 0, Direction::N, &picture("a.png")).unwrap();
        assert!(walls.is_empty());
    }

    #[test]
    fn doors_are_visible_from_both_sides() {
        let g = grid();
        let mut walls = WallRegistry::new();
        assert!(!walls.have_door(&g, 1, 0, Direction::E).unwrap());

        walls.add_door(&g, 1, 0, Direction::E, "door_1").unwrap();
        assert!(walls.have_door(&g, 1, 0, Direction::E).unwrap());
        assert!(walls.have_door(&g, 2, 0, Direction::W).unwrap());

        walls.add_door(&g, 1, 1, Direction::N, "door_2").unwrap();
        assert!(walls.have_door(&g, 1, 0, Direction::S).unwrap());
        assert!(walls.have_door(&g, 1, 1, Direction::N).unwrap());
    }

    #[test]
    fn object_only_record_still_sees_far_side_door() {
        let g = grid();
        let mut walls = WallRegistry::new();
        walls.add_object(&g, 2, 0, Direction::W, picture("a.png")).unwrap();
        walls.add_door(&g, 1, 0, Direction::E, "door_1").unwrap();
        assert!(walls.have_door(&g, 2, 0, Direction::W).unwrap());
    }

    #[test]
    fn no_door_inside_a_room() {
        let g = grid();
        let mut walls = WallRegistry::new();
        assert!(walls.add_door(&g, 0, 0, Direction::E, "d").is_err());
        assert!(!walls.have_door(&g, 0, 0, Direction::E).unwrap());
    }

    #[test]
    fn duplicate_door_ids_are_ignored() {
        let g = grid();
        let mut walls = WallRegistry::new();
        walls.add_door(&g, 1, 0, Direction::E, "d").unwrap();
        walls.add_door(&g, 1, 0, Direction::E, "d").unwrap();
        assert_eq!(walls.get(&g, 1, 0, Direction::E).unwrap().unwrap().doors(), ["d".to_string()]);
    }

    #[test]
    fn object_validation_checks_ranges() {
        assert!(picture("a.png").validate().is_ok());
        assert!(WallObject::new("a.png", 101.0, 0.0, 0.2).validate().is_err());
        assert!(WallObject::new("a.png", 10.0, -1.0, 0.2).validate().is_err());
        assert!(WallObject::new("a.png", 10.0, 10.0, 0.0).validate().is_err());
        assert!(WallObject::new("", 10.0, 10.0, 0.2).validate().is_err());
    }

    #[test]
    fn link_requires_id_and_kind() {
        let plain = picture("a.png");
        assert_eq!(plain.link(), None);
        let linked = picture("a.png").linked("res_1", ObjectKind::Resource);
        assert_eq!(linked.link(), Some(("res_1", ObjectKind::Resource)));
    }
}
