//! The room partition of a fixed-size grid.

use std::collections::BTreeMap;

use super::direction::Direction;
use super::error::{DataLoadError, MapError};

/// Room identifiers are the single characters used in the cell rows.
pub type RoomId = char;

/// A labeled partition of the grid sharing one wall color and name.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    id: RoomId,
    wall_color: (f32, f32, f32),
    name: Option<String>,
}

impl Room {
    pub fn new(id: RoomId, wall_color: (f32, f32, f32)) -> Self {
        Self {
            id,
            wall_color,
            name: None,
        }
    }

    pub fn id(&self) -> RoomId {
        self.id
    }

    /// RGB wall color, each channel in 0.0-1.0.
    pub fn wall_color(&self) -> (f32, f32, f32) {
        self.wall_color
    }

    /// Display name, or `None` if the editor never named the room.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Rename the room. An empty name clears it.
    pub fn set_name(&mut self, name: &str) {
        self.name = if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };
    }
}

/// Fixed `max_x` x `max_y` grid where every cell belongs to exactly one room.
///
/// The cell layout never changes after construction; only room names do.
#[derive(Debug, Clone)]
pub struct RoomGrid {
    max_x: usize,
    max_y: usize,
    /// Row-major room ids, `cells[y * max_x + x]`.
    cells: Vec<RoomId>,
    rooms: BTreeMap<RoomId, Room>,
}

impl RoomGrid {
    /// Build a grid from cell rows (one string per `y`, one character per `x`).
    ///
    /// Rows must all have the same non-zero length and every character must name
    /// one of `rooms`.
    pub fn from_rows<S: AsRef<str>>(
        rows: &[S],
        rooms: impl IntoIterator<Item = Room>,
    ) -> Result<Self, DataLoadError> {
        let rooms: BTreeMap<RoomId, Room> = rooms.into_iter().map(|r| (r.id, r)).collect();
        let max_y = rows.len();
        let max_x = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);

        let mut cells = Vec::with_capacity(max_x * max_y);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let width = row.chars().count();
            if width != max_x || max_x == 0 {
                return Err(DataLoadError::GridMismatch {
                    expected_width: max_x,
                    expected_height: max_y,
                    actual_width: width,
                    actual_height: max_y,
                });
            }
            for (x, c) in row.chars().enumerate() {
                if !rooms.contains_key(&c) {
                    return Err(DataLoadError::UnknownRoom { character: c, x, y });
                }
                cells.push(c);
            }
        }
        if max_y == 0 {
            return Err(DataLoadError::GridMismatch {
                expected_width: 1,
                expected_height: 1,
                actual_width: 0,
                actual_height: 0,
            });
        }

        Ok(Self {
            max_x,
            max_y,
            cells,
            rooms,
        })
    }

    /// A 1 x 1 grid holding one room.
    pub fn single(room: Room) -> Self {
        let id = room.id;
        Self {
            max_x: 1,
            max_y: 1,
            cells: vec![id],
            rooms: BTreeMap::from([(id, room)]),
        }
    }

    pub fn max_x(&self) -> usize {
        self.max_x
    }

    pub fn max_y(&self) -> usize {
        self.max_y
    }

    /// Whether `(x, y)` lies inside the grid.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.max_x && (y as usize) < self.max_y
    }

    /// Room id of the cell at `(x, y)`.
    pub fn room_at(&self, x: i32, y: i32) -> Result<RoomId, MapError> {
        if !self.contains(x, y) {
            return Err(MapError::OutOfBounds { x, y });
        }
        Ok(self.cells[y as usize * self.max_x + x as usize])
    }

    /// Coordinates one step from `(x, y)` along `direction`, or `None` off the grid.
    pub fn neighbor(&self, x: i32, y: i32, direction: Direction) -> Option<(i32, i32)> {
        let (dx, dy) = direction.offset();
        let (nx, ny) = (x + dx, y + dy);
        self.contains(nx, ny).then_some((nx, ny))
    }

    /// Room of the neighboring cell, or `None` at the grid edge.
    pub fn next_room(&self, x: i32, y: i32, direction: Direction) -> Option<RoomId> {
        let (nx, ny) = self.neighbor(x, y, direction)?;
        self.room_at(nx, ny).ok()
    }

    pub fn room(&self, id: RoomId) -> Result<&Room, MapError> {
        self.rooms.get(&id).ok_or(MapError::UnknownRoom(id))
    }

    pub fn room_mut(&mut self, id: RoomId) -> Result<&mut Room, MapError> {
        self.rooms.get_mut(&id).ok_or(MapError::UnknownRoom(id))
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Cell rows in the same shape they were built from.
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.max_x)
            .map(|row| row.iter().collect())
            .collect()
    }
}
