//! The player's discrete position and the rules for moving it.
//!
//! Transitions are pure: they return a candidate state and the caller decides
//! whether to commit it. A candidate may lie off the grid (a door on an outer
//! wall leads nowhere); [`NavigationState::checked`] turns that into an
//! `OutOfBounds` error so input handlers can refuse it.

use bevy::prelude::*;

use crate::world::{Direction, GameMap, MapError};

/// The player's `(x, y, direction)`.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavigationState {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(0, 0, Direction::S)
    }
}

impl NavigationState {
    pub fn new(x: i32, y: i32, direction: Direction) -> Self {
        Self { x, y, direction }
    }

    /// One cell along the facing direction, facing unchanged. No checks.
    pub fn go_forward(self) -> Self {
        let (dx, dy) = self.direction.offset();
        Self::new(self.x + dx, self.y + dy, self.direction)
    }

    /// Turn towards the wall on the right, or walk along the room if there is none.
    ///
    /// With a wall on the right the player rotates in place. Otherwise the room
    /// continues that way and the player sidesteps one cell keeping the facing.
    pub fn turn_right(self, map: &GameMap) -> Result<Self, MapError> {
        let side = self.direction.rotate_cw();
        if map.wall_exists(self.x, self.y, side)? {
            return Ok(Self { direction: side, ..self });
        }
        let (x, y) = match self.direction {
            Direction::N => (self.x + 1, self.y),
            Direction::E => (self.x, self.y + 1),
            Direction::S => (self.x - 1, self.y),
            Direction::W => (self.x, self.y - 1),
        };
        Ok(Self::new(x, y, self.direction))
    }

    /// Mirror of [`turn_right`](Self::turn_right).
    pub fn turn_left(self, map: &GameMap) -> Result<Self, MapError> {
        let side = self.direction.rotate_ccw();
        if map.wall_exists(self.x, self.y, side)? {
            return Ok(Self { direction: side, ..self });
        }
        let (x, y) = match self.direction {
            Direction::N => (self.x - 1, self.y),
            Direction::E => (self.x, self.y - 1),
            Direction::S => (self.x + 1, self.y),
            Direction::W => (self.x, self.y + 1),
        };
        Ok(Self::new(x, y, self.direction))
    }

    /// Walk through the door ahead, if any.
    ///
    /// Lands on the first cell past the door, then one more cell when the new
    /// room continues ahead, so the player ends up facing that room's far wall
    /// (rooms are at most two cells deep). Unchanged when there is no door.
    pub fn cross_door(self, map: &GameMap) -> Result<Self, MapError> {
        if !map.have_door(self.x, self.y, self.direction)? {
            return Ok(self);
        }
        let landing = self.go_forward();
        if !map.contains(landing.x, landing.y) {
            return Ok(landing);
        }
        if map.wall_exists(landing.x, landing.y, landing.direction)? {
            Ok(landing)
        } else {
            Ok(landing.go_forward())
        }
    }

    /// Walk backwards through a door behind the player, keeping the facing.
    ///
    /// After crossing, the player steps up to the wall it came through when the
    /// room continues ahead. Unchanged when there is no door behind.
    pub fn step_back(self, map: &GameMap) -> Result<Self, MapError> {
        let behind = Self {
            direction: self.direction.reverse(),
            ..self
        };
        if !map.have_door(behind.x, behind.y, behind.direction)? {
            return Ok(self);
        }
        let crossed = behind.cross_door(map)?;
        let turned = Self {
            direction: self.direction,
            ..crossed
        };
        if map.contains(turned.x, turned.y) && !map.wall_exists(turned.x, turned.y, turned.direction)? {
            Ok(turned.go_forward())
        } else {
            Ok(turned)
        }
    }

    /// Whether the position lies on the map.
    pub fn is_on(&self, map: &GameMap) -> bool {
        map.contains(self.x, self.y)
    }

    /// The state itself if on the map, `OutOfBounds` otherwise.
    pub fn checked(self, map: &GameMap) -> Result<Self, MapError> {
        if self.is_on(map) {
            Ok(self)
        } else {
            Err(MapError::OutOfBounds { x: self.x, y: self.y })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{MapData, RoomData, WallData};
    use std::collections::BTreeMap;

    fn synthetic(cells: &[&str], doors: &[(i32, i32, Direction)]) -> GameMap {
        let mut rooms = BTreeMap::new();
        for c in cells.iter().flat_map(|row| row.chars()) {
            rooms.entry(c.to_string()).or_insert(RoomData {
                wall_color: (0.5, 0.5, 0.5),
                room_name: None,
            });
        }
        let walls = doors
            .iter()
            .enumerate()
            .map(|(i, &(x, y, d))| WallData {
                position: (x, y, d),
                doors: vec![format!("door_{i}")],
                objects: Vec::new(),
            })
            .collect();
        GameMap::from_data(MapData {
            max_x: cells[0].len(),
            max_y: cells.len(),
            rooms,
            cells: cells.iter().map(|s| s.to_string()).collect(),
            walls,
        })
        .unwrap()
    }

    #[test]
    fn go_forward_uses_compass_offsets() {
        let s = NavigationState::new(2, 2, Direction::N);
        assert_eq!(s.go_forward(), NavigationState::new(2, 1, Direction::N));
        let s = NavigationState::new(2, 2, Direction::E);
        assert_eq!(s.go_forward(), NavigationState::new(3, 2, Direction::E));
        let s = NavigationState::new(0, 0, Direction::W);
        assert_eq!(s.go_forward(), NavigationState::new(-1, 0, Direction::W));
    }

    #[test]
    fn turn_right_rotates_in_place_against_a_wall() {
        let map = GameMap::default();
        // (2, 1) is the east end of C; its east side is a wall.
        let s = NavigationState::new(2, 1, Direction::N);
        assert_eq!(s.turn_right(&map).unwrap(), NavigationState::new(2, 1, Direction::E));
    }

    #[test]
    fn turn_right_sidesteps_along_the_room() {
        let map = GameMap::default();
        let s = NavigationState::new(1, 1, Direction::N);
        assert_eq!(s.turn_right(&map).unwrap(), NavigationState::new(2, 1, Direction::N));
    }

    #[test]
    fn turn_left_mirrors_turn_right() {
        let map = GameMap::default();
        let s = NavigationState::new(1, 1, Direction::N);
        assert_eq!(s.turn_left(&map).unwrap(), NavigationState::new(1, 1, Direction::W));
        let s = NavigationState::new(2, 1, Direction::N);
        assert_eq!(s.turn_left(&map).unwrap(), NavigationState::new(1, 1, Direction::N));
    }

    #[test]
    fn sidestep_moves_towards_the_turned_side() {
        let map = synthetic(&["AAA", "AAA", "AAA"], &[]);
        for d in Direction::ALL {
            let s = NavigationState::new(1, 1, d);
            let right = s.turn_right(&map).unwrap();
            let left = s.turn_left(&map).unwrap();
            let (rx, ry) = d.rotate_cw().offset();
            let (lx, ly) = d.rotate_ccw().offset();
            assert_eq!(right, NavigationState::new(1 + rx, 1 + ry, d));
            assert_eq!(left, NavigationState::new(1 + lx, 1 + ly, d));
        }
    }

    #[test]
    fn right_turns_in_an_open_room_walk_to_the_corner() {
        let map = synthetic(&["AAA", "AAA", "AAA"], &[]);
        let mut s = NavigationState::new(1, 1, Direction::N);
        let expected = [
            NavigationState::new(2, 1, Direction::N),
            NavigationState::new(2, 1, Direction::E),
            NavigationState::new(2, 2, Direction::E),
            NavigationState::new(2, 2, Direction::S),
        ];
        for next in expected {
            s = s.turn_right(&map).unwrap();
            assert_eq!(s, next);
        }
        // Unlike a walled cell, four turns do not lead back to the start.
        assert_ne!(s, NavigationState::new(1, 1, Direction::N));
    }

    #[test]
    fn four_right_turns_in_a_single_cell_room_return_to_start() {
        let map = synthetic(&["A"], &[]);
        for d in Direction::ALL {
            let start = NavigationState::new(0, 0, d);
            let mut s = start;
            for _ in 0..4 {
                s = s.turn_right(&map).unwrap();
            }
            assert_eq!(s, start);
        }
    }

    #[test]
    fn four_right_turns_where_every_side_is_walled_return_to_start() {
        let map = synthetic(&["AB", "CD"], &[]);
        for y in 0..2 {
            for x in 0..2 {
                for d in Direction::ALL {
                    let start = NavigationState::new(x, y, d);
                    let mut s = start;
                    for _ in 0..4 {
                        s = s.turn_right(&map).unwrap();
                        assert_eq!((s.x, s.y), (x, y));
                    }
                    assert_eq!(s, start);
                }
            }
        }
    }

    #[test]
    fn cross_door_without_door_is_a_no_op() {
        let map = GameMap::default();
        // A's south wall at x = 2 has no door.
        let s = NavigationState::new(2, 0, Direction::S);
        assert_eq!(s.cross_door(&map).unwrap(), s);
        // Facing into the same room is not a door either.
        let s = NavigationState::new(1, 0, Direction::E);
        assert_eq!(s.cross_door(&map).unwrap(), s);
    }

    #[test]
    fn cross_door_stops_at_far_wall_of_shallow_room() {
        let map = GameMap::default();
        // A (1, 0) south door into C, which is one cell deep.
        let s = NavigationState::new(1, 0, Direction::S);
        assert_eq!(s.cross_door(&map).unwrap(), NavigationState::new(1, 1, Direction::S));
    }

    #[test]
    fn cross_door_walks_through_deep_room() {
        let map = GameMap::default();
        // A (0, 0) south door into B, which spans (0, 1) and (0, 2).
        let s = NavigationState::new(0, 0, Direction::S);
        assert_eq!(s.cross_door(&map).unwrap(), NavigationState::new(0, 2, Direction::S));
    }

    #[test]
    fn cross_door_uses_far_side_declaration() {
        let map = GameMap::default();
        // door_2 is declared on A's side only.
        let s = NavigationState::new(1, 1, Direction::N);
        assert_eq!(s.cross_door(&map).unwrap(), NavigationState::new(1, 0, Direction::N));
    }

    #[test]
    fn door_on_outer_wall_leads_off_the_grid() {
        let map = GameMap::default();
        // door_13 sits on the east edge.
        let s = NavigationState::new(3, 3, Direction::E);
        let landing = s.cross_door(&map).unwrap();
        assert_eq!(landing, NavigationState::new(4, 3, Direction::E));
        assert!(!landing.is_on(&map));
        assert_eq!(landing.checked(&map), Err(MapError::OutOfBounds { x: 4, y: 3 }));
    }

    #[test]
    fn step_back_through_door_behind() {
        let map = GameMap::default();
        // Bottom of B facing north; door_7 behind leads down into F.
        let s = NavigationState::new(0, 2, Direction::N);
        let back = s.step_back(&map).unwrap();
        // Through door_7 into F (0, 3); F continues south so the backward cross
        // lands on (0, 4); facing north again F continues, so step up to (0, 3).
        assert_eq!(back, NavigationState::new(0, 3, Direction::N));
    }

    #[test]
    fn step_back_without_door_is_a_no_op() {
        let map = GameMap::default();
        let s = NavigationState::new(2, 1, Direction::S);
        assert_eq!(s.step_back(&map).unwrap(), s);
    }

    #[test]
    fn transitions_reject_off_grid_start() {
        let map = GameMap::default();
        let s = NavigationState::new(-1, 0, Direction::N);
        assert!(s.turn_right(&map).is_err());
        assert!(s.turn_left(&map).is_err());
        assert!(s.cross_door(&map).is_err());
    }
}
