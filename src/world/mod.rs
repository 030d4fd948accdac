//! World module - room grid, walls, and map documents.

mod data;
mod direction;
mod error;
mod grid;
mod map;
mod plugin;
mod walls;

pub use data::{load_map_or_default, MapData, RoomData, WallData};
pub use direction::Direction;
pub use error::{DataLoadError, MapError};
pub use grid::{Room, RoomGrid, RoomId};
pub use map::GameMap;
pub use plugin::{load_map, WorldPlugin};
pub use walls::{ObjectKind, WallKey, WallObject, WallRecord, WallRegistry};
