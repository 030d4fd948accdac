//! Map document structures and JSON loading.
//!
//! The on-disk shape is:
//!
//! ```json
//! { "max_x": 4, "max_y": 6,
//!   "rooms": { "A": { "wall_color": [0.7, 0.8, 0.7], "room_name": "Hall" } },
//!   "cells": ["AAAA", ...],
//!   "walls": [ { "position": [0, 0, "S"], "doors": ["door_1"],
//!                "objects": [ { "image_file_name": "...", "wall_x": 50.0,
//!                               "wall_y": 50.0, "wall_scale": 0.2 } ] } ] }
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::direction::Direction;
use super::error::DataLoadError;
use super::map::GameMap;
use super::walls::WallObject;

/// Per-room attributes as stored in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomData {
    pub wall_color: (f32, f32, f32),
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
}

impl RoomData {
    fn colored(r: f32, g: f32, b: f32) -> Self {
        Self {
            wall_color: (r, g, b),
            room_name: None,
        }
    }
}

/// One wall record as stored in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallData {
    pub position: (i32, i32, Direction),
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub doors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<WallObject>,
}

impl WallData {
    fn door(x: i32, y: i32, direction: Direction, id: &str) -> Self {
        Self {
            position: (x, y, direction),
            doors: vec![id.to_string()],
            objects: Vec::new(),
        }
    }
}

/// Raw map document as read from JSON.
///
/// Nothing here is trusted until [`GameMap::from_data`] validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    pub max_x: usize,
    pub max_y: usize,
    pub rooms: BTreeMap<String, RoomData>,
    pub cells: Vec<String>,
    #[serde(default)]
    pub walls: Vec<WallData>,
}

impl MapData {
    /// The compiled-in map.
    ///
    /// ```text
    ///        0     1     2     3
    ///     +-----+-----+-----+-----+
    ///  0  |           A           |
    ///     +--#--+--#--------+--#--+
    ///  1  |     |     C     #     |
    ///     +  B  +-----------+  E  +
    ///  2  |     #     D     |     |
    ///     +--#--+-----------+-----+
    ///  3  |     #     G     |     |
    ///     +  F  +-----------+  I  +
    ///  4  |     #     H     #     |
    ///     +--#--+--#--------+--#--+
    ///  5  |           J           |
    ///     +-----+-----+-----+-----+
    /// ```
    pub fn default_map() -> Self {
        let rooms = [
            ("A", RoomData::colored(0.7, 0.8, 0.7)),
            ("B", RoomData::colored(0.8, 0.8, 0.6)),
            ("C", RoomData::colored(0.6, 0.6, 1.0)),
            ("D", RoomData::colored(0.7, 0.8, 0.7)),
            ("E", RoomData::colored(0.8, 0.8, 0.6)),
            ("F", RoomData::colored(0.7, 0.8, 0.7)),
            ("G", RoomData::colored(0.3, 0.4, 0.3)),
            ("H", RoomData::colored(0.8, 0.8, 0.6)),
            ("I", RoomData::colored(0.7, 0.8, 0.7)),
            ("J", RoomData::colored(0.8, 0.8, 0.6)),
        ]
        .into_iter()
        .map(|(id, data)| (id.to_string(), data))
        .collect();

        let cells = ["AAAA", "BCCE", "BDDE", "FGGI", "FHHI", "JJJJ"]
            .iter()
            .map(|row| row.to_string())
            .collect();

        use Direction::{E, S};
        let walls = vec![
            WallData::door(0, 0, S, "door_1"),
            WallData::door(1, 0, S, "door_2"),
            WallData::door(3, 0, S, "door_3"),
            WallData::door(0, 1, E, "door_4"),
            WallData::door(2, 1, E, "door_6"),
            WallData::door(0, 2, S, "door_7"),
            WallData::door(0, 2, E, "door_8"),
            WallData::door(0, 3, E, "door_12"),
            WallData::door(3, 3, E, "door_13"),
            WallData::door(0, 4, S, "door_14"),
            WallData::door(0, 4, E, "door_15"),
            WallData::door(1, 4, S, "door_16"),
            WallData::door(2, 4, E, "door_17"),
            WallData::door(3, 4, S, "door_18"),
        ];

        Self {
            max_x: 4,
            max_y: 6,
            rooms,
            cells,
            walls,
        }
    }

    /// Parse a JSON document. `source` names it in errors.
    pub fn from_json(contents: &str, source: &str) -> Result<Self, DataLoadError> {
        serde_json::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: source.to_string(),
            details: e.to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String, DataLoadError> {
        serde_json::to_string_pretty(self).map_err(|e| DataLoadError::ParseError {
            path: "<memory>".to_string(),
            details: e.to_string(),
        })
    }

    /// Read and parse a map file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        if !path.exists() {
            return Err(DataLoadError::FileNotFound(display));
        }
        let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;
        Self::from_json(&contents, &display)
    }

    /// Write the document as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DataLoadError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| DataLoadError::WriteError {
            path: path.display().to_string(),
            details: e.to_string(),
        })
    }

    /// Run every structural check without keeping the built map.
    pub fn validate(&self) -> Result<(), DataLoadError> {
        GameMap::from_data(self.clone()).map(|_| ())
    }
}

/// Load and validate a map file, falling back to the default map on any error.
pub fn load_map_or_default(path: impl AsRef<Path>) -> GameMap {
    let path = path.as_ref();
    match MapData::load(path).and_then(GameMap::from_data) {
        Ok(map) => {
            info!(
                "Loaded map {:?} ({}x{}, {} wall records)",
                path,
                map.grid().max_x(),
                map.grid().max_y(),
                map.walls().len()
            );
            map
        }
        Err(DataLoadError::FileNotFound(_)) => {
            warn!("Map file {:?} not found, using default map", path);
            GameMap::default()
        }
        Err(e) => {
            error!("Rejected map {:?}: {}. Using default map.", path, e);
            GameMap::default()
        }
    }
}
