//! Error types for map queries, mutations, and map document loading.

use thiserror::Error;

use super::direction::Direction;

/// Errors returned by grid, wall, and cache operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// Coordinate outside the grid.
    #[error("Position ({x}, {y}) is outside the map")]
    OutOfBounds { x: i32, y: i32 },

    /// Boundary is interior to a room, so there is no wall to mutate.
    #[error("No wall at ({x}, {y}) facing {direction}")]
    NoWallAtPosition { x: i32, y: i32, direction: Direction },

    /// Image file missing or undecodable.
    #[error("Failed to load image '{path}': {details}")]
    ResourceLoadFailure { path: String, details: String },

    /// Room identifier with no room definition.
    #[error("Unknown room '{0}'")]
    UnknownRoom(char),

    /// No matching object on the wall.
    #[error("Object not found on wall ({x}, {y}) facing {direction}")]
    ObjectNotFound { x: i32, y: i32, direction: Direction },

    /// Wall object with out-of-range placement or scale.
    #[error("Invalid wall object: {0}")]
    InvalidObject(String),
}

/// Errors that can occur when loading or saving a map document.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// File could not be written.
    #[error("Failed to write file '{path}': {details}")]
    WriteError { path: String, details: String },

    /// JSON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// Cell rows don't match the declared grid bounds.
    #[error("Grid mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    GridMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    /// Cell references a room with no definition.
    #[error("Unknown room '{character}' at position ({x}, {y})")]
    UnknownRoom { character: char, x: usize, y: usize },

    /// Wall record outside the grid or between cells of the same room.
    #[error("Invalid wall at ({x}, {y}, {direction}): {reason}")]
    InvalidWall {
        x: i32,
        y: i32,
        direction: Direction,
        reason: String,
    },

    /// Wall object failed validation.
    #[error("Invalid object on wall ({x}, {y}, {direction}): {reason}")]
    InvalidObject {
        x: i32,
        y: i32,
        direction: Direction,
        reason: String,
    },
}
