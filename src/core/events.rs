//! Global events used for cross-system communication.
//!
//! Navigation sends `PositionChanged` after committing a move, the editor sends
//! `MapUpdated` after every wall mutation, and the renderer/HUD listen to both.

use bevy::prelude::*;

use crate::world::{Direction, ObjectKind};

/// Sent when the player's `(x, y, direction)` has been committed.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionChanged {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

/// Sent when the wall at `(x, y, direction)` was mutated.
///
/// Listeners holding derived wall data for that key must drop it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapUpdated {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
}

/// Sent when a linked wall object is clicked in play mode.
///
/// The resource/question viewers live outside this crate.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ObjectActivated {
    pub id: String,
    pub kind: ObjectKind,
}
