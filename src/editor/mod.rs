//! Editor module - placing, moving, resizing and removing wall objects, naming
//! rooms and declaring doors.

pub mod ops;
mod plugin;
mod selection;
mod systems;

pub use plugin::EditorPlugin;
pub use selection::{DragEdit, EditorSelection, Selected, SelectionMode};
pub use systems::{DeclareDoorRequest, PlaceObjectRequest, RenameRoomRequest};
