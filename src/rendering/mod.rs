//! Rendering module - what the player sees of the wall ahead.

mod cache;
mod images;
mod layout;
mod plugin;
mod view;

pub use cache::{ResolvedObject, WallInfo, WallQueryCache};
pub use images::{svg_dimensions, FileImageLoader, ImageData, ImageHandle, ImageLoader};
pub use layout::{ClickTarget, ViewLayout, ViewRect, CHARACTER_WIDTH, DOOR_HEIGHT, DOOR_WIDTH, RESIZE_HANDLE_HALF};
pub use plugin::{invalidate_on_map_update, RenderingPlugin};
pub use view::{shade, CharacterMarker, WallView};
