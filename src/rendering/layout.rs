//! Screen layout of the facing-wall view and click hit testing.
//!
//! The view is divided into twelfths of its height (`grid_size`). The bottom
//! twelfth is floor, side walls take one `grid_size` at each edge, and the door
//! is 3 x 6 units standing on the floor.

use bevy::prelude::*;

use super::cache::WallInfo;
use crate::world::Direction;

/// Door width in grid units.
pub const DOOR_WIDTH: f32 = 3.0;
/// Door height in grid units.
pub const DOOR_HEIGHT: f32 = 6.0;
/// Walking character sprite width in pixels.
pub const CHARACTER_WIDTH: f32 = 100.0;
/// Half size of the resize handle at an object's top-left corner.
pub const RESIZE_HANDLE_HALF: f32 = 5.0;

/// Axis-aligned rectangle in view pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewRect {
    /// Strict containment, edges excluded.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        self.x < px && px < self.x + self.width && self.y < py && py < self.y + self.height
    }
}

/// What a click on the view landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickTarget {
    /// Object at this position in the wall's object list.
    Object(usize),
    /// Resize handle of the object at this position.
    ResizeHandle(usize),
    Door,
    LeftWall,
    RightWall,
    /// Anywhere else; the character just walks there.
    Floor,
}

/// Current view size.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewLayout {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewLayout {
    fn default() -> Self {
        Self::new(1200.0, 900.0)
    }
}

impl ViewLayout {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// One twelfth of the view height.
    pub fn grid_size(&self) -> f32 {
        self.height / 12.0
    }

    /// Door rectangle. Doors sit on the right of walls faced north or west.
    pub fn door_rect(&self, direction: Direction) -> ViewRect {
        let grid = self.grid_size();
        let x = match direction {
            Direction::N | Direction::W => self.width - grid * (DOOR_WIDTH + 2.0),
            Direction::E | Direction::S => grid * 2.0,
        };
        ViewRect {
            x,
            y: self.height - grid * (DOOR_HEIGHT + 1.0),
            width: grid * DOOR_WIDTH,
            height: grid * DOOR_HEIGHT,
        }
    }

    /// Percent-of-wall placement to view pixels.
    pub fn wall_to_view(&self, wall_x: f32, wall_y: f32) -> (f32, f32) {
        (wall_x * self.width / 100.0, wall_y * self.height / 100.0)
    }

    /// View pixels to percent-of-wall placement, clamped to 0-100.
    pub fn view_to_wall(&self, x: f32, y: f32) -> (f32, f32) {
        let wall_x = x * 100.0 / self.width.max(1.0);
        let wall_y = y * 100.0 / self.height.max(1.0);
        (wall_x.clamp(0.0, 100.0), wall_y.clamp(0.0, 100.0))
    }

    /// Bounding box of a resolved object in view pixels.
    pub fn object_rect(&self, object: &super::cache::ResolvedObject) -> ViewRect {
        let (x, y) = self.wall_to_view(object.object.wall_x, object.object.wall_y);
        let (width, height) = object.view_size(self.height);
        ViewRect { x, y, width, height }
    }

    pub fn in_left_wall(&self, x: f32) -> bool {
        x < self.grid_size()
    }

    pub fn in_right_wall(&self, x: f32) -> bool {
        x > self.width - self.grid_size()
    }

    /// Resolve a click. Objects win over the door and side zones; the last drawn
    /// (topmost) object wins among overlapping ones.
    pub fn classify(&self, info: &WallInfo, direction: Direction, x: f32, y: f32) -> ClickTarget {
        for resolved in info.objects.iter().rev() {
            let rect = self.object_rect(resolved);
            let handle = ViewRect {
                x: rect.x - RESIZE_HANDLE_HALF,
                y: rect.y - RESIZE_HANDLE_HALF,
                width: RESIZE_HANDLE_HALF * 2.0,
                height: RESIZE_HANDLE_HALF * 2.0,
            };
            if handle.contains(x, y) {
                return ClickTarget::ResizeHandle(resolved.index);
            }
            if rect.contains(x, y) {
                return ClickTarget::Object(resolved.index);
            }
        }
        if info.have_door && self.door_rect(direction).contains(x, y) {
            ClickTarget::Door
        } else if self.in_left_wall(x) {
            ClickTarget::LeftWall
        } else if self.in_right_wall(x) {
            ClickTarget::RightWall
        } else {
            ClickTarget::Floor
        }
    }

    /// Where the character stops when walking to the left side wall.
    pub fn left_stop(&self, info: &WallInfo) -> f32 {
        if info.wall_ccw {
            self.grid_size() - 1.0
        } else {
            0.0
        }
    }

    /// Where the character stops when walking to the right side wall.
    pub fn right_stop(&self, info: &WallInfo) -> f32 {
        let stop = self.width - CHARACTER_WIDTH + 1.0;
        if info.wall_cw {
            stop - self.grid_size()
        } else {
            stop
        }
    }

    /// Where the character reappears after turning left onto the next wall.
    pub fn after_left_turn(&self) -> f32 {
        self.width - self.grid_size() - CHARACTER_WIDTH
    }

    /// Where the character reappears after turning right onto the next wall.
    pub fn after_right_turn(&self) -> f32 {
        self.grid_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::cache::ResolvedObject;
    use crate::rendering::images::{ImageData, ImageHandle};
    use crate::world::WallObject;
    use std::sync::Arc;

    fn info(have_door: bool, objects: Vec<ResolvedObject>) -> WallInfo {
        WallInfo {
            wall_ahead: true,
            have_door,
            wall_cw: true,
            wall_ccw: false,
            wall_color: (1.0, 1.0, 1.0),
            objects,
        }
    }

    fn square(index: usize, wall_x: f32, wall_y: f32) -> ResolvedObject {
        ResolvedObject {
            index,
            object: WallObject::new("box.png", wall_x, wall_y, 0.1),
            image: Arc::new(ImageHandle {
                path: "box.png".to_string(),
                width: 10.0,
                height: 10.0,
                data: ImageData::Vector(String::new()),
            }),
        }
    }

    // 1200 x 1200 view: grid_size = 100.
    fn layout() -> ViewLayout {
        ViewLayout::new(1200.0, 1200.0)
    }

    #[test]
    fn door_sits_right_for_north_and_west() {
        let l = layout();
        assert_eq!(l.door_rect(Direction::N).x, 700.0);
        assert_eq!(l.door_rect(Direction::W).x, 700.0);
        assert_eq!(l.door_rect(Direction::S).x, 200.0);
        let rect = l.door_rect(Direction::E);
        assert_eq!((rect.y, rect.width, rect.height), (500.0, 300.0, 600.0));
    }

    #[test]
    fn percent_conversion_round_trips() {
        let l = layout();
        assert_eq!(l.wall_to_view(50.0, 25.0), (600.0, 300.0));
        assert_eq!(l.view_to_wall(600.0, 300.0), (50.0, 25.0));
        assert_eq!(l.view_to_wall(-20.0, 5000.0), (0.0, 100.0));
    }

    #[test]
    fn classify_side_zones_and_floor() {
        let l = layout();
        let i = info(false, Vec::new());
        assert_eq!(l.classify(&i, Direction::S, 50.0, 600.0), ClickTarget::LeftWall);
        assert_eq!(l.classify(&i, Direction::S, 1150.0, 600.0), ClickTarget::RightWall);
        assert_eq!(l.classify(&i, Direction::S, 600.0, 600.0), ClickTarget::Floor);
    }

    #[test]
    fn door_only_counts_when_present() {
        let l = layout();
        assert_eq!(l.classify(&info(true, Vec::new()), Direction::S, 300.0, 800.0), ClickTarget::Door);
        assert_eq!(l.classify(&info(false, Vec::new()), Direction::S, 300.0, 800.0), ClickTarget::Floor);
    }

    #[test]
    fn objects_win_over_door_and_topmost_wins() {
        let l = layout();
        // Both objects cover 120x120 px from (240, 720) and (300, 720).
        let i = info(true, vec![square(0, 20.0, 60.0), square(1, 25.0, 60.0)]);
        assert_eq!(l.classify(&i, Direction::S, 320.0, 800.0), ClickTarget::Object(1));
        assert_eq!(l.classify(&i, Direction::S, 260.0, 800.0), ClickTarget::Object(0));
        assert_eq!(l.classify(&i, Direction::S, 301.0, 721.0), ClickTarget::ResizeHandle(1));
    }

    #[test]
    fn walking_stops_respect_side_walls() {
        let l = layout();
        let i = info(false, Vec::new());
        assert_eq!(l.left_stop(&i), 0.0);
        assert_eq!(l.right_stop(&i), 1200.0 - CHARACTER_WIDTH + 1.0 - 100.0);
        assert_eq!(l.after_right_turn(), 100.0);
        assert_eq!(l.after_left_turn(), 1000.0);
    }
}
