//! The object selected in the editor and how mouse drags edit it.

use bevy::prelude::*;

use crate::rendering::ClickTarget;

/// What dragging the selected object does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Move,
    Resize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selected {
    /// Position in the current wall's object list
    pub index: usize,
    /// `None` once the mouse button is released
    pub mode: Option<SelectionMode>,
    /// Object origin minus the cursor at the time of the press
    pub offset: Vec2,
    /// Cursor at the time a resize started
    pub anchor: Vec2,
}

/// Edit produced by dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEdit {
    /// New object origin in view pixels
    Move { index: usize, origin: Vec2 },
    Resize { index: usize, grow: bool },
}

#[derive(Resource, Debug, Default)]
pub struct EditorSelection {
    selected: Option<Selected>,
}

impl EditorSelection {
    pub fn selected(&self) -> Option<&Selected> {
        self.selected.as_ref()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected.map(|s| s.index)
    }

    /// React to a press on `target`. `origin` is the top-left corner of the
    /// pressed object in view pixels.
    pub fn press(&mut self, target: ClickTarget, cursor: Vec2, origin: Vec2) {
        self.selected = match target {
            ClickTarget::Object(index) => Some(Selected {
                index,
                mode: Some(SelectionMode::Move),
                offset: origin - cursor,
                anchor: cursor,
            }),
            ClickTarget::ResizeHandle(index) => Some(Selected {
                index,
                mode: Some(SelectionMode::Resize),
                offset: origin - cursor,
                anchor: cursor,
            }),
            ClickTarget::Door | ClickTarget::LeftWall | ClickTarget::RightWall | ClickTarget::Floor => None,
        };
    }

    /// Mouse button released: keep the selection, stop editing.
    pub fn release(&mut self) {
        if let Some(selected) = self.selected.as_mut() {
            selected.mode = None;
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Edit for the cursor moving to `cursor` while the button is held.
    ///
    /// Resizing shrinks while the cursor is below and right of where the
    /// resize started, and grows otherwise.
    pub fn drag(&self, cursor: Vec2) -> Option<DragEdit> {
        let selected = self.selected?;
        match selected.mode? {
            SelectionMode::Move => Some(DragEdit::Move {
                index: selected.index,
                origin: cursor + selected.offset,
            }),
            SelectionMode::Resize => Some(DragEdit::Resize {
                index: selected.index,
                grow: !(cursor.x > selected.anchor.x && cursor.y > selected.anchor.y),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressing_object_starts_move_with_offset() {
        let mut selection = EditorSelection::default();
        selection.press(ClickTarget::Object(2), Vec2::new(110.0, 60.0), Vec2::new(100.0, 50.0));
        assert_eq!(selection.selected_index(), Some(2));
        assert_eq!(
            selection.drag(Vec2::new(210.0, 160.0)),
            Some(DragEdit::Move {
                index: 2,
                origin: Vec2::new(200.0, 150.0)
            })
        );
    }

    #[test]
    fn resize_direction_follows_cursor() {
        let mut selection = EditorSelection::default();
        selection.press(ClickTarget::ResizeHandle(0), Vec2::new(100.0, 100.0), Vec2::new(100.0, 100.0));
        assert_eq!(
            selection.drag(Vec2::new(120.0, 130.0)),
            Some(DragEdit::Resize { index: 0, grow: false })
        );
        assert_eq!(
            selection.drag(Vec2::new(80.0, 130.0)),
            Some(DragEdit::Resize { index: 0, grow: true })
        );
    }

    #[test]
    fn release_keeps_selection_but_stops_dragging() {
        let mut selection = EditorSelection::default();
        selection.press(ClickTarget::Object(1), Vec2::ZERO, Vec2::ZERO);
        selection.release();
        assert_eq!(selection.selected_index(), Some(1));
        assert_eq!(selection.drag(Vec2::ONE), None);
    }

    #[test]
    fn pressing_elsewhere_deselects() {
        let mut selection = EditorSelection::default();
        selection.press(ClickTarget::Object(1), Vec2::ZERO, Vec2::ZERO);
        selection.press(ClickTarget::Floor, Vec2::ZERO, Vec2::ZERO);
        assert_eq!(selection.selected(), None);
    }
}
