use serde::{Deserialize, Serialize};

/// Selection rectangle in tile units. Extents are signed: dragging up or left
/// yields a negative width or height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl SelectionRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }
}

/// Whether a selection exists. A zero-sized rectangle that has not been dragged
/// out yet is still a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    None,
    Active(SelectionRect),
}

impl Selection {
    pub fn rect(x: i32, y: i32, w: i32, h: i32) -> Self {
        Selection::Active(SelectionRect::new(x, y, w, h))
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Selection::Active(_))
    }

    pub fn as_rect(&self) -> Option<&SelectionRect> {
        match self {
            Selection::None => None,
            Selection::Active(rect) => Some(rect),
        }
    }
}

/// Interaction-mode flags maintained by the host's tool handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InteractionState {
    /// The select tool is active.
    pub select: bool,
    /// A selection drag is in progress.
    pub selecting: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sized_selection_is_present() {
        assert!(Selection::rect(2, 2, 0, 5).is_present());
        assert!(Selection::rect(2, 2, 0, 0).is_present());
        assert!(!Selection::None.is_present());
    }

    #[test]
    fn test_as_rect() {
        let sel = Selection::rect(1, 2, -3, 4);
        assert_eq!(sel.as_rect(), Some(&SelectionRect::new(1, 2, -3, 4)));
        assert_eq!(Selection::None.as_rect(), None);
    }
}
