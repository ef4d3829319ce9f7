//! Selection logic for modifier-gated region drags

use capture_gdi::{Point, Rect};

/// Drag state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging { start: Point, current: Point },
}

/// Region selection state machine
///
/// Idle -> Dragging on a button-down with the modifier held, Dragging -> Idle on
/// button-up, which yields the canonical rectangle to commit.
#[derive(Debug, Default)]
pub struct Selection {
    state: SelectionState,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging { .. })
    }

    /// Button-down. Starts (or restarts) a drag only when the modifier is held.
    pub fn press(&mut self, at: Point, modifier_held: bool) -> bool {
        if !modifier_held {
            return false;
        }

        self.state = SelectionState::Dragging {
            start: at,
            current: at,
        };
        true
    }

    /// Pointer move. Tracks the drag only while the modifier stays down; a
    /// released modifier freezes the live rectangle without ending the drag.
    pub fn drag_to(&mut self, at: Point, modifier_held: bool) -> bool {
        match &mut self.state {
            SelectionState::Dragging { current, .. } if modifier_held => {
                *current = at;
                true
            }
            _ => false,
        }
    }

    /// Button-up. Ends the drag at `at` and returns the rectangle to commit.
    pub fn release(&mut self, at: Point) -> Option<Rect> {
        match self.state {
            SelectionState::Dragging { start, .. } => {
                self.state = SelectionState::Idle;
                Some(Rect::from_corners(start, at))
            }
            SelectionState::Idle => None,
        }
    }

    /// Rectangle of the drag in progress
    pub fn live_rect(&self) -> Option<Rect> {
        match self.state {
            SelectionState::Dragging { start, current } => Some(Rect::from_corners(start, current)),
            SelectionState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_press_without_modifier_stays_idle() {
        let mut selection = Selection::new();

        assert!(!selection.press(pt(10, 10), false));
        assert_eq!(selection.state(), SelectionState::Idle);
        assert!(!selection.drag_to(pt(50, 50), true));
        assert_eq!(selection.release(pt(50, 50)), None);
    }

    #[test]
    fn test_drag_commits_canonical_rect() {
        let mut selection = Selection::new();

        assert!(selection.press(pt(400, 300), true));
        assert!(selection.drag_to(pt(250, 200), true));
        assert_eq!(selection.live_rect(), Some(Rect::new(250, 200, 400, 300)));

        let rect = selection.release(pt(100, 100));
        assert_eq!(rect, Some(Rect::new(100, 100, 400, 300)));
        assert_eq!(selection.state(), SelectionState::Idle);
        assert_eq!(selection.live_rect(), None);
    }

    #[test]
    fn test_commit_matches_min_max_for_any_direction() {
        let points = [pt(-30, 5), pt(0, 0), pt(120, 80), pt(77, -12), pt(500, 500)];

        for &start in &points {
            for &end in &points {
                let mut selection = Selection::new();
                selection.press(start, true);
                let rect = selection.release(end).unwrap();

                assert_eq!(rect.left, start.x.min(end.x));
                assert_eq!(rect.right, start.x.max(end.x));
                assert_eq!(rect.top, start.y.min(end.y));
                assert_eq!(rect.bottom, start.y.max(end.y));
            }
        }
    }

    #[test]
    fn test_releasing_modifier_does_not_abort_drag() {
        let mut selection = Selection::new();
        selection.press(pt(10, 10), true);
        selection.drag_to(pt(60, 40), true);

        // modifier let go mid-drag: moves no longer track, the drag survives
        assert!(!selection.drag_to(pt(90, 90), false));
        assert!(selection.is_dragging());
        assert_eq!(selection.live_rect(), Some(Rect::new(10, 10, 60, 40)));

        assert_eq!(selection.release(pt(80, 70)), Some(Rect::new(10, 10, 80, 70)));
    }

    #[test]
    fn test_press_while_dragging_restarts() {
        let mut selection = Selection::new();
        selection.press(pt(10, 10), true);
        selection.press(pt(200, 200), true);

        assert_eq!(selection.release(pt(250, 220)), Some(Rect::new(200, 200, 250, 220)));
    }

    #[test]
    fn test_unmodified_press_while_dragging_keeps_drag() {
        let mut selection = Selection::new();
        selection.press(pt(10, 10), true);

        assert!(!selection.press(pt(200, 200), false));
        assert_eq!(selection.release(pt(30, 30)), Some(Rect::new(10, 10, 30, 30)));
    }
}
