//! What the overlay shows, and how pointer input changes it

use crate::selection::Selection;
use capture_gdi::{Point, Rect};

/// Pointer input relevant to region selection, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    ButtonDown(Point),
    Move(Point),
    ButtonUp(Point),
}

/// Result of feeding one pointer event to the scene
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerOutcome {
    /// The overlay must repaint
    pub redraw: bool,
    /// A drag finished with this rectangle
    pub committed: Option<Rect>,
}

/// Overlay contents: the last committed outline plus the drag in progress
#[derive(Debug, Default)]
pub struct OverlayScene {
    selection: Selection,
    committed: Rect,
}

impl OverlayScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last committed rectangle as drawn, `Rect::EMPTY` once a new drag starts
    #[cfg(test)]
    pub(crate) fn committed(&self) -> Rect {
        self.committed
    }

    /// Apply a pointer event. `modifier_held` is polled only when the decision
    /// needs it (button-down, and moves during a drag).
    pub fn handle(
        &mut self,
        event: PointerEvent,
        modifier_held: impl FnOnce() -> bool,
    ) -> PointerOutcome {
        match event {
            PointerEvent::ButtonDown(at) => {
                if self.selection.press(at, modifier_held()) {
                    self.committed = Rect::EMPTY;
                    PointerOutcome {
                        redraw: true,
                        committed: None,
                    }
                } else {
                    PointerOutcome::default()
                }
            }
            PointerEvent::Move(at) => {
                if !self.selection.is_dragging() {
                    return PointerOutcome::default();
                }
                PointerOutcome {
                    redraw: self.selection.drag_to(at, modifier_held()),
                    committed: None,
                }
            }
            PointerEvent::ButtonUp(at) => match self.selection.release(at) {
                Some(rect) => {
                    self.committed = rect;
                    PointerOutcome {
                        redraw: true,
                        committed: Some(rect),
                    }
                }
                None => PointerOutcome::default(),
            },
        }
    }

    /// Outlines to paint, committed first
    pub fn outlines(&self) -> Vec<Rect> {
        let mut outlines = Vec::with_capacity(2);
        if !self.committed.is_empty() {
            outlines.push(self.committed);
        }
        if let Some(live) = self.selection.live_rect() {
            outlines.push(live);
        }
        outlines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn pt(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn drag(scene: &mut OverlayScene, from: Point, to: Point) -> PointerOutcome {
        scene.handle(PointerEvent::ButtonDown(from), || true);
        scene.handle(PointerEvent::Move(to), || true);
        scene.handle(PointerEvent::ButtonUp(to), || true)
    }

    #[test]
    fn test_unmodified_click_is_ignored() {
        let mut scene = OverlayScene::new();

        let down = scene.handle(PointerEvent::ButtonDown(pt(5, 5)), || false);
        let up = scene.handle(PointerEvent::ButtonUp(pt(50, 50)), || false);

        assert_eq!(down, PointerOutcome::default());
        assert_eq!(up, PointerOutcome::default());
        assert!(scene.outlines().is_empty());
    }

    #[test]
    fn test_drag_commits_and_keeps_outline() {
        let mut scene = OverlayScene::new();

        let outcome = drag(&mut scene, pt(100, 100), pt(400, 300));

        assert!(outcome.redraw);
        assert_eq!(outcome.committed, Some(Rect::new(100, 100, 400, 300)));
        assert_eq!(scene.outlines(), vec![Rect::new(100, 100, 400, 300)]);
    }

    #[test]
    fn test_new_drag_clears_previous_outline() {
        let mut scene = OverlayScene::new();
        drag(&mut scene, pt(100, 100), pt(400, 300));

        let outcome = scene.handle(PointerEvent::ButtonDown(pt(10, 10)), || true);

        assert!(outcome.redraw);
        assert_eq!(scene.committed(), Rect::EMPTY);
        assert_eq!(scene.outlines(), vec![Rect::new(10, 10, 10, 10)]);
    }

    #[test]
    fn test_live_outline_follows_moves() {
        let mut scene = OverlayScene::new();
        scene.handle(PointerEvent::ButtonDown(pt(50, 50)), || true);

        let outcome = scene.handle(PointerEvent::Move(pt(20, 80)), || true);

        assert!(outcome.redraw);
        assert_eq!(outcome.committed, None);
        assert_eq!(scene.outlines(), vec![Rect::new(20, 50, 50, 80)]);
    }

    #[test]
    fn test_modifier_not_polled_for_idle_moves() {
        let mut scene = OverlayScene::new();
        let polls = Cell::new(0);

        let outcome = scene.handle(PointerEvent::Move(pt(1, 1)), || {
            polls.set(polls.get() + 1);
            true
        });

        assert_eq!(outcome, PointerOutcome::default());
        assert_eq!(polls.get(), 0);
    }

    #[test]
    fn test_modifier_release_mid_drag_still_commits() {
        let mut scene = OverlayScene::new();
        scene.handle(PointerEvent::ButtonDown(pt(0, 0)), || true);

        let moved = scene.handle(PointerEvent::Move(pt(30, 30)), || false);
        assert!(!moved.redraw);

        let up = scene.handle(PointerEvent::ButtonUp(pt(40, 20)), || false);
        assert_eq!(up.committed, Some(Rect::new(0, 0, 40, 20)));
    }

    #[test]
    fn test_zero_area_commit_is_not_drawn() {
        let mut scene = OverlayScene::new();

        let outcome = drag(&mut scene, pt(70, 70), pt(70, 70));

        assert_eq!(outcome.committed, Some(Rect::new(70, 70, 70, 70)));
        assert!(scene.outlines().is_empty());
    }
}
