//! Pointer gesture state machine.
//!
//! Press, then drag: every drag sample is classified on its own, so a single
//! gesture can switch between zoom (mostly vertical motion) and pan (mostly
//! horizontal motion). Deltas are incremental, measured from the previous
//! sample rather than from the press point.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    Zoom,
    Pan,
    Select,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureMode {
    Idle,
    Clicked,
    /// Pressed with the selection modifier held.
    Selecting,
    Dragging(DragMode),
}

/// What a drag sample asks of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureAction {
    Zoom { delta_y: f64, anchor_x: f64 },
    Pan { delta_x: f64 },
    Select { from: f64, to: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureState {
    pub mode: GestureMode,
    pub origin: Point,
    pub previous: Point,
}

impl Default for GestureState {
    fn default() -> Self {
        Self {
            mode: GestureMode::Idle,
            origin: Point::default(),
            previous: Point::default(),
        }
    }
}

/// Dominant axis wins; ties go to pan.
pub fn classify(dx: f64, dy: f64) -> DragMode {
    if dx * dx < dy * dy {
        DragMode::Zoom
    } else {
        DragMode::Pan
    }
}

impl GestureState {
    pub fn clicked(self, x: f64, y: f64) -> Self {
        let p = Point { x, y };
        Self {
            mode: GestureMode::Clicked,
            origin: p,
            previous: p,
        }
    }

    pub fn select_started(self, x: f64, y: f64) -> Self {
        Self {
            mode: GestureMode::Selecting,
            ..self.clicked(x, y)
        }
    }

    pub fn dragged(self, x: f64, y: f64) -> (Self, Option<GestureAction>) {
        let selecting = match self.mode {
            GestureMode::Idle => return (self, None),
            GestureMode::Selecting | GestureMode::Dragging(DragMode::Select) => true,
            GestureMode::Clicked | GestureMode::Dragging(_) => false,
        };

        let dx = self.previous.x - x;
        let dy = self.previous.y - y;
        let mode = if selecting { DragMode::Select } else { classify(dx, dy) };
        let action = match mode {
            DragMode::Zoom => GestureAction::Zoom { delta_y: dy, anchor_x: x },
            DragMode::Pan => GestureAction::Pan { delta_x: dx },
            DragMode::Select => GestureAction::Select {
                from: self.origin.x,
                to: x,
            },
        };

        let next = Self {
            mode: GestureMode::Dragging(mode),
            origin: self.origin,
            previous: Point { x, y },
        };
        (next, Some(action))
    }

    pub fn released(self) -> Self {
        Self {
            mode: GestureMode::Idle,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_drag_zooms() {
        let state = GestureState::default().clicked(50.0, 50.0);
        let (state, action) = state.dragged(48.0, 40.0);
        assert_eq!(
            action,
            Some(GestureAction::Zoom { delta_y: 10.0, anchor_x: 48.0 })
        );
        assert_eq!(state.mode, GestureMode::Dragging(DragMode::Zoom));
        assert_eq!(state.previous, Point { x: 48.0, y: 40.0 });
        assert_eq!(state.origin, Point { x: 50.0, y: 50.0 });
    }

    #[test]
    fn test_horizontal_drag_pans() {
        let state = GestureState::default().clicked(50.0, 50.0);
        let (state, action) = state.dragged(40.0, 48.0);
        assert_eq!(action, Some(GestureAction::Pan { delta_x: 10.0 }));
        assert_eq!(state.mode, GestureMode::Dragging(DragMode::Pan));
    }

    #[test]
    fn test_mode_switches_mid_drag() {
        let state = GestureState::default().clicked(0.0, 0.0);
        let (state, first) = state.dragged(-10.0, 1.0);
        let (state, second) = state.dragged(-11.0, 20.0);
        assert!(matches!(first, Some(GestureAction::Pan { delta_x }) if delta_x == 10.0));
        assert!(matches!(second, Some(GestureAction::Zoom { delta_y, .. }) if delta_y == -19.0));
        assert_eq!(state.mode, GestureMode::Dragging(DragMode::Zoom));
    }

    #[test]
    fn test_ties_and_stills_pan() {
        assert_eq!(classify(3.0, -3.0), DragMode::Pan);
        assert_eq!(classify(0.0, 0.0), DragMode::Pan);
    }

    #[test]
    fn test_idle_ignores_drags() {
        let (state, action) = GestureState::default().dragged(10.0, 10.0);
        assert_eq!(action, None);
        assert_eq!(state.mode, GestureMode::Idle);

        let released = GestureState::default().clicked(1.0, 1.0).released();
        assert_eq!(released.dragged(5.0, 50.0).1, None);
    }

    #[test]
    fn test_selection_tracks_origin() {
        let state = GestureState::default().select_started(100.0, 5.0);
        let (state, a) = state.dragged(120.0, 80.0);
        let (state, b) = state.dragged(60.0, 80.0);
        assert_eq!(a, Some(GestureAction::Select { from: 100.0, to: 120.0 }));
        assert_eq!(b, Some(GestureAction::Select { from: 100.0, to: 60.0 }));
        assert_eq!(state.released().mode, GestureMode::Idle);
    }
}
