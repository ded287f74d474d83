//! Turning raw input into directions.
//!
//! Keyboard input maps through [`Move::from_key`]; touch input goes through a
//! [`SwipeTracker`], which follows one touch from start to end.

use crate::engine::Move;

/// Follows a single touch gesture and classifies it as a swipe.
///
/// Coordinates are screen coordinates, with `y` growing downward.
///
/// ```
/// use play_2048::engine::Move;
/// use play_2048::input::SwipeTracker;
///
/// let mut swipe = SwipeTracker::default();
/// swipe.touch_start(100.0, 100.0);
/// swipe.touch_move(40.0, 110.0);
/// assert_eq!(swipe.touch_end(), Some(Move::Left));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwipeTracker {
    origin: Option<(f64, f64)>,
    direction: Option<Move>,
}

impl SwipeTracker {
    pub fn touch_start(&mut self, x: f64, y: f64) {
        self.origin = Some((x, y));
        self.direction = None;
    }

    /// Update the direction from the latest touch position. Ignored when no
    /// touch is in progress.
    pub fn touch_move(&mut self, x: f64, y: f64) {
        if let Some((x0, y0)) = self.origin {
            self.direction = Some(classify(x - x0, y - y0));
        }
    }

    /// Finish the gesture. A touch that never moved is not a swipe.
    pub fn touch_end(&mut self) -> Option<Move> {
        let direction = if self.origin.is_some() { self.direction } else { None };
        *self = SwipeTracker::default();
        direction
    }

    /// True between `touch_start` and `touch_end`.
    pub fn is_tracking(&self) -> bool { self.origin.is_some() }
}

/// Dominant axis wins; a tie counts as vertical.
fn classify(dx: f64, dy: f64) -> Move {
    if dx.abs() > dy.abs() {
        if dx > 0.0 { Move::Right } else { Move::Left }
    } else if dy > 0.0 {
        Move::Down
    } else {
        Move::Up
    }
}
