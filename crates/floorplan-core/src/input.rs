//! Pointer events and double-click detection.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Pointer event in global (canvas) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    /// Second press of a double click, delivered after its `Down`.
    DoubleClick {
        position: Point,
    },
}

impl PointerEvent {
    /// Primary-button press.
    pub fn down(position: Point) -> Self {
        PointerEvent::Down {
            position,
            button: MouseButton::Left,
        }
    }

    /// Pointer motion.
    pub fn moved(position: Point) -> Self {
        PointerEvent::Move { position }
    }

    /// Primary-button release.
    pub fn up(position: Point) -> Self {
        PointerEvent::Up {
            position,
            button: MouseButton::Left,
        }
    }

    /// Position of the event.
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position, .. }
            | PointerEvent::DoubleClick { position } => position,
        }
    }

    /// Check if this is a press or release of a non-primary button.
    pub fn is_secondary(&self) -> bool {
        matches!(
            self,
            PointerEvent::Down { button, .. } | PointerEvent::Up { button, .. } if *button != MouseButton::Left
        )
    }
}

/// Detects double clicks from a stream of presses.
#[derive(Debug, Clone)]
pub struct ClickTracker {
    max_interval: Duration,
    max_distance: f64,
    last_click: Option<(Instant, Point)>,
}

impl ClickTracker {
    pub fn new(max_interval: Duration, max_distance: f64) -> Self {
        Self {
            max_interval,
            max_distance,
            last_click: None,
        }
    }

    /// Register a press now. Returns true if it completes a double click.
    pub fn register_click(&mut self, position: Point) -> bool {
        self.register_click_at(position, Instant::now())
    }

    /// Register a press at a given instant.
    pub fn register_click_at(&mut self, position: Point, at: Instant) -> bool {
        let is_double = self.last_click.is_some_and(|(time, pos)| {
            at.saturating_duration_since(time) <= self.max_interval && pos.distance(position) <= self.max_distance
        });
        // A completed double click does not start another one.
        self.last_click = if is_double { None } else { Some((at, position)) };
        is_double
    }

    /// Forget the last press.
    pub fn reset(&mut self) {
        self.last_click = None;
    }
}

impl Default for ClickTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), 5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_click_detected() {
        let mut tracker = ClickTracker::default();
        let t0 = Instant::now();
        assert!(!tracker.register_click_at(Point::new(10.0, 10.0), t0));
        assert!(tracker.register_click_at(Point::new(12.0, 11.0), t0 + Duration::from_millis(200)));
        // Third click starts over
        assert!(!tracker.register_click_at(Point::new(12.0, 11.0), t0 + Duration::from_millis(300)));
    }

    #[test]
    fn test_slow_or_distant_clicks_are_single() {
        let mut tracker = ClickTracker::default();
        let t0 = Instant::now();
        tracker.register_click_at(Point::new(10.0, 10.0), t0);
        assert!(!tracker.register_click_at(Point::new(10.0, 10.0), t0 + Duration::from_millis(800)));
        assert!(!tracker.register_click_at(Point::new(40.0, 10.0), t0 + Duration::from_millis(900)));
    }

    #[test]
    fn test_reset() {
        let mut tracker = ClickTracker::default();
        let t0 = Instant::now();
        tracker.register_click_at(Point::ZERO, t0);
        tracker.reset();
        assert!(!tracker.register_click_at(Point::ZERO, t0));
    }

    #[test]
    fn test_event_helpers() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(PointerEvent::down(p).position(), p);
        assert_eq!(PointerEvent::moved(p).position(), p);
        assert!(!PointerEvent::up(p).is_secondary());
        assert!(PointerEvent::Down { position: p, button: MouseButton::Right }.is_secondary());
    }
}
