//! Edge auto-scroll while a card is being dragged.

use serde::{Deserialize, Serialize};
use sprintboard_core::AutoScrollConfig;
use std::time::Instant;

use crate::collision::{Point, Rect};

/// Geometry and scroll offsets of the scrollable board area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollContainer {
    pub rect: Rect,
    pub scroll_top: f64,
    pub scroll_left: f64,
    pub scroll_height: f64,
    pub scroll_width: f64,
    pub client_height: f64,
    pub client_width: f64,
}

impl ScrollContainer {
    fn max_scroll_top(&self) -> f64 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    fn max_scroll_left(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollDelta {
    pub dx: f64,
    pub dy: f64,
}

impl ScrollDelta {
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// Throttled edge scroller. Owns its own throttle clock so independent boards
/// never share timing state.
#[derive(Debug, Clone)]
pub struct AutoScroller {
    config: AutoScrollConfig,
    last_step: Option<Instant>,
}

impl AutoScroller {
    pub fn new(config: AutoScrollConfig) -> Self {
        Self {
            config,
            last_step: None,
        }
    }

    pub fn config(&self) -> &AutoScrollConfig {
        &self.config
    }

    /// Forget the throttle window, e.g. when a new gesture starts.
    pub fn reset(&mut self) {
        self.last_step = None;
    }

    /// Scroll `container` toward whichever edges `pointer` is near.
    ///
    /// At most one step is taken per throttle window; calls inside the window
    /// return `None` without touching the container. Vertical and horizontal
    /// axes are handled independently and offsets are clamped to the
    /// scrollable range.
    pub fn on_pointer_move(
        &mut self,
        pointer: Point,
        container: &mut ScrollContainer,
        now: Instant,
    ) -> Option<ScrollDelta> {
        if let Some(last) = self.last_step {
            if now.saturating_duration_since(last) < self.config.throttle() {
                return None;
            }
        }
        self.last_step = Some(now);

        let threshold = self.config.threshold_px;
        let step = self.config.step_px;
        let rect = container.rect;
        let before_top = container.scroll_top;
        let before_left = container.scroll_left;

        if pointer.y - rect.top < threshold {
            container.scroll_top = (container.scroll_top - step).max(0.0);
        } else if rect.bottom() - pointer.y < threshold {
            container.scroll_top = (container.scroll_top + step).min(container.max_scroll_top());
        }

        if pointer.x - rect.left < threshold {
            container.scroll_left = (container.scroll_left - step).max(0.0);
        } else if rect.right() - pointer.x < threshold {
            container.scroll_left =
                (container.scroll_left + step).min(container.max_scroll_left());
        }

        let delta = ScrollDelta {
            dx: container.scroll_left - before_left,
            dy: container.scroll_top - before_top,
        };
        (!delta.is_zero()).then_some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn container() -> ScrollContainer {
        ScrollContainer {
            rect: Rect::new(0.0, 0.0, 1000.0, 600.0),
            scroll_top: 100.0,
            scroll_left: 0.0,
            scroll_height: 1200.0,
            scroll_width: 1000.0,
            client_height: 600.0,
            client_width: 1000.0,
        }
    }

    #[test]
    fn test_scrolls_down_near_bottom_edge() {
        let mut scroller = AutoScroller::new(AutoScrollConfig::default());
        let mut c = container();
        let delta = scroller.on_pointer_move(Point::new(500.0, 590.0), &mut c, Instant::now());
        assert_eq!(delta, Some(ScrollDelta { dx: 0.0, dy: 8.0 }));
        assert_eq!(c.scroll_top, 108.0);
    }

    #[test]
    fn test_no_scroll_in_the_middle() {
        let mut scroller = AutoScroller::new(AutoScrollConfig::default());
        let mut c = container();
        assert!(scroller
            .on_pointer_move(Point::new(500.0, 300.0), &mut c, Instant::now())
            .is_none());
        assert_eq!(c.scroll_top, 100.0);
    }

    #[test]
    fn test_throttled_within_window() {
        let mut scroller = AutoScroller::new(AutoScrollConfig::default());
        let mut c = container();
        let start = Instant::now();
        let near_top = Point::new(500.0, 10.0);

        assert!(scroller.on_pointer_move(near_top, &mut c, start).is_some());
        assert!(scroller
            .on_pointer_move(near_top, &mut c, start + Duration::from_millis(20))
            .is_none());
        assert_eq!(c.scroll_top, 92.0);
        assert!(scroller
            .on_pointer_move(near_top, &mut c, start + Duration::from_millis(50))
            .is_some());
        assert_eq!(c.scroll_top, 84.0);
    }

    #[test]
    fn test_clamped_to_scroll_range() {
        let mut scroller = AutoScroller::new(AutoScrollConfig::default());
        let mut c = container();
        c.scroll_top = 3.0;
        // near top-left corner: vertical clamps at zero, horizontal already at zero
        let delta = scroller.on_pointer_move(Point::new(5.0, 5.0), &mut c, Instant::now());
        assert_eq!(delta, Some(ScrollDelta { dx: 0.0, dy: -3.0 }));
        assert_eq!(c.scroll_top, 0.0);

        let mut at_bottom = container();
        at_bottom.scroll_top = 600.0;
        scroller.reset();
        assert!(scroller
            .on_pointer_move(Point::new(500.0, 595.0), &mut at_bottom, Instant::now())
            .is_none());
    }
}
