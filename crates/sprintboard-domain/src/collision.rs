//! Collision detection between the dragged card and registered drop zones.
//!
//! A fast gesture can leave the pointer outside every zone while the card
//! still overlaps one, and small zones can be missed by both tests, so
//! detection falls through three strategies:
//!
//! 1. rectangle intersection (largest overlap ratio first)
//! 2. pointer containment (pointer closest to the zone's corners first)
//! 3. closest centre (always produces a result when any zone exists)
//!
//! Every strategy sorts stably, so ties keep registration order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right(), self.top),
            Point::new(self.left, self.bottom()),
            Point::new(self.right(), self.bottom()),
        ]
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Overlap area divided by the union area; 0 when disjoint.
    pub fn intersection_ratio(&self, other: &Rect) -> f64 {
        let left = self.left.max(other.left);
        let right = self.right().min(other.right());
        let top = self.top.max(other.top);
        let bottom = self.bottom().min(other.bottom());
        if left >= right || top >= bottom {
            return 0.0;
        }
        let overlap = (right - left) * (bottom - top);
        let union = self.area() + other.area() - overlap;
        if union <= 0.0 {
            0.0
        } else {
            overlap / union
        }
    }
}

/// A registered drop zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droppable {
    pub id: String,
    pub rect: Rect,
}

impl Droppable {
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub id: String,
    /// Strategy-specific score: overlap ratio for intersection, distance for
    /// the other two.
    pub value: f64,
}

pub struct CollisionArgs<'a> {
    /// Current rectangle of the dragged card
    pub active: Rect,
    pub pointer: Option<Point>,
    pub droppables: &'a [Droppable],
}

pub fn rect_intersection(args: &CollisionArgs<'_>) -> Vec<Collision> {
    let mut hits: Vec<Collision> = args
        .droppables
        .iter()
        .filter_map(|droppable| {
            let ratio = args.active.intersection_ratio(&droppable.rect);
            (ratio > 0.0).then(|| Collision {
                id: droppable.id.clone(),
                value: ratio,
            })
        })
        .collect();
    hits.sort_by(|a, b| b.value.total_cmp(&a.value));
    hits
}

pub fn pointer_within(args: &CollisionArgs<'_>) -> Vec<Collision> {
    let Some(pointer) = args.pointer else {
        return Vec::new();
    };
    let mut hits: Vec<Collision> = args
        .droppables
        .iter()
        .filter(|droppable| droppable.rect.contains(pointer))
        .map(|droppable| Collision {
            id: droppable.id.clone(),
            value: droppable
                .rect
                .corners()
                .iter()
                .map(|corner| corner.distance(pointer))
                .sum::<f64>()
                / 4.0,
        })
        .collect();
    hits.sort_by(|a, b| a.value.total_cmp(&b.value));
    hits
}

pub fn closest_center(args: &CollisionArgs<'_>) -> Vec<Collision> {
    let center = args.active.center();
    let mut hits: Vec<Collision> = args
        .droppables
        .iter()
        .map(|droppable| Collision {
            id: droppable.id.clone(),
            value: droppable.rect.center().distance(center),
        })
        .collect();
    hits.sort_by(|a, b| a.value.total_cmp(&b.value));
    hits
}

/// Run the three strategies in order and return the first non-empty result.
pub fn detect_collisions(args: &CollisionArgs<'_>) -> Vec<Collision> {
    let by_rect = rect_intersection(args);
    if !by_rect.is_empty() {
        return by_rect;
    }
    let by_pointer = pointer_within(args);
    if !by_pointer.is_empty() {
        return by_pointer;
    }
    closest_center(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones() -> Vec<Droppable> {
        vec![
            Droppable::new("todo", Rect::new(0.0, 0.0, 100.0, 400.0)),
            Droppable::new("in_progress", Rect::new(120.0, 0.0, 100.0, 400.0)),
            Droppable::new("done", Rect::new(240.0, 0.0, 100.0, 400.0)),
        ]
    }

    #[test]
    fn test_intersection_prefers_largest_overlap() {
        let zones = zones();
        let args = CollisionArgs {
            // mostly over in_progress, clipping todo
            active: Rect::new(90.0, 10.0, 80.0, 40.0),
            pointer: None,
            droppables: &zones,
        };
        let hits = detect_collisions(&args);
        assert_eq!(hits[0].id, "in_progress");
        assert_eq!(hits[1].id, "todo");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_pointer_fallback_when_no_overlap() {
        let zones = zones();
        let args = CollisionArgs {
            // card sits in the gutter between columns
            active: Rect::new(101.0, 10.0, 18.0, 20.0),
            pointer: Some(Point::new(250.0, 100.0)),
            droppables: &zones,
        };
        assert!(rect_intersection(&args).is_empty());
        let hits = detect_collisions(&args);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "done");
    }

    #[test]
    fn test_closest_center_as_last_resort() {
        let zones = zones();
        let args = CollisionArgs {
            active: Rect::new(221.0, 500.0, 18.0, 20.0),
            pointer: Some(Point::new(230.0, 510.0)),
            droppables: &zones,
        };
        assert!(pointer_within(&args).is_empty());
        let hits = detect_collisions(&args);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[2].id, "todo");
    }

    #[test]
    fn test_no_droppables_yields_nothing() {
        let args = CollisionArgs {
            active: Rect::new(0.0, 0.0, 10.0, 10.0),
            pointer: Some(Point::new(5.0, 5.0)),
            droppables: &[],
        };
        assert!(detect_collisions(&args).is_empty());
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let zones = vec![
            Droppable::new("first", Rect::new(0.0, 0.0, 10.0, 10.0)),
            Droppable::new("second", Rect::new(0.0, 0.0, 10.0, 10.0)),
        ];
        let args = CollisionArgs {
            active: Rect::new(0.0, 0.0, 10.0, 10.0),
            pointer: None,
            droppables: &zones,
        };
        let hits = detect_collisions(&args);
        assert_eq!(hits[0].id, "first");
        assert_eq!(hits[1].id, "second");
    }
}
