// Transient drag / pinch bookkeeping for the active gesture.
use crate::model::{GEOMETRY_EPSILON, Point};

#[derive(Default, Debug, Clone, PartialEq)]
pub struct GestureContext {
    pub is_dragging: bool,
    pub last_pointer_position: Point,
    /// Finger distance at the last pinch re-base; `None` outside a two-finger gesture.
    pub pinch_baseline_distance: Option<f64>,
}

impl GestureContext {
    pub fn begin_drag(&mut self, at: Point) {
        self.is_dragging = true;
        self.last_pointer_position = at;
    }

    /// Delta since the last observed pointer position, advancing the origin.
    pub fn drag_to(&mut self, at: Point) -> Option<Point> {
        if !self.is_dragging || !at.is_finite() {
            return None;
        }
        let delta = at - self.last_pointer_position;
        self.last_pointer_position = at;
        Some(delta)
    }

    pub fn clear(&mut self) {
        self.is_dragging = false;
        self.pinch_baseline_distance = None;
    }
}

/// Distance between the first two touch points, if it is usable as a pinch
/// baseline.
pub fn pinch_distance(touches: &[Point]) -> Option<f64> {
    match touches {
        [a, b, ..] => {
            let d = a.distance(*b);
            (d.is_finite() && d > GEOMETRY_EPSILON).then_some(d)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_deltas_accumulate_from_last_position() {
        let mut ctx = GestureContext::default();
        assert_eq!(ctx.drag_to(Point::new(5.0, 5.0)), None);
        ctx.begin_drag(Point::new(10.0, 10.0));
        assert_eq!(ctx.drag_to(Point::new(15.0, 12.0)), Some(Point::new(5.0, 2.0)));
        assert_eq!(ctx.drag_to(Point::new(15.0, 20.0)), Some(Point::new(0.0, 8.0)));
        ctx.clear();
        assert!(!ctx.is_dragging);
        assert_eq!(ctx.drag_to(Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_pinch_distance() {
        assert_eq!(pinch_distance(&[Point::new(0.0, 0.0), Point::new(3.0, 4.0)]), Some(5.0));
        assert_eq!(pinch_distance(&[Point::new(1.0, 1.0)]), None);
        assert_eq!(pinch_distance(&[Point::new(1.0, 1.0), Point::new(1.0, 1.0)]), None);
    }
}
