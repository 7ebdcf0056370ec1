//! Core data types shared by the transform engine and the portal components.
//! Everything here is plain data with no DOM dependency.

use std::ops::{Add, Sub};

/// Anything at or below this is treated as "not laid out yet".
pub const GEOMETRY_EPSILON: f64 = 1e-6;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True once both dimensions are measurable.
    pub fn is_laid_out(&self) -> bool {
        self.width > GEOMETRY_EPSILON && self.height > GEOMETRY_EPSILON
    }
}

/// On-screen box of an element, in client pixels (after CSS transforms).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Everything the gesture math needs to know about the portal image.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ImageGeometry {
    /// Intrinsic pixel size of the loaded image.
    pub natural: Size,
    /// Layout size before the CSS transform (offsetWidth / offsetHeight).
    pub offset: Size,
    /// Current bounding box, transform included.
    pub rect: BoundingBox,
}

/// Calling convention of the transform mutators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransformMode {
    /// Add the value to the current state.
    Increment,
    /// Replace the current state with the value.
    #[default]
    Absolute,
}

/// The image a portal is opened for.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageSource {
    pub src: String,
    pub alt: String,
    /// Natural size as known when the thumbnail was clicked (zero if unloaded).
    pub natural: Size,
}
