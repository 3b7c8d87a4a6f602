//! Realm-local geometry helpers.
//!
//! All positions live in the coordinate space of the realm that contains them
//! (origin at the top-left corner, `realm_size` along each axis). Nothing here
//! holds state.

use std::fmt;

/// Real-valued position inside a realm.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        distance(self, other)
    }

    /// Moves `step` units along the straight line towards `target`.
    ///
    /// Returns `self` unchanged when both points coincide.
    pub fn step_towards(self, target: Point, step: f64) -> Point {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 {
            return self;
        }
        Point::new(self.x + dx / length * step, self.y + dy / length * step)
    }

    /// Clamps both axes to `[min, max]`.
    pub fn clamp(self, min: f64, max: f64) -> Point {
        Point::new(clamp_axis(self.x, min, max), clamp_axis(self.y, min, max))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Desired movement direction and magnitude, both components in `[-1, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveInput {
    x: f64,
    y: f64,
}

impl MoveInput {
    /// Input at rest.
    pub const IDLE: Self = Self { x: 0.0, y: 0.0 };

    /// Builds an input vector, clamping each component into `[-1, 1]`.
    /// Non-finite components are treated as zero.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: sanitize_axis(x),
            y: sanitize_axis(y),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn is_idle(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Unit-length (or shorter) input pointing from `from` to `to`.
    pub fn towards(from: Point, to: Point) -> Self {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 {
            return Self::IDLE;
        }
        Self::new(dx / length, dy / length)
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

/// Clamps `point` into the square `[inset, size - inset]` on both axes.
pub fn clamp_to_realm(point: Point, size: f64, inset: f64) -> Point {
    point.clamp(inset, size - inset)
}

fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

fn sanitize_axis(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}
