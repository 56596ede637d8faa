//! 2D geometry primitives shared by doorways, smokes and the coverage solver.
//!
//! All coordinates are map-space world units in `f64`; the coverage solver relies on
//! exact discriminant arithmetic for integral inputs, which `f32` cannot provide.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Returns true iff `point` lies strictly inside the circle.
///
/// Points exactly on the boundary are outside.
#[inline]
pub fn point_in_circle(point: DVec2, center: DVec2, radius: f64) -> bool {
    point.distance_squared(center) < radius * radius
}

/// A circle in map space.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: impl Into<DVec2>, radius: f64) -> Self {
        Self {
            center: center.into(),
            radius,
        }
    }

    /// Strict containment, see [`point_in_circle`].
    #[inline]
    pub fn contains(&self, point: DVec2) -> bool {
        point_in_circle(point, self.center, self.radius)
    }
}

/// A finite line segment from `start` to `end`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment {
    pub fn new(start: impl Into<DVec2>, end: impl Into<DVec2>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Vector from `start` to `end`.
    #[inline]
    pub fn delta(&self) -> DVec2 {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    #[inline]
    pub fn midpoint(&self) -> DVec2 {
        (self.start + self.end) * 0.5
    }

    /// Unit vector from `start` towards `end`, or `None` when the endpoints coincide.
    #[inline]
    pub fn direction(&self) -> Option<DVec2> {
        self.delta().try_normalize()
    }

    /// Point at parameter `t`, where `0` is `start` and `1` is `end`.
    #[inline]
    pub fn point_at(&self, t: f64) -> DVec2 {
        self.start + self.delta() * t
    }

    /// Extends both endpoints outward along the segment direction by `amount`.
    ///
    /// Returns `None` for a zero-length segment.
    pub fn extended(&self, amount: f64) -> Option<Segment> {
        let dir = self.direction()?;
        Some(Segment {
            start: self.start - dir * amount,
            end: self.end + dir * amount,
        })
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}
