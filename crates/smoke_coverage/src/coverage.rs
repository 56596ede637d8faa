//! Circle-segment coverage: how much of a doorway a smoke blocks.
//!
//! The doorway segment is parametrised as `P(t) = A + t·(B − A)` for `t ∈ [0, 1]` and
//! intersected with the smoke circle by solving
//!
//! ```text
//! a·t² + b·t + c = 0
//! a = V·V,  b = 2·V·(A − C),  c = A·A + C·C − 2·A·C − r²,  V = B − A
//! ```
//!
//! The roots select one of six [`CoverageCase`]s. Coverage is the covered span divided
//! by the segment length, as a percentage clamped to `[0, 100]`.
use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{Circle, Segment};

const UNIT_INTERVAL: RangeInclusive<f64> = 0.0..=1.0;

/// Which geometric configuration produced a coverage value.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoverageCase {
    /// Both endpoints strictly inside the circle.
    FullyCovered,
    /// The infinite line misses the circle.
    NoIntersection,
    /// The infinite line crosses the circle but the finite segment does not.
    SegmentMisses,
    /// The segment touches the circle at a single point.
    Tangent,
    /// The segment passes through the circle with both endpoints outside.
    DoubleGap,
    /// One endpoint inside the circle, the other outside.
    SingleGap,
}

/// Result of a coverage computation.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coverage {
    pub case: CoverageCase,
    /// Blocked share of the segment, in `[0, 100]`.
    pub percent: f64,
    /// Blocked length in world units.
    pub covered_length: f64,
}

impl Coverage {
    fn empty(case: CoverageCase) -> Self {
        Self {
            case,
            percent: 0.0,
            covered_length: 0.0,
        }
    }

    /// A zero-length segment only reaches this with its point inside the circle, which
    /// counts as fully covered.
    fn span(case: CoverageCase, covered_length: f64, total_length: f64) -> Self {
        let percent = if total_length > 0.0 {
            (covered_length / total_length) * 100.0
        } else {
            100.0
        };
        Self {
            case,
            percent: percent.clamp(0.0, 100.0),
            covered_length,
        }
    }
}

/// Computes the share of `segment` that lies inside `circle`.
pub fn solve(circle: Circle, segment: Segment) -> Coverage {
    let Circle { center, radius } = circle;
    let Segment { start, end } = segment;
    let length = segment.length();

    let start_inside = circle.contains(start);
    let end_inside = circle.contains(end);
    if start_inside && end_inside {
        debug!("Segment entirely within circle.");
        return Coverage::span(CoverageCase::FullyCovered, length, length);
    }

    let v = end - start;
    let a = v.dot(v);
    if a == 0.0 {
        // single point outside the circle
        return Coverage::empty(CoverageCase::NoIntersection);
    }
    let b = 2.0 * v.dot(start - center);
    let c = start.dot(start) + center.dot(center) - 2.0 * start.dot(center) - radius * radius;

    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        debug!("Circle does not intersect segment line.");
        return Coverage::empty(CoverageCase::NoIntersection);
    }

    let sqrt_disc = disc.sqrt();
    let t1 = (-b + sqrt_disc) / (2.0 * a);
    let t2 = (-b - sqrt_disc) / (2.0 * a);
    let t1_on = UNIT_INTERVAL.contains(&t1);
    let t2_on = UNIT_INTERVAL.contains(&t2);

    if !t1_on && !t2_on {
        debug!(t1, t2, "Circle intersects segment line outside the segment.");
        return Coverage::empty(CoverageCase::SegmentMisses);
    }
    if t1 == t2 {
        debug!(t = t1, "Segment is tangent to circle.");
        return Coverage::empty(CoverageCase::Tangent);
    }

    // An out-of-range root is replaced by the endpoint on its side, which is the
    // endpoint lying inside the circle.
    let clamp_to_endpoint = |t: f64| if t < 0.0 { start } else { end };
    let (p1, p2, case) = if t1_on && t2_on {
        (
            segment.point_at(t1),
            segment.point_at(t2),
            CoverageCase::DoubleGap,
        )
    } else if t1_on {
        (
            segment.point_at(t1),
            clamp_to_endpoint(t2),
            CoverageCase::SingleGap,
        )
    } else {
        (
            clamp_to_endpoint(t1),
            segment.point_at(t2),
            CoverageCase::SingleGap,
        )
    };

    let covered = p1.distance(p2);
    debug!(
        t1,
        t2,
        p1 = ?p1,
        p2 = ?p2,
        covered,
        ?case,
        "Segment partially covered."
    );
    Coverage::span(case, covered, length)
}

/// Shorthand for `solve(circle, segment).percent`.
#[inline]
pub fn coverage_percent(circle: Circle, segment: Segment) -> f64 {
    solve(circle, segment).percent
}
