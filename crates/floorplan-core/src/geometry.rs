//! Geometry primitives: point/segment projection and polygon helpers.

use kurbo::{Point, Vec2};

/// Projection of a point onto a line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Euclidean distance from the query point to `projection`.
    pub distance: f64,
    /// Closest point on the segment.
    pub projection: Point,
    /// Normalized position of `projection` along the segment (0 = start, 1 = end).
    pub t: f64,
}

/// Project `point` onto the segment `start → end`.
///
/// The parameter is clamped to `[0, 1]` so the projection always lies on the
/// segment. A zero-length segment projects everything onto `start` with `t = 0`.
pub fn point_to_segment(point: Point, start: Point, end: Point) -> SegmentProjection {
    let seg = end - start;
    let pv = point - start;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return SegmentProjection {
            distance: pv.hypot(),
            projection: start,
            t: 0.0,
        };
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let projection = start + seg * t;
    SegmentProjection {
        distance: point.distance(projection),
        projection,
        t,
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    point_to_segment(point, a, b).distance
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Signed area of a closed polygon (positive for counter-clockwise in y-up).
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        sum += p.x * q.y - q.x * p.y;
    }
    sum / 2.0
}

/// Area-weighted centroid of a closed polygon.
///
/// Falls back to the vertex average when the area is (near) zero.
pub fn polygon_centroid(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::ZERO;
    }
    let area = signed_area(points);
    if area.abs() < 1e-9 {
        let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
        return (sum / points.len() as f64).to_point();
    }
    let (mut cx, mut cy) = (0.0, 0.0);
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        let cross = p.x * q.y - q.x * p.y;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    Point::new(cx / (6.0 * area), cy / (6.0 * area))
}

/// Total length of a polyline.
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}
