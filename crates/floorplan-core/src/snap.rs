//! Snap functionality: pointer-to-boundary snapping and grid alignment.

use crate::geometry::point_to_segment;
use crate::polygon::Polygon;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Distance threshold for snapping a pointer onto a boundary edge.
pub const EDGE_SNAP_THRESHOLD: f64 = 10.0;

/// Tighter threshold used when re-snapping route endpoints, so already
/// snapped points do not drift onto a neighbouring edge.
pub const ROUTE_SNAP_THRESHOLD: f64 = 5.0;

/// Grid size for snapping.
pub const GRID_SIZE: f64 = 20.0;

/// Result of snapping onto a polygon boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSnap {
    /// Snapped point in the polygon's local frame.
    pub point: Point,
    /// Index of the edge the point lies on.
    pub edge: usize,
    /// Position along the edge, 0 at its source vertex and 1 at its target.
    pub t: f64,
    /// Distance from the query point, measured in the local frame.
    pub distance: f64,
}

/// Find the closest point on any edge of `polygon` to a global query point.
///
/// Returns `None` when no edge is closer than `threshold`. On exact ties the
/// first edge in cycle order wins.
pub fn find_closest_edge_point(polygon: &Polygon, query_global: Point, threshold: f64) -> Option<EdgeSnap> {
    closest_edge_point_local(polygon, polygon.to_local(query_global), threshold)
}

/// Same as [`find_closest_edge_point`] for a query already in the local frame.
pub fn closest_edge_point_local(polygon: &Polygon, query_local: Point, threshold: f64) -> Option<EdgeSnap> {
    let mut best: Option<EdgeSnap> = None;
    for edge in 0..polygon.edge_count() {
        let Ok((start, end)) = polygon.edge_endpoints(edge) else {
            continue;
        };
        let proj = point_to_segment(query_local, start, end);
        if proj.distance >= threshold || !(0.0..=1.0).contains(&proj.t) {
            continue;
        }
        if best.is_none_or(|b| proj.distance < b.distance) {
            best = Some(EdgeSnap {
                point: proj.projection,
                edge,
                t: proj.t,
                distance: proj.distance,
            });
        }
    }
    best
}

/// Snap mode for the shape and connection tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnapMode {
    /// No snapping.
    #[default]
    None,
    /// Snap to grid intersections.
    Grid,
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// Snap a point based on the current snap mode.
pub fn snap_point(point: Point, mode: SnapMode, grid_size: f64) -> Point {
    match mode {
        SnapMode::None => point,
        SnapMode::Grid => snap_to_grid(point, grid_size),
    }
}
