//! Door path routing along a polygon boundary.

use crate::polygon::Polygon;
use crate::snap::{ROUTE_SNAP_THRESHOLD, closest_edge_point_local};
use kurbo::Point;

/// Route a path along the boundary of `polygon` between two local points.
///
/// Both endpoints are re-snapped to their nearest edge. When they share an
/// edge the path is the direct segment `[start, end]`. Otherwise the cycle
/// is walked forward (increasing edge index, wrapping) from the start edge
/// to the end edge, picking up the source vertex of every edge entered.
///
/// Returns an empty path if either endpoint is off the boundary.
pub fn find_path_between_points(polygon: &Polygon, local_start: Point, local_end: Point) -> Vec<Point> {
    find_path_with_threshold(polygon, local_start, local_end, ROUTE_SNAP_THRESHOLD)
}

/// [`find_path_between_points`] with an explicit re-snap threshold.
pub fn find_path_with_threshold(polygon: &Polygon, local_start: Point, local_end: Point, threshold: f64) -> Vec<Point> {
    let (Some(start), Some(end)) = (
        closest_edge_point_local(polygon, local_start, threshold),
        closest_edge_point_local(polygon, local_end, threshold),
    ) else {
        log::debug!("Route endpoint off boundary of polygon {}", polygon.id());
        return Vec::new();
    };

    walk_boundary(polygon, start.edge, start.point, end.edge, end.point)
}

/// Walk forward from `start` on `start_edge` to `end` on `end_edge`, picking
/// up the source vertex of every edge entered. Points are local.
pub(crate) fn walk_boundary(
    polygon: &Polygon,
    start_edge: usize,
    start: Point,
    end_edge: usize,
    end: Point,
) -> Vec<Point> {
    if start_edge == end_edge {
        return vec![start, end];
    }

    let vertices = polygon.vertices();
    let mut path = vec![start];
    let mut edge = start_edge;
    while edge != end_edge {
        edge = polygon.next_index(edge);
        path.push(vertices[edge].position);
    }
    path.push(end);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    fn square() -> Polygon {
        Polygon::rectangle(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap()
    }

    #[test]
    fn test_same_edge_is_direct() {
        let poly = square();
        let a = Point::new(-20.0, -50.0);
        let b = Point::new(30.0, -50.0);
        assert_eq!(find_path_between_points(&poly, a, b), vec![a, b]);
    }

    #[test]
    fn test_endpoints_are_resnapped() {
        let poly = square();
        let path = find_path_between_points(&poly, Point::new(-20.0, -47.0), Point::new(30.0, -52.0));
        assert_eq!(path, vec![Point::new(-20.0, -50.0), Point::new(30.0, -50.0)]);
    }

    #[test]
    fn test_opposite_edges_walk_forward() {
        let poly = square();
        let start = Point::new(0.0, -50.0); // midpoint of edge 0 (top)
        let end = Point::new(0.0, 50.0); // midpoint of edge 2 (bottom)
        let path = find_path_between_points(&poly, start, end);
        assert_eq!(
            path,
            vec![start, Point::new(50.0, -50.0), Point::new(50.0, 50.0), end]
        );
    }

    #[test]
    fn test_walk_wraps_around() {
        let poly = square();
        let start = Point::new(-50.0, 0.0); // edge 3 (left)
        let end = Point::new(50.0, 0.0); // edge 1 (right)
        let path = find_path_between_points(&poly, start, end);
        // 3 -> 0 -> 1, even though 3 -> 2 -> 1 is equally long
        assert_eq!(
            path,
            vec![start, Point::new(-50.0, -50.0), Point::new(50.0, -50.0), end]
        );
    }

    #[test]
    fn test_walk_is_forward_even_when_longer() {
        let poly = square();
        let start = Point::new(0.0, -50.0); // edge 0
        let end = Point::new(-50.0, 0.0); // edge 3, one step backward
        let path = find_path_between_points(&poly, start, end);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_off_boundary_fails() {
        let poly = square();
        assert!(find_path_between_points(&poly, Point::new(0.0, 0.0), Point::new(0.0, -50.0)).is_empty());
        // Inside the snap threshold but outside the routing threshold
        assert!(find_path_between_points(&poly, Point::new(0.0, -50.0), Point::new(0.0, -42.0)).is_empty());
        assert_eq!(
            find_path_with_threshold(&poly, Point::new(0.0, -50.0), Point::new(0.0, -42.0), 10.0).len(),
            2
        );
    }

    #[test]
    fn test_same_point_routes_to_itself() {
        let poly = square();
        let p = Point::new(10.0, -50.0);
        assert_eq!(find_path_between_points(&poly, p, p), vec![p, p]);
    }
}
