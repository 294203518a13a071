//! Connection lines between rooms or free points.

use crate::ObjectId;
use crate::polygon::Polygon;
use crate::scene::{NodeKind, SceneNode};
use crate::style::ShapeStyle;
use kurbo::{BezPath, Line, Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// One end of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ConnectionEnd {
    /// Attached to a polygon; follows its centroid.
    Polygon(ObjectId),
    /// A fixed point in the global frame.
    Point(Point),
}

impl ConnectionEnd {
    /// Polygon this end is attached to, if any.
    pub fn polygon(&self) -> Option<ObjectId> {
        match self {
            ConnectionEnd::Polygon(id) => Some(*id),
            ConnectionEnd::Point(_) => None,
        }
    }

    /// Global position of this end. `None` if its polygon no longer exists.
    pub fn resolve(&self, polygons: &HashMap<ObjectId, Polygon>) -> Option<Point> {
        match self {
            ConnectionEnd::Polygon(id) => polygons.get(id).map(Polygon::centroid),
            ConnectionEnd::Point(p) => Some(*p),
        }
    }
}

/// A straight line linking two ends.
#[derive(Debug, Clone)]
pub struct Connection {
    pub(crate) id: ObjectId,
    pub start: ConnectionEnd,
    pub end: ConnectionEnd,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Connection {
    /// Create a new connection.
    pub fn new(start: ConnectionEnd, end: ConnectionEnd) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            style: ShapeStyle::connection(),
        }
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Check whether either end is attached to `polygon`.
    pub fn touches(&self, polygon: ObjectId) -> bool {
        self.start.polygon() == Some(polygon) || self.end.polygon() == Some(polygon)
    }

    /// Resolved global segment, `None` if an attached polygon is gone.
    pub fn line(&self, polygons: &HashMap<ObjectId, Polygon>) -> Option<Line> {
        Some(Line::new(self.start.resolve(polygons)?, self.end.resolve(polygons)?))
    }

    /// Bounds of the resolved segment.
    pub fn bounds(&self, polygons: &HashMap<ObjectId, Polygon>) -> Option<Rect> {
        self.line(polygons).map(|l| Rect::from_points(l.p0, l.p1))
    }

    /// Check if a global point hits the resolved segment.
    pub fn hit_test(&self, polygons: &HashMap<ObjectId, Polygon>, point: Point, tolerance: f64) -> bool {
        self.line(polygons).is_some_and(|l| {
            crate::geometry::point_to_segment_dist(point, l.p0, l.p1) <= tolerance + self.style.stroke_width / 2.0
        })
    }

    /// Scene node for the resolved segment.
    pub fn scene_node(&self, polygons: &HashMap<ObjectId, Polygon>) -> Option<SceneNode> {
        let line = self.line(polygons)?;
        let mut path = BezPath::new();
        path.move_to(line.p0);
        path.line_to(line.p1);
        Some(SceneNode::new(self.id, NodeKind::Connection, path, self.style.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooms() -> (HashMap<ObjectId, Polygon>, ObjectId, ObjectId) {
        let a = Polygon::rectangle(Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        let b = Polygon::rectangle(Rect::new(200.0, 0.0, 300.0, 100.0)).unwrap();
        let (ida, idb) = (a.id(), b.id());
        let map = HashMap::from([(ida, a), (idb, b)]);
        (map, ida, idb)
    }

    #[test]
    fn test_connection_between_polygons_uses_centroids() {
        let (polygons, a, b) = rooms();
        let conn = Connection::new(ConnectionEnd::Polygon(a), ConnectionEnd::Polygon(b));
        let line = conn.line(&polygons).unwrap();
        assert!((line.p0.x - 50.0).abs() < 1e-9 && (line.p0.y - 50.0).abs() < 1e-9);
        assert!((line.p1.x - 250.0).abs() < 1e-9);
        assert!(conn.touches(a) && conn.touches(b));
        assert!(conn.hit_test(&polygons, Point::new(150.0, 51.0), 1.0));
    }

    #[test]
    fn test_missing_polygon_does_not_resolve() {
        let (polygons, a, _) = rooms();
        let conn = Connection::new(ConnectionEnd::Polygon(a), ConnectionEnd::Polygon(Uuid::new_v4()));
        assert!(conn.line(&polygons).is_none());
        assert!(conn.scene_node(&polygons).is_none());
        assert!(!conn.hit_test(&polygons, Point::new(50.0, 50.0), 10.0));
    }

    #[test]
    fn test_free_point_connection() {
        let polygons = HashMap::new();
        let conn = Connection::new(
            ConnectionEnd::Point(Point::new(0.0, 0.0)),
            ConnectionEnd::Point(Point::new(10.0, 10.0)),
        );
        let bounds = conn.bounds(&polygons).unwrap();
        assert!((bounds.x1 - 10.0).abs() < f64::EPSILON);
        assert_eq!(conn.scene_node(&polygons).unwrap().kind, NodeKind::Connection);
    }
}
