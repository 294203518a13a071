//! Polygon rooms: an ordered vertex/edge cycle in a local frame.
//!
//! Edge `i` runs from vertex `i` to vertex `(i + 1) % n`, so the boundary is
//! always a single closed cycle and neighbours are found by index arithmetic.

pub(crate) mod door;

pub use door::{Door, DoorId, EdgeAnchor};

use crate::ObjectId;
use crate::error::{EditError, EditResult};
use crate::geometry::{point_to_polyline_dist, point_to_segment, polygon_centroid, signed_area};
use crate::scene::{NodeKind, SceneGraph, SceneNode};
use crate::style::ShapeStyle;
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a vertex.
pub type VertexId = Uuid;

/// Unique identifier for an edge.
pub type EdgeId = Uuid;

/// Minimum number of vertices of a closed boundary.
pub const MIN_VERTICES: usize = 3;

/// How a polygon was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PolygonKind {
    Rectangle,
    Triangle,
    #[default]
    Custom,
}

/// A boundary corner, in the polygon's local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub(crate) id: VertexId,
    pub position: Point,
}

impl Vertex {
    fn new(position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
        }
    }

    pub fn id(&self) -> VertexId {
        self.id
    }
}

/// A boundary segment. Its endpoints are implied by its index in the cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub(crate) id: EdgeId,
    /// Visual attributes, inherited by both halves when the edge is split.
    pub style: ShapeStyle,
}

impl Edge {
    fn new(style: ShapeStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            style,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }
}

/// A closed polygon that doors attach to.
#[derive(Debug, Clone)]
pub struct Polygon {
    pub(crate) id: ObjectId,
    pub kind: PolygonKind,
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    doors: Vec<Door>,
    /// Doors dropped by a topology edit whose scene nodes are still live.
    detached_doors: Vec<DoorId>,
    /// Local-to-global transform.
    transform: Affine,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Polygon {
    /// Create a polygon from points in the global frame.
    ///
    /// The local frame is centred on the polygon's centroid.
    pub fn new(points: Vec<Point>) -> EditResult<Self> {
        Self::check_points(&points)?;
        let center = polygon_centroid(&points);
        let local = points.iter().map(|p| Point::new(p.x - center.x, p.y - center.y)).collect();
        Ok(Self::from_local(PolygonKind::Custom, local, Affine::translate(center.to_vec2())))
    }

    /// Create an axis-aligned rectangle. Vertices run top-left, top-right,
    /// bottom-right, bottom-left.
    pub fn rectangle(rect: Rect) -> EditResult<Self> {
        let rect = rect.abs();
        let (hw, hh) = (rect.width() / 2.0, rect.height() / 2.0);
        let local = vec![
            Point::new(-hw, -hh),
            Point::new(hw, -hh),
            Point::new(hw, hh),
            Point::new(-hw, hh),
        ];
        Self::check_points(&local)?;
        Ok(Self::from_local(
            PolygonKind::Rectangle,
            local,
            Affine::translate(rect.center().to_vec2()),
        ))
    }

    /// Create an isosceles triangle inscribed in `rect`: apex at the top
    /// centre, base along the bottom edge.
    pub fn triangle(rect: Rect) -> EditResult<Self> {
        let rect = rect.abs();
        let (hw, hh) = (rect.width() / 2.0, rect.height() / 2.0);
        let local = vec![Point::new(0.0, -hh), Point::new(hw, hh), Point::new(-hw, hh)];
        Self::check_points(&local)?;
        Ok(Self::from_local(
            PolygonKind::Triangle,
            local,
            Affine::translate(rect.center().to_vec2()),
        ))
    }

    fn from_local(kind: PolygonKind, local: Vec<Point>, transform: Affine) -> Self {
        let style = ShapeStyle::default();
        let edges = local.iter().map(|_| Edge::new(style.clone())).collect();
        Self {
            id: Uuid::new_v4(),
            kind,
            vertices: local.into_iter().map(Vertex::new).collect(),
            edges,
            doors: Vec::new(),
            detached_doors: Vec::new(),
            transform,
            style,
        }
    }

    fn check_points(points: &[Point]) -> EditResult<()> {
        if points.len() < MIN_VERTICES {
            return Err(EditError::TooFewVertices(points.len()));
        }
        if points.iter().any(|p| !p.is_finite()) {
            return Err(EditError::DegeneratePolygon("non-finite coordinate".to_string()));
        }
        if signed_area(points).abs() < 1e-9 {
            return Err(EditError::DegeneratePolygon("zero area".to_string()));
        }
        Ok(())
    }

    /// Apply a style to the polygon and all of its edges.
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        for edge in &mut self.edges {
            edge.style = style.clone();
        }
        self.style = style;
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Index of the edge following `index` around the cycle.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.edges.len()
    }

    /// Index of the edge preceding `index` around the cycle.
    pub fn prev_index(&self, index: usize) -> usize {
        (index + self.edges.len() - 1) % self.edges.len()
    }

    /// Local endpoints (source, target) of an edge.
    pub fn edge_endpoints(&self, index: usize) -> EditResult<(Point, Point)> {
        self.check_edge(index)?;
        Ok((
            self.vertices[index].position,
            self.vertices[self.next_index(index)].position,
        ))
    }

    /// Edges touching a vertex: the one ending at it and the one starting at it.
    pub fn incident_edges(&self, vertex_index: usize) -> EditResult<[usize; 2]> {
        self.check_vertex(vertex_index)?;
        Ok([self.prev_index(vertex_index), vertex_index])
    }

    pub fn vertex_index(&self, id: VertexId) -> Option<usize> {
        self.vertices.iter().position(|v| v.id == id)
    }

    pub fn edge_index(&self, id: EdgeId) -> Option<usize> {
        self.edges.iter().position(|e| e.id == id)
    }

    fn check_edge(&self, index: usize) -> EditResult<()> {
        if index >= self.edges.len() {
            return Err(EditError::EdgeOutOfRange {
                index,
                len: self.edges.len(),
            });
        }
        Ok(())
    }

    fn check_vertex(&self, index: usize) -> EditResult<()> {
        if index >= self.vertices.len() {
            return Err(EditError::VertexOutOfRange {
                index,
                len: self.vertices.len(),
            });
        }
        Ok(())
    }

    /// Local-to-global transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Convert a point from the local frame to the global frame.
    pub fn to_global(&self, local: Point) -> Point {
        self.transform * local
    }

    /// Convert a point from the global frame to the local frame.
    pub fn to_local(&self, global: Point) -> Point {
        self.transform.inverse() * global
    }

    /// Vertex positions in the local frame.
    pub fn local_points(&self) -> Vec<Point> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Vertex positions in the global frame.
    pub fn global_points(&self) -> Vec<Point> {
        self.vertices.iter().map(|v| self.transform * v.position).collect()
    }

    /// Closed boundary path in the global frame.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let points = self.global_points();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
            path.close_path();
        }
        path
    }

    /// Axis-aligned bounds in the global frame.
    pub fn bounds(&self) -> Rect {
        self.to_path().bounding_box()
    }

    /// Centroid in the global frame.
    pub fn centroid(&self) -> Point {
        self.transform * polygon_centroid(&self.local_points())
    }

    /// Check if a global point is inside the polygon or within `tolerance`
    /// of its boundary.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.to_path().contains(point) {
            return true;
        }
        let mut ring = self.global_points();
        if let Some(&first) = ring.first() {
            ring.push(first);
        }
        point_to_polyline_dist(point, &ring) <= tolerance + self.style.stroke_width / 2.0
    }

    /// Split an edge by inserting a vertex at `local_point`.
    ///
    /// The edge is replaced in place by two fresh edges carrying its style and
    /// the new vertex takes the position of the old edge's target, so the
    /// cycle stays closed and vertex/edge counts stay equal. Door anchors on
    /// later edges shift along with the indices.
    pub fn add_vertex_on_edge(&mut self, edge_index: usize, local_point: Point) -> EditResult<VertexId> {
        let (start, end) = self.edge_endpoints(edge_index)?;
        let split = point_to_segment(local_point, start, end).t;
        let vertex = Vertex::new(local_point);
        let id = vertex.id;
        let style = self.edges[edge_index].style.clone();

        self.edges.splice(
            edge_index..=edge_index,
            [Edge::new(style.clone()), Edge::new(style)],
        );
        self.vertices.insert(edge_index + 1, vertex);
        self.remap_door_anchors(|anchor| anchor.after_split(edge_index, split));
        self.reroute_doors();
        Ok(id)
    }

    /// Move a vertex to a new local position.
    pub fn move_vertex(&mut self, index: usize, local_point: Point) -> EditResult<()> {
        self.check_vertex(index)?;
        if !local_point.is_finite() {
            return Err(EditError::DegeneratePolygon("non-finite coordinate".to_string()));
        }
        self.vertices[index].position = local_point;
        self.reroute_doors();
        Ok(())
    }

    /// Remove a vertex, merging its two incident edges into the incoming one.
    pub fn remove_vertex(&mut self, index: usize) -> EditResult<Point> {
        self.check_vertex(index)?;
        if self.vertices.len() <= MIN_VERTICES {
            return Err(EditError::TooFewVertices(self.vertices.len() - 1));
        }
        let old = self.local_points();
        self.edges.remove(index);
        let removed = self.vertices.remove(index).position;
        self.remap_door_anchors(|anchor| anchor.after_removal(index, &old));
        self.reroute_doors();
        Ok(removed)
    }

    /// Check the cycle invariants.
    pub fn validate(&self) -> EditResult<()> {
        if self.vertices.len() < MIN_VERTICES {
            return Err(EditError::TooFewVertices(self.vertices.len()));
        }
        if self.vertices.len() != self.edges.len() {
            return Err(EditError::DegeneratePolygon(format!(
                "{} vertices but {} edges",
                self.vertices.len(),
                self.edges.len()
            )));
        }
        if self.vertices.iter().any(|v| !v.position.is_finite()) {
            return Err(EditError::DegeneratePolygon("non-finite coordinate".to_string()));
        }
        Ok(())
    }

    /// Replace the local-to-global transform and re-resolve every door.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
        self.sync_doors();
    }

    /// Scene node for the polygon boundary.
    pub fn scene_node(&self) -> SceneNode {
        SceneNode::new(self.id, NodeKind::Polygon, self.to_path(), self.style.clone())
            .with_transform(self.transform)
    }

    /// Push the polygon and all of its doors to the scene after a transform
    /// change or topology mutation.
    pub fn sync_scene(&mut self, scene: &mut dyn SceneGraph) {
        self.sync_doors();
        for id in self.detached_doors.drain(..) {
            scene.remove_child(id);
        }
        scene.update_child(self.scene_node());
        for door in &self.doors {
            scene.update_child(door.scene_node());
        }
        scene.request_redraw();
    }
}
