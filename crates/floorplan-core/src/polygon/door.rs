//! Doors: boundary-following paths owned by a polygon.

use super::Polygon;
use crate::ObjectId;
use crate::geometry::{point_to_polyline_dist, point_to_segment, polyline_length};
use crate::routing::walk_boundary;
use crate::scene::{NodeKind, SceneGraph, SceneNode};
use crate::snap::{ROUTE_SNAP_THRESHOLD, closest_edge_point_local};
use crate::style::ShapeStyle;
use kurbo::{Affine, BezPath, Point};
use uuid::Uuid;

/// Unique identifier for a door.
pub type DoorId = ObjectId;

/// A door endpoint pinned to the boundary: an edge and a position along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeAnchor {
    pub edge: usize,
    /// 0 at the edge's source vertex, 1 at its target.
    pub t: f64,
}

impl EdgeAnchor {
    /// Follow an edge split: `edge` was cut at `split` into `edge` and `edge + 1`.
    pub(crate) fn after_split(self, edge: usize, split: f64) -> Self {
        if self.edge < edge {
            self
        } else if self.edge > edge {
            Self {
                edge: self.edge + 1,
                ..self
            }
        } else if self.t <= split {
            Self {
                edge,
                t: if split > 0.0 { self.t / split } else { 0.0 },
            }
        } else {
            Self {
                edge: edge + 1,
                t: (self.t - split) / (1.0 - split),
            }
        }
    }

    /// Follow a vertex removal. `old` are the vertex positions before
    /// `removed` was dropped; its incoming and outgoing edges merge into one
    /// running from `old[prev]` to the vertex after `removed`.
    pub(crate) fn after_removal(self, removed: usize, old: &[Point]) -> Self {
        let n = old.len();
        let prev = (removed + n - 1) % n;
        let shift = |edge: usize| if edge > removed { edge - 1 } else { edge };
        if self.edge != prev && self.edge != removed {
            return Self {
                edge: shift(self.edge),
                ..self
            };
        }
        let position = old[self.edge].lerp(old[(self.edge + 1) % n], self.t);
        Self {
            edge: shift(prev),
            t: point_to_segment(position, old[prev], old[(removed + 1) % n]).t,
        }
    }
}

/// An opening routed along one or more boundary edges.
#[derive(Debug, Clone)]
pub struct Door {
    pub(crate) id: DoorId,
    /// Path points in the owning polygon's local frame.
    points: Vec<Point>,
    /// Boundary positions of the two endpoints, set when the door is
    /// attached on the boundary. Anchored doors are re-routed after every
    /// topology edit.
    anchors: Option<[EdgeAnchor; 2]>,
    /// Style properties.
    pub style: ShapeStyle,
    /// Path points in the global frame, refreshed on every sync.
    resolved: Vec<Point>,
    scale: f64,
    rotation: f64,
}

impl Door {
    /// Create a door from local-frame points.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            resolved: points.clone(),
            points,
            anchors: None,
            style: ShapeStyle::door(),
            scale: 1.0,
            rotation: 0.0,
        }
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> DoorId {
        self.id
    }

    /// Points in the owning polygon's local frame.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Endpoint anchors on the owner's boundary.
    pub fn anchors(&self) -> Option<[EdgeAnchor; 2]> {
        self.anchors
    }

    /// Points in the global frame as of the last sync.
    pub fn resolved_points(&self) -> &[Point] {
        &self.resolved
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Length of the path in the local frame.
    pub fn length(&self) -> f64 {
        polyline_length(&self.points)
    }

    /// A door with fewer than two points or no length marks nothing.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2 || self.length() < f64::EPSILON
    }

    /// Re-resolve global coordinates against the owner's transform. The door's
    /// own transform is flattened since its points already live in the
    /// owner's frame.
    pub(crate) fn sync(&mut self, owner: Affine) {
        self.resolved = self.points.iter().map(|p| owner * *p).collect();
        self.scale = 1.0;
        self.rotation = 0.0;
    }

    /// Check if a global point is on the door path.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_polyline_dist(point, &self.resolved) <= tolerance + self.style.stroke_width / 2.0
    }

    /// Open path through the resolved points.
    pub fn to_path(&self) -> BezPath {
        path_through(&self.resolved)
    }

    /// Scene node for the door.
    pub fn scene_node(&self) -> SceneNode {
        let flattened = Affine::rotate(self.rotation) * Affine::scale(self.scale);
        SceneNode::new(self.id, NodeKind::Door, self.to_path(), self.style.clone())
            .with_transform(flattened)
    }
}

/// Open polyline path through `points`.
pub(crate) fn path_through(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((first, rest)) = points.split_first() {
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
    }
    path
}

impl Polygon {
    pub fn doors(&self) -> &[Door] {
        &self.doors
    }

    pub fn door(&self, id: DoorId) -> Option<&Door> {
        self.doors.iter().find(|d| d.id == id)
    }

    /// Attach a door: append it to the door set and to the polygon's
    /// children in the scene. Endpoints lying on the boundary are anchored
    /// there so the door follows later vertex edits.
    pub fn add_door(&mut self, mut door: Door, scene: &mut dyn SceneGraph) -> DoorId {
        door.anchors = self.anchor_endpoints(&door.points);
        door.sync(self.transform);
        let id = door.id;
        scene.add_child(Some(self.id), door.scene_node());
        self.doors.push(door);
        scene.request_redraw();
        log::debug!("Door {} attached to polygon {}", id, self.id);
        id
    }

    /// Detach a door by identity. Returns `None` (and touches nothing) if the
    /// door does not belong to this polygon.
    pub fn remove_door(&mut self, id: DoorId, scene: &mut dyn SceneGraph) -> Option<Door> {
        let index = self.doors.iter().position(|d| d.id == id)?;
        let door = self.doors.remove(index);
        scene.remove_child(id);
        scene.request_redraw();
        log::debug!("Door {} removed from polygon {}", id, self.id);
        Some(door)
    }

    fn anchor_endpoints(&self, points: &[Point]) -> Option<[EdgeAnchor; 2]> {
        let anchor = |p: Point| {
            closest_edge_point_local(self, p, ROUTE_SNAP_THRESHOLD).map(|snap| EdgeAnchor {
                edge: snap.edge,
                t: snap.t,
            })
        };
        Some([anchor(*points.first()?)?, anchor(*points.last()?)?])
    }

    /// Local position of an anchor on the current boundary.
    pub fn anchor_point(&self, anchor: EdgeAnchor) -> Option<Point> {
        let (start, end) = self.edge_endpoints(anchor.edge).ok()?;
        Some(start.lerp(end, anchor.t))
    }

    pub(crate) fn remap_door_anchors(&mut self, remap: impl Fn(EdgeAnchor) -> EdgeAnchor) {
        for door in &mut self.doors {
            if let Some(anchors) = &mut door.anchors {
                for anchor in anchors.iter_mut() {
                    *anchor = remap(*anchor);
                }
            }
        }
    }

    /// Rebuild every anchored door along the current boundary. Doors whose
    /// path collapses are detached; their scene nodes go on the next
    /// [`Polygon::sync_scene`].
    pub(crate) fn reroute_doors(&mut self) {
        for mut door in std::mem::take(&mut self.doors) {
            if let Some([start, end]) = door.anchors {
                door.points = match (self.anchor_point(start), self.anchor_point(end)) {
                    (Some(a), Some(b)) => walk_boundary(self, start.edge, a, end.edge, b),
                    _ => Vec::new(),
                };
                if door.is_degenerate() {
                    log::debug!("Door {} no longer routes on polygon {}, detached", door.id, self.id);
                    self.detached_doors.push(door.id);
                    continue;
                }
            }
            self.doors.push(door);
        }
        self.sync_doors();
    }

    pub(crate) fn sync_doors(&mut self) {
        let transform = self.transform;
        for door in &mut self.doors {
            door.sync(transform);
        }
    }
}
