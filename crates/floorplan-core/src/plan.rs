//! Floor plan document: rooms, their doors, and connection lines.

use crate::ObjectId;
use crate::connection::Connection;
use crate::error::{EditError, EditResult};
use crate::polygon::{Door, DoorId, Polygon};
use crate::scene::SceneGraph;
use crate::snap::{EdgeSnap, find_closest_edge_point};
use kurbo::{Point, Rect};
use std::collections::HashMap;

/// Something the pointer can land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanObject {
    Polygon(ObjectId),
    Door { polygon: ObjectId, door: DoorId },
    Connection(ObjectId),
}

/// A floor plan document.
#[derive(Debug, Clone, Default)]
pub struct FloorPlan {
    polygons: HashMap<ObjectId, Polygon>,
    connections: HashMap<ObjectId, Connection>,
    /// Z-order of polygons and connections (back to front).
    z_order: Vec<ObjectId>,
}

impl FloorPlan {
    /// Create a new empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a polygon on top and push it to the scene.
    pub fn add_polygon(&mut self, polygon: Polygon, scene: &mut dyn SceneGraph) -> ObjectId {
        let id = polygon.id();
        scene.add_child(None, polygon.scene_node());
        for door in polygon.doors() {
            scene.add_child(Some(id), door.scene_node());
        }
        self.z_order.push(id);
        self.polygons.insert(id, polygon);
        scene.request_redraw();
        log::info!("Polygon {} added", id);
        id
    }

    /// Remove a polygon with its doors and every connection attached to it.
    pub fn remove_polygon(&mut self, id: ObjectId, scene: &mut dyn SceneGraph) -> Option<Polygon> {
        let polygon = self.polygons.remove(&id)?;
        self.z_order.retain(|&o| o != id);
        scene.remove_child(id);

        let attached: Vec<ObjectId> = self
            .connections
            .values()
            .filter(|c| c.touches(id))
            .map(Connection::id)
            .collect();
        for conn in attached {
            self.remove_connection(conn, scene);
        }
        scene.request_redraw();
        log::info!("Polygon {} removed", id);
        Some(polygon)
    }

    /// Add a connection on top. Fails if an attached polygon does not exist.
    pub fn add_connection(&mut self, connection: Connection, scene: &mut dyn SceneGraph) -> EditResult<ObjectId> {
        let node = connection.scene_node(&self.polygons).ok_or_else(|| {
            let missing = [connection.start.polygon(), connection.end.polygon()]
                .into_iter()
                .flatten()
                .find(|id| !self.polygons.contains_key(id))
                .unwrap_or_default();
            EditError::PolygonNotFound(missing)
        })?;
        let id = connection.id();
        scene.add_child(None, node);
        self.z_order.push(id);
        self.connections.insert(id, connection);
        scene.request_redraw();
        log::info!("Connection {} added", id);
        Ok(id)
    }

    /// Remove a connection.
    pub fn remove_connection(&mut self, id: ObjectId, scene: &mut dyn SceneGraph) -> Option<Connection> {
        let connection = self.connections.remove(&id)?;
        self.z_order.retain(|&o| o != id);
        scene.remove_child(id);
        scene.request_redraw();
        Some(connection)
    }

    /// Add a door to a polygon.
    pub fn add_door(&mut self, polygon: ObjectId, door: Door, scene: &mut dyn SceneGraph) -> EditResult<DoorId> {
        let poly = self
            .polygons
            .get_mut(&polygon)
            .ok_or(EditError::PolygonNotFound(polygon))?;
        Ok(poly.add_door(door, scene))
    }

    /// Remove a door from a polygon. No-op if either does not exist.
    pub fn remove_door(&mut self, polygon: ObjectId, door: DoorId, scene: &mut dyn SceneGraph) -> Option<Door> {
        self.polygons.get_mut(&polygon)?.remove_door(door, scene)
    }

    pub fn polygon(&self, id: ObjectId) -> Option<&Polygon> {
        self.polygons.get(&id)
    }

    pub fn polygon_mut(&mut self, id: ObjectId) -> Option<&mut Polygon> {
        self.polygons.get_mut(&id)
    }

    pub fn connection(&self, id: ObjectId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    /// All polygons, keyed by id.
    pub fn polygons(&self) -> &HashMap<ObjectId, Polygon> {
        &self.polygons
    }

    /// Polygons in z-order (back to front).
    pub fn polygons_ordered(&self) -> impl Iterator<Item = &Polygon> {
        self.z_order.iter().filter_map(|id| self.polygons.get(id))
    }

    /// Connections in z-order (back to front).
    pub fn connections_ordered(&self) -> impl Iterator<Item = &Connection> {
        self.z_order.iter().filter_map(|id| self.connections.get(id))
    }

    /// Front-most object at a global point. Doors take priority over the
    /// polygon that owns them.
    pub fn object_at(&self, point: Point, tolerance: f64) -> Option<PlanObject> {
        self.z_order.iter().rev().find_map(|&id| {
            if let Some(poly) = self.polygons.get(&id) {
                if let Some(door) = poly.doors().iter().rev().find(|d| d.hit_test(point, tolerance)) {
                    return Some(PlanObject::Door {
                        polygon: id,
                        door: door.id(),
                    });
                }
                return poly.hit_test(point, tolerance).then_some(PlanObject::Polygon(id));
            }
            self.connections
                .get(&id)
                .filter(|c| c.hit_test(&self.polygons, point, tolerance))
                .map(|_| PlanObject::Connection(id))
        })
    }

    /// Snap onto the boundary of the front-most polygon that has an edge
    /// within `threshold`.
    pub fn snap_to_any_polygon(&self, point: Point, threshold: f64) -> Option<(ObjectId, EdgeSnap)> {
        self.z_order.iter().rev().find_map(|&id| {
            let poly = self.polygons.get(&id)?;
            find_closest_edge_point(poly, point, threshold).map(|snap| (id, snap))
        })
    }

    /// Adopt the transform the host reports for a polygon and resync its
    /// doors and attached connections.
    pub fn sync_from_scene(&mut self, id: ObjectId, scene: &mut dyn SceneGraph) -> EditResult<()> {
        let poly = self.polygons.get_mut(&id).ok_or(EditError::PolygonNotFound(id))?;
        if let Some(transform) = scene.transform(id) {
            poly.set_transform(transform);
        }
        poly.sync_scene(scene);
        self.refresh_connections(id, scene);
        Ok(())
    }

    /// Push the polygon to the scene after a topology edit.
    pub fn polygon_changed(&mut self, id: ObjectId, scene: &mut dyn SceneGraph) -> EditResult<()> {
        let poly = self.polygons.get_mut(&id).ok_or(EditError::PolygonNotFound(id))?;
        poly.validate()?;
        poly.sync_scene(scene);
        self.refresh_connections(id, scene);
        Ok(())
    }

    /// Re-resolve connections attached to a polygon.
    fn refresh_connections(&self, polygon: ObjectId, scene: &mut dyn SceneGraph) {
        for conn in self.connections.values().filter(|c| c.touches(polygon)) {
            if let Some(node) = conn.scene_node(&self.polygons) {
                scene.update_child(node);
            }
        }
    }

    /// Bounding box of all polygons and connections.
    pub fn bounds(&self) -> Option<Rect> {
        let polys = self.polygons.values().map(Polygon::bounds);
        let conns = self.connections.values().filter_map(|c| c.bounds(&self.polygons));
        polys.chain(conns).reduce(|a, b| a.union(b))
    }

    /// Check if the plan is empty.
    pub fn is_empty(&self) -> bool {
        self.z_order.is_empty()
    }

    /// Number of polygons.
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Number of connections.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
