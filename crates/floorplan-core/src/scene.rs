//! Scene graph abstraction over the host canvas.
//!
//! The host library owns rendering, hit-testing of its own objects and event
//! dispatch. This crate only pushes artifacts into it (rooms, doors,
//! connections, previews), reads back object transforms the user changed,
//! and asks for redraws.

use crate::ObjectId;
use crate::style::ShapeStyle;
use kurbo::{Affine, BezPath};
use std::collections::HashMap;

/// What a scene node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Polygon,
    Door,
    Connection,
    /// Transient gesture feedback, removed on commit or cleanup.
    Preview,
}

/// A drawable artifact handed to the host.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: ObjectId,
    pub kind: NodeKind,
    /// Path in the global frame.
    pub path: BezPath,
    pub style: ShapeStyle,
    /// Local-to-global transform of the object the node stands for.
    pub transform: Affine,
}

impl SceneNode {
    pub fn new(id: ObjectId, kind: NodeKind, path: BezPath, style: ShapeStyle) -> Self {
        Self {
            id,
            kind,
            path,
            style,
            transform: Affine::IDENTITY,
        }
    }

    /// Set the object transform reported to the host.
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }
}

/// Operations the tools need from the embedding canvas.
pub trait SceneGraph {
    /// Add a node as a child of `parent`, or at the root when `parent` is `None`.
    fn add_child(&mut self, parent: Option<ObjectId>, node: SceneNode);

    /// Remove a node (and its children). Returns false if it was not present.
    fn remove_child(&mut self, id: ObjectId) -> bool;

    /// Parent of a node, `None` for root nodes and unknown ids.
    fn parent_of(&self, id: ObjectId) -> Option<ObjectId>;

    /// Replace a node's geometry/style in place, keeping its parent and
    /// children. Unknown nodes are added at the root.
    fn update_child(&mut self, node: SceneNode);

    /// Current transform of an object as the host sees it. Differs from the
    /// last pushed [`SceneNode::transform`] after the user moved, scaled or
    /// rotated the object on the host side.
    fn transform(&self, id: ObjectId) -> Option<Affine>;

    /// Ask the host to repaint.
    fn request_redraw(&mut self);
}

#[derive(Debug, Clone)]
struct SceneEntry {
    parent: Option<ObjectId>,
    node: SceneNode,
}

/// In-memory scene graph for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemoryScene {
    entries: HashMap<ObjectId, SceneEntry>,
    /// Insertion order, used for deterministic iteration.
    order: Vec<ObjectId>,
    redraws: usize,
}

impl MemoryScene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a node by id.
    pub fn node(&self, id: ObjectId) -> Option<&SceneNode> {
        self.entries.get(&id).map(|e| &e.node)
    }

    /// Check whether a node is present.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Ids of the direct children of `parent`, in insertion order.
    pub fn children(&self, parent: ObjectId) -> Vec<ObjectId> {
        self.order
            .iter()
            .filter(|id| self.entries.get(*id).is_some_and(|e| e.parent == Some(parent)))
            .copied()
            .collect()
    }

    /// All nodes of a given kind, in insertion order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<&SceneNode> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .map(|e| &e.node)
            .filter(|n| n.kind == kind)
            .collect()
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Simulate the user moving/scaling/rotating an object on the host side.
    /// Returns false if the object is not in the scene.
    pub fn set_transform(&mut self, id: ObjectId, transform: Affine) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.node.transform = transform;
                true
            }
            None => false,
        }
    }

    /// Number of redraw requests received.
    pub fn redraw_count(&self) -> usize {
        self.redraws
    }
}

impl SceneGraph for MemoryScene {
    fn add_child(&mut self, parent: Option<ObjectId>, node: SceneNode) {
        let id = node.id;
        if self.entries.insert(id, SceneEntry { parent, node }).is_none() {
            self.order.push(id);
        }
    }

    fn remove_child(&mut self, id: ObjectId) -> bool {
        if self.entries.remove(&id).is_none() {
            return false;
        }
        self.order.retain(|&o| o != id);
        for child in self.children(id) {
            self.remove_child(child);
        }
        true
    }

    fn parent_of(&self, id: ObjectId) -> Option<ObjectId> {
        self.entries.get(&id).and_then(|e| e.parent)
    }

    fn update_child(&mut self, node: SceneNode) {
        match self.entries.get_mut(&node.id) {
            Some(entry) => entry.node = node,
            None => self.add_child(None, node),
        }
    }

    fn transform(&self, id: ObjectId) -> Option<Affine> {
        self.entries.get(&id).map(|e| e.node.transform)
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn node(kind: NodeKind) -> SceneNode {
        SceneNode::new(Uuid::new_v4(), kind, BezPath::new(), ShapeStyle::default())
    }

    #[test]
    fn test_add_and_remove_children() {
        let mut scene = MemoryScene::new();
        let room = node(NodeKind::Polygon);
        let door = node(NodeKind::Door);
        let (room_id, door_id) = (room.id, door.id);

        scene.add_child(None, room);
        scene.add_child(Some(room_id), door);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.children(room_id), vec![door_id]);
        assert_eq!(scene.parent_of(door_id), Some(room_id));

        assert!(scene.remove_child(door_id));
        assert!(!scene.remove_child(door_id));
        assert!(scene.children(room_id).is_empty());
    }

    #[test]
    fn test_removing_parent_removes_children() {
        let mut scene = MemoryScene::new();
        let room = node(NodeKind::Polygon);
        let room_id = room.id;
        scene.add_child(None, room);
        scene.add_child(Some(room_id), node(NodeKind::Door));
        scene.add_child(Some(room_id), node(NodeKind::Door));

        assert!(scene.remove_child(room_id));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_update_keeps_parent() {
        let mut scene = MemoryScene::new();
        let room = node(NodeKind::Polygon);
        let room_id = room.id;
        let door = node(NodeKind::Door);
        let door_id = door.id;
        scene.add_child(None, room);
        scene.add_child(Some(room_id), door);

        let mut updated = scene.node(door_id).cloned().unwrap();
        updated.style.stroke_width = 9.0;
        scene.update_child(updated);

        assert_eq!(scene.parent_of(door_id), Some(room_id));
        assert_eq!(scene.node(door_id).unwrap().style.stroke_width, 9.0);
    }

    #[test]
    fn test_update_keeps_children() {
        let mut scene = MemoryScene::new();
        let room = node(NodeKind::Polygon);
        let room_id = room.id;
        let door = node(NodeKind::Door);
        let door_id = door.id;
        scene.add_child(None, room.clone());
        scene.add_child(Some(room_id), door);

        scene.update_child(room);
        assert_eq!(scene.children(room_id), vec![door_id]);
    }

    #[test]
    fn test_transforms_and_redraws() {
        let mut scene = MemoryScene::new();
        let room = node(NodeKind::Polygon);
        let id = room.id;
        assert!(scene.transform(id).is_none());
        assert!(!scene.set_transform(id, Affine::translate((5.0, 5.0))));

        scene.add_child(None, room);
        assert_eq!(scene.transform(id), Some(Affine::IDENTITY));
        assert!(scene.set_transform(id, Affine::translate((5.0, 5.0))));
        assert_eq!(scene.transform(id), Some(Affine::translate((5.0, 5.0))));

        scene.request_redraw();
        scene.request_redraw();
        assert_eq!(scene.redraw_count(), 2);
    }
}
