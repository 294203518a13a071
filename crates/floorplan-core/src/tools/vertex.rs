//! Vertex editing: drag handles, double-click to split an edge or drop a vertex.

use super::{Tool, ToolContext, ToolKind};
use crate::ObjectId;
use crate::input::PointerEvent;
use crate::scene::SceneGraph;
use kurbo::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum VertexState {
    #[default]
    Idle,
    Dragging { polygon: ObjectId, vertex: usize },
}

/// Edits polygon topology.
///
/// Press on a vertex handle and drag to move it. Double-click a vertex to
/// remove it (rooms keep at least three), or double-click an edge to insert
/// a vertex there.
#[derive(Debug, Default)]
pub struct VertexTool {
    state: VertexState,
}

impl VertexTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Front-most vertex handle under the pointer.
    fn handle_at(position: Point, ctx: &ToolContext<'_>) -> Option<(ObjectId, usize)> {
        let polygons: Vec<_> = ctx.plan.polygons_ordered().collect();
        polygons.into_iter().rev().find_map(|poly| {
            poly.global_points()
                .iter()
                .position(|p| p.distance(position) <= ctx.config.vertex_handle_tolerance)
                .map(|index| (poly.id(), index))
        })
    }

    fn drag_to(&mut self, polygon: ObjectId, vertex: usize, position: Point, ctx: &mut ToolContext<'_>) {
        let Some(poly) = ctx.plan.polygon_mut(polygon) else {
            self.state = VertexState::Idle;
            return;
        };
        let local = poly.to_local(position);
        if let Err(e) = poly.move_vertex(vertex, local) {
            log::warn!("Vertex move failed: {}", e);
            self.state = VertexState::Idle;
            return;
        }
        if let Err(e) = ctx.plan.polygon_changed(polygon, ctx.scene) {
            log::warn!("Polygon {} invalid after vertex move: {}", polygon, e);
        }
    }

    fn remove_vertex(&mut self, polygon: ObjectId, vertex: usize, ctx: &mut ToolContext<'_>) {
        self.state = VertexState::Idle;
        let Some(poly) = ctx.plan.polygon_mut(polygon) else {
            return;
        };
        match poly.remove_vertex(vertex) {
            Ok(_) => {
                log::debug!("Vertex {} removed from polygon {}", vertex, polygon);
                if let Err(e) = ctx.plan.polygon_changed(polygon, ctx.scene) {
                    log::warn!("Polygon {} invalid after vertex removal: {}", polygon, e);
                }
            }
            Err(e) => log::warn!("Cannot remove vertex: {}", e),
        }
    }

    fn split_edge(&mut self, position: Point, ctx: &mut ToolContext<'_>) {
        let Some((polygon, snap)) = ctx.plan.snap_to_any_polygon(position, ctx.config.edge_snap_threshold) else {
            return;
        };
        let Some(poly) = ctx.plan.polygon_mut(polygon) else {
            return;
        };
        match poly.add_vertex_on_edge(snap.edge, snap.point) {
            Ok(id) => {
                log::debug!("Vertex {} inserted on edge {} of polygon {}", id, snap.edge, polygon);
                if let Err(e) = ctx.plan.polygon_changed(polygon, ctx.scene) {
                    log::warn!("Polygon {} invalid after edge split: {}", polygon, e);
                }
            }
            Err(e) => log::warn!("Edge split failed: {}", e),
        }
    }
}

impl Tool for VertexTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Vertex
    }

    fn on_pointer(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        match (*event, self.state) {
            (PointerEvent::Down { position, .. }, _) => {
                self.state = match Self::handle_at(position, ctx) {
                    Some((polygon, vertex)) => VertexState::Dragging { polygon, vertex },
                    None => VertexState::Idle,
                };
            }
            (PointerEvent::Move { position }, VertexState::Dragging { polygon, vertex }) => {
                self.drag_to(polygon, vertex, position, ctx);
            }
            (PointerEvent::Up { .. }, _) => self.state = VertexState::Idle,
            (PointerEvent::DoubleClick { .. }, VertexState::Dragging { polygon, vertex }) => {
                self.remove_vertex(polygon, vertex, ctx);
            }
            (PointerEvent::DoubleClick { position }, VertexState::Idle) => self.split_edge(position, ctx),
            _ => {}
        }
    }

    fn cleanup(&mut self, _scene: &mut dyn SceneGraph) {
        self.state = VertexState::Idle;
    }

    fn is_active(&self) -> bool {
        matches!(self.state, VertexState::Dragging { .. })
    }
}
