//! Drag a connection line between rooms or free points.

use super::{Tool, ToolContext, ToolKind};
use crate::ObjectId;
use crate::connection::{Connection, ConnectionEnd};
use crate::input::PointerEvent;
use crate::plan::PlanObject;
use crate::polygon::door::path_through;
use crate::scene::{NodeKind, SceneGraph, SceneNode};
use crate::snap::snap_point;
use kurbo::Point;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum ConnectionState {
    #[default]
    Idle,
    Dragging { start: ConnectionEnd, preview: ObjectId },
}

/// Press on a room (or empty canvas), release on another to link them.
#[derive(Debug, Default)]
pub struct ConnectionTool {
    state: ConnectionState,
}

impl ConnectionTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// What the pointer lands on: a room (a door counts as its room) or a
    /// free point.
    fn end_at(position: Point, ctx: &ToolContext<'_>) -> ConnectionEnd {
        match ctx.plan.object_at(position, ctx.config.hit_tolerance) {
            Some(PlanObject::Polygon(id)) | Some(PlanObject::Door { polygon: id, .. }) => ConnectionEnd::Polygon(id),
            _ => ConnectionEnd::Point(snap_point(position, ctx.config.snap_mode, ctx.config.grid_size)),
        }
    }

    fn preview_node(preview: ObjectId, from: Point, to: Point, ctx: &ToolContext<'_>) -> SceneNode {
        SceneNode::new(
            preview,
            NodeKind::Preview,
            path_through(&[from, to]),
            ctx.config.connection_style.preview(),
        )
    }

    fn finish(&mut self, start: ConnectionEnd, position: Point, ctx: &mut ToolContext<'_>) {
        self.cleanup(ctx.scene);
        let end = Self::end_at(position, ctx);

        if start.polygon().is_some() && start.polygon() == end.polygon() {
            log::debug!("Connection start and end on the same room, discarded");
            return;
        }
        let polygons = ctx.plan.polygons();
        let (Some(p0), Some(p1)) = (start.resolve(polygons), end.resolve(polygons)) else {
            log::debug!("Connection end no longer resolves, discarded");
            return;
        };
        if p0.distance(p1) < ctx.config.min_shape_size {
            log::debug!("Connection too short, discarded");
            return;
        }

        let connection = Connection::new(start, end).with_style(ctx.config.connection_style.clone());
        match ctx.plan.add_connection(connection, ctx.scene) {
            Ok(id) => log::info!("Connection {} created", id),
            Err(e) => log::warn!("Could not create connection: {}", e),
        }
    }
}

impl Tool for ConnectionTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Connection
    }

    fn on_pointer(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        match (*event, self.state) {
            (PointerEvent::Down { position, .. }, ConnectionState::Idle) => {
                let start = Self::end_at(position, ctx);
                let Some(anchor) = start.resolve(ctx.plan.polygons()) else {
                    return;
                };
                let preview = Uuid::new_v4();
                let node = Self::preview_node(preview, anchor, position, ctx);
                ctx.scene.add_child(None, node);
                ctx.scene.request_redraw();
                self.state = ConnectionState::Dragging { start, preview };
            }
            (PointerEvent::Move { position }, ConnectionState::Dragging { start, preview }) => {
                let Some(anchor) = start.resolve(ctx.plan.polygons()) else {
                    return;
                };
                let node = Self::preview_node(preview, anchor, position, ctx);
                ctx.scene.update_child(node);
                ctx.scene.request_redraw();
            }
            (PointerEvent::Up { position, .. }, ConnectionState::Dragging { start, .. }) => {
                self.finish(start, position, ctx);
            }
            _ => {}
        }
    }

    fn cleanup(&mut self, scene: &mut dyn SceneGraph) {
        if let ConnectionState::Dragging { preview, .. } = self.state {
            scene.remove_child(preview);
            scene.request_redraw();
        }
        self.state = ConnectionState::Idle;
    }

    fn is_active(&self) -> bool {
        matches!(self.state, ConnectionState::Dragging { .. })
    }
}
