//! Two-click door placement along a room boundary.

use super::{Tool, ToolContext, ToolKind};
use crate::ObjectId;
use crate::input::PointerEvent;
use crate::plan::PlanObject;
use crate::polygon::door::path_through;
use crate::polygon::{Door, Polygon};
use crate::routing::find_path_with_threshold;
use crate::scene::{NodeKind, SceneGraph, SceneNode};
use crate::snap::find_closest_edge_point;
use crate::style::ShapeStyle;
use kurbo::Point;
use uuid::Uuid;

/// Gesture state of the door tool.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DoorState {
    /// Waiting for the first boundary click.
    #[default]
    Idle,
    /// First point recorded; the next boundary click commits the door.
    AwaitingSecondPoint {
        polygon: ObjectId,
        /// First point, in the polygon's local frame.
        first: Point,
        /// Preview node shown while the pointer moves.
        preview: ObjectId,
    },
}

/// Places doors with two clicks on the same room boundary.
#[derive(Debug, Default)]
pub struct DoorTool {
    state: DoorState,
}

impl DoorTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    fn on_click(&mut self, position: Point, ctx: &mut ToolContext<'_>) {
        match self.state {
            DoorState::Idle => self.start(position, ctx),
            DoorState::AwaitingSecondPoint { polygon, first, .. } => self.commit(polygon, first, position, ctx),
        }
    }

    fn start(&mut self, position: Point, ctx: &mut ToolContext<'_>) {
        let Some((polygon, snap)) = ctx.plan.snap_to_any_polygon(position, ctx.config.edge_snap_threshold) else {
            match ctx.plan.object_at(position, ctx.config.hit_tolerance) {
                Some(PlanObject::Connection(id)) => {
                    log::warn!("Door tool needs a room boundary, got connection {}", id);
                }
                _ => log::debug!("Door tool: no boundary near {:?}", position),
            }
            return;
        };

        let preview = Uuid::new_v4();
        let Some(poly) = ctx.plan.polygon(polygon) else {
            return;
        };
        let anchor = poly.to_global(snap.point);
        let node = SceneNode::new(
            preview,
            NodeKind::Preview,
            path_through(&[anchor, anchor]),
            ctx.config.door_style.preview(),
        );
        ctx.scene.add_child(Some(polygon), node);
        ctx.scene.request_redraw();
        self.state = DoorState::AwaitingSecondPoint {
            polygon,
            first: snap.point,
            preview,
        };
        log::debug!("Door start on polygon {} edge {}", polygon, snap.edge);
    }

    fn commit(&mut self, polygon: ObjectId, first: Point, position: Point, ctx: &mut ToolContext<'_>) {
        let Some(poly) = ctx.plan.polygon(polygon) else {
            log::debug!("Door target polygon {} is gone", polygon);
            self.cleanup(ctx.scene);
            return;
        };
        let Some(snap) = find_closest_edge_point(poly, position, ctx.config.edge_snap_threshold) else {
            log::debug!("Door tool: second click off boundary, ignored");
            return;
        };

        let path = find_path_with_threshold(poly, first, snap.point, ctx.config.route_snap_threshold);
        self.cleanup(ctx.scene);
        let door = Door::new(path).with_style(ctx.config.door_style.clone());
        if door.is_degenerate() {
            log::debug!("Door routing produced no path, gesture reset");
            return;
        }

        match ctx.plan.add_door(polygon, door, ctx.scene) {
            Ok(id) => log::info!("Door {} placed on polygon {}", id, polygon),
            Err(e) => log::warn!("Door placement failed: {}", e),
        }
    }

    fn on_move(&mut self, position: Point, ctx: &mut ToolContext<'_>) {
        let DoorState::AwaitingSecondPoint { polygon, first, preview } = self.state else {
            return;
        };
        let Some(poly) = ctx.plan.polygon(polygon) else {
            return;
        };
        let Some(snap) = find_closest_edge_point(poly, position, ctx.config.edge_snap_threshold) else {
            return;
        };
        let path = find_path_with_threshold(poly, first, snap.point, ctx.config.route_snap_threshold);
        if path.is_empty() {
            return;
        }
        let node = preview_node(poly, preview, &path, &ctx.config.door_style);
        ctx.scene.update_child(node);
        ctx.scene.request_redraw();
    }
}

fn preview_node(poly: &Polygon, preview: ObjectId, local_path: &[Point], style: &ShapeStyle) -> SceneNode {
    let global: Vec<Point> = local_path.iter().map(|p| poly.to_global(*p)).collect();
    SceneNode::new(preview, NodeKind::Preview, path_through(&global), style.preview())
}

impl Tool for DoorTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Door
    }

    fn on_pointer(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        match *event {
            PointerEvent::Down { position, .. } => self.on_click(position, ctx),
            PointerEvent::Move { position } => self.on_move(position, ctx),
            PointerEvent::Up { .. } | PointerEvent::DoubleClick { .. } => {}
        }
    }

    fn cleanup(&mut self, scene: &mut dyn SceneGraph) {
        if let DoorState::AwaitingSecondPoint { preview, .. } = self.state {
            scene.remove_child(preview);
            scene.request_redraw();
        }
        self.state = DoorState::Idle;
    }

    fn is_active(&self) -> bool {
        self.state != DoorState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolConfig;
    use crate::connection::{Connection, ConnectionEnd};
    use crate::tools::test_support::square_room;
    use kurbo::Affine;

    fn click(tool: &mut DoorTool, ctx: &mut ToolContext<'_>, x: f64, y: f64) {
        tool.on_pointer(&PointerEvent::down(Point::new(x, y)), ctx);
        tool.on_pointer(&PointerEvent::up(Point::new(x, y)), ctx);
    }

    #[test]
    fn test_door_on_single_edge() {
        let (mut plan, mut scene, room) = square_room();
        let config = ToolConfig::default();
        let mut ctx = ToolContext { plan: &mut plan, scene: &mut scene, config: &config };
        let mut tool = DoorTool::new();

        click(&mut tool, &mut ctx, 30.0, 3.0);
        assert!(matches!(tool.state(), DoorState::AwaitingSecondPoint { .. }));
        click(&mut tool, &mut ctx, 60.0, -2.0);
        assert_eq!(tool.state(), DoorState::Idle);

        let doors = plan.polygon(room).unwrap().doors();
        assert_eq!(doors.len(), 1);
        assert_eq!(doors[0].resolved_points(), &[Point::new(30.0, 0.0), Point::new(60.0, 0.0)]);
        assert!(scene.nodes_of_kind(NodeKind::Preview).is_empty());
        assert_eq!(scene.children(room), vec![doors[0].id()]);
    }

    #[test]
    fn test_door_across_opposite_edges() {
        let (mut plan, mut scene, room) = square_room();
        let config = ToolConfig::default();
        let mut ctx = ToolContext { plan: &mut plan, scene: &mut scene, config: &config };
        let mut tool = DoorTool::new();

        click(&mut tool, &mut ctx, 50.0, 2.0); // edge 0
        click(&mut tool, &mut ctx, 50.0, 98.0); // edge 2

        let door = &plan.polygon(room).unwrap().doors()[0];
        assert_eq!(
            door.resolved_points(),
            &[
                Point::new(50.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(50.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_click_off_boundary_is_ignored() {
        let (mut plan, mut scene, room) = square_room();
        let config = ToolConfig::default();
        let mut ctx = ToolContext { plan: &mut plan, scene: &mut scene, config: &config };
        let mut tool = DoorTool::new();

        click(&mut tool, &mut ctx, 50.0, 50.0);
        assert_eq!(tool.state(), DoorState::Idle);

        click(&mut tool, &mut ctx, 50.0, 0.0);
        click(&mut tool, &mut ctx, 50.0, 50.0);
        // Still waiting for a valid second point
        assert!(tool.is_active());
        assert!(plan.polygon(room).unwrap().doors().is_empty());
    }

    #[test]
    fn test_same_point_creates_no_door() {
        let (mut plan, mut scene, room) = square_room();
        let config = ToolConfig::default();
        let mut ctx = ToolContext { plan: &mut plan, scene: &mut scene, config: &config };
        let mut tool = DoorTool::new();

        click(&mut tool, &mut ctx, 40.0, 1.0);
        click(&mut tool, &mut ctx, 40.0, -1.0);
        assert_eq!(tool.state(), DoorState::Idle);
        assert!(plan.polygon(room).unwrap().doors().is_empty());
        assert!(scene.nodes_of_kind(NodeKind::Preview).is_empty());
    }

    #[test]
    fn test_preview_follows_pointer() {
        let (mut plan, mut scene, room) = square_room();
        let config = ToolConfig::default();
        let mut ctx = ToolContext { plan: &mut plan, scene: &mut scene, config: &config };
        let mut tool = DoorTool::new();

        click(&mut tool, &mut ctx, 50.0, 0.0);
        tool.on_pointer(&PointerEvent::moved(Point::new(101.0, 50.0)), &mut ctx);

        let previews = scene.nodes_of_kind(NodeKind::Preview);
        assert_eq!(previews.len(), 1);
        // start, corner, pointer
        assert_eq!(previews[0].path.elements().len(), 3);
        assert_eq!(scene.parent_of(previews[0].id), Some(room));
    }

    #[test]
    fn test_connection_target_aborts() {
        let (mut plan, mut scene, room) = square_room();
        plan.add_connection(
            Connection::new(ConnectionEnd::Polygon(room), ConnectionEnd::Point(Point::new(400.0, 50.0))),
            &mut scene,
        )
        .unwrap();
        let config = ToolConfig::default();
        let mut ctx = ToolContext { plan: &mut plan, scene: &mut scene, config: &config };
        let mut tool = DoorTool::new();

        click(&mut tool, &mut ctx, 300.0, 50.0);
        assert_eq!(tool.state(), DoorState::Idle);
        assert!(scene.nodes_of_kind(NodeKind::Preview).is_empty());
    }

    #[test]
    fn test_door_on_transformed_room() {
        let (mut plan, mut scene, room) = square_room();
        let rotated = Affine::rotate_about(std::f64::consts::FRAC_PI_2, Point::new(50.0, 50.0))
            * plan.polygon(room).unwrap().transform();
        scene.set_transform(room, rotated);
        plan.sync_from_scene(room, &mut scene).unwrap();

        let config = ToolConfig::default();
        let mut ctx = ToolContext { plan: &mut plan, scene: &mut scene, config: &config };
        let mut tool = DoorTool::new();
        click(&mut tool, &mut ctx, 20.0, 1.0);
        click(&mut tool, &mut ctx, 70.0, 1.0);

        let door = &plan.polygon(room).unwrap().doors()[0];
        let pts = door.resolved_points();
        assert_eq!(pts.len(), 2);
        assert!((pts[0].x - 20.0).abs() < 1e-9 && pts[0].y.abs() < 1e-9);
        assert!((pts[1].x - 70.0).abs() < 1e-9 && pts[1].y.abs() < 1e-9);
        assert_eq!(door.rotation(), 0.0);
    }
}
