//! Drag-to-create rectangles and triangles.

use super::{Tool, ToolContext, ToolKind};
use crate::ObjectId;
use crate::error::EditResult;
use crate::input::PointerEvent;
use crate::polygon::Polygon;
use crate::scene::{NodeKind, SceneGraph, SceneNode};
use crate::snap::snap_point;
use kurbo::{BezPath, Point, Rect};
use uuid::Uuid;

/// Which polygon a [`ShapeTool`] draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Triangle,
}

impl ShapeKind {
    /// Build the polygon spanning `rect`.
    pub fn build(self, rect: Rect) -> EditResult<Polygon> {
        match self {
            ShapeKind::Rectangle => Polygon::rectangle(rect),
            ShapeKind::Triangle => Polygon::triangle(rect),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging { start: Point, preview: ObjectId },
}

/// Drag out an axis-aligned rectangle or triangle.
#[derive(Debug)]
pub struct ShapeTool {
    kind: ShapeKind,
    state: DragState,
}

impl ShapeTool {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            state: DragState::Idle,
        }
    }

    pub fn shape_kind(&self) -> ShapeKind {
        self.kind
    }

    fn preview_path(&self, start: Point, current: Point) -> BezPath {
        self.kind
            .build(Rect::from_points(start, current))
            .map(|p| p.to_path())
            .unwrap_or_default()
    }

    fn finish(&mut self, end: Point, ctx: &mut ToolContext<'_>) {
        let DragState::Dragging { start, .. } = self.state else {
            return;
        };
        self.cleanup(ctx.scene);

        let rect = Rect::from_points(start, end);
        if rect.width() < ctx.config.min_shape_size || rect.height() < ctx.config.min_shape_size {
            log::debug!("Shape too small ({:.1}x{:.1}), discarded", rect.width(), rect.height());
            return;
        }
        match self.kind.build(rect) {
            Ok(polygon) => {
                let id = ctx.plan.add_polygon(polygon.with_style(ctx.config.shape_style.clone()), ctx.scene);
                log::info!("{:?} {} created", self.kind, id);
            }
            Err(e) => log::warn!("Could not create {:?}: {}", self.kind, e),
        }
    }
}

impl Tool for ShapeTool {
    fn kind(&self) -> ToolKind {
        match self.kind {
            ShapeKind::Rectangle => ToolKind::Rectangle,
            ShapeKind::Triangle => ToolKind::Triangle,
        }
    }

    fn on_pointer(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        let position = snap_point(event.position(), ctx.config.snap_mode, ctx.config.grid_size);
        match (*event, self.state) {
            (PointerEvent::Down { .. }, DragState::Idle) => {
                let preview = Uuid::new_v4();
                let node = SceneNode::new(
                    preview,
                    NodeKind::Preview,
                    BezPath::new(),
                    ctx.config.shape_style.preview(),
                );
                ctx.scene.add_child(None, node);
                self.state = DragState::Dragging {
                    start: position,
                    preview,
                };
            }
            (PointerEvent::Move { .. }, DragState::Dragging { start, preview }) => {
                let node = SceneNode::new(
                    preview,
                    NodeKind::Preview,
                    self.preview_path(start, position),
                    ctx.config.shape_style.preview(),
                );
                ctx.scene.update_child(node);
                ctx.scene.request_redraw();
            }
            (PointerEvent::Up { .. }, DragState::Dragging { .. }) => self.finish(position, ctx),
            _ => {}
        }
    }

    fn cleanup(&mut self, scene: &mut dyn SceneGraph) {
        if let DragState::Dragging { preview, .. } = self.state {
            scene.remove_child(preview);
            scene.request_redraw();
        }
        self.state = DragState::Idle;
    }

    fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }
}
