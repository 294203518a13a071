//! Selection and deletion of rooms, doors and connections.

use super::{Tool, ToolContext, ToolKind};
use crate::input::PointerEvent;
use crate::plan::PlanObject;
use crate::scene::SceneGraph;

/// Click to select, then delete the selection.
#[derive(Debug, Default)]
pub struct SelectTool {
    selection: Option<PlanObject>,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<PlanObject> {
        self.selection
    }
}

impl Tool for SelectTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Select
    }

    fn on_pointer(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>) {
        if let PointerEvent::Down { position, .. } = *event {
            self.selection = ctx.plan.object_at(position, ctx.config.hit_tolerance);
            log::debug!("Selection: {:?}", self.selection);
        }
    }

    fn cleanup(&mut self, _scene: &mut dyn SceneGraph) {
        self.selection = None;
    }

    fn is_active(&self) -> bool {
        false
    }

    fn delete_selection(&mut self, ctx: &mut ToolContext<'_>) -> bool {
        let deleted = match self.selection.take() {
            Some(PlanObject::Door { polygon, door }) => ctx.plan.remove_door(polygon, door, ctx.scene).is_some(),
            Some(PlanObject::Polygon(id)) => ctx.plan.remove_polygon(id, ctx.scene).is_some(),
            Some(PlanObject::Connection(id)) => ctx.plan.remove_connection(id, ctx.scene).is_some(),
            None => false,
        };
        if deleted {
            log::info!("Selection deleted");
        }
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolConfig;
    use crate::connection::{Connection, ConnectionEnd};
    use crate::polygon::Door;
    use crate::tools::test_support::square_room;
    use kurbo::Point;

    #[test]
    fn test_select_and_delete_door() {
        let (mut plan, mut scene, room) = square_room();
        let door = plan
            .add_door(room, Door::new(vec![Point::new(-10.0, -50.0), Point::new(10.0, -50.0)]), &mut scene)
            .unwrap();
        let config = ToolConfig::default();
        let mut ctx = ToolContext { plan: &mut plan, scene: &mut scene, config: &config };
        let mut tool = SelectTool::new();

        tool.on_pointer(&PointerEvent::down(Point::new(50.0, 1.0)), &mut ctx);
        assert_eq!(tool.selection(), Some(PlanObject::Door { polygon: room, door }));
        assert!(tool.delete_selection(&mut ctx));
        assert!(tool.selection().is_none());
        assert!(!tool.delete_selection(&mut ctx));

        assert!(plan.polygon(room).unwrap().doors().is_empty());
        assert!(!scene.contains(door));
        assert!(scene.contains(room));
    }

    #[test]
    fn test_select_and_delete_connection() {
        let (mut plan, mut scene, room) = square_room();
        let conn = plan
            .add_connection(
                Connection::new(ConnectionEnd::Polygon(room), ConnectionEnd::Point(Point::new(400.0, 50.0))),
                &mut scene,
            )
            .unwrap();
        let config = ToolConfig::default();
        let mut ctx = ToolContext { plan: &mut plan, scene: &mut scene, config: &config };
        let mut tool = SelectTool::new();

        tool.on_pointer(&PointerEvent::down(Point::new(250.0, 51.0)), &mut ctx);
        assert_eq!(tool.selection(), Some(PlanObject::Connection(conn)));
        assert!(tool.delete_selection(&mut ctx));
        assert_eq!(plan.connection_count(), 0);
        assert_eq!(plan.polygon_count(), 1);
    }

    #[test]
    fn test_click_on_empty_canvas_clears_selection() {
        let (mut plan, mut scene, room) = square_room();
        let config = ToolConfig::default();
        let mut ctx = ToolContext { plan: &mut plan, scene: &mut scene, config: &config };
        let mut tool = SelectTool::new();

        tool.on_pointer(&PointerEvent::down(Point::new(50.0, 50.0)), &mut ctx);
        assert_eq!(tool.selection(), Some(PlanObject::Polygon(room)));
        tool.on_pointer(&PointerEvent::down(Point::new(500.0, 500.0)), &mut ctx);
        assert!(tool.selection().is_none());
        assert!(!tool.delete_selection(&mut ctx));
    }
}
