//! Tool system for the floor plan editor.
//!
//! Each tool owns its gesture state. The [`ToolManager`] feeds it pointer
//! events and tears it down (`cleanup`) on tool switches, so no preview or
//! half-finished gesture outlives the tool that started it.

mod connection;
mod door;
mod select;
mod shape;
mod vertex;

pub use connection::ConnectionTool;
pub use door::{DoorState, DoorTool};
pub use select::SelectTool;
pub use shape::{ShapeKind, ShapeTool};
pub use vertex::VertexTool;

use crate::config::ToolConfig;
use crate::input::{ClickTracker, PointerEvent};
use crate::plan::FloorPlan;
use crate::scene::SceneGraph;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Door,
    Connection,
    Rectangle,
    Triangle,
    Vertex,
}

/// Everything a tool may touch while handling an event.
pub struct ToolContext<'a> {
    pub plan: &'a mut FloorPlan,
    pub scene: &'a mut dyn SceneGraph,
    pub config: &'a ToolConfig,
}

/// A drawing or editing tool.
pub trait Tool: Debug {
    /// Which tool this is.
    fn kind(&self) -> ToolKind;

    /// Handle one pointer event.
    fn on_pointer(&mut self, event: &PointerEvent, ctx: &mut ToolContext<'_>);

    /// Drop any in-progress gesture and remove its preview from the scene.
    fn cleanup(&mut self, scene: &mut dyn SceneGraph);

    /// Check if a gesture is in progress.
    fn is_active(&self) -> bool;

    /// Delete whatever the tool has selected. Returns true if something was deleted.
    fn delete_selection(&mut self, _ctx: &mut ToolContext<'_>) -> bool {
        false
    }
}

/// Create a fresh tool of the given kind.
pub fn create_tool(kind: ToolKind) -> Box<dyn Tool> {
    match kind {
        ToolKind::Select => Box::new(SelectTool::new()),
        ToolKind::Door => Box::new(DoorTool::new()),
        ToolKind::Connection => Box::new(ConnectionTool::new()),
        ToolKind::Rectangle => Box::new(ShapeTool::new(ShapeKind::Rectangle)),
        ToolKind::Triangle => Box::new(ShapeTool::new(ShapeKind::Triangle)),
        ToolKind::Vertex => Box::new(VertexTool::new()),
    }
}

/// Manages the current tool and routes pointer events to it.
#[derive(Debug)]
pub struct ToolManager {
    tool: Box<dyn Tool>,
    config: ToolConfig,
    clicks: ClickTracker,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new(ToolConfig::default())
    }
}

impl ToolManager {
    /// Create a tool manager with the select tool active.
    pub fn new(config: ToolConfig) -> Self {
        let clicks = ClickTracker::new(
            Duration::from_millis(config.double_click_ms),
            config.double_click_distance,
        );
        Self {
            tool: create_tool(ToolKind::default()),
            config,
            clicks,
        }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Replace the configuration. Cancels the current gesture.
    pub fn set_config(&mut self, config: ToolConfig, scene: &mut dyn SceneGraph) {
        self.tool.cleanup(scene);
        self.clicks = ClickTracker::new(
            Duration::from_millis(config.double_click_ms),
            config.double_click_distance,
        );
        self.config = config;
    }

    /// Currently active tool.
    pub fn current_tool(&self) -> ToolKind {
        self.tool.kind()
    }

    /// Switch tools. The previous tool is cleaned up first.
    pub fn set_tool(&mut self, kind: ToolKind, scene: &mut dyn SceneGraph) {
        self.tool.cleanup(scene);
        self.clicks.reset();
        self.tool = create_tool(kind);
        log::debug!("Tool switched to {:?}", kind);
    }

    /// Feed a pointer event to the current tool.
    ///
    /// Secondary-button presses cancel the current gesture. A primary press
    /// that completes a double click is followed by a synthesized
    /// [`PointerEvent::DoubleClick`].
    pub fn handle_pointer(&mut self, event: PointerEvent, plan: &mut FloorPlan, scene: &mut dyn SceneGraph) {
        if event.is_secondary() {
            if matches!(event, PointerEvent::Down { .. }) {
                self.tool.cleanup(scene);
            }
            return;
        }

        let double_click = match event {
            PointerEvent::Down { position, .. } => self.clicks.register_click(position),
            _ => false,
        };

        let mut ctx = ToolContext {
            plan,
            scene,
            config: &self.config,
        };
        self.tool.on_pointer(&event, &mut ctx);
        if double_click {
            self.tool.on_pointer(&PointerEvent::DoubleClick { position: event.position() }, &mut ctx);
        }
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.tool.is_active()
    }

    /// Delete the current selection (select tool only).
    pub fn delete_selection(&mut self, plan: &mut FloorPlan, scene: &mut dyn SceneGraph) -> bool {
        let mut ctx = ToolContext {
            plan,
            scene,
            config: &self.config,
        };
        self.tool.delete_selection(&mut ctx)
    }

    /// Tear down the current gesture and its previews. Hosts call this when
    /// the editor loses focus or is closed.
    pub fn cleanup(&mut self, scene: &mut dyn SceneGraph) {
        self.tool.cleanup(scene);
        self.clicks.reset();
    }
}
