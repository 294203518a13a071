//! Floorplan Core Library
//!
//! Host-independent drawing tools for floor plans: polygon rooms with an
//! editable vertex/edge cycle, doors routed along room boundaries, and
//! connection lines. The embedding canvas is reached through [`SceneGraph`].

pub mod config;
pub mod connection;
pub mod error;
pub mod geometry;
pub mod input;
pub mod plan;
pub mod polygon;
pub mod routing;
pub mod scene;
pub mod snap;
pub mod style;
pub mod tools;

pub use config::ToolConfig;
pub use connection::{Connection, ConnectionEnd};
pub use error::{ConfigError, EditError, EditResult};
pub use geometry::{SegmentProjection, point_to_segment};
pub use input::{ClickTracker, PointerEvent};
pub use plan::{FloorPlan, PlanObject};
pub use polygon::{Door, DoorId, Edge, EdgeAnchor, Polygon, PolygonKind, Vertex, VertexId};
pub use routing::find_path_between_points;
pub use scene::{MemoryScene, NodeKind, SceneGraph, SceneNode};
pub use snap::{EDGE_SNAP_THRESHOLD, EdgeSnap, ROUTE_SNAP_THRESHOLD, SnapMode, find_closest_edge_point};
pub use style::{SerializableColor, ShapeStyle, StrokeStyle};
pub use tools::{Tool, ToolKind, ToolManager};

/// Unique identifier for every object the host canvas knows about.
pub type ObjectId = uuid::Uuid;
