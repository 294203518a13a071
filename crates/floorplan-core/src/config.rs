//! Tool configuration.

use crate::error::ConfigError;
use crate::snap::{EDGE_SNAP_THRESHOLD, GRID_SIZE, ROUTE_SNAP_THRESHOLD, SnapMode};
use crate::style::ShapeStyle;
use serde::{Deserialize, Serialize};

/// Thresholds and default styles used by the drawing tools.
///
/// Every field has a default, so partial JSON is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Max pointer distance for snapping onto a boundary edge.
    pub edge_snap_threshold: f64,
    /// Max distance when re-snapping route endpoints.
    pub route_snap_threshold: f64,
    /// Snapping for the shape and connection tools.
    pub snap_mode: SnapMode,
    pub grid_size: f64,
    /// Drags smaller than this in either direction create no shape.
    pub min_shape_size: f64,
    /// Pick radius for vertex handles.
    pub vertex_handle_tolerance: f64,
    /// Pick tolerance for selecting objects.
    pub hit_tolerance: f64,
    pub double_click_ms: u64,
    pub double_click_distance: f64,
    pub door_style: ShapeStyle,
    pub shape_style: ShapeStyle,
    pub connection_style: ShapeStyle,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            edge_snap_threshold: EDGE_SNAP_THRESHOLD,
            route_snap_threshold: ROUTE_SNAP_THRESHOLD,
            snap_mode: SnapMode::None,
            grid_size: GRID_SIZE,
            min_shape_size: 5.0,
            vertex_handle_tolerance: 8.0,
            hit_tolerance: 4.0,
            double_click_ms: 500,
            double_click_distance: 5.0,
            door_style: ShapeStyle::door(),
            shape_style: ShapeStyle::default(),
            connection_style: ShapeStyle::connection(),
        }
    }
}

impl ToolConfig {
    /// Parse a configuration from JSON, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject thresholds that would make the tools unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("edge_snap_threshold", self.edge_snap_threshold),
            ("route_snap_threshold", self.route_snap_threshold),
            ("grid_size", self.grid_size),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be a positive number, got {}", value),
                });
            }
        }
        let non_negative = [
            ("min_shape_size", self.min_shape_size),
            ("vertex_handle_tolerance", self.vertex_handle_tolerance),
            ("hit_tolerance", self.hit_tolerance),
            ("double_click_distance", self.double_click_distance),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be non-negative, got {}", value),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ToolConfig::default();
        assert_eq!(config.edge_snap_threshold, 10.0);
        assert_eq!(config.route_snap_threshold, 5.0);
        assert!(config.route_snap_threshold < config.edge_snap_threshold);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ToolConfig::from_json(r#"{ "edge_snap_threshold": 12.5, "snap_mode": "Grid" }"#).unwrap();
        assert_eq!(config.edge_snap_threshold, 12.5);
        assert_eq!(config.snap_mode, SnapMode::Grid);
        assert_eq!(config.route_snap_threshold, ROUTE_SNAP_THRESHOLD);
        assert_eq!(config.door_style, ShapeStyle::door());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = ToolConfig {
            grid_size: 25.0,
            ..ToolConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(ToolConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ToolConfig::from_json(r#"{ "grid_size": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "grid_size", .. }));
        assert!(matches!(
            ToolConfig::from_json("{ not json").unwrap_err(),
            ConfigError::Parse(_)
        ));
    }
}
