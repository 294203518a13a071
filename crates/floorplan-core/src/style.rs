//! Stroke and fill styles shared by rooms, doors and connections.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Stroke style for boundaries, doors and connection lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// Style properties for drawable artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Stroke dash style.
    pub stroke_style: StrokeStyle,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    pub opacity: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 2.0,
            stroke_style: StrokeStyle::Solid,
            fill_color: None,
            opacity: 1.0,
        }
    }
}

impl ShapeStyle {
    /// Default style for committed doors: a thick solid opening marker.
    pub fn door() -> Self {
        Self {
            stroke_color: SerializableColor::new(0xc0, 0x39, 0x2b, 255),
            stroke_width: 4.0,
            ..Self::default()
        }
    }

    /// Default style for connection lines.
    pub fn connection() -> Self {
        Self {
            stroke_color: SerializableColor::new(0x34, 0x49, 0x5e, 255),
            stroke_style: StrokeStyle::Dashed,
            ..Self::default()
        }
    }

    /// Style used for transient gesture previews.
    pub fn preview(&self) -> Self {
        Self {
            stroke_style: StrokeStyle::Dashed,
            opacity: self.opacity * 0.6,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_roundtrip_through_peniko() {
        let color = SerializableColor::new(12, 34, 56, 200);
        let peniko: Color = color.into();
        assert_eq!(SerializableColor::from(peniko), color);
    }

    #[test]
    fn test_preview_is_dashed_and_faded() {
        let style = ShapeStyle::door();
        let preview = style.preview();
        assert_eq!(preview.stroke_style, StrokeStyle::Dashed);
        assert!(preview.opacity < style.opacity);
        assert_eq!(preview.stroke_width, style.stroke_width);
    }
}
