//! Layer model: one positioned visual element on a screen.
//!
//! A [`Layer`] carries the geometry every element shares (`x`, `y`, `width`,
//! `height`, in model units relative to its screen's top-left corner) and a
//! [`LayerKind`] payload holding the fields that only make sense for that
//! kind. Text styling lives on [`TextLayer`], so reading a font size off an
//! image layer is not expressible.
//!
//! Style edits arrive as a sparse [`StylePatch`]; only present fields are
//! applied, mirroring how geometry updates are merged elsewhere in the crate.

#[cfg(test)]
#[path = "layer_test.rs"]
mod layer_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_FONT_FAMILY, NEW_LAYER_ORIGIN, NEW_TEXT_COLOR, NEW_TEXT_CONTENT, NEW_TEXT_FONT_SIZE, NEW_TEXT_HEIGHT,
    NEW_TEXT_WIDTH,
};
use crate::viewport::Point;

/// Identifier of a layer. Unique within its screen, not across screens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub String);

impl LayerId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Axis-aligned rectangle in model units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// Horizontal text alignment within a text layer's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Typography of a text layer.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in model units. Always positive.
    pub font_size: f64,
    /// CSS color string.
    pub color: String,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub align: TextAlign,
    /// CSS font-family stack.
    pub font_family: String,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: NEW_TEXT_FONT_SIZE,
            color: NEW_TEXT_COLOR.to_string(),
            bold: false,
            italic: false,
            underline: false,
            align: TextAlign::Left,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}

/// Payload of a text layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLayer {
    pub content: String,
    pub style: TextStyle,
}

/// Kind-specific payload of a layer.
///
/// Serialized internally tagged by `"type"` so a persisted layer reads as
/// `{"id": .., "x": .., "type": "text", "content": .., "style": {..}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayerKind {
    Text(TextLayer),
    /// Free-standing image, e.g. an uploaded logo.
    Image { src: String },
    /// Device frame wrapping an app screenshot.
    Mockup { src: String },
    /// Solid fill behind everything else.
    Background { color: String },
}

/// One visual element of a screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    /// Left edge in model units; may be negative.
    pub x: f64,
    /// Top edge in model units; may be negative.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(flatten)]
    pub kind: LayerKind,
}

impl Layer {
    /// Build a layer occupying `frame`. Negative sizes are clamped to zero.
    #[must_use]
    pub fn new(id: LayerId, frame: Rect, kind: LayerKind) -> Self {
        Self {
            id,
            x: frame.x,
            y: frame.y,
            width: frame.width.max(0.0),
            height: frame.height.max(0.0),
            kind,
        }
    }

    /// A text layer with the toolbar defaults.
    #[must_use]
    pub fn default_text(id: LayerId) -> Self {
        Self::new(
            id,
            Rect::new(NEW_LAYER_ORIGIN, NEW_LAYER_ORIGIN, NEW_TEXT_WIDTH, NEW_TEXT_HEIGHT),
            LayerKind::Text(TextLayer { content: NEW_TEXT_CONTENT.to_string(), style: TextStyle::default() }),
        )
    }

    /// Lowercase kind name as it appears on the wire.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            LayerKind::Text(_) => "text",
            LayerKind::Image { .. } => "image",
            LayerKind::Mockup { .. } => "mockup",
            LayerKind::Background { .. } => "background",
        }
    }

    #[must_use]
    pub fn is_background(&self) -> bool {
        matches!(self.kind, LayerKind::Background { .. })
    }

    #[must_use]
    pub fn text(&self) -> Option<&TextLayer> {
        match &self.kind {
            LayerKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut TextLayer> {
        match &mut self.kind {
            LayerKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The editable content: text for text layers, the image reference for
    /// image and mockup layers. Backgrounds have none.
    pub fn content_mut(&mut self) -> Option<&mut String> {
        match &mut self.kind {
            LayerKind::Text(text) => Some(&mut text.content),
            LayerKind::Image { src } | LayerKind::Mockup { src } => Some(src),
            LayerKind::Background { .. } => None,
        }
    }

    /// Top-left corner in model units.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn frame(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Whether a screen-local model point falls inside the layer's box (edges inclusive).
    #[must_use]
    pub fn contains(&self, local: Point) -> bool {
        local.x >= self.x && local.x <= self.x + self.width && local.y >= self.y && local.y <= self.y + self.height
    }
}

/// Sparse update for a text layer's style. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StylePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

impl StylePatch {
    /// Merge present fields into `style`. A non-positive or non-finite font size is ignored.
    pub fn apply(&self, style: &mut TextStyle) {
        if let Some(size) = self.font_size {
            if size.is_finite() && size > 0.0 {
                style.font_size = size;
            }
        }
        if let Some(ref color) = self.color {
            style.color.clone_from(color);
        }
        if let Some(bold) = self.bold {
            style.bold = bold;
        }
        if let Some(italic) = self.italic {
            style.italic = italic;
        }
        if let Some(underline) = self.underline {
            style.underline = underline;
        }
        if let Some(align) = self.align {
            style.align = align;
        }
        if let Some(ref family) = self.font_family {
            style.font_family.clone_from(family);
        }
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
