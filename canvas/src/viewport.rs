//! Transform engine: zoom/pan state and viewport ↔ model conversions.
//!
//! Viewport space is what pointer events report (CSS pixels, pan included).
//! Model space is where layer geometry lives and never depends on zoom or pan.
//!
//! Forward: `viewport = model * zoom + pan`.
//! Inverse: `model = (viewport - pan) / zoom`.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

/// A point in either viewport or model space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    #[must_use]
    pub fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    #[must_use]
    pub fn scale(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

/// Zoom factor and pan offset of the editing surface.
///
/// `pan` is in viewport pixels. `zoom` always lies in `[ZOOM_MIN, ZOOM_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pub pan: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { zoom: 1.0, pan: Point::default() }
    }
}

impl Viewport {
    /// Build a viewport, clamping `zoom` into range.
    #[must_use]
    pub fn new(zoom: f64, pan: Point) -> Self {
        Self { zoom: clamp_zoom(zoom), pan }
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom factor, clamping out-of-range input.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
    }

    /// Zoom in by one step. Returns the new zoom.
    pub fn zoom_in(&mut self) -> f64 {
        self.set_zoom(self.zoom + ZOOM_STEP);
        self.zoom
    }

    /// Zoom out by one step. Returns the new zoom.
    pub fn zoom_out(&mut self) -> f64 {
        self.set_zoom(self.zoom - ZOOM_STEP);
        self.zoom
    }

    /// Back to 100% with no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Convert a viewport point to model coordinates.
    #[must_use]
    pub fn viewport_to_model(&self, viewport: Point) -> Point {
        Point {
            x: (viewport.x - self.pan.x) / self.zoom,
            y: (viewport.y - self.pan.y) / self.zoom,
        }
    }

    /// Convert a model point to viewport coordinates.
    #[must_use]
    pub fn model_to_viewport(&self, model: Point) -> Point {
        Point {
            x: model.x * self.zoom + self.pan.x,
            y: model.y * self.zoom + self.pan.y,
        }
    }

    /// Convert a model-space length to viewport pixels.
    #[must_use]
    pub fn model_len_to_viewport(&self, len: f64) -> f64 {
        len * self.zoom
    }

    /// Viewport-space grab offset recorded when a drag starts.
    ///
    /// `position` is the layer's top-left in model units; it is scaled into
    /// viewport units so that no division happens until the drag moves.
    #[must_use]
    pub fn drag_grab(&self, pointer: Point, position: Point) -> Point {
        pointer.sub(position.scale(self.zoom))
    }

    /// New model-space position of a dragged layer.
    ///
    /// The fixed viewport offset is subtracted before dividing by zoom;
    /// reversing the order drifts whenever zoom is not 1.
    #[must_use]
    pub fn drag_position(&self, pointer: Point, grab: Point) -> Point {
        pointer.sub(grab).scale(1.0 / self.zoom)
    }

    /// Pan anchor recorded when a pan starts. Viewport space only.
    #[must_use]
    pub fn pan_start(&self, pointer: Point) -> Point {
        pointer.sub(self.pan)
    }

    /// Pan offset for the current pointer given the anchor from [`Viewport::pan_start`].
    #[must_use]
    pub fn pan_to(pointer: Point, pan_start: Point) -> Point {
        pointer.sub(pan_start)
    }
}

/// Clamp a zoom factor into `[ZOOM_MIN, ZOOM_MAX]`. NaN maps to 1.0.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() { 1.0 } else { zoom.clamp(ZOOM_MIN, ZOOM_MAX) }
}

/// Snapshot of the transient viewport state exposed to the host. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub zoom: f64,
    pub pan_offset: Point,
    pub space_pressed: bool,
    pub is_panning: bool,
}
