//! Shared numeric and style constants for the canvas crate.

// ── Canvas ──────────────────────────────────────────────────────

/// Width of one exported screen in model units.
pub const CANVAS_WIDTH: f64 = 375.0;

/// Height of one exported screen in model units.
pub const CANVAS_HEIGHT: f64 = 812.0;

/// Horizontal gap between adjacent screens on the editing surface, in model units.
pub const SCREEN_GAP: f64 = 40.0;

/// Background color given to screens created by "add screen".
pub const DEFAULT_BACKGROUND: &str = "#FFFFFF";

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const ZOOM_MIN: f64 = 0.25;

/// Largest allowed zoom factor.
pub const ZOOM_MAX: f64 = 2.0;

/// Zoom change applied by one zoom-in / zoom-out action.
pub const ZOOM_STEP: f64 = 0.25;

// ── New layers ──────────────────────────────────────────────────

/// Initial x / y of layers added from the toolbar.
pub const NEW_LAYER_ORIGIN: f64 = 50.0;

pub const NEW_TEXT_WIDTH: f64 = 200.0;
pub const NEW_TEXT_HEIGHT: f64 = 50.0;
pub const NEW_TEXT_CONTENT: &str = "New Text";
pub const NEW_TEXT_FONT_SIZE: f64 = 24.0;
pub const NEW_TEXT_COLOR: &str = "#000000";

/// Side length of image layers added from the toolbar.
pub const NEW_IMAGE_SIZE: f64 = 200.0;

// ── Typography ──────────────────────────────────────────────────

/// Font stack used when neither the layer nor the content names one.
pub const DEFAULT_FONT_FAMILY: &str =
    "-apple-system, BlinkMacSystemFont, 'SF Pro Display', 'Segoe UI', Roboto, sans-serif";

/// Font size of generated headlines.
pub const HEADLINE_FONT_SIZE: f64 = 32.0;

/// Font size of generated subtitles.
pub const SUBTITLE_FONT_SIZE: f64 = 18.0;
