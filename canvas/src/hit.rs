//! Hit-testing: resolve a viewport point to the screen and layer beneath it.
//!
//! Screens sit side by side in model space, screen `i` starting at
//! `i * (CANVAS_WIDTH + SCREEN_GAP)` on the x axis. Layer geometry is local to
//! its screen. Background layers never take the hit; a press on them counts
//! as a press on the screen itself.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, SCREEN_GAP};
use crate::doc::{CompositionStore, Screen};
use crate::input::Target;
use crate::viewport::{Point, Viewport};

/// Model-space origin of the screen at `index`.
#[must_use]
pub fn screen_origin(index: usize) -> Point {
    #[allow(clippy::cast_precision_loss)]
    let x = index as f64 * (CANVAS_WIDTH + SCREEN_GAP);
    Point::new(x, 0.0)
}

/// Whether a screen-local model point lies on the canvas.
#[must_use]
pub fn on_canvas(local: Point) -> bool {
    (0.0..=CANVAS_WIDTH).contains(&local.x) && (0.0..=CANVAS_HEIGHT).contains(&local.y)
}

/// Find what the pointer at `pointer` (viewport space) is over.
///
/// A screen whose canvas contains the point wins; within it the topmost
/// movable layer is hit. Outside every canvas, layers staged off-canvas can
/// still be grabbed.
///
/// A layer dragged past its own canvas onto a neighbouring screen's canvas
/// is shadowed there: that screen wins, so the layer is only reachable
/// where it overhangs the gap or empty space.
#[must_use]
pub fn hit_test(store: &CompositionStore, viewport: &Viewport, pointer: Point) -> Target {
    let model = viewport.viewport_to_model(pointer);

    for (index, screen) in store.screens().iter().enumerate() {
        let local = model.sub(screen_origin(index));
        if on_canvas(local) {
            return topmost_layer(screen, local).unwrap_or_else(|| Target::Screen(screen.id.clone()));
        }
    }

    store
        .screens()
        .iter()
        .enumerate()
        .find_map(|(index, screen)| topmost_layer(screen, model.sub(screen_origin(index))))
        .unwrap_or(Target::Empty)
}

fn topmost_layer(screen: &Screen, local: Point) -> Option<Target> {
    screen
        .layers
        .iter()
        .rev()
        .find(|layer| !layer.is_background() && layer.contains(local))
        .map(|layer| Target::Layer { screen: screen.id.clone(), layer: layer.id.clone(), position: layer.position() })
}
