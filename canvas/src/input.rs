//! Input model and the gesture state machine.
//!
//! The state machine is an explicit value ([`InteractionState`]) and a pure
//! transition function ([`transition`]) that maps `(state, event, viewport)`
//! to the next state plus the [`Command`]s the editor must apply. It never
//! touches the composition itself, so every rule here is testable without a
//! store or a browser.
//!
//! Rules:
//! - Holding space makes every pointer-down start a pan; layers are not
//!   selected or dragged while it is held.
//! - Without space, pointer-down on a layer selects it (activating its
//!   screen) and starts a drag.
//! - Pointer-up always returns to idle. Releasing space ends a pan even if
//!   the pointer is still down.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::ZOOM_STEP;
use crate::doc::ScreenId;
use crate::layer::LayerId;
use crate::viewport::{Point, Viewport, clamp_zoom};

/// A keyboard key, reduced to the ones the editor reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Space,
    Delete,
    Backspace,
    Escape,
    Other(String),
}

impl Key {
    /// Map a browser `KeyboardEvent.key` / `code` name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            " " | "Space" | "Spacebar" => Self::Space,
            "Delete" => Self::Delete,
            "Backspace" => Self::Backspace,
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_string()),
        }
    }
}

/// What lies under the pointer at pointer-down, as resolved by hit-testing.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    /// A movable layer. `position` is its model-space top-left at the time of the press.
    Layer { screen: ScreenId, layer: LayerId, position: Point },
    /// Empty area (or background fill) of a screen.
    Screen(ScreenId),
    /// Outside every screen.
    Empty,
}

/// Pointer, keyboard, and toolbar events in viewport coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { pointer: Point, target: Target },
    PointerMove { pointer: Point },
    PointerUp,
    KeyDown(Key),
    KeyUp(Key),
    ZoomIn,
    ZoomOut,
    ResetView,
}

/// The gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Moving a layer.
    Dragging {
        screen: ScreenId,
        layer: LayerId,
        /// Viewport-space offset from the scaled layer origin to the pointer.
        grab: Point,
    },
    /// Moving the view.
    Panning {
        /// Viewport-space anchor: pointer minus pan at the start of the pan.
        pan_start: Point,
    },
}

/// Full state of the interaction layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    pub gesture: Gesture,
    /// Modal flag: space is held.
    pub space_pressed: bool,
}

impl InteractionState {
    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self.gesture, Gesture::Panning { .. })
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    /// CSS cursor matching the current state.
    #[must_use]
    pub fn cursor(&self) -> &'static str {
        match self.gesture {
            Gesture::Panning { .. } => "grabbing",
            Gesture::Dragging { .. } => "move",
            Gesture::Idle if self.space_pressed => "grab",
            Gesture::Idle => "default",
        }
    }
}

/// Mutations requested by a transition, applied in order by the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Select a layer and make its screen active.
    SelectLayer { screen: ScreenId, layer: LayerId },
    ActivateScreen(ScreenId),
    ClearSelection,
    /// Absolute model position for a layer on the active screen.
    MoveLayer { layer: LayerId, x: f64, y: f64 },
    /// Delete whatever layer is selected, if any.
    DeleteSelection,
    SetPan(Point),
    SetZoom(f64),
    ResetView,
}

/// Compute the next interaction state and the commands it implies.
#[must_use]
pub fn transition(state: &InteractionState, event: &InputEvent, viewport: &Viewport) -> (InteractionState, Vec<Command>) {
    let mut next = state.clone();
    let mut commands = Vec::new();

    match event {
        InputEvent::PointerDown { pointer, target } => {
            if state.space_pressed {
                next.gesture = Gesture::Panning { pan_start: viewport.pan_start(*pointer) };
            } else {
                match target {
                    Target::Layer { screen, layer, position } => {
                        commands.push(Command::SelectLayer { screen: screen.clone(), layer: layer.clone() });
                        next.gesture = Gesture::Dragging {
                            screen: screen.clone(),
                            layer: layer.clone(),
                            grab: viewport.drag_grab(*pointer, *position),
                        };
                    }
                    Target::Screen(screen) => {
                        commands.push(Command::ActivateScreen(screen.clone()));
                        commands.push(Command::ClearSelection);
                    }
                    Target::Empty => commands.push(Command::ClearSelection),
                }
            }
        }
        InputEvent::PointerMove { pointer } => match &state.gesture {
            Gesture::Dragging { layer, grab, .. } => {
                let position = viewport.drag_position(*pointer, *grab);
                commands.push(Command::MoveLayer { layer: layer.clone(), x: position.x, y: position.y });
            }
            Gesture::Panning { pan_start } => {
                commands.push(Command::SetPan(Viewport::pan_to(*pointer, *pan_start)));
            }
            Gesture::Idle => {}
        },
        InputEvent::PointerUp => next.gesture = Gesture::Idle,
        InputEvent::KeyDown(key) => match key {
            Key::Space => next.space_pressed = true,
            Key::Delete | Key::Backspace if state.gesture == Gesture::Idle => {
                commands.push(Command::DeleteSelection);
            }
            Key::Escape if state.gesture == Gesture::Idle => commands.push(Command::ClearSelection),
            _ => {}
        },
        InputEvent::KeyUp(key) => {
            if *key == Key::Space {
                next.space_pressed = false;
                if state.is_panning() {
                    next.gesture = Gesture::Idle;
                }
            }
        }
        // Drag grabs and pan anchors are recorded against the current view, so
        // the view holds still until the gesture ends.
        InputEvent::ZoomIn | InputEvent::ZoomOut | InputEvent::ResetView if state.gesture != Gesture::Idle => {}
        InputEvent::ZoomIn => commands.push(Command::SetZoom(clamp_zoom(viewport.zoom() + ZOOM_STEP))),
        InputEvent::ZoomOut => commands.push(Command::SetZoom(clamp_zoom(viewport.zoom() - ZOOM_STEP))),
        InputEvent::ResetView => commands.push(Command::ResetView),
    }

    (next, commands)
}
