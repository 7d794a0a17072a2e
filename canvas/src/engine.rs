use std::fmt;

use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

use crate::doc::{CompositionStore, ScreenId, ScreenSnapshot};
use crate::hit::hit_test;
use crate::input::{Command, InputEvent, InteractionState, Key, transition};
use crate::layer::{LayerId, StylePatch};
use crate::viewport::{Point, Viewport, ViewportState};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Selection moved to `layer` on `screen` (or was cleared).
    SelectionChanged { screen: ScreenId, layer: Option<LayerId> },
    LayerMoved { layer: LayerId, x: f64, y: f64 },
    LayerDeleted { screen: ScreenId, layer: LayerId },
    ViewChanged { zoom: f64, pan: Point },
    SetCursor(&'static str),
    RenderNeeded,
    /// The user dismissed the editor.
    Closed,
}

/// Host-side embedding props: a display-only prompt and a close callback.
#[derive(Default)]
pub struct EditorHost {
    /// Shown by the host next to the canvas. Opaque to the engine.
    pub user_prompt: Option<String>,
    on_close: Option<Box<dyn FnMut()>>,
}

impl EditorHost {
    #[must_use]
    pub fn new(user_prompt: Option<String>) -> Self {
        Self { user_prompt, on_close: None }
    }

    #[must_use]
    pub fn with_on_close(mut self, on_close: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    fn close(&mut self) {
        if let Some(on_close) = self.on_close.as_mut() {
            on_close();
        }
    }
}

impl fmt::Debug for EditorHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorHost")
            .field("user_prompt", &self.user_prompt)
            .field("on_close", &self.on_close.is_some())
            .finish()
    }
}

/// Core editor state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Editor` so it can be tested without WASM/browser dependencies.
#[derive(Debug, Default)]
pub struct EditorCore {
    pub store: CompositionStore,
    pub viewport: Viewport,
    pub interaction: InteractionState,
    pub host: EditorHost,
}

impl EditorCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor over an existing composition, e.g. one seeded from a template.
    #[must_use]
    pub fn with_store(store: CompositionStore, host: EditorHost) -> Self {
        Self { store, host, ..Self::default() }
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, pointer: Point) -> Vec<Action> {
        let target = hit_test(&self.store, &self.viewport, pointer);
        self.dispatch(&InputEvent::PointerDown { pointer, target })
    }

    pub fn on_pointer_move(&mut self, pointer: Point) -> Vec<Action> {
        self.dispatch(&InputEvent::PointerMove { pointer })
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.dispatch(&InputEvent::PointerUp)
    }

    pub fn on_key_down(&mut self, key: Key) -> Vec<Action> {
        self.dispatch(&InputEvent::KeyDown(key))
    }

    pub fn on_key_up(&mut self, key: Key) -> Vec<Action> {
        self.dispatch(&InputEvent::KeyUp(key))
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.dispatch(&InputEvent::ZoomIn)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.dispatch(&InputEvent::ZoomOut)
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.dispatch(&InputEvent::ResetView)
    }

    /// Run one event through the state machine and apply its commands.
    pub fn dispatch(&mut self, event: &InputEvent) -> Vec<Action> {
        let cursor_before = self.interaction.cursor();
        let (next, commands) = transition(&self.interaction, event, &self.viewport);
        self.interaction = next;

        let mut actions: Vec<Action> = commands.into_iter().filter_map(|c| self.apply(c)).collect();

        let cursor_after = self.interaction.cursor();
        if cursor_after != cursor_before {
            actions.push(Action::SetCursor(cursor_after));
        }
        if actions.iter().any(|a| !matches!(a, Action::SetCursor(_))) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    fn apply(&mut self, command: Command) -> Option<Action> {
        match command {
            Command::SelectLayer { screen, layer } => {
                self.store.select_layer(&screen, &layer).then(|| self.selection_action())
            }
            Command::ActivateScreen(screen) => {
                let before = (self.store.active_screen_id().clone(), self.store.selected_layer_id().cloned());
                self.store.set_active_screen(&screen);
                let changed = self.store.active_screen_id() != &before.0
                    || self.store.selected_layer_id() != before.1.as_ref();
                changed.then(|| self.selection_action())
            }
            Command::ClearSelection => {
                let had_selection = self.store.selected_layer_id().is_some();
                self.store.clear_selection();
                had_selection.then(|| self.selection_action())
            }
            Command::MoveLayer { layer, x, y } => {
                self.store.move_layer(&layer, x, y).then_some(Action::LayerMoved { layer, x, y })
            }
            Command::DeleteSelection => {
                let layer = self.store.selected_layer_id()?.clone();
                let screen = self.store.active_screen_id().clone();
                self.store
                    .delete_layer(&screen, &layer)
                    .then_some(Action::LayerDeleted { screen, layer })
            }
            Command::SetPan(pan) => {
                self.viewport.pan = pan;
                Some(self.view_action())
            }
            Command::SetZoom(zoom) => {
                self.viewport.set_zoom(zoom);
                Some(self.view_action())
            }
            Command::ResetView => {
                self.viewport.reset();
                Some(self.view_action())
            }
        }
    }

    fn selection_action(&self) -> Action {
        Action::SelectionChanged {
            screen: self.store.active_screen_id().clone(),
            layer: self.store.selected_layer_id().cloned(),
        }
    }

    fn view_action(&self) -> Action {
        Action::ViewChanged { zoom: self.viewport.zoom(), pan: self.viewport.pan }
    }

    // --- Toolbar / inspector ---

    /// Add a text layer to the active screen.
    pub fn add_text_layer(&mut self) -> Option<LayerId> {
        let screen = self.store.active_screen_id().clone();
        self.store.add_text_layer(&screen)
    }

    /// Edit the selected layer's text or image reference. No-op without a selection.
    pub fn set_selected_content(&mut self, content: &str) -> bool {
        let Some(layer) = self.store.selected_layer_id().cloned() else {
            return false;
        };
        self.store.update_layer_content(&layer, content)
    }

    /// Restyle the selected text layer. No-op without a text selection.
    pub fn style_selected(&mut self, patch: &StylePatch) -> bool {
        let Some(layer) = self.store.selected_layer_id().cloned() else {
            return false;
        };
        self.store.update_layer_style(&layer, patch)
    }

    /// Dismiss the editor: notify the host callback.
    pub fn close(&mut self) -> Action {
        self.interaction = InteractionState::default();
        self.host.close();
        Action::Closed
    }

    // --- Queries ---

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            zoom: self.viewport.zoom(),
            pan_offset: self.viewport.pan,
            space_pressed: self.interaction.space_pressed,
            is_panning: self.interaction.is_panning(),
        }
    }

    /// Export snapshot of every screen, independent of gesture state.
    #[must_use]
    pub fn export(&self) -> Vec<ScreenSnapshot> {
        self.store.export()
    }
}

/// The full editor. Wraps `EditorCore` and owns the browser canvas element.
pub struct Editor {
    canvas: HtmlCanvasElement,
    pub core: EditorCore,
}

impl Editor {
    /// Create an editor bound to `canvas`.
    ///
    /// `on_close` is invoked with no arguments when the user dismisses the editor.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, user_prompt: Option<String>, on_close: Option<js_sys::Function>) -> Self {
        let mut host = EditorHost::new(user_prompt);
        if let Some(callback) = on_close {
            host = host.with_on_close(move || {
                if let Err(err) = callback.call0(&JsValue::NULL) {
                    tracing::warn!(?err, "on_close callback threw");
                }
            });
        }
        Self { canvas, core: EditorCore::with_store(CompositionStore::new(), host) }
    }

    /// Backing-store size of the canvas element in device pixels.
    #[must_use]
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    // --- Delegated input ---

    pub fn on_pointer_down(&mut self, pointer: Point) -> Vec<Action> {
        self.core.on_pointer_down(pointer)
    }

    pub fn on_pointer_move(&mut self, pointer: Point) -> Vec<Action> {
        self.core.on_pointer_move(pointer)
    }

    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        self.core.on_pointer_up()
    }

    pub fn on_key_down(&mut self, key: &str) -> Vec<Action> {
        self.core.on_key_down(Key::from_name(key))
    }

    pub fn on_key_up(&mut self, key: &str) -> Vec<Action> {
        self.core.on_key_up(Key::from_name(key))
    }

    pub fn close(&mut self) -> Action {
        self.core.close()
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        self.core.viewport_state()
    }

    #[must_use]
    pub fn export(&self) -> Vec<ScreenSnapshot> {
        self.core.export()
    }
}
