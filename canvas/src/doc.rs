//! Document model: screens, the composition, and the store that mutates them.
//!
//! A [`Composition`] is the plain persisted value: ordered screens, the active
//! screen, and the selected layer. [`CompositionStore`] wraps it together with
//! the id counter and is the only place the document is mutated. Every
//! mutation is synchronous and total: an operation that names a screen or
//! layer that no longer exists does nothing (and says so at debug level)
//! instead of failing, because stale ids arrive from delayed UI events.
//!
//! Layer lookups that take only a [`LayerId`] resolve against the active
//! screen, since layer ids are unique per screen only.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_BACKGROUND, NEW_IMAGE_SIZE, NEW_LAYER_ORIGIN};
use crate::layer::{Layer, LayerId, LayerKind, Rect, StylePatch};
use crate::template::{ScreenContent, Template, generate_screen};

/// Identifier of a screen, unique within a composition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScreenId(pub String);

impl ScreenId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScreenId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One exported canvas: a background color and an ordered stack of layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub id: ScreenId,
    /// Display label.
    pub name: String,
    /// CSS color painted beneath all layers.
    pub background_color: String,
    /// Paint order: first is bottom.
    pub layers: Vec<Layer>,
}

impl Screen {
    /// An empty screen with the default white background.
    #[must_use]
    pub fn new(id: ScreenId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), background_color: DEFAULT_BACKGROUND.to_string(), layers: Vec::new() }
    }

    #[must_use]
    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| &l.id == id)
    }

    pub fn layer_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| &l.id == id)
    }

    #[must_use]
    pub fn contains_layer(&self, id: &LayerId) -> bool {
        self.layer(id).is_some()
    }
}

/// The persisted form of a composition.
///
/// Plain data only, so a storage collaborator can serialize it and later hand
/// it back to [`CompositionStore::from_composition`]. Viewport and gesture
/// state are deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    /// Document identity for the storage collaborator.
    pub id: Uuid,
    /// Non-empty, in display/export order.
    pub screens: Vec<Screen>,
    pub active_screen_id: ScreenId,
    /// Always a layer of the active screen when set.
    pub selected_layer_id: Option<LayerId>,
}

/// Export view of one screen: everything a renderer needs, in paint order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenSnapshot {
    pub id: ScreenId,
    pub name: String,
    pub background_color: String,
    pub width: f64,
    pub height: f64,
    pub layers: Vec<Layer>,
}

#[derive(Debug, thiserror::Error)]
pub enum DocError {
    #[error("invalid composition JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("composition has no screens")]
    Empty,
}

/// Single source of truth for screens, layers, and selection.
#[derive(Debug, Clone)]
pub struct CompositionStore {
    doc: Composition,
    next_id: u64,
}

impl Default for CompositionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionStore {
    /// A composition holding one empty screen, which is active.
    #[must_use]
    pub fn new() -> Self {
        let mut next_id = 0;
        let id = fresh_screen_id(&mut next_id, &[]);
        let screen = Screen::new(id.clone(), "Screen 1");
        Self {
            doc: Composition { id: Uuid::new_v4(), screens: vec![screen], active_screen_id: id, selected_layer_id: None },
            next_id,
        }
    }

    /// Rebuild a store from a persisted composition.
    ///
    /// A dangling active screen falls back to the first screen and a dangling
    /// selection is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Empty`] if the composition has no screens.
    pub fn from_composition(mut doc: Composition) -> Result<Self, DocError> {
        let Some(first) = doc.screens.first() else {
            return Err(DocError::Empty);
        };
        if !doc.screens.iter().any(|s| s.id == doc.active_screen_id) {
            tracing::warn!(active = %doc.active_screen_id, "restored composition names a missing active screen");
            doc.active_screen_id = first.id.clone();
            doc.selected_layer_id = None;
        }
        if let Some(selected) = doc.selected_layer_id.clone() {
            let present = doc
                .screens
                .iter()
                .find(|s| s.id == doc.active_screen_id)
                .is_some_and(|s| s.contains_layer(&selected));
            if !present {
                tracing::warn!(layer = %selected, "restored composition selects a missing layer");
                doc.selected_layer_id = None;
            }
        }
        Ok(Self { doc, next_id: 0 })
    }

    /// Parse a composition from JSON and rebuild a store from it.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Json`] for malformed input or missing fields and
    /// [`DocError::Empty`] for a composition without screens.
    pub fn from_json(json: &str) -> Result<Self, DocError> {
        let doc: Composition = serde_json::from_str(json)?;
        Self::from_composition(doc)
    }

    /// Serialize the persisted form to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, DocError> {
        Ok(serde_json::to_string(&self.doc)?)
    }

    #[must_use]
    pub fn composition(&self) -> &Composition {
        &self.doc
    }

    #[must_use]
    pub fn into_composition(self) -> Composition {
        self.doc
    }

    // --- Screens ---

    /// Replace every screen with one generated screen per content item.
    ///
    /// The first generated screen becomes active and selection is cleared.
    /// Empty `contents` leaves the composition untouched.
    pub fn seed(&mut self, template: &Template, contents: &[ScreenContent]) {
        if contents.is_empty() {
            tracing::debug!("seed called without content; composition unchanged");
            return;
        }
        let screens: Vec<Screen> = contents
            .iter()
            .enumerate()
            .map(|(index, content)| generate_screen(template, content, index))
            .collect();
        self.doc.active_screen_id = screens[0].id.clone();
        self.doc.screens = screens;
        self.doc.selected_layer_id = None;
        tracing::debug!(template = %template.name, screens = self.doc.screens.len(), "seeded composition");
    }

    /// Append an empty screen and make it active.
    pub fn add_screen(&mut self) -> ScreenId {
        let id = fresh_screen_id(&mut self.next_id, &self.doc.screens);
        let name = format!("Screen {}", self.doc.screens.len() + 1);
        self.doc.screens.push(Screen::new(id.clone(), name));
        self.doc.active_screen_id = id.clone();
        self.doc.selected_layer_id = None;
        id
    }

    /// Remove a screen. The last remaining screen cannot be removed.
    ///
    /// If the active screen goes, the screen that takes its place (or the new
    /// last screen) becomes active and selection is cleared.
    pub fn remove_screen(&mut self, id: &ScreenId) -> bool {
        let Some(index) = self.screen_index(id) else {
            tracing::debug!(screen = %id, "remove_screen: unknown screen ignored");
            return false;
        };
        if self.doc.screens.len() == 1 {
            tracing::debug!(screen = %id, "remove_screen: refusing to remove the only screen");
            return false;
        }
        self.doc.screens.remove(index);
        if &self.doc.active_screen_id == id {
            let next = index.min(self.doc.screens.len() - 1);
            self.doc.active_screen_id = self.doc.screens[next].id.clone();
            self.doc.selected_layer_id = None;
        }
        true
    }

    pub fn rename_screen(&mut self, id: &ScreenId, name: impl Into<String>) -> bool {
        let Some(screen) = self.screen_mut(id) else {
            tracing::debug!(screen = %id, "rename_screen: unknown screen ignored");
            return false;
        };
        screen.name = name.into();
        true
    }

    /// Switch the active screen. Unknown ids are ignored; switching clears selection.
    pub fn set_active_screen(&mut self, id: &ScreenId) -> bool {
        if self.screen(id).is_none() {
            tracing::debug!(screen = %id, "set_active_screen: unknown screen ignored");
            return false;
        }
        if &self.doc.active_screen_id != id {
            self.doc.active_screen_id = id.clone();
            self.doc.selected_layer_id = None;
        }
        true
    }

    pub fn set_background_color(&mut self, id: &ScreenId, color: impl Into<String>) -> bool {
        let Some(screen) = self.screen_mut(id) else {
            tracing::debug!(screen = %id, "set_background_color: unknown screen ignored");
            return false;
        };
        screen.background_color = color.into();
        true
    }

    // --- Layers ---

    /// Append a default text layer to `screen_id` and select it.
    ///
    /// Returns `None` if the screen does not exist.
    pub fn add_text_layer(&mut self, screen_id: &ScreenId) -> Option<LayerId> {
        self.push_layer(screen_id, Layer::default_text)
    }

    /// Append an image layer showing `src` to `screen_id` and select it.
    pub fn add_image_layer(&mut self, screen_id: &ScreenId, src: impl Into<String>) -> Option<LayerId> {
        let src = src.into();
        self.push_layer(screen_id, |id| {
            Layer::new(
                id,
                Rect::new(NEW_LAYER_ORIGIN, NEW_LAYER_ORIGIN, NEW_IMAGE_SIZE, NEW_IMAGE_SIZE),
                LayerKind::Image { src },
            )
        })
    }

    fn push_layer(&mut self, screen_id: &ScreenId, build: impl FnOnce(LayerId) -> Layer) -> Option<LayerId> {
        let Some(index) = self.screen_index(screen_id) else {
            tracing::debug!(screen = %screen_id, "add layer: unknown screen ignored");
            return None;
        };
        let screen = &mut self.doc.screens[index];
        let id = fresh_layer_id(&mut self.next_id, screen);
        screen.layers.push(build(id.clone()));
        self.doc.active_screen_id = screen_id.clone();
        self.doc.selected_layer_id = Some(id.clone());
        Some(id)
    }

    /// Remove a layer. Clears selection if it pointed at that layer.
    pub fn delete_layer(&mut self, screen_id: &ScreenId, layer_id: &LayerId) -> bool {
        let Some(screen) = self.screen_mut(screen_id) else {
            tracing::debug!(screen = %screen_id, "delete_layer: unknown screen ignored");
            return false;
        };
        let before = screen.layers.len();
        screen.layers.retain(|l| &l.id != layer_id);
        if screen.layers.len() == before {
            tracing::debug!(screen = %screen_id, layer = %layer_id, "delete_layer: unknown layer ignored");
            return false;
        }
        if &self.doc.active_screen_id == screen_id && self.doc.selected_layer_id.as_ref() == Some(layer_id) {
            self.doc.selected_layer_id = None;
        }
        true
    }

    /// Replace a layer's content on the active screen: the text of a text
    /// layer, or the image reference of an image or mockup layer.
    pub fn update_layer_content(&mut self, layer_id: &LayerId, content: impl Into<String>) -> bool {
        let Some(slot) = self.active_layer_mut(layer_id).and_then(Layer::content_mut) else {
            tracing::debug!(layer = %layer_id, "update_layer_content: no such layer with content");
            return false;
        };
        *slot = content.into();
        true
    }

    /// Merge `patch` into a text layer's style on the active screen.
    pub fn update_layer_style(&mut self, layer_id: &LayerId, patch: &StylePatch) -> bool {
        let Some(text) = self.active_layer_mut(layer_id).and_then(Layer::text_mut) else {
            tracing::debug!(layer = %layer_id, "update_layer_style: no such text layer");
            return false;
        };
        patch.apply(&mut text.style);
        true
    }

    /// Move a layer on the active screen to an absolute model position.
    ///
    /// No clamping: layers may sit partly or wholly off the canvas.
    pub fn move_layer(&mut self, layer_id: &LayerId, x: f64, y: f64) -> bool {
        let Some(layer) = self.active_layer_mut(layer_id) else {
            tracing::debug!(layer = %layer_id, "move_layer: unknown layer ignored");
            return false;
        };
        layer.x = x;
        layer.y = y;
        true
    }

    /// Resize a layer on the active screen. Negative sizes clamp to zero.
    pub fn resize_layer(&mut self, layer_id: &LayerId, width: f64, height: f64) -> bool {
        let Some(layer) = self.active_layer_mut(layer_id) else {
            tracing::debug!(layer = %layer_id, "resize_layer: unknown layer ignored");
            return false;
        };
        layer.width = width.max(0.0);
        layer.height = height.max(0.0);
        true
    }

    // --- Selection ---

    /// Select a layer, activating its screen first.
    pub fn select_layer(&mut self, screen_id: &ScreenId, layer_id: &LayerId) -> bool {
        let exists = self.screen(screen_id).is_some_and(|s| s.contains_layer(layer_id));
        if !exists {
            tracing::debug!(screen = %screen_id, layer = %layer_id, "select_layer: unknown layer ignored");
            return false;
        }
        self.doc.active_screen_id = screen_id.clone();
        self.doc.selected_layer_id = Some(layer_id.clone());
        true
    }

    pub fn clear_selection(&mut self) {
        self.doc.selected_layer_id = None;
    }

    // --- Queries ---

    #[must_use]
    pub fn screens(&self) -> &[Screen] {
        &self.doc.screens
    }

    #[must_use]
    pub fn screen(&self, id: &ScreenId) -> Option<&Screen> {
        self.doc.screens.iter().find(|s| &s.id == id)
    }

    #[must_use]
    pub fn screen_index(&self, id: &ScreenId) -> Option<usize> {
        self.doc.screens.iter().position(|s| &s.id == id)
    }

    #[must_use]
    pub fn active_screen_id(&self) -> &ScreenId {
        &self.doc.active_screen_id
    }

    /// The active screen. Falls back to the first screen, which always exists.
    #[must_use]
    pub fn active_screen(&self) -> &Screen {
        self.screen(&self.doc.active_screen_id).unwrap_or(&self.doc.screens[0])
    }

    #[must_use]
    pub fn selected_layer_id(&self) -> Option<&LayerId> {
        self.doc.selected_layer_id.as_ref()
    }

    #[must_use]
    pub fn selected_layer(&self) -> Option<&Layer> {
        self.doc.selected_layer_id.as_ref().and_then(|id| self.layer(id))
    }

    /// Look up a layer on the active screen.
    #[must_use]
    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.active_screen().layer(id)
    }

    /// Resolved layer lists of every screen, in screen order and paint order.
    #[must_use]
    pub fn export(&self) -> Vec<ScreenSnapshot> {
        self.doc
            .screens
            .iter()
            .map(|s| ScreenSnapshot {
                id: s.id.clone(),
                name: s.name.clone(),
                background_color: s.background_color.clone(),
                width: CANVAS_WIDTH,
                height: CANVAS_HEIGHT,
                layers: s.layers.clone(),
            })
            .collect()
    }

    fn screen_mut(&mut self, id: &ScreenId) -> Option<&mut Screen> {
        self.doc.screens.iter_mut().find(|s| &s.id == id)
    }

    fn active_layer_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        let active = self.doc.active_screen_id.clone();
        self.screen_mut(&active).and_then(|s| s.layer_mut(id))
    }
}

fn fresh_screen_id(next_id: &mut u64, screens: &[Screen]) -> ScreenId {
    loop {
        *next_id += 1;
        let id = ScreenId(format!("screen-{next_id}"));
        if !screens.iter().any(|s| s.id == id) {
            return id;
        }
    }
}

fn fresh_layer_id(next_id: &mut u64, screen: &Screen) -> LayerId {
    loop {
        *next_id += 1;
        let id = LayerId(format!("layer-{next_id}"));
        if !screen.contains_layer(&id) {
            return id;
        }
    }
}
