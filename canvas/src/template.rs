//! Template layout generator: builds a screen's initial layers from content.
//!
//! Generation is a pure function of `(template, content, screen_index)`. The
//! index only chooses between the template's two geometry presets by parity,
//! so consecutive screens alternate mockup placement without any per-screen
//! configuration. Layer ids are fixed per role (`background`, `mockup`,
//! `headline`, `subtitle`, `logo`), which keeps repeated calls structurally
//! equal and is enough for uniqueness within one screen.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_FONT_FAMILY, HEADLINE_FONT_SIZE, SUBTITLE_FONT_SIZE};
use crate::doc::{Screen, ScreenId};
use crate::layer::{Layer, LayerId, LayerKind, Rect, TextAlign, TextLayer, TextStyle};

/// Number of alternating geometry presets a template carries.
pub const PRESET_COUNT: usize = 2;

pub const BACKGROUND_LAYER_ID: &str = "background";
pub const MOCKUP_LAYER_ID: &str = "mockup";
pub const HEADLINE_LAYER_ID: &str = "headline";
pub const SUBTITLE_LAYER_ID: &str = "subtitle";
pub const LOGO_LAYER_ID: &str = "logo";

/// Geometry of the content slots for one screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub mockup: Rect,
    pub title: Rect,
    pub subtitle: Rect,
}

/// Reusable look for a set of screens.
///
/// The base `mockup` / `title` / `subtitle` rectangles form the first preset;
/// `alternate` is the second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub background_color: String,
    pub text_color: String,
    pub mockup: Rect,
    pub title: Rect,
    pub subtitle: Rect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<Rect>,
    pub alternate: ScreenConfig,
}

impl Template {
    /// The preset built from the template's base geometry.
    #[must_use]
    pub fn primary(&self) -> ScreenConfig {
        ScreenConfig { mockup: self.mockup, title: self.title, subtitle: self.subtitle }
    }

    #[must_use]
    pub fn presets(&self) -> [ScreenConfig; PRESET_COUNT] {
        [self.primary(), self.alternate]
    }

    /// Preset used for the screen at `screen_index`.
    #[must_use]
    pub fn screen_config(&self, screen_index: usize) -> ScreenConfig {
        self.presets()[screen_index % PRESET_COUNT]
    }
}

/// Content for one screen, usually produced by the AI collaborator.
///
/// `screenshot` and `logo` are opaque image references (remote or data URLs).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenContent {
    pub screenshot: String,
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Overrides the template's text color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Overrides the default font stack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

/// Build the layer stack for one screen.
///
/// Order: background, mockup, headline, then subtitle and logo when the
/// content provides them (the logo also needs a template logo slot).
#[must_use]
pub fn generate_layers(template: &Template, content: &ScreenContent, screen_index: usize) -> Vec<Layer> {
    let config = template.screen_config(screen_index);
    let color = content.text_color.as_deref().unwrap_or(&template.text_color);
    let font = content.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY);

    let mut layers = vec![
        Layer::new(
            LayerId::from(BACKGROUND_LAYER_ID),
            Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
            LayerKind::Background { color: template.background_color.clone() },
        ),
        Layer::new(
            LayerId::from(MOCKUP_LAYER_ID),
            config.mockup,
            LayerKind::Mockup { src: content.screenshot.clone() },
        ),
        text_layer(HEADLINE_LAYER_ID, config.title, &content.headline, HEADLINE_FONT_SIZE, true, color, font),
    ];

    if let Some(subtitle) = &content.subtitle {
        layers.push(text_layer(SUBTITLE_LAYER_ID, config.subtitle, subtitle, SUBTITLE_FONT_SIZE, false, color, font));
    }

    if let (Some(logo), Some(slot)) = (&content.logo, template.logo) {
        layers.push(Layer::new(LayerId::from(LOGO_LAYER_ID), slot, LayerKind::Image { src: logo.clone() }));
    }

    layers
}

/// Build a whole screen: generated layers plus id, name, and background.
#[must_use]
pub fn generate_screen(template: &Template, content: &ScreenContent, screen_index: usize) -> Screen {
    let number = screen_index + 1;
    Screen {
        id: ScreenId(format!("screen-{number}")),
        name: format!("Screen {number}"),
        background_color: template.background_color.clone(),
        layers: generate_layers(template, content, screen_index),
    }
}

fn text_layer(id: &str, frame: Rect, content: &str, font_size: f64, bold: bool, color: &str, font: &str) -> Layer {
    Layer::new(
        LayerId::from(id),
        frame,
        LayerKind::Text(TextLayer {
            content: content.to_string(),
            style: TextStyle {
                font_size,
                color: color.to_string(),
                bold,
                italic: false,
                underline: false,
                align: TextAlign::Center,
                font_family: font.to_string(),
            },
        }),
    )
}
