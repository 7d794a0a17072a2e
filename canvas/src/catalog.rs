//! Built-in templates.
//!
//! All templates share the same slot geometry and differ in color. Preset A
//! puts the headline on top with the phone bleeding off the bottom edge;
//! preset B flips it, phone bleeding off the top and copy underneath.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::layer::Rect;
use crate::template::{ScreenConfig, Template};

const MOCKUP_A: Rect = Rect { x: 34.0, y: 245.0, width: 307.0, height: 622.0 };
const TITLE_A: Rect = Rect { x: 26.0, y: 45.0, width: 323.0, height: 64.0 };
const SUBTITLE_A: Rect = Rect { x: 26.0, y: 118.0, width: 323.0, height: 52.0 };

const MOCKUP_B: Rect = Rect { x: 34.0, y: -55.0, width: 307.0, height: 622.0 };
const TITLE_B: Rect = Rect { x: 26.0, y: 610.0, width: 323.0, height: 64.0 };
const SUBTITLE_B: Rect = Rect { x: 26.0, y: 683.0, width: 323.0, height: 52.0 };

const LOGO: Rect = Rect { x: 163.5, y: 745.0, width: 48.0, height: 48.0 };

/// `(name, background, text)` of each built-in template.
const PALETTES: [(&str, &str, &str); 4] = [
    ("clean", "#FFFFFF", "#111827"),
    ("midnight", "#0F172A", "#F8FAFC"),
    ("sunset", "#FF6B4A", "#FFFFFF"),
    ("mint", "#D1FAE5", "#064E3B"),
];

/// Names of the built-in templates, in catalog order.
#[must_use]
pub fn names() -> Vec<&'static str> {
    PALETTES.iter().map(|(name, _, _)| *name).collect()
}

/// Look up a built-in template by name.
#[must_use]
pub fn find(name: &str) -> Option<Template> {
    PALETTES
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(n, background, text)| build(n, background, text))
}

/// Every built-in template.
#[must_use]
pub fn all() -> Vec<Template> {
    PALETTES
        .iter()
        .map(|(n, background, text)| build(n, background, text))
        .collect()
}

fn build(name: &str, background: &str, text: &str) -> Template {
    Template {
        name: name.to_string(),
        background_color: background.to_string(),
        text_color: text.to_string(),
        mockup: MOCKUP_A,
        title: TITLE_A,
        subtitle: SUBTITLE_A,
        logo: Some(LOGO),
        alternate: ScreenConfig { mockup: MOCKUP_B, title: TITLE_B, subtitle: SUBTITLE_B },
    }
}
