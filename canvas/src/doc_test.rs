#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;
use crate::catalog;
use crate::layer::{TextAlign, TextStyle};

// =============================================================
// Helpers
// =============================================================

fn store_with_text() -> (CompositionStore, ScreenId, LayerId) {
    let mut store = CompositionStore::new();
    let screen = store.active_screen_id().clone();
    let layer = store.add_text_layer(&screen).unwrap();
    (store, screen, layer)
}

fn content(headline: &str) -> ScreenContent {
    ScreenContent { screenshot: "s.png".into(), headline: headline.into(), ..Default::default() }
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_store_has_one_active_empty_screen() {
    let store = CompositionStore::new();
    assert_eq!(store.screens().len(), 1);
    let screen = store.active_screen();
    assert_eq!(screen.id, ScreenId::from("screen-1"));
    assert_eq!(screen.name, "Screen 1");
    assert_eq!(screen.background_color, "#FFFFFF");
    assert!(screen.layers.is_empty());
    assert!(store.selected_layer_id().is_none());
}

// =============================================================
// Screens
// =============================================================

#[test]
fn add_screen_appends_and_activates() {
    let mut store = CompositionStore::new();
    let id = store.add_screen();
    assert_eq!(store.screens().len(), 2);
    assert_eq!(store.active_screen_id(), &id);
    assert_eq!(store.screens()[1].id, id);
    assert_eq!(store.screens()[1].name, "Screen 2");
    assert_eq!(store.screens()[1].background_color, "#FFFFFF");
}

#[test]
fn rapid_add_screen_ids_are_unique() {
    let mut store = CompositionStore::new();
    let mut ids: Vec<ScreenId> = (0..50).map(|_| store.add_screen()).collect();
    ids.push(store.screens()[0].id.clone());
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 51);
}

#[test]
fn add_screen_clears_selection() {
    let (mut store, _, _) = store_with_text();
    store.add_screen();
    assert!(store.selected_layer_id().is_none());
}

#[test]
fn set_active_screen_unknown_is_noop() {
    let (mut store, screen, layer) = store_with_text();
    assert!(!store.set_active_screen(&ScreenId::from("gone")));
    assert_eq!(store.active_screen_id(), &screen);
    assert_eq!(store.selected_layer_id(), Some(&layer));
}

#[test]
fn set_active_screen_switch_clears_selection() {
    let (mut store, first, _) = store_with_text();
    let second = store.add_screen();
    store.set_active_screen(&first);
    assert_eq!(store.active_screen_id(), &first);
    assert!(store.selected_layer_id().is_none());
    assert!(store.set_active_screen(&second));
}

#[test]
fn set_active_screen_same_keeps_selection() {
    let (mut store, screen, layer) = store_with_text();
    assert!(store.set_active_screen(&screen));
    assert_eq!(store.selected_layer_id(), Some(&layer));
}

#[test]
fn set_background_color_touches_only_named_screen() {
    let mut store = CompositionStore::new();
    let first = store.active_screen_id().clone();
    let second = store.add_screen();
    assert!(store.set_background_color(&second, "#123456"));
    assert_eq!(store.screen(&second).unwrap().background_color, "#123456");
    assert_eq!(store.screen(&first).unwrap().background_color, "#FFFFFF");
    assert!(!store.set_background_color(&ScreenId::from("gone"), "#000000"));
}

#[test]
fn rename_screen() {
    let mut store = CompositionStore::new();
    let id = store.active_screen_id().clone();
    assert!(store.rename_screen(&id, "Hero"));
    assert_eq!(store.active_screen().name, "Hero");
    assert!(!store.rename_screen(&ScreenId::from("gone"), "x"));
}

#[test]
fn remove_only_screen_is_refused() {
    let mut store = CompositionStore::new();
    let id = store.active_screen_id().clone();
    assert!(!store.remove_screen(&id));
    assert_eq!(store.screens().len(), 1);
}

#[test]
fn remove_active_screen_activates_neighbor() {
    let mut store = CompositionStore::new();
    let first = store.active_screen_id().clone();
    let second = store.add_screen();
    let third = store.add_screen();
    store.set_active_screen(&second);
    store.add_text_layer(&second);

    assert!(store.remove_screen(&second));
    assert_eq!(store.active_screen_id(), &third);
    assert!(store.selected_layer_id().is_none());

    assert!(store.remove_screen(&third));
    assert_eq!(store.active_screen_id(), &first);
}

#[test]
fn remove_inactive_screen_keeps_selection() {
    let (mut store, first, layer) = store_with_text();
    let second = store.add_screen();
    store.select_layer(&first, &layer);
    assert!(store.remove_screen(&second));
    assert_eq!(store.active_screen_id(), &first);
    assert_eq!(store.selected_layer_id(), Some(&layer));
}

#[test]
fn remove_unknown_screen_is_noop() {
    let mut store = CompositionStore::new();
    store.add_screen();
    assert!(!store.remove_screen(&ScreenId::from("gone")));
    assert_eq!(store.screens().len(), 2);
}

// =============================================================
// Layers
// =============================================================

#[test]
fn add_text_layer_appends_defaults_and_selects() {
    let (store, screen, layer) = store_with_text();
    let s = store.screen(&screen).unwrap();
    assert_eq!(s.layers.len(), 1);
    assert_eq!(s.layers[0].id, layer);
    assert_eq!(s.layers[0].text().unwrap().content, "New Text");
    assert_eq!(store.selected_layer_id(), Some(&layer));
}

#[test]
fn add_text_layer_on_inactive_screen_activates_it() {
    let mut store = CompositionStore::new();
    let first = store.active_screen_id().clone();
    store.add_screen();
    let layer = store.add_text_layer(&first).unwrap();
    assert_eq!(store.active_screen_id(), &first);
    assert_eq!(store.selected_layer_id(), Some(&layer));
}

#[test]
fn add_text_layer_unknown_screen_returns_none() {
    let mut store = CompositionStore::new();
    assert!(store.add_text_layer(&ScreenId::from("gone")).is_none());
    assert!(store.active_screen().layers.is_empty());
}

#[test]
fn layer_ids_unique_within_screen() {
    let mut store = CompositionStore::new();
    let screen = store.active_screen_id().clone();
    let a = store.add_text_layer(&screen).unwrap();
    let b = store.add_text_layer(&screen).unwrap();
    let c = store.add_image_layer(&screen, "logo.png").unwrap();
    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
}

#[test]
fn add_image_layer_holds_reference() {
    let mut store = CompositionStore::new();
    let screen = store.active_screen_id().clone();
    let id = store.add_image_layer(&screen, "data:image/png;base64,AAAA").unwrap();
    let layer = store.layer(&id).unwrap();
    assert_eq!(layer.kind, LayerKind::Image { src: "data:image/png;base64,AAAA".into() });
    assert_eq!(layer.width, 200.0);
    assert_eq!(store.selected_layer_id(), Some(&id));
}

#[test]
fn delete_selected_layer_clears_selection() {
    let (mut store, screen, layer) = store_with_text();
    assert!(store.delete_layer(&screen, &layer));
    assert!(store.selected_layer_id().is_none());
    assert!(store.active_screen().layers.is_empty());
}

#[test]
fn delete_other_layer_keeps_selection() {
    let (mut store, screen, first) = store_with_text();
    let second = store.add_text_layer(&screen).unwrap();
    assert!(store.delete_layer(&screen, &first));
    assert_eq!(store.selected_layer_id(), Some(&second));
}

#[test]
fn delete_same_id_on_other_screen_keeps_selection() {
    let mut store = CompositionStore::new();
    store.seed(&catalog::find("clean").unwrap(), &[content("a"), content("b")]);
    let first = store.screens()[0].id.clone();
    let second = store.screens()[1].id.clone();
    let headline = LayerId::from("headline");
    store.select_layer(&first, &headline);

    assert!(store.delete_layer(&second, &headline));
    assert_eq!(store.selected_layer_id(), Some(&headline));
    assert!(store.screen(&first).unwrap().contains_layer(&headline));
    assert!(!store.screen(&second).unwrap().contains_layer(&headline));
}

#[test]
fn delete_unknown_layer_is_noop() {
    let (mut store, screen, layer) = store_with_text();
    assert!(!store.delete_layer(&screen, &LayerId::from("gone")));
    assert!(!store.delete_layer(&ScreenId::from("gone"), &layer));
    assert_eq!(store.selected_layer_id(), Some(&layer));
    assert_eq!(store.active_screen().layers.len(), 1);
}

#[test]
fn update_content_preserves_style_and_geometry() {
    let (mut store, _, layer) = store_with_text();
    let before = store.layer(&layer).unwrap().clone();
    assert!(store.update_layer_content(&layer, "Track Spend"));
    let after = store.layer(&layer).unwrap();
    assert_eq!(after.text().unwrap().content, "Track Spend");
    assert_eq!(after.text().unwrap().style, before.text().unwrap().style);
    assert_eq!(after.frame(), before.frame());
}

#[test]
fn update_content_replaces_image_reference() {
    let mut store = CompositionStore::new();
    let screen = store.active_screen_id().clone();
    let id = store.add_image_layer(&screen, "a.png").unwrap();
    let frame = store.layer(&id).unwrap().frame();
    assert!(store.update_layer_content(&id, "https://cdn.example/b.png"));
    let layer = store.layer(&id).unwrap();
    assert_eq!(layer.kind, LayerKind::Image { src: "https://cdn.example/b.png".into() });
    assert_eq!(layer.frame(), frame);
}

#[test]
fn update_content_replaces_mockup_screenshot() {
    let mut store = CompositionStore::new();
    store.seed(&catalog::find("clean").unwrap(), &[content("Hi")]);
    assert!(store.update_layer_content(&LayerId::from("mockup"), "new.png"));
    assert_eq!(store.layer(&LayerId::from("mockup")).unwrap().kind, LayerKind::Mockup { src: "new.png".into() });
}

#[test]
fn update_content_on_background_is_noop() {
    let mut store = CompositionStore::new();
    store.seed(&catalog::find("clean").unwrap(), &[content("Hi")]);
    let before = store.layer(&LayerId::from("background")).unwrap().clone();
    assert!(!store.update_layer_content(&LayerId::from("background"), "#000000"));
    assert_eq!(store.layer(&LayerId::from("background")).unwrap(), &before);
}

#[test]
fn update_style_merges_patch() {
    let (mut store, _, layer) = store_with_text();
    let patch = StylePatch { italic: Some(true), align: Some(TextAlign::Right), ..Default::default() };
    assert!(store.update_layer_style(&layer, &patch));
    let style = &store.layer(&layer).unwrap().text().unwrap().style;
    let expected = TextStyle { italic: true, align: TextAlign::Right, ..TextStyle::default() };
    assert_eq!(style, &expected);
    assert_eq!(store.layer(&layer).unwrap().x, 50.0);
}

#[test]
fn update_style_unknown_layer_is_noop() {
    let (mut store, _, _) = store_with_text();
    let patch = StylePatch { bold: Some(true), ..Default::default() };
    assert!(!store.update_layer_style(&LayerId::from("gone"), &patch));
}

#[test]
fn move_layer_allows_off_canvas_positions() {
    let (mut store, _, layer) = store_with_text();
    assert!(store.move_layer(&layer, -500.0, 2000.0));
    let l = store.layer(&layer).unwrap();
    assert_eq!((l.x, l.y), (-500.0, 2000.0));
    assert_eq!((l.width, l.height), (200.0, 50.0));
}

#[test]
fn move_layer_only_resolves_on_active_screen() {
    let (mut store, first, layer) = store_with_text();
    store.add_screen();
    assert!(!store.move_layer(&layer, 1.0, 1.0));
    assert_eq!(store.screen(&first).unwrap().layers[0].x, 50.0);
}

#[test]
fn resize_layer_clamps_negative() {
    let (mut store, _, layer) = store_with_text();
    assert!(store.resize_layer(&layer, -10.0, 75.0));
    let l = store.layer(&layer).unwrap();
    assert_eq!((l.width, l.height), (0.0, 75.0));
}

// =============================================================
// Selection
// =============================================================

#[test]
fn select_layer_activates_screen() {
    let (mut store, first, layer) = store_with_text();
    store.add_screen();
    assert!(store.select_layer(&first, &layer));
    assert_eq!(store.active_screen_id(), &first);
    assert_eq!(store.selected_layer().unwrap().id, layer);
}

#[test]
fn select_unknown_layer_is_noop() {
    let (mut store, first, _) = store_with_text();
    let second = store.add_screen();
    assert!(!store.select_layer(&first, &LayerId::from("gone")));
    assert_eq!(store.active_screen_id(), &second);
    assert!(store.selected_layer_id().is_none());
}

#[test]
fn clear_selection() {
    let (mut store, _, _) = store_with_text();
    store.clear_selection();
    assert!(store.selected_layer().is_none());
}

// =============================================================
// Seeding
// =============================================================

#[test]
fn seed_builds_one_screen_per_content() {
    let mut store = CompositionStore::new();
    let template = catalog::find("midnight").unwrap();
    store.seed(&template, &[content("One"), content("Two"), content("Three")]);
    assert_eq!(store.screens().len(), 3);
    assert_eq!(store.active_screen_id(), &store.screens()[0].id);
    for screen in store.screens() {
        assert_eq!(screen.background_color, template.background_color);
        assert_eq!(screen.layers[0].id, LayerId::from("background"));
    }
}

#[test]
fn seed_without_content_is_noop() {
    let (mut store, screen, _) = store_with_text();
    store.seed(&catalog::find("clean").unwrap(), &[]);
    assert_eq!(store.active_screen_id(), &screen);
    assert_eq!(store.active_screen().layers.len(), 1);
}

#[test]
fn add_screen_after_seed_does_not_collide() {
    let mut store = CompositionStore::new();
    store.seed(&catalog::find("clean").unwrap(), &[content("a"), content("b")]);
    let id = store.add_screen();
    assert_eq!(store.screens().iter().filter(|s| s.id == id).count(), 1);
}

// =============================================================
// Export
// =============================================================

#[test]
fn export_lists_screens_and_layers_in_order() {
    let mut store = CompositionStore::new();
    store.seed(&catalog::find("clean").unwrap(), &[content("a"), content("b")]);
    let snapshot = store.export();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].id, store.screens()[0].id);
    assert_eq!(snapshot[1].id, store.screens()[1].id);
    assert_eq!(snapshot[0].width, 375.0);
    assert_eq!(snapshot[0].height, 812.0);
    let kinds: Vec<&str> = snapshot[0].layers.iter().map(Layer::kind_name).collect();
    assert_eq!(kinds, vec!["background", "mockup", "text"]);
}

#[test]
fn export_reflects_moves() {
    let (mut store, _, layer) = store_with_text();
    store.move_layer(&layer, 10.0, 20.0);
    let snapshot = store.export();
    assert_eq!(snapshot[0].layers[0].x, 10.0);
    assert_eq!(snapshot[0].layers[0].y, 20.0);
}

// =============================================================
// Persistence
// =============================================================

#[test]
fn json_round_trip_restores_everything() {
    let mut store = CompositionStore::new();
    store.seed(
        &catalog::find("sunset").unwrap(),
        &[
            ScreenContent { subtitle: Some("See your budget".into()), logo: Some("logo.png".into()), ..content("a") },
            content("b"),
        ],
    );
    let second = store.screens()[1].id.clone();
    store.set_active_screen(&second);
    let text = store.add_text_layer(&second).unwrap();
    store.move_layer(&text, -30.5, 900.25);

    let json = store.to_json().unwrap();
    let restored = CompositionStore::from_json(&json).unwrap();
    assert_eq!(restored.composition(), store.composition());
    assert_eq!(restored.selected_layer_id(), Some(&text));
}

#[test]
fn restored_store_issues_fresh_ids() {
    let (store, screen, layer) = store_with_text();
    let mut restored = CompositionStore::from_json(&store.to_json().unwrap()).unwrap();
    let new_layer = restored.add_text_layer(&screen).unwrap();
    let new_screen = restored.add_screen();
    assert_ne!(new_layer, layer);
    assert_ne!(new_screen, screen);
}

#[test]
fn from_json_rejects_missing_fields() {
    let raw = json!({ "screens": [], "active_screen_id": "screen-1" }).to_string();
    assert!(matches!(CompositionStore::from_json(&raw), Err(DocError::Json(_))));
}

#[test]
fn from_json_rejects_empty_composition() {
    let raw = json!({
        "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
        "screens": [],
        "active_screen_id": "screen-1",
        "selected_layer_id": null
    })
    .to_string();
    assert!(matches!(CompositionStore::from_json(&raw), Err(DocError::Empty)));
}

#[test]
fn from_json_repairs_dangling_references() {
    let raw = json!({
        "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
        "screens": [{ "id": "a", "name": "A", "background_color": "#fff", "layers": [] }],
        "active_screen_id": "missing",
        "selected_layer_id": "ghost"
    })
    .to_string();
    let store = CompositionStore::from_json(&raw).unwrap();
    assert_eq!(store.active_screen_id(), &ScreenId::from("a"));
    assert!(store.selected_layer_id().is_none());
}

#[test]
fn from_json_clears_selection_not_on_active_screen() {
    let raw = json!({
        "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
        "screens": [
            { "id": "a", "name": "A", "background_color": "#fff", "layers": [] },
            { "id": "b", "name": "B", "background_color": "#fff", "layers": [
                { "id": "t", "x": 0, "y": 0, "width": 10, "height": 10, "type": "image", "src": "x.png" }
            ] }
        ],
        "active_screen_id": "a",
        "selected_layer_id": "t"
    })
    .to_string();
    let store = CompositionStore::from_json(&raw).unwrap();
    assert_eq!(store.active_screen_id(), &ScreenId::from("a"));
    assert!(store.selected_layer_id().is_none());
}
