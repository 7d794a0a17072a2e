//! Screen composition engine for App-Store-style marketing screenshots.
//!
//! This crate owns the logical model of a multi-screen composition and the
//! interactive surface that edits it: selecting, dragging, zooming, and
//! panning, plus the template generator that seeds each screen's layers from
//! content. It draws nothing; a rendering collaborator reads the export
//! snapshot and a storage collaborator persists the composition JSON.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level editor and testable [`engine::EditorCore`] |
//! | [`doc`] | Screens, the persisted composition, and the mutation store |
//! | [`layer`] | Layer value type and text style patches |
//! | [`viewport`] | Zoom/pan state and viewport ↔ model conversions |
//! | [`input`] | Input events and the gesture state machine |
//! | [`hit`] | Screen placement and hit-testing |
//! | [`template`] | Deterministic template layout generator |
//! | [`catalog`] | Built-in templates |
//! | [`consts`] | Shared constants (canvas size, zoom limits, defaults) |

pub mod catalog;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod layer;
pub mod template;
pub mod viewport;
