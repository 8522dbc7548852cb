// src/state/mod.rs
//
// Transient UI state owned by the gallery controller.
//
// Key principles:
// - Nothing here is persisted; it lives as long as the page
// - The controller is the only writer
// - Every field mirrors something visible on the page (a class, an inline
//   style, an attribute), and is written to the page in the same step

mod ui_state;

pub use ui_state::*;
