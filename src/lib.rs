// src/lib.rs
//
// Library entry point: the gallery controller core, plus browser bindings
// behind the `web` feature.

mod config;
mod controller;
mod error;
mod event;
mod images;
mod keyboard;
mod modal;
mod navigation;
mod page;
mod parallax;
mod scheduler;
mod state;

#[cfg(test)]
mod test_log;

#[cfg(feature = "web")]
pub mod wasm;

// Re-export key types for Rust consumers
pub use config::{GalleryConfig, IMAGE_FAILED_ALT, IMAGE_TRANSITION};
pub use controller::{GalleryController, Wiring};
pub use error::{GalleryError, GalleryResult};
pub use event::{EventOutcome, Key, UiEvent};
pub use navigation::fragment;
pub use page::{ImageId, ImageInfo, MemoryPage, Page, Target, ids};
pub use scheduler::{Deferred, ManualScheduler, Scheduler, TimerId};
pub use state::{ImageLoadState, ImageState, ModalState, UiState};
