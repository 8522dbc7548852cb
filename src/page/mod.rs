// src/page/mod.rs
//
// The document surface the controller observes and mutates.
//
// The controller never owns page elements. Everything it does to the page
// goes through the `Page` trait, so the same logic drives the live DOM
// (see `wasm.rs`) and the in-memory page used by tests and the demo binary.

mod memory;

pub use memory::*;

/// Element ids and class names the page markup is expected to carry.
pub mod ids {
    pub const ZOOM_BUTTON: &str = "zoomButton";
    pub const CLOSE_BUTTON: &str = "closeButton";
    pub const FULLSCREEN_MODAL: &str = "fullscreenModal";
    pub const MAIN_IMAGE: &str = "mainImage";

    pub const NAV_LINK_CLASS: &str = "nav-link";
    pub const BACKGROUND_CLASS: &str = "background-gradient";

    /// Class toggled on the modal while it is shown.
    pub const ACTIVE_CLASS: &str = "active";
}

/// True while `document.readyState` says the markup is still being parsed;
/// wiring has to wait for `DOMContentLoaded` in that case.
pub fn is_still_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

/// Index of an `img` element in document order, captured at wiring time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub usize);

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "img#{}", self.0)
    }
}

/// Snapshot of an image element at wiring time.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pub id: ImageId,
    pub src: String,
    /// `HTMLImageElement.complete`: the resource already resolved (cache hit).
    pub complete: bool,
}

/// Something the controller can write inline styles on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Element(&'a str),
    Body,
    Image(ImageId),
    /// The first `.background-gradient` element.
    Background,
}

/// Read/write access to the hosting document.
///
/// Implementations must tolerate writes to targets that do not exist; the
/// controller checks presence up front but does not re-check on every write.
pub trait Page {
    // ─────────────────────────────────────────────────────────────────────
    // Structure
    // ─────────────────────────────────────────────────────────────────────

    fn has_element(&self, id: &str) -> bool;

    fn has_background(&self) -> bool;

    /// All `img` elements, in document order.
    fn images(&self) -> Vec<ImageInfo>;

    // ─────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────

    fn set_class(&mut self, id: &str, class: &str, present: bool);

    /// Set an inline style property. An empty value clears it.
    fn set_style(&mut self, target: Target<'_>, property: &str, value: &str);

    fn set_image_alt(&mut self, image: ImageId, alt: &str);

    // ─────────────────────────────────────────────────────────────────────
    // Layout & scrolling
    // ─────────────────────────────────────────────────────────────────────

    /// Top edge of the element relative to the viewport
    /// (`getBoundingClientRect().top`).
    fn element_top(&self, id: &str) -> Option<f64>;

    /// Current vertical page offset (`window.pageYOffset`).
    fn scroll_y(&self) -> f64;

    /// Request an animated scroll to an absolute vertical offset.
    fn smooth_scroll_to(&mut self, top: f64);

    fn prefers_reduced_motion(&self) -> bool;
}
