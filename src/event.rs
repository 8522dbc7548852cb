// src/event.rs

use crate::page::ImageId;

/// ===============================
/// Browser-side input events
/// ===============================

/// A user or resource signal, already translated out of the DOM.
///
/// These events:
/// - are produced by the binding layer (or by tests)
/// - carry only what the controller needs to decide
/// - are dispatched exactly once, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Click on `#zoomButton`.
    ZoomClick,

    /// Double-click on `#mainImage`.
    MainImageDoubleClick,

    /// Click on `#closeButton`.
    CloseClick,

    /// Click that landed inside `#fullscreenModal`.
    ///
    /// `on_backdrop` is true only when the modal element itself was the
    /// event target, not one of its children.
    ModalClick { on_backdrop: bool },

    /// Activation of a `.nav-link`, carrying its raw `href` attribute.
    NavClick { href: Option<String> },

    /// Document-level key press.
    KeyDown {
        key: Key,
        /// Id of `document.activeElement`, if it has one.
        focused_id: Option<String>,
    },

    ImageLoaded { image: ImageId },

    ImageFailed { image: ImageId },

    /// Window scroll, with the new vertical page offset.
    Scrolled { scroll_y: f64 },
}

/// The subset of `KeyboardEvent.key` values the gallery reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Other(String),
}

impl Key {
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Escape" => Key::Escape,
            "Enter" => Key::Enter,
            " " => Key::Space,
            other => Key::Other(other.to_string()),
        }
    }

    /// Keys that press a focused button.
    #[inline]
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

/// ===============================
/// Dispatch results
/// ===============================

/// What the binding layer must do to the originating DOM event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl EventOutcome {
    pub const IGNORED: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };

    pub fn prevent_default() -> Self {
        Self {
            prevent_default: true,
            ..Self::IGNORED
        }
    }

    pub fn stop_propagation() -> Self {
        Self {
            stop_propagation: true,
            ..Self::IGNORED
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            prevent_default: self.prevent_default || other.prevent_default,
            stop_propagation: self.stop_propagation || other.stop_propagation,
        }
    }
}
