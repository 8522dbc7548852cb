// src/keyboard.rs
//
// Keyboard access to the zoom control.
//
// Escape is handled by the modal itself; this only covers pressing the
// focused zoom button with Space or Enter.

use crate::event::Key;
use crate::page::ids;

pub struct KeyboardNav {
    /// False when `#zoomButton` is missing.
    enabled: bool,
}

impl KeyboardNav {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// True if this key press should open the modal (and suppress the
    /// browser's default handling of the key).
    pub fn opens_modal(&self, key: &Key, focused_id: Option<&str>) -> bool {
        self.enabled && key.is_activation() && focused_id == Some(ids::ZOOM_BUTTON)
    }
}
