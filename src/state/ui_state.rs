// Modal, scroll-lock and per-image state.

use crate::page::ImageId;

/// Fully transparent / fully opaque.
pub const HIDDEN: f32 = 0.0;
pub const VISIBLE: f32 = 1.0;

/// Visibility of the fullscreen modal.
///
/// `active` mirrors the `active` class, `opacity` the inline opacity.
/// Opacity only becomes 1 after `active` is set, and `active` is only
/// cleared after opacity has gone back to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalState {
    pub active: bool,
    pub opacity: f32,
}

impl Default for ModalState {
    fn default() -> Self {
        Self {
            active: false,
            opacity: HIDDEN,
        }
    }
}

impl ModalState {
    /// Active and fully faded in.
    pub fn is_shown(&self) -> bool {
        self.active && self.opacity == VISIBLE
    }

    /// Inactive and fully faded out.
    pub fn is_hidden(&self) -> bool {
        !self.active && self.opacity == HIDDEN
    }
}

/// Where an image is in its load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageLoadState {
    #[default]
    Pending,
    Loaded,
    Errored,
}

impl ImageLoadState {
    /// Load and error are fire-once; nothing leaves these states.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ImageLoadState::Pending)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageState {
    pub id: ImageId,
    pub src: String,
    pub load: ImageLoadState,
    pub opacity: f32,
}

impl ImageState {
    pub fn new(id: ImageId, src: String) -> Self {
        Self {
            id,
            src,
            load: ImageLoadState::Pending,
            opacity: HIDDEN,
        }
    }
}

/// All mutable UI state the controller tracks.
///
/// Injectable: tests can build a controller around a prepared `UiState`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub modal: ModalState,
    /// Page scrolling suppressed (`body { overflow: hidden }`).
    pub scroll_locked: bool,
    pub images: Vec<ImageState>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image(&self, id: ImageId) -> Option<&ImageState> {
        self.images.iter().find(|image| image.id == id)
    }

    pub fn image_mut(&mut self, id: ImageId) -> Option<&mut ImageState> {
        self.images.iter_mut().find(|image| image.id == id)
    }

    pub fn count_images(&self, load: ImageLoadState) -> usize {
        self.images.iter().filter(|image| image.load == load).count()
    }
}
