// src/config.rs
//
// Tunable timings and offsets for the gallery controller.
//
// Delays are in milliseconds and line up with the CSS transitions the page
// stylesheet declares for the modal and images.

/// Delay between flagging the modal active and starting its fade-in.
pub const DEFAULT_OPEN_DELAY_MS: u32 = 10;

/// Delay between starting the modal fade-out and clearing its flag.
/// Matches the 0.3s opacity transition on `#fullscreenModal`.
pub const DEFAULT_CLOSE_DELAY_MS: u32 = 300;

/// Cosmetic pause before fading in an image that is already loaded.
pub const DEFAULT_FADE_DELAY_MS: u32 = 100;

/// Height of the fixed page header, subtracted from anchor scroll targets.
pub const DEFAULT_HEADER_OFFSET: f64 = 80.0;

/// Background translation per scrolled pixel when parallax is on.
pub const DEFAULT_PARALLAX_RATE: f64 = 0.3;

pub const IMAGE_TRANSITION: &str = "opacity 0.5s ease-in-out";
pub const IMAGE_FAILED_ALT: &str = "Image failed to load";

/// Configuration for the gallery controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryConfig {
    pub open_delay_ms: u32,
    pub close_delay_ms: u32,
    pub fade_delay_ms: u32,
    pub header_offset: f64,
    /// Background parallax is an optional enhancement and stays off unless
    /// explicitly requested.
    pub parallax: bool,
    pub parallax_rate: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            open_delay_ms: DEFAULT_OPEN_DELAY_MS,
            close_delay_ms: DEFAULT_CLOSE_DELAY_MS,
            fade_delay_ms: DEFAULT_FADE_DELAY_MS,
            header_offset: DEFAULT_HEADER_OFFSET,
            parallax: false,
            parallax_rate: DEFAULT_PARALLAX_RATE,
        }
    }
}

impl GalleryConfig {
    pub fn with_parallax(mut self, enabled: bool) -> Self {
        self.parallax = enabled;
        self
    }
}
