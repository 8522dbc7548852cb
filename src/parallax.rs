// src/parallax.rs
//
// Optional background parallax.
//
// Off by default. When turned on it still stays off for users who ask for
// reduced motion, and for pages without a `.background-gradient`.

use crate::page::{Page, Target};

pub struct Parallax {
    enabled: bool,
    rate: f64,
}

impl Parallax {
    pub fn new(requested: bool, rate: f64, page: &impl Page) -> Self {
        let enabled = requested && page.has_background() && !page.prefers_reduced_motion();
        Self { enabled, rate }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            rate: 0.0,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// CSS transform for a given page offset.
    pub fn transform(&self, scroll_y: f64) -> String {
        format!("translate3d(0, {}px, 0)", scroll_y * self.rate)
    }

    pub fn on_scroll<P: Page>(&self, page: &mut P, scroll_y: f64) {
        if !self.enabled {
            return;
        }
        page.set_style(Target::Background, "transform", &self.transform(scroll_y));
    }
}
