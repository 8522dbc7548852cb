// src/navigation.rs
//
// Smooth scrolling for same-page `.nav-link` anchors.

use crate::event::EventOutcome;
use crate::page::Page;

/// Extract the element id from a same-page fragment reference.
///
/// Returns None for anything that is not a `#...` href.
pub fn fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#')
}

/// Intercepts anchor navigation and animates the scroll instead.
///
/// Stateless: every activation measures the current layout afresh.
pub struct SmoothScroll {
    /// Height of the fixed header the target must clear.
    header_offset: f64,
}

impl SmoothScroll {
    pub fn new(header_offset: f64) -> Self {
        Self { header_offset }
    }

    /// Absolute scroll offset that puts `id` just below the header.
    pub fn destination<P: Page>(&self, page: &P, id: &str) -> Option<f64> {
        let top = page.element_top(id)?;
        Some(top + page.scroll_y() - self.header_offset)
    }

    /// Handle a click on a nav link with the given `href` attribute.
    ///
    /// Fragment links never navigate; an unresolvable fragment just does
    /// nothing. Other links keep their default behaviour.
    pub fn activate<P: Page>(&self, page: &mut P, href: Option<&str>) -> EventOutcome {
        let Some(target_id) = href.and_then(fragment) else {
            return EventOutcome::IGNORED;
        };

        if let Some(top) = self.destination(page, target_id) {
            log::debug!("navigation: scrolling to #{} at {}", target_id, top);
            page.smooth_scroll_to(top);
        }

        EventOutcome::prevent_default()
    }
}
