// src/page/memory.rs
//
// In-memory document used by unit tests and the demo binary.

use std::collections::{BTreeSet, HashMap};

use super::{ImageId, ImageInfo, Page, Target, ids};

#[derive(Debug, Clone, Default)]
struct MemoryElement {
    classes: BTreeSet<String>,
    styles: HashMap<String, String>,
    /// Offset from the top of the document.
    doc_top: f64,
}

#[derive(Debug, Clone)]
struct MemoryImage {
    src: String,
    complete: bool,
    alt: String,
    styles: HashMap<String, String>,
}

/// A fake page: element ids, inline styles, images and a scroll position.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    elements: HashMap<String, MemoryElement>,
    body_styles: HashMap<String, String>,
    images: Vec<MemoryImage>,
    background: Option<HashMap<String, String>>,
    scroll_y: f64,
    scroll_requests: Vec<f64>,
    reduced_motion: bool,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page carrying every element the gallery markup defines.
    pub fn gallery() -> Self {
        let mut page = Self::new();
        for id in [
            ids::ZOOM_BUTTON,
            ids::CLOSE_BUTTON,
            ids::FULLSCREEN_MODAL,
            ids::MAIN_IMAGE,
        ] {
            page.elements.insert(id.to_string(), MemoryElement::default());
        }
        page
    }

    // ─────────────────────────────────────────────────────────────────────
    // Builders
    // ─────────────────────────────────────────────────────────────────────

    pub fn with_section(mut self, id: &str, doc_top: f64) -> Self {
        self.elements.insert(
            id.to_string(),
            MemoryElement {
                doc_top,
                ..MemoryElement::default()
            },
        );
        self
    }

    pub fn with_image(mut self, src: &str, complete: bool) -> Self {
        self.images.push(MemoryImage {
            src: src.to_string(),
            complete,
            alt: String::new(),
            styles: HashMap::new(),
        });
        self
    }

    pub fn with_background(mut self) -> Self {
        self.background = Some(HashMap::new());
        self
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }

    pub fn without(mut self, id: &str) -> Self {
        self.elements.remove(id);
        self
    }

    pub fn scrolled_to(mut self, scroll_y: f64) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    // ─────────────────────────────────────────────────────────────────────
    // Inspection
    // ─────────────────────────────────────────────────────────────────────

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|element| element.classes.contains(class))
    }

    pub fn style(&self, target: Target<'_>, property: &str) -> Option<&str> {
        let styles = match target {
            Target::Element(id) => self.elements.get(id).map(|e| &e.styles),
            Target::Body => Some(&self.body_styles),
            Target::Image(image) => self.images.get(image.0).map(|i| &i.styles),
            Target::Background => self.background.as_ref(),
        }?;
        styles.get(property).map(String::as_str)
    }

    pub fn image_alt(&self, image: ImageId) -> Option<&str> {
        self.images.get(image.0).map(|i| i.alt.as_str())
    }

    /// Every smooth scroll requested so far, oldest first.
    pub fn scroll_requests(&self) -> &[f64] {
        &self.scroll_requests
    }

    fn styles_mut(&mut self, target: Target<'_>) -> Option<&mut HashMap<String, String>> {
        match target {
            Target::Element(id) => self.elements.get_mut(id).map(|e| &mut e.styles),
            Target::Body => Some(&mut self.body_styles),
            Target::Image(image) => self.images.get_mut(image.0).map(|i| &mut i.styles),
            Target::Background => self.background.as_mut(),
        }
    }
}

impl Page for MemoryPage {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn has_background(&self) -> bool {
        self.background.is_some()
    }

    fn images(&self) -> Vec<ImageInfo> {
        self.images
            .iter()
            .enumerate()
            .map(|(index, image)| ImageInfo {
                id: ImageId(index),
                src: image.src.clone(),
                complete: image.complete,
            })
            .collect()
    }

    fn set_class(&mut self, id: &str, class: &str, present: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            if present {
                element.classes.insert(class.to_string());
            } else {
                element.classes.remove(class);
            }
        }
    }

    fn set_style(&mut self, target: Target<'_>, property: &str, value: &str) {
        if let Some(styles) = self.styles_mut(target) {
            if value.is_empty() {
                styles.remove(property);
            } else {
                styles.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn set_image_alt(&mut self, image: ImageId, alt: &str) {
        if let Some(image) = self.images.get_mut(image.0) {
            image.alt = alt.to_string();
        }
    }

    fn element_top(&self, id: &str) -> Option<f64> {
        self.elements
            .get(id)
            .map(|element| element.doc_top - self.scroll_y)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        self.scroll_requests.push(top);
        // The animation itself is not modelled; land on the target.
        self.scroll_y = top.max(0.0);
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }
}
