//! WebAssembly bindings via wasm-bindgen for browser integration.
//!
//! This module is only compiled when the `web` feature is enabled.
//!
//! # Usage
//!
//! Build with wasm-pack:
//! ```bash
//! wasm-pack build --target web --features web
//! ```
//!
//! # JavaScript Example
//!
//! ```javascript
//! import init, { gallery_init, gallery_start } from './gallery.js';
//!
//! await init();
//!
//! gallery_init();
//! gallery_start(); // waits for DOMContentLoaded if the page is still loading
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CssStyleDeclaration, Document, Element, Event, EventTarget, HtmlElement,
    HtmlImageElement, KeyboardEvent, ScrollBehavior, ScrollToOptions, Window,
};

use crate::config::GalleryConfig;
use crate::controller::{GalleryController, Wiring};
use crate::error::{GalleryError, GalleryResult};
use crate::event::{EventOutcome, Key, UiEvent};
use crate::page::{ImageId, ImageInfo, Page, Target, ids, is_still_loading};
use crate::scheduler::{Scheduler, TimerId};

const NO_MOTION_PREFERENCE: &str = "(prefers-reduced-motion: no-preference)";

type DomController = GalleryController<DomPage, BrowserScheduler>;
type SharedController = Rc<RefCell<DomController>>;

thread_local! {
    static GALLERY: RefCell<Option<Gallery>> = const { RefCell::new(None) };
}

/// A wired gallery: the controller plus the listeners feeding it.
struct Gallery {
    controller: SharedController,
    /// Dropping these detaches the handlers.
    _listeners: Vec<EventListener>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Initialization
// ═══════════════════════════════════════════════════════════════════════════

/// Initialize the wasm module. Call this once before using any other functions.
/// Sets up panic hooks and console logging.
#[wasm_bindgen]
pub fn gallery_init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

/// Attach the gallery with default settings.
#[wasm_bindgen]
pub fn gallery_start() -> Result<(), JsValue> {
    gallery_start_with_config(GalleryOptions::default())
}

/// Attach the gallery once the page structure is ready.
///
/// Safe to call more than once; only the first call wires anything.
#[wasm_bindgen]
pub fn gallery_start_with_config(options: GalleryOptions) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or(GalleryError::NoWindow)?;
    let document = window.document().ok_or(GalleryError::NoDocument)?;
    let config = GalleryConfig::from(options);

    if is_still_loading(&document.ready_state()) {
        EventListener::once(&document, "DOMContentLoaded", move |_| {
            if let Err(err) = attach(config) {
                log::error!("gallery: {}", err);
            }
        })
        .forget();
        return Ok(());
    }

    attach(config).map_err(JsValue::from)
}

// ═══════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════

/// Gallery settings constructible from JavaScript.
#[wasm_bindgen]
#[derive(Clone, Copy)]
pub struct GalleryOptions {
    pub open_delay_ms: u32,
    pub close_delay_ms: u32,
    pub fade_delay_ms: u32,
    /// Fixed header height subtracted from anchor scroll targets.
    pub header_offset: f64,
    /// Enable the background parallax effect.
    pub parallax: bool,
    pub parallax_rate: f64,
}

#[wasm_bindgen]
impl GalleryOptions {
    /// Create options with default values.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for GalleryOptions {
    fn default() -> Self {
        let config = GalleryConfig::default();
        Self {
            open_delay_ms: config.open_delay_ms,
            close_delay_ms: config.close_delay_ms,
            fade_delay_ms: config.fade_delay_ms,
            header_offset: config.header_offset,
            parallax: config.parallax,
            parallax_rate: config.parallax_rate,
        }
    }
}

impl From<GalleryOptions> for GalleryConfig {
    fn from(o: GalleryOptions) -> Self {
        Self {
            open_delay_ms: o.open_delay_ms,
            close_delay_ms: o.close_delay_ms,
            fade_delay_ms: o.fade_delay_ms,
            header_offset: o.header_offset,
            parallax: o.parallax,
            parallax_rate: o.parallax_rate,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Page control
// ═══════════════════════════════════════════════════════════════════════════

/// Open the fullscreen modal programmatically.
#[wasm_bindgen]
pub fn gallery_open() {
    with_gallery(|controller| controller.open_modal());
}

/// Close the fullscreen modal programmatically.
#[wasm_bindgen]
pub fn gallery_close() {
    with_gallery(|controller| controller.close_modal());
}

/// Whether the modal is currently flagged active.
#[wasm_bindgen]
pub fn gallery_is_open() -> bool {
    GALLERY.with(|gallery| {
        gallery
            .borrow()
            .as_ref()
            .and_then(|g| g.controller.try_borrow().ok().map(|c| c.state().modal.active))
            .unwrap_or(false)
    })
}

fn with_gallery(f: impl FnOnce(&mut DomController)) {
    let controller = GALLERY.with(|gallery| gallery.borrow().as_ref().map(|g| Rc::clone(&g.controller)));
    match controller {
        Some(controller) => {
            with_controller(&controller, f);
        }
        None => log::warn!("gallery: not started"),
    }
}

fn with_controller<R>(controller: &SharedController, f: impl FnOnce(&mut DomController) -> R) -> Option<R> {
    match controller.try_borrow_mut() {
        Ok(mut controller) => Some(f(&mut controller)),
        Err(_) => {
            log::warn!("gallery: controller busy, event dropped");
            None
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Wiring
// ═══════════════════════════════════════════════════════════════════════════

fn attach(config: GalleryConfig) -> GalleryResult<()> {
    if GALLERY.with(|gallery| gallery.borrow().is_some()) {
        return Ok(());
    }

    let window = web_sys::window().ok_or(GalleryError::NoWindow)?;
    let document = window.document().ok_or(GalleryError::NoDocument)?;
    let page = DomPage::new(window.clone(), document.clone())?;

    let controller: SharedController = Rc::new_cyclic(|weak| {
        RefCell::new(GalleryController::new(
            page,
            BrowserScheduler::new(weak.clone()),
            config,
        ))
    });

    let wiring = controller.borrow_mut().wire();
    let listeners = listen(&window, &document, &controller, wiring)?;

    GALLERY.with(|gallery| {
        *gallery.borrow_mut() = Some(Gallery {
            controller,
            _listeners: listeners,
        })
    });
    Ok(())
}

/// Register one DOM listener that translates its event and dispatches it.
fn on(
    target: &EventTarget,
    event_type: &'static str,
    controller: &SharedController,
    translate: impl Fn(&Event) -> Option<UiEvent> + 'static,
) -> EventListener {
    let controller = Rc::clone(controller);
    EventListener::new(target, event_type, move |event| {
        let Some(ui_event) = translate(event) else {
            return;
        };
        if let Some(outcome) = with_controller(&controller, |c| c.dispatch(ui_event)) {
            apply(event, outcome);
        }
    })
}

fn apply(event: &Event, outcome: EventOutcome) {
    if outcome.prevent_default {
        event.prevent_default();
    }
    if outcome.stop_propagation {
        event.stop_propagation();
    }
}

fn listen(
    window: &Window,
    document: &Document,
    controller: &SharedController,
    wiring: Wiring,
) -> GalleryResult<Vec<EventListener>> {
    let mut listeners = Vec::new();

    // Modal triggers
    if let Some(zoom) = document.get_element_by_id(ids::ZOOM_BUTTON) {
        listeners.push(on(&zoom, "click", controller, |_| Some(UiEvent::ZoomClick)));
    }
    if let Some(main_image) = document.get_element_by_id(ids::MAIN_IMAGE) {
        listeners.push(on(&main_image, "dblclick", controller, |_| {
            Some(UiEvent::MainImageDoubleClick)
        }));
    }
    if let Some(close) = document.get_element_by_id(ids::CLOSE_BUTTON) {
        listeners.push(on(&close, "click", controller, |_| Some(UiEvent::CloseClick)));
    }
    if let Some(modal) = document.get_element_by_id(ids::FULLSCREEN_MODAL) {
        let modal_target: EventTarget = modal.clone().into();
        listeners.push(on(&modal, "click", controller, move |event| {
            let on_backdrop = event.target().is_some_and(|target| target == modal_target);
            Some(UiEvent::ModalClick { on_backdrop })
        }));
    }

    // Keyboard: Escape for the modal, Space/Enter on the zoom button
    let doc = document.clone();
    listeners.push(on(document, "keydown", controller, move |event| {
        let key = event.dyn_ref::<KeyboardEvent>()?.key();
        let focused_id = doc
            .active_element()
            .map(|element| element.id())
            .filter(|id| !id.is_empty());
        Some(UiEvent::KeyDown {
            key: Key::from_dom(&key),
            focused_id,
        })
    }));

    // Smooth-scrolling anchors
    let links = document
        .query_selector_all(&format!(".{}", ids::NAV_LINK_CLASS))
        .map_err(|e| GalleryError::js("collecting nav links", e))?;
    for index in 0..links.length() {
        let Some(link) = links.get(index).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let anchor = link.clone();
        listeners.push(on(&link, "click", controller, move |_| {
            Some(UiEvent::NavClick {
                href: anchor.get_attribute("href"),
            })
        }));
    }

    // Image load transitions
    let images: Vec<HtmlImageElement> = controller.borrow().page().image_elements().to_vec();
    for (index, image) in images.iter().enumerate() {
        let id = ImageId(index);
        listeners.push(on(image, "load", controller, move |_| {
            Some(UiEvent::ImageLoaded { image: id })
        }));
        listeners.push(on(image, "error", controller, move |_| {
            Some(UiEvent::ImageFailed { image: id })
        }));
    }

    // Parallax
    if wiring.parallax {
        let win = window.clone();
        listeners.push(on(window, "scroll", controller, move |_| {
            Some(UiEvent::Scrolled {
                scroll_y: win.page_y_offset().unwrap_or(0.0),
            })
        }));
    }

    log::debug!("gallery: {} listeners attached", listeners.len());
    Ok(listeners)
}

// ═══════════════════════════════════════════════════════════════════════════
// Timers
// ═══════════════════════════════════════════════════════════════════════════

/// `setTimeout`-backed scheduler that fires back into the shared controller.
pub struct BrowserScheduler {
    controller: Weak<RefCell<DomController>>,
}

impl BrowserScheduler {
    fn new(controller: Weak<RefCell<DomController>>) -> Self {
        Self { controller }
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&mut self, id: TimerId, delay_ms: u32) {
        let controller = self.controller.clone();
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            if let Some(controller) = controller.upgrade() {
                with_controller(&controller, |c| c.fire(id));
            }
        });
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Document
// ═══════════════════════════════════════════════════════════════════════════

/// `Page` over the live DOM.
pub struct DomPage {
    window: Window,
    document: Document,
    /// Captured at wiring time, in document order.
    images: Vec<HtmlImageElement>,
    background: Option<HtmlElement>,
}

impl DomPage {
    pub fn new(window: Window, document: Document) -> GalleryResult<Self> {
        let nodes = document
            .query_selector_all("img")
            .map_err(|e| GalleryError::js("collecting images", e))?;
        let images = (0..nodes.length())
            .filter_map(|index| nodes.get(index))
            .filter_map(|node| node.dyn_into::<HtmlImageElement>().ok())
            .collect();

        let background = document
            .query_selector(&format!(".{}", ids::BACKGROUND_CLASS))
            .map_err(|e| GalleryError::js("finding background", e))?
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());

        Ok(Self {
            window,
            document,
            images,
            background,
        })
    }

    pub fn image_elements(&self) -> &[HtmlImageElement] {
        &self.images
    }

    fn style(&self, target: Target<'_>) -> Option<CssStyleDeclaration> {
        match target {
            Target::Element(id) => self
                .document
                .get_element_by_id(id)
                .and_then(|element| element.dyn_into::<HtmlElement>().ok())
                .map(|element| element.style()),
            Target::Body => self.document.body().map(|body| body.style()),
            Target::Image(image) => self.images.get(image.0).map(|image| image.style()),
            Target::Background => self.background.as_ref().map(|element| element.style()),
        }
    }
}

impl Page for DomPage {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
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
                src: image.src(),
                complete: image.complete(),
            })
            .collect()
    }

    fn set_class(&mut self, id: &str, class: &str, present: bool) {
        let Some(element) = self.document.get_element_by_id(id) else {
            return;
        };
        let classes = element.class_list();
        let result = if present {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
        if let Err(e) = result {
            log::debug!("gallery: class {} on #{} failed: {:?}", class, id, e);
        }
    }

    fn set_style(&mut self, target: Target<'_>, property: &str, value: &str) {
        let Some(style) = self.style(target) else {
            return;
        };
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(e) = result {
            log::debug!("gallery: style {} on {:?} failed: {:?}", property, target, e);
        }
    }

    fn set_image_alt(&mut self, image: ImageId, alt: &str) {
        if let Some(image) = self.images.get(image.0) {
            image.set_alt(alt);
        }
    }

    fn element_top(&self, id: &str) -> Option<f64> {
        self.document
            .get_element_by_id(id)
            .map(|element| element.get_bounding_client_rect().top())
    }

    fn scroll_y(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn prefers_reduced_motion(&self) -> bool {
        let no_preference = self
            .window
            .match_media(NO_MOTION_PREFERENCE)
            .ok()
            .flatten()
            .is_some_and(|query| query.matches());
        !no_preference
    }
}
