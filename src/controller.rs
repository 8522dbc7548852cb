// src/controller.rs
//
// The gallery interaction controller.
//
// Owns the UI state, the deferred-task queue and one instance of each
// behaviour (modal, smooth scroll, image fade-in, keyboard, parallax).
// The platform feeds it `UiEvent`s and fired timer ids; everything it does
// to the page goes back out through the `Page` trait.

use crate::config::GalleryConfig;
use crate::event::{EventOutcome, UiEvent};
use crate::images::ImageLoader;
use crate::keyboard::KeyboardNav;
use crate::modal::ModalLifecycle;
use crate::navigation::SmoothScroll;
use crate::page::{Page, ids};
use crate::parallax::Parallax;
use crate::scheduler::{Deferred, DeferredQueue, ManualScheduler, Scheduler, TimerId};
use crate::state::UiState;

/// Mutable access to the page and timers, handed to one behaviour at a time.
pub struct Surface<'a, P, S> {
    pub page: &'a mut P,
    pub timers: &'a mut DeferredQueue,
    pub scheduler: &'a mut S,
}

impl<P, S: Scheduler> Surface<'_, P, S> {
    pub fn defer(&mut self, task: Deferred, delay_ms: u32) -> TimerId {
        self.timers.defer(&mut *self.scheduler, task, delay_ms)
    }
}

/// Which structural elements were found when the controller was wired.
///
/// A missing element silently disables the behaviour that depends on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Wiring {
    pub zoom_button: bool,
    pub close_button: bool,
    pub modal: bool,
    pub main_image: bool,
    pub background: bool,
    pub images: usize,
    pub parallax: bool,
}

impl Wiring {
    pub fn detect<P: Page>(page: &P) -> Self {
        Self {
            zoom_button: page.has_element(ids::ZOOM_BUTTON),
            close_button: page.has_element(ids::CLOSE_BUTTON),
            modal: page.has_element(ids::FULLSCREEN_MODAL),
            main_image: page.has_element(ids::MAIN_IMAGE),
            background: page.has_background(),
            images: 0,
            parallax: false,
        }
    }

    /// Ids of expected elements that are absent.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.zoom_button, ids::ZOOM_BUTTON),
            (self.close_button, ids::CLOSE_BUTTON),
            (self.modal, ids::FULLSCREEN_MODAL),
            (self.main_image, ids::MAIN_IMAGE),
        ]
        .into_iter()
        .filter(|(present, _)| !present)
        .map(|(_, id)| id)
        .collect()
    }
}

/// Gallery interaction controller.
///
/// Build it, call `wire()` once the page structure is ready, then feed it
/// events with `dispatch()` and fired timers with `fire()`.
pub struct GalleryController<P, S> {
    page: P,
    scheduler: S,
    config: GalleryConfig,

    /// All transient UI state.
    state: UiState,

    /// Tasks waiting on a platform timer.
    timers: DeferredQueue,

    /// Set by `wire()`; None until then.
    wiring: Option<Wiring>,

    modal: ModalLifecycle,
    navigator: SmoothScroll,
    images: ImageLoader,
    keyboard: KeyboardNav,
    parallax: Parallax,
}

impl<P: Page, S: Scheduler> GalleryController<P, S> {
    pub fn new(page: P, scheduler: S, config: GalleryConfig) -> Self {
        Self::with_state(page, scheduler, config, UiState::new())
    }

    /// Build around an existing UI state.
    pub fn with_state(page: P, scheduler: S, config: GalleryConfig, state: UiState) -> Self {
        Self {
            page,
            scheduler,
            state,
            timers: DeferredQueue::new(),
            wiring: None,
            modal: ModalLifecycle::disabled(),
            navigator: SmoothScroll::new(config.header_offset),
            images: ImageLoader::new(config.fade_delay_ms),
            keyboard: KeyboardNav::new(false),
            parallax: Parallax::disabled(),
            config,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Initialization
    // ═══════════════════════════════════════════════════════════════════

    /// Attach every behaviour to the page. Runs once; later calls return
    /// the first result.
    pub fn wire(&mut self) -> Wiring {
        if let Some(wiring) = self.wiring {
            return wiring;
        }

        let mut wiring = Wiring::detect(&self.page);
        for id in wiring.missing() {
            log::debug!("gallery: #{} not found, dependent feature disabled", id);
        }

        self.modal = ModalLifecycle::new(
            wiring.modal,
            self.config.open_delay_ms,
            self.config.close_delay_ms,
        );
        self.keyboard = KeyboardNav::new(wiring.zoom_button);
        self.parallax = Parallax::new(self.config.parallax, self.config.parallax_rate, &self.page);
        wiring.parallax = self.parallax.is_enabled();

        let mut surface = Surface {
            page: &mut self.page,
            timers: &mut self.timers,
            scheduler: &mut self.scheduler,
        };
        wiring.images = self.images.wire(&mut self.state, &mut surface);

        self.wiring = Some(wiring);
        log::info!("Gallery initialized ({} images)", wiring.images);
        wiring
    }

    // ═══════════════════════════════════════════════════════════════════
    // Event dispatch
    // ═══════════════════════════════════════════════════════════════════

    /// Handle one event. The caller applies the returned outcome to the
    /// originating DOM event.
    pub fn dispatch(&mut self, event: UiEvent) -> EventOutcome {
        if self.wiring.is_none() {
            return EventOutcome::IGNORED;
        }

        let mut surface = Surface {
            page: &mut self.page,
            timers: &mut self.timers,
            scheduler: &mut self.scheduler,
        };

        match &event {
            UiEvent::NavClick { href } => self.navigator.activate(surface.page, href.as_deref()),

            UiEvent::KeyDown { key, focused_id } => {
                // Both listeners see every key, as separate document handlers would.
                let mut outcome = self.modal.handle_event(&event, &mut self.state, &mut surface);
                if self.keyboard.opens_modal(key, focused_id.as_deref()) {
                    self.modal.open(&mut self.state, &mut surface);
                    outcome = outcome.merge(EventOutcome::prevent_default());
                }
                outcome
            }

            UiEvent::ImageLoaded { image } => {
                self.images.on_loaded(*image, &mut self.state, &mut surface);
                EventOutcome::IGNORED
            }

            UiEvent::ImageFailed { image } => {
                self.images.on_failed(*image, &mut self.state, &mut surface);
                EventOutcome::IGNORED
            }

            UiEvent::Scrolled { scroll_y } => {
                self.parallax.on_scroll(surface.page, *scroll_y);
                EventOutcome::IGNORED
            }

            UiEvent::ZoomClick
            | UiEvent::MainImageDoubleClick
            | UiEvent::CloseClick
            | UiEvent::ModalClick { .. } => {
                self.modal.handle_event(&event, &mut self.state, &mut surface)
            }
        }
    }

    /// Run the task behind a fired timer. Cancelled or unknown ids are ignored.
    pub fn fire(&mut self, id: TimerId) {
        let Some(task) = self.timers.take(id) else {
            return;
        };

        match task {
            Deferred::ShowModal => self.modal.finish_show(&mut self.state, &mut self.page),
            Deferred::HideModal => self.modal.finish_hide(&mut self.state, &mut self.page),
            Deferred::FadeInImage(image) => {
                self.images.finish_fade(image, &mut self.state, &mut self.page)
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Direct operations
    // ═══════════════════════════════════════════════════════════════════

    pub fn open_modal(&mut self) {
        let mut surface = Surface {
            page: &mut self.page,
            timers: &mut self.timers,
            scheduler: &mut self.scheduler,
        };
        self.modal.open(&mut self.state, &mut surface);
    }

    pub fn close_modal(&mut self) {
        let mut surface = Surface {
            page: &mut self.page,
            timers: &mut self.timers,
            scheduler: &mut self.scheduler,
        };
        self.modal.close(&mut self.state, &mut surface);
    }

    // ═══════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn wiring(&self) -> Option<Wiring> {
        self.wiring
    }

    /// Number of deferred tasks still waiting on a timer.
    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }
}

impl<P: Page> GalleryController<P, ManualScheduler> {
    /// Move virtual time forward, firing every timer that comes due.
    pub fn advance(&mut self, ms: u64) {
        let until = self.scheduler.now_ms() + ms;
        while let Some(id) = self.scheduler.pop_due(until) {
            self.fire(id);
        }
        self.scheduler.set_now(until);
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IMAGE_FAILED_ALT;
    use crate::event::Key;
    use crate::page::{ImageId, MemoryPage, Target};
    use crate::state::ImageLoadState;
    use crate::test_log;
    use log::Level;

    fn gallery_page() -> MemoryPage {
        MemoryPage::gallery()
            .with_section("gallery", 1200.0)
            .with_section("about", 2400.0)
            .with_image("hero.jpg", true)
            .with_image("cat-1.jpg", false)
    }

    fn controller(page: MemoryPage) -> GalleryController<MemoryPage, ManualScheduler> {
        let mut controller =
            GalleryController::new(page, ManualScheduler::new(), GalleryConfig::default());
        controller.wire();
        controller
    }

    fn key(key: Key, focused: Option<&str>) -> UiEvent {
        UiEvent::KeyDown {
            key,
            focused_id: focused.map(str::to_string),
        }
    }

    #[test]
    fn test_wire_reports_structure() {
        let mut controller =
            GalleryController::new(gallery_page(), ManualScheduler::new(), GalleryConfig::default());
        let wiring = controller.wire();

        assert!(wiring.modal && wiring.zoom_button && wiring.close_button && wiring.main_image);
        assert_eq!(wiring.images, 2);
        assert!(!wiring.parallax);
        assert!(wiring.missing().is_empty());

        // Second call is a no-op.
        assert_eq!(controller.wire(), wiring);
        assert_eq!(controller.state().images.len(), 2);
    }

    #[test]
    fn test_initialization_logged_once() {
        let mut controller =
            GalleryController::new(gallery_page(), ManualScheduler::new(), GalleryConfig::default());

        let (_, lines) = test_log::capture(|| {
            controller.wire();
            controller.wire();
        });

        assert_eq!(
            test_log::at(&lines, Level::Info),
            vec!["Gallery initialized (2 images)"]
        );
        assert!(test_log::at(&lines, Level::Warn).is_empty());
    }

    #[test]
    fn test_failed_image_warns_once_through_dispatch() {
        let mut controller = controller(gallery_page());

        let (_, lines) = test_log::capture(|| {
            controller.dispatch(UiEvent::ImageFailed { image: ImageId(1) });
            controller.dispatch(UiEvent::ImageFailed { image: ImageId(1) });
        });

        assert_eq!(
            test_log::at(&lines, Level::Warn),
            vec!["Failed to load image: cat-1.jpg"]
        );
    }

    #[test]
    fn test_events_before_wiring_are_ignored() {
        let mut controller =
            GalleryController::new(gallery_page(), ManualScheduler::new(), GalleryConfig::default());
        controller.dispatch(UiEvent::ZoomClick);
        controller.advance(1_000);

        assert!(!controller.state().modal.active);
    }

    #[test]
    fn test_zoom_then_escape_scenario() {
        let mut controller = controller(gallery_page());

        controller.dispatch(UiEvent::ZoomClick);
        assert!(controller.state().modal.active);
        assert!(controller.state().scroll_locked);

        controller.advance(10);
        assert!(controller.state().modal.is_shown());

        controller.dispatch(key(Key::Escape, None));
        assert_eq!(controller.state().modal.opacity, 0.0);
        assert!(controller.state().modal.active);

        controller.advance(300);
        assert!(controller.state().modal.is_hidden());
        assert!(!controller.state().scroll_locked);
    }

    #[test]
    fn test_enter_on_zoom_button_matches_click() {
        let mut by_key = controller(gallery_page());
        let mut by_click = controller(gallery_page());

        let outcome = by_key.dispatch(key(Key::Enter, Some(ids::ZOOM_BUTTON)));
        assert!(outcome.prevent_default);
        by_click.dispatch(UiEvent::ZoomClick);

        by_key.advance(50);
        by_click.advance(50);
        assert_eq!(by_key.state().modal, by_click.state().modal);
        assert_eq!(by_key.state().scroll_locked, by_click.state().scroll_locked);
        assert_eq!(
            by_key.page().style(Target::Body, "overflow"),
            by_click.page().style(Target::Body, "overflow")
        );
    }

    #[test]
    fn test_space_elsewhere_does_nothing() {
        let mut controller = controller(gallery_page());
        let outcome = controller.dispatch(key(Key::Space, Some("searchBox")));

        assert_eq!(outcome, EventOutcome::IGNORED);
        assert!(!controller.state().modal.active);
    }

    #[test]
    fn test_last_operation_wins_when_spaced_out() {
        let mut controller = controller(gallery_page());
        let sequence = [true, false, false, true, true, false, true];

        for open in sequence {
            if open {
                controller.dispatch(UiEvent::MainImageDoubleClick);
            } else {
                controller.dispatch(UiEvent::CloseClick);
            }
            controller.advance(300);
            assert_eq!(controller.state().modal.active, open);
            assert_eq!(controller.state().scroll_locked, open);
        }
    }

    #[test]
    fn test_rapid_toggling_settles_on_last_request() {
        let mut controller = controller(gallery_page());

        controller.dispatch(UiEvent::ZoomClick);
        controller.advance(5);
        controller.dispatch(UiEvent::CloseClick);
        controller.advance(100);
        controller.dispatch(UiEvent::ZoomClick);
        controller.advance(1);
        controller.dispatch(UiEvent::ModalClick { on_backdrop: true });
        controller.advance(1_000);

        assert!(controller.state().modal.is_hidden());
        assert!(!controller.state().scroll_locked);
        assert_eq!(controller.pending_tasks(), 0);
    }

    #[test]
    fn test_nav_click_scrolls_once() {
        let mut controller = controller(gallery_page());

        let outcome = controller.dispatch(UiEvent::NavClick {
            href: Some("#about".to_string()),
        });
        assert!(outcome.prevent_default);
        assert_eq!(controller.page().scroll_requests(), &[2320.0]);

        controller.dispatch(UiEvent::NavClick {
            href: Some("#missing".to_string()),
        });
        assert_eq!(controller.page().scroll_requests().len(), 1);
    }

    #[test]
    fn test_images_fade_and_fail() {
        let mut controller = controller(gallery_page());

        controller.advance(100);
        assert_eq!(controller.page().style(Target::Image(ImageId(0)), "opacity"), Some("1"));

        controller.dispatch(UiEvent::ImageFailed { image: ImageId(1) });
        controller.advance(1_000);
        assert_eq!(controller.page().style(Target::Image(ImageId(1)), "opacity"), Some("0"));
        assert_eq!(controller.page().image_alt(ImageId(1)), Some(IMAGE_FAILED_ALT));
        assert_eq!(controller.state().count_images(ImageLoadState::Errored), 1);
    }

    #[test]
    fn test_missing_modal_degrades_gracefully() {
        let page = gallery_page().without(ids::FULLSCREEN_MODAL);
        let mut controller = controller(page);

        controller.dispatch(UiEvent::ZoomClick);
        controller.dispatch(key(Key::Escape, None));
        controller.advance(1_000);

        assert!(!controller.state().modal.active);
        assert!(!controller.state().scroll_locked);
        assert_eq!(controller.wiring().map(|w| w.missing()), Some(vec![ids::FULLSCREEN_MODAL]));

        // Other behaviours are unaffected.
        controller.dispatch(UiEvent::NavClick {
            href: Some("#gallery".to_string()),
        });
        assert_eq!(controller.page().scroll_requests(), &[1120.0]);
    }

    #[test]
    fn test_parallax_when_enabled() {
        let page = gallery_page().with_background();
        let config = GalleryConfig {
            parallax_rate: 0.5,
            ..GalleryConfig::default().with_parallax(true)
        };
        let mut controller = GalleryController::new(page, ManualScheduler::new(), config);
        assert!(controller.wire().parallax);

        controller.dispatch(UiEvent::Scrolled { scroll_y: 40.0 });
        assert_eq!(
            controller.page().style(Target::Background, "transform"),
            Some("translate3d(0, 20px, 0)")
        );
    }

    #[test]
    fn test_with_state_injects_open_modal() {
        let mut state = UiState::new();
        state.modal.active = true;
        state.modal.opacity = 1.0;
        state.scroll_locked = true;

        let mut controller = GalleryController::with_state(
            gallery_page(),
            ManualScheduler::new(),
            GalleryConfig::default(),
            state,
        );
        controller.wire();

        controller.dispatch(key(Key::Escape, None));
        controller.advance(300);
        assert!(controller.state().modal.is_hidden());
    }
}
