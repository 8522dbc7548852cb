// src/modal.rs
//
// Fullscreen modal lifecycle.
//
// Opening flags the modal active and locks page scrolling right away, then
// fades it in on the next timer tick so the opacity transition has a
// rendered starting point. Closing fades out first and only drops the flag
// (and the scroll lock) once the transition has had time to finish.
//
// Both second halves run on cancellable timers: opening cancels a pending
// hide and closing cancels a pending show, so the most recent request
// always decides the final state.

use crate::controller::Surface;
use crate::event::{EventOutcome, Key, UiEvent};
use crate::page::{Page, Target, ids};
use crate::scheduler::{Deferred, Scheduler};
use crate::state::{HIDDEN, UiState, VISIBLE};

pub struct ModalLifecycle {
    /// False when `#fullscreenModal` is missing; every operation is then a no-op.
    enabled: bool,
    open_delay_ms: u32,
    close_delay_ms: u32,
}

impl ModalLifecycle {
    pub fn new(enabled: bool, open_delay_ms: u32, close_delay_ms: u32) -> Self {
        Self {
            enabled,
            open_delay_ms,
            close_delay_ms,
        }
    }

    pub fn disabled() -> Self {
        Self::new(false, 0, 0)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Operations
    // ═══════════════════════════════════════════════════════════════════

    /// Show the modal. Re-opening an open modal re-applies the same state.
    pub fn open<P: Page, S: Scheduler>(&self, state: &mut UiState, surface: &mut Surface<'_, P, S>) {
        if !self.enabled {
            return;
        }

        if surface.timers.cancel_matching(Deferred::HideModal) > 0 {
            log::debug!("modal: open interrupts pending close");
        }
        surface.timers.cancel_matching(Deferred::ShowModal);

        state.modal.active = true;
        surface.page.set_class(ids::FULLSCREEN_MODAL, ids::ACTIVE_CLASS, true);

        state.scroll_locked = true;
        surface.page.set_style(Target::Body, "overflow", "hidden");

        surface.defer(Deferred::ShowModal, self.open_delay_ms);
    }

    /// Hide the modal. Closing a closed modal changes nothing visible.
    pub fn close<P: Page, S: Scheduler>(&self, state: &mut UiState, surface: &mut Surface<'_, P, S>) {
        if !self.enabled {
            return;
        }

        if surface.timers.cancel_matching(Deferred::ShowModal) > 0 {
            log::debug!("modal: close interrupts pending open");
        }
        surface.timers.cancel_matching(Deferred::HideModal);

        state.modal.opacity = HIDDEN;
        surface
            .page
            .set_style(Target::Element(ids::FULLSCREEN_MODAL), "opacity", "0");

        surface.defer(Deferred::HideModal, self.close_delay_ms);
    }

    /// Deferred half of `open`.
    pub fn finish_show<P: Page>(&self, state: &mut UiState, page: &mut P) {
        // A close in between would have cancelled this timer; keep the
        // ordering invariant even if a platform fires late.
        if !state.modal.active {
            return;
        }
        state.modal.opacity = VISIBLE;
        page.set_style(Target::Element(ids::FULLSCREEN_MODAL), "opacity", "1");
    }

    /// Deferred half of `close`.
    pub fn finish_hide<P: Page>(&self, state: &mut UiState, page: &mut P) {
        if state.modal.opacity != HIDDEN {
            return;
        }
        state.modal.active = false;
        page.set_class(ids::FULLSCREEN_MODAL, ids::ACTIVE_CLASS, false);

        state.scroll_locked = false;
        page.set_style(Target::Body, "overflow", "");
    }

    // ═══════════════════════════════════════════════════════════════════
    // Triggers
    // ═══════════════════════════════════════════════════════════════════

    /// React to the events that open or close the modal.
    pub fn handle_event<P: Page, S: Scheduler>(
        &self,
        event: &UiEvent,
        state: &mut UiState,
        surface: &mut Surface<'_, P, S>,
    ) -> EventOutcome {
        match event {
            UiEvent::ZoomClick => {
                self.open(state, surface);
                // Keep the click from reaching the image container beneath.
                EventOutcome::stop_propagation()
            }

            UiEvent::MainImageDoubleClick => {
                self.open(state, surface);
                EventOutcome::IGNORED
            }

            UiEvent::CloseClick | UiEvent::ModalClick { on_backdrop: true } => {
                self.close(state, surface);
                EventOutcome::IGNORED
            }

            UiEvent::KeyDown {
                key: Key::Escape, ..
            } if state.modal.active => {
                self.close(state, surface);
                EventOutcome::IGNORED
            }

            _ => EventOutcome::IGNORED,
        }
    }
}
