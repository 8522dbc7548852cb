// src/images.rs
//
// Progressive image fade-in.
//
// Every image starts transparent. Once its resource is available (either
// already cached at wiring time, or on its load signal) a short timer fades
// it in. A failed image stays transparent and gets a fallback alt text.

use crate::config::{IMAGE_FAILED_ALT, IMAGE_TRANSITION};
use crate::controller::Surface;
use crate::page::{ImageId, Page, Target};
use crate::scheduler::{Deferred, Scheduler};
use crate::state::{ImageLoadState, ImageState, UiState, VISIBLE};

pub struct ImageLoader {
    fade_delay_ms: u32,
}

impl ImageLoader {
    pub fn new(fade_delay_ms: u32) -> Self {
        Self { fade_delay_ms }
    }

    /// Hide every image on the page and track its load state.
    ///
    /// Returns the number of images prepared.
    pub fn wire<P: Page, S: Scheduler>(&self, state: &mut UiState, surface: &mut Surface<'_, P, S>) -> usize {
        let images = surface.page.images();

        for info in &images {
            surface.page.set_style(Target::Image(info.id), "opacity", "0");
            surface
                .page
                .set_style(Target::Image(info.id), "transition", IMAGE_TRANSITION);

            let mut image = ImageState::new(info.id, info.src.clone());
            if info.complete {
                image.load = ImageLoadState::Loaded;
                surface.defer(Deferred::FadeInImage(info.id), self.fade_delay_ms);
            }
            state.images.push(image);
        }

        images.len()
    }

    /// Load signal for one image.
    pub fn on_loaded<P: Page, S: Scheduler>(
        &self,
        id: ImageId,
        state: &mut UiState,
        surface: &mut Surface<'_, P, S>,
    ) {
        let Some(image) = state.image_mut(id) else {
            return;
        };
        if image.load.is_terminal() {
            return;
        }

        image.load = ImageLoadState::Loaded;
        surface.defer(Deferred::FadeInImage(id), self.fade_delay_ms);
    }

    /// Error signal for one image. Warns once and swaps in the fallback alt.
    pub fn on_failed<P: Page, S: Scheduler>(
        &self,
        id: ImageId,
        state: &mut UiState,
        surface: &mut Surface<'_, P, S>,
    ) {
        let Some(image) = state.image_mut(id) else {
            return;
        };
        if image.load == ImageLoadState::Errored {
            return;
        }

        // A broken image can still report `complete`; don't fade it in.
        surface.timers.cancel_matching(Deferred::FadeInImage(id));
        image.load = ImageLoadState::Errored;

        log::warn!("Failed to load image: {}", image.src);
        surface.page.set_image_alt(id, IMAGE_FAILED_ALT);
    }

    /// Deferred fade-in.
    pub fn finish_fade<P: Page>(&self, id: ImageId, state: &mut UiState, page: &mut P) {
        let Some(image) = state.image_mut(id) else {
            return;
        };
        if image.load != ImageLoadState::Loaded {
            return;
        }

        image.opacity = VISIBLE;
        page.set_style(Target::Image(id), "opacity", "1");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;
    use crate::scheduler::{DeferredQueue, ManualScheduler};
    use crate::state::HIDDEN;
    use crate::test_log;
    use log::Level;

    struct Fixture {
        page: MemoryPage,
        timers: DeferredQueue,
        scheduler: ManualScheduler,
        state: UiState,
        loader: ImageLoader,
    }

    impl Fixture {
        fn new(page: MemoryPage) -> Self {
            let mut fx = Self {
                page,
                timers: DeferredQueue::new(),
                scheduler: ManualScheduler::new(),
                state: UiState::new(),
                loader: ImageLoader::new(100),
            };
            let mut surface = Surface {
                page: &mut fx.page,
                timers: &mut fx.timers,
                scheduler: &mut fx.scheduler,
            };
            fx.loader.wire(&mut fx.state, &mut surface);
            fx
        }

        fn loaded(&mut self, id: ImageId) {
            let mut surface = Surface {
                page: &mut self.page,
                timers: &mut self.timers,
                scheduler: &mut self.scheduler,
            };
            self.loader.on_loaded(id, &mut self.state, &mut surface);
        }

        fn failed(&mut self, id: ImageId) {
            let mut surface = Surface {
                page: &mut self.page,
                timers: &mut self.timers,
                scheduler: &mut self.scheduler,
            };
            self.loader.on_failed(id, &mut self.state, &mut surface);
        }

        fn run_until(&mut self, ms: u64) {
            while let Some(id) = self.scheduler.pop_due(ms) {
                if let Some(Deferred::FadeInImage(image)) = self.timers.take(id) {
                    self.loader.finish_fade(image, &mut self.state, &mut self.page);
                }
            }
            self.scheduler.set_now(ms);
        }

        fn opacity(&self, id: ImageId) -> Option<&str> {
            self.page.style(Target::Image(id), "opacity")
        }
    }

    #[test]
    fn test_wiring_hides_every_image() {
        let fx = Fixture::new(
            MemoryPage::new()
                .with_image("cat-1.jpg", false)
                .with_image("cat-2.jpg", false),
        );

        for id in [ImageId(0), ImageId(1)] {
            assert_eq!(fx.opacity(id), Some("0"));
            assert_eq!(
                fx.page.style(Target::Image(id), "transition"),
                Some(IMAGE_TRANSITION)
            );
        }
        assert_eq!(fx.state.count_images(ImageLoadState::Pending), 2);
    }

    #[test]
    fn test_cached_image_fades_in_without_load_signal() {
        let mut fx = Fixture::new(MemoryPage::new().with_image("cached.jpg", true));
        assert_eq!(fx.state.images[0].load, ImageLoadState::Loaded);

        fx.run_until(99);
        assert_eq!(fx.opacity(ImageId(0)), Some("0"));

        fx.run_until(100);
        assert_eq!(fx.opacity(ImageId(0)), Some("1"));
        assert_eq!(fx.state.images[0].opacity, VISIBLE);
    }

    #[test]
    fn test_load_signal_fades_in() {
        let mut fx = Fixture::new(MemoryPage::new().with_image("slow.jpg", false));
        fx.run_until(500);
        assert_eq!(fx.opacity(ImageId(0)), Some("0"));

        fx.loaded(ImageId(0));
        fx.run_until(600);
        assert_eq!(fx.opacity(ImageId(0)), Some("1"));
    }

    #[test]
    fn test_failed_image_stays_hidden_with_fallback_alt() {
        let mut fx = Fixture::new(MemoryPage::new().with_image("missing.jpg", false));

        fx.failed(ImageId(0));
        fx.run_until(1_000);

        assert_eq!(fx.state.images[0].load, ImageLoadState::Errored);
        assert_eq!(fx.state.images[0].opacity, HIDDEN);
        assert_eq!(fx.opacity(ImageId(0)), Some("0"));
        assert_eq!(fx.page.image_alt(ImageId(0)), Some(IMAGE_FAILED_ALT));
    }

    #[test]
    fn test_error_after_cache_hit_cancels_fade() {
        let mut fx = Fixture::new(MemoryPage::new().with_image("broken.jpg", true));
        fx.failed(ImageId(0));
        fx.run_until(1_000);

        assert_eq!(fx.opacity(ImageId(0)), Some("0"));
        assert!(fx.timers.is_empty());
    }

    #[test]
    fn test_signals_are_fire_once() {
        let mut fx = Fixture::new(MemoryPage::new().with_image("missing.jpg", false));

        fx.failed(ImageId(0));
        fx.failed(ImageId(0));
        fx.loaded(ImageId(0));
        fx.run_until(1_000);

        assert_eq!(fx.state.count_images(ImageLoadState::Errored), 1);
        assert_eq!(fx.opacity(ImageId(0)), Some("0"));
        assert_eq!(fx.scheduler.scheduled(), 0);
    }

    #[test]
    fn test_one_warning_per_failed_image() {
        let mut fx = Fixture::new(
            MemoryPage::new()
                .with_image("a.jpg", false)
                .with_image("b.jpg", false),
        );

        let ((), lines) = test_log::capture(|| {
            fx.failed(ImageId(0));
            fx.failed(ImageId(0));
            fx.failed(ImageId(1));
        });

        assert_eq!(
            test_log::at(&lines, Level::Warn),
            vec!["Failed to load image: a.jpg", "Failed to load image: b.jpg"]
        );
        assert_eq!(fx.page.image_alt(ImageId(0)), Some(IMAGE_FAILED_ALT));
        assert_eq!(fx.state.images[0].opacity, HIDDEN);
    }

    #[test]
    fn test_loaded_image_logs_no_warning() {
        let mut fx = Fixture::new(MemoryPage::new().with_image("ok.jpg", false));

        let ((), lines) = test_log::capture(|| {
            fx.loaded(ImageId(0));
            fx.run_until(100);
        });

        assert!(test_log::at(&lines, Level::Warn).is_empty());
        assert_eq!(fx.opacity(ImageId(0)), Some("1"));
    }

    #[test]
    fn test_unknown_image_is_ignored() {
        let mut fx = Fixture::new(MemoryPage::new());
        fx.loaded(ImageId(7));
        fx.failed(ImageId(7));
        assert!(fx.timers.is_empty());
    }
}
