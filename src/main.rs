// src/main.rs
//
// Headless walkthrough of the gallery controller against an in-memory page.
// Drives the same code the browser binding does, on a virtual clock.

use gallery::{
    GalleryConfig, GalleryController, ImageId, ImageLoadState, Key, ManualScheduler, MemoryPage,
    Target, UiEvent, ids,
};

fn report(step: &str, controller: &GalleryController<MemoryPage, ManualScheduler>) {
    let state = controller.state();
    println!(
        "[{:>5} ms] {:<28} modal active={:<5} opacity={} scroll_locked={}",
        controller.now_ms(),
        step,
        state.modal.active,
        state.modal.opacity,
        state.scroll_locked
    );
}

fn main() {
    // --------------------------------
    // Page
    // --------------------------------

    let page = MemoryPage::gallery()
        .with_section("gallery", 640.0)
        .with_section("about", 1800.0)
        .with_image("images/squ-head-cat.jpg", true)
        .with_image("images/thumb-1.jpg", false)
        .with_image("images/thumb-missing.jpg", false)
        .with_background();

    let mut controller =
        GalleryController::new(page, ManualScheduler::new(), GalleryConfig::default());

    println!("Starting gallery walkthrough…");

    let wiring = controller.wire();
    println!(
        "Wired {} images, parallax {}",
        wiring.images,
        if wiring.parallax { "on" } else { "off" }
    );

    // --------------------------------
    // Modal
    // --------------------------------

    controller.dispatch(UiEvent::ZoomClick);
    report("zoom button clicked", &controller);
    controller.advance(10);
    report("fade-in started", &controller);

    controller.dispatch(UiEvent::KeyDown {
        key: Key::Escape,
        focused_id: None,
    });
    report("escape pressed", &controller);
    controller.advance(300);
    report("close finished", &controller);

    controller.dispatch(UiEvent::KeyDown {
        key: Key::Enter,
        focused_id: Some(ids::ZOOM_BUTTON.to_string()),
    });
    controller.advance(10);
    report("enter on zoom button", &controller);
    controller.dispatch(UiEvent::ModalClick { on_backdrop: true });
    controller.advance(300);
    report("backdrop clicked", &controller);

    // --------------------------------
    // Navigation
    // --------------------------------

    for href in ["#about", "#missing", "#gallery"] {
        let outcome = controller.dispatch(UiEvent::NavClick {
            href: Some(href.to_string()),
        });
        println!(
            "nav {:<9} prevented={} scroll requests so far={:?}",
            href,
            outcome.prevent_default,
            controller.page().scroll_requests()
        );
    }

    // --------------------------------
    // Images
    // --------------------------------

    controller.dispatch(UiEvent::ImageLoaded { image: ImageId(1) });
    controller.dispatch(UiEvent::ImageFailed { image: ImageId(2) });
    controller.advance(100);

    for image in &controller.state().images {
        println!(
            "{} {:<28} {:?} opacity={:?} alt={:?}",
            image.id,
            image.src,
            image.load,
            controller.page().style(Target::Image(image.id), "opacity"),
            controller.page().image_alt(image.id)
        );
    }

    println!(
        "Walkthrough completed ({} loaded, {} failed).",
        controller.state().count_images(ImageLoadState::Loaded),
        controller.state().count_images(ImageLoadState::Errored)
    );
}
