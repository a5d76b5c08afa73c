mod common;

use common::{ERROR, Img, LOADING, Site};
use lazyimg::{
    Coordinator, DEFAULT_PLACEHOLDER, ImageElement, IntersectionEntry, LazyOptions, LoadState,
    Rect,
};

fn show(lazy: &mut Coordinator, element: &Img) {
    lazy.on_intersection(&[IntersectionEntry::visible(element.id())]);
}

#[test]
fn placeholder_is_shown_before_any_visibility() {
    let site = Site::new();
    let mut lazy = site.coordinator();
    let img = Img::new();
    lazy.add(&img, "photo.png");
    assert_eq!(img.src(), LOADING);
    assert_eq!(lazy.state(img.id()), Some(LoadState::Loading));
    assert_eq!(site.transport.count(), 0);
}

#[test]
fn default_placeholder_when_unconfigured() {
    let site = Site::new();
    let mut lazy = Coordinator::new(&LazyOptions::default(), site.loader());
    let img = Img::new();
    lazy.add(&img, "broken.png");
    assert_eq!(img.src(), DEFAULT_PLACEHOLDER);

    show(&mut lazy, &img);
    lazy.run_until_idle();
    assert_eq!(img.src(), DEFAULT_PLACEHOLDER);
    assert_eq!(lazy.state(img.id()), Some(LoadState::Error));
}

#[test]
fn visible_element_loads_and_fills_cache() {
    let site = Site::new();
    let mut lazy = site.coordinator();
    let img1 = Img::new();
    lazy.add(&img1, "photo.png");

    show(&mut lazy, &img1);
    lazy.run_until_idle();
    assert_eq!(img1.src(), "photo.png");
    assert_eq!(lazy.state(img1.id()), Some(LoadState::Loaded));
    assert!(lazy.cache().contains("photo.png"));
    assert_eq!(site.transport.count(), 1);
}

#[test]
fn failed_fetch_shows_error_placeholder() {
    let site = Site::new();
    let mut lazy = site.coordinator();
    let img2 = Img::new();
    lazy.add(&img2, "broken.png");

    show(&mut lazy, &img2);
    lazy.run_until_idle();
    assert_eq!(img2.src(), ERROR);
    assert_eq!(lazy.state(img2.id()), Some(LoadState::Error));
    assert!(!lazy.cache().contains("broken.png"));
}

#[test]
fn missing_file_is_a_failure_too() {
    let site = Site::new();
    let mut lazy = site.coordinator();
    let img = Img::new();
    lazy.add(&img, "nowhere.png");
    show(&mut lazy, &img);
    lazy.run_until_idle();
    assert_eq!(img.src(), ERROR);
}

#[test]
fn cached_source_renders_without_fetching() {
    let site = Site::new();
    let mut lazy = site.coordinator();
    let img1 = Img::new();
    lazy.add(&img1, "photo.png");
    show(&mut lazy, &img1);
    lazy.run_until_idle();
    assert_eq!(site.transport.count(), 1);

    let img3 = Img::new();
    lazy.add(&img3, "photo.png");
    assert_eq!(img3.src(), LOADING);
    show(&mut lazy, &img3);
    // no poll needed, the cache hit is synchronous
    assert_eq!(img3.src(), "photo.png");
    assert_eq!(lazy.state(img3.id()), Some(LoadState::Loaded));
    assert_eq!(lazy.pending(), 0);
    assert_eq!(site.transport.count(), 1);
}

#[test]
fn update_before_visibility_switches_target() {
    let site = Site::new();
    let mut lazy = site.coordinator();
    let img4 = Img::new();
    lazy.add(&img4, "a.png");

    lazy.update(img4.id(), "b.png");
    assert_eq!(lazy.target(img4.id()).as_deref(), Some("b.png"));
    assert_eq!(lazy.state(img4.id()), Some(LoadState::Loading));
    assert_eq!(img4.src(), LOADING);

    lazy.run_until_idle();
    assert_eq!(img4.src(), "b.png");
    assert_eq!(lazy.state(img4.id()), Some(LoadState::Loaded));
    assert!(!lazy.cache().contains("a.png"));
}

#[test]
fn update_with_same_source_changes_nothing() {
    let site = Site::new();
    let mut lazy = site.coordinator();
    let img = Img::new();
    lazy.add(&img, "photo.png");
    show(&mut lazy, &img);
    lazy.run_until_idle();
    let renders = img.renders();

    lazy.update(img.id(), "photo.png");
    assert_eq!(lazy.state(img.id()), Some(LoadState::Loaded));
    assert_eq!(img.renders(), renders);
    assert_eq!(site.transport.count(), 1);
}

#[test]
fn update_after_failure_recovers() {
    let site = Site::new();
    let mut lazy = site.coordinator();
    let img = Img::new();
    lazy.add(&img, "broken.png");
    show(&mut lazy, &img);
    lazy.run_until_idle();
    assert_eq!(lazy.state(img.id()), Some(LoadState::Error));

    lazy.update(img.id(), "photo.png");
    lazy.run_until_idle();
    assert_eq!(lazy.state(img.id()), Some(LoadState::Loaded));
    assert_eq!(img.src(), "photo.png");
}

#[test]
fn removing_unknown_elements_is_harmless() {
    let site = Site::new();
    let mut lazy = site.coordinator();
    let kept = Img::new();
    let never_added = Img::new();
    lazy.add(&kept, "a.png");

    lazy.remove(never_added.id());
    lazy.remove(kept.id());
    lazy.remove(kept.id());
    assert!(lazy.is_empty());
}

#[test]
fn scrolling_loads_only_what_comes_into_view() {
    let site = Site::new();
    let mut lazy = site.coordinator();
    let sources = ["photo.png", "a.png", "b.png", "broken.png"];
    let page: Vec<_> = sources
        .iter()
        .enumerate()
        .map(|(index, src)| {
            let img = Img::new();
            lazy.add(&img, src);
            lazy.set_bounds(
                img.id(),
                Rect::from_xywh(0.0, index as f32 * 500.0, 800.0, 400.0),
            );
            img
        })
        .collect();

    lazy.set_viewport(Rect::from_xywh(0.0, 0.0, 800.0, 450.0));
    lazy.run_until_idle();
    assert_eq!(page[0].src(), "photo.png");
    assert!(page[1..].iter().all(|img| img.src() == LOADING));
    assert_eq!(site.transport.count(), 1);

    lazy.set_viewport(Rect::from_xywh(0.0, 1000.0, 800.0, 1000.0));
    lazy.run_until_idle();
    assert_eq!(page[1].src(), LOADING);
    assert_eq!(page[2].src(), "b.png");
    assert_eq!(page[3].src(), ERROR);
    assert_eq!(site.transport.count(), 3);

    // back to the top: the loaded element is seen again and released
    lazy.set_viewport(Rect::from_xywh(0.0, 0.0, 800.0, 450.0));
    lazy.run_until_idle();
    assert!(!lazy.is_registered(page[0].id()));
    assert_eq!(site.transport.count(), 3);
}
