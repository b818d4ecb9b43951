use std::collections::BTreeMap;

use sliderberg_core::{
    Breakpoint, Easing, LayoutMode, ResponsiveSettings, SliderConfig, TransitionEffect,
};
use sliderberg_test_fixtures::{sliders, Harness};

fn attrs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn triple(show: usize, scroll: usize, spacing: u32) -> ResponsiveSettings {
    ResponsiveSettings {
        slides_to_show: show,
        slides_to_scroll: scroll,
        slide_spacing: spacing,
    }
}

#[test]
fn preset_markup_round_trips_into_config() {
    let markup = sliders::markup("carousel-bounded-5x3").unwrap();
    let config = SliderConfig::read(&markup.attributes);
    assert!(config.is_carousel_mode);
    assert!(!config.infinite_loop);
    assert_eq!(config.desktop, triple(3, 1, 20));
    // Unset breakpoints fall back: tablet to desktop, mobile to one slide.
    assert_eq!(config.tablet, triple(3, 1, 20));
    assert_eq!(config.mobile, triple(1, 1, 20));
}

#[test]
fn missing_attributes_use_defaults() {
    let config = SliderConfig::read(&BTreeMap::new());
    assert_eq!(config, SliderConfig::default());
    assert_eq!(config.transition_effect, TransitionEffect::Slide);
    assert_eq!(config.transition_duration, 500);
    assert_eq!(config.transition_easing, Easing::Ease);
    assert!(!config.autoplay);
    assert_eq!(config.autoplay_speed, 5000);
    assert!(config.pause_on_hover);
    assert_eq!(config.desktop, triple(1, 1, 20));
}

#[test]
fn out_of_range_values_are_clamped_and_unknown_words_ignored() {
    let mut h = Harness::new();
    let m = h.mount("clamped-config-4").unwrap();
    let id = h.create(m.wrapper).unwrap();
    let config = h.controller(id).config().clone();

    assert!(!config.is_carousel_mode, "only true/1 enable flags");
    assert_eq!(config.transition_effect, TransitionEffect::Slide);
    assert_eq!(config.transition_duration, 2000);
    assert_eq!(config.transition_easing, Easing::Ease);
    assert!(config.autoplay);
    assert_eq!(config.autoplay_speed, 1000);
    assert_eq!(config.desktop, triple(10, 1, 100));
    assert_eq!(h.controller(id).name(), "sliderberg-0");
}

#[test]
fn carousel_mode_forces_the_slide_effect() {
    let config = SliderConfig::read(&attrs(&[
        ("data-is-carousel", "1"),
        ("data-transition-effect", "fade"),
    ]));
    assert_eq!(config.transition_effect, TransitionEffect::Slide);

    let config = SliderConfig::read(&attrs(&[("data-transition-effect", "fade")]));
    assert_eq!(config.transition_effect, TransitionEffect::Fade);
}

#[test]
fn fractional_counts_truncate() {
    let config = SliderConfig::read(&attrs(&[
        ("data-slides-to-show", "2.7"),
        ("data-slides-to-scroll", "1.9"),
        ("data-slide-spacing", "15.8px"),
        ("data-transition-duration", "450.6"),
    ]));
    assert_eq!(config.desktop, triple(2, 1, 15));
    assert_eq!(config.transition_duration, 450);
}

#[test]
fn scroll_never_exceeds_show() {
    let config = SliderConfig::read(&attrs(&[
        ("data-slides-to-show", "2"),
        ("data-slides-to-scroll", "5"),
        ("data-mobile-slides-to-scroll", "3"),
    ]));
    assert_eq!(config.desktop.slides_to_scroll, 2);
    assert_eq!(config.mobile, triple(1, 1, 20));
}

#[test]
fn tablet_spacing_carries_to_mobile() {
    let config = SliderConfig::read(&attrs(&[
        ("data-slide-spacing", "30"),
        ("data-tablet-slide-spacing", "12"),
    ]));
    assert_eq!(config.tablet.slide_spacing, 12);
    assert_eq!(config.mobile.slide_spacing, 12);
    assert_eq!(config.settings_for(Breakpoint::Desktop).slide_spacing, 30);
}

#[test]
fn transition_strings_use_duration_and_easing() {
    let config = SliderConfig::read(&attrs(&[
        ("data-transition-duration", "750"),
        ("data-transition-easing", "ease-out"),
    ]));
    assert_eq!(config.transition_timing(), "750ms ease-out");
    assert_eq!(config.transition_for("transform"), "transform 750ms ease-out");
}

#[test]
fn config_serializes_in_camel_case() {
    let config = SliderConfig::default();
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(value["transitionDuration"], 500);
    assert_eq!(value["transitionEffect"], "slide");
    assert_eq!(value["isCarouselMode"], false);
    assert_eq!(value["desktop"]["slides_to_show"], 1);
}

#[test]
fn legacy_markup_reads_config_from_the_outer_container() {
    let mut h = Harness::new();
    let m = h.mount("legacy-nested-3").unwrap();
    assert_ne!(m.container, m.track);
    let id = h.create(m.wrapper).unwrap();

    let controller = h.controller(id);
    assert_eq!(controller.elements().track, m.track);
    assert_eq!(controller.elements().config_source, m.container);
    assert_eq!(controller.slide_count(), 3);
    assert_eq!(controller.config().transition_duration, 800);
    assert_eq!(controller.mode(), LayoutMode::Single);
    assert_eq!(
        h.dom.style(m.track, "transition").as_deref(),
        Some("transform 800ms ease")
    );
    assert_eq!(h.dom.style(m.container, "transform"), None);
}

#[test]
fn carousel_without_enough_slides_to_loop_is_bounded() {
    let mut h = Harness::new();
    let markup = sliderberg_test_fixtures::SliderMarkup::new(3)
        .with_attr("data-is-carousel", "true")
        .with_attr("data-infinite-loop", "true")
        .with_attr("data-slides-to-show", "3");
    let m = h.mount_markup(&markup);
    let id = h.create(m.wrapper).unwrap();
    assert_eq!(h.controller(id).mode(), LayoutMode::CarouselBounded);
    assert_eq!(h.dom.child_nodes(m.track).len(), 3);
}
