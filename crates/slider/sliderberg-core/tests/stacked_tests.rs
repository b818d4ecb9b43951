use sliderberg_core::{Direction, LayoutMode};
use sliderberg_test_fixtures::{Harness, NodeId};

fn layer(h: &Harness, slide: NodeId) -> (String, String) {
    (
        h.dom.style(slide, "opacity").unwrap(),
        h.dom.style(slide, "z-index").unwrap(),
    )
}

fn pair(opacity: &str, z_index: &str) -> (String, String) {
    (opacity.to_string(), z_index.to_string())
}

#[test]
fn fade_stacks_slides_without_clones() {
    let mut h = Harness::new();
    let (id, m) = h.start("fade-4").unwrap();
    assert_eq!(h.controller(id).mode(), LayoutMode::Fade);
    assert_eq!(h.dom.child_nodes(m.track).len(), 4);
    assert_eq!(h.dom.style(m.track, "position").as_deref(), Some("relative"));
    assert_eq!(h.dom.style(m.track, "transform"), None);
    for slide in &m.slides {
        assert_eq!(h.dom.style(*slide, "position").as_deref(), Some("absolute"));
        assert_eq!(
            h.dom.style(*slide, "transition").as_deref(),
            Some("opacity 400ms ease-in-out")
        );
    }
    assert_eq!(layer(&h, m.slides[0]), pair("1", "2"));
    assert_eq!(layer(&h, m.slides[1]), pair("0", "0"));
    assert_eq!(h.dom.style(m.track, "height").as_deref(), Some("200px"));
}

#[test]
fn fade_keeps_the_outgoing_slide_beneath_until_settled() {
    let mut h = Harness::new();
    let (id, m) = h.start("fade-4").unwrap();
    h.click(m.next.unwrap());
    assert_eq!(layer(&h, m.slides[1]), pair("1", "2"));
    assert_eq!(layer(&h, m.slides[0]), pair("0", "1"));
    assert_eq!(layer(&h, m.slides[2]), pair("0", "0"));
    assert_eq!(h.dom.style(m.track, "height").as_deref(), Some("320px"));

    h.advance(449);
    assert!(h.controller(id).is_animating());
    h.advance(1);
    assert!(!h.controller(id).is_animating());
    assert_eq!(layer(&h, m.slides[0]), pair("0", "0"));
    assert_eq!(h.controller(id).current_index(), 1);
}

#[test]
fn fade_height_falls_back_to_the_tallest_slide() {
    let mut h = Harness::new();
    let (id, m) = h.start("fade-4").unwrap();
    h.controller_mut(id).go_to_slide(2, Direction::Jump);
    assert_eq!(h.dom.style(m.track, "height").as_deref(), Some("320px"));
    h.settle();
    h.controller_mut(id).go_to_slide(3, Direction::Jump);
    assert_eq!(h.dom.style(m.track, "height").as_deref(), Some("240px"));
}

#[test]
fn fade_wraps_in_both_directions() {
    let mut h = Harness::new();
    let (id, m) = h.start("fade-4").unwrap();
    h.click(m.prev.unwrap());
    h.settle();
    assert_eq!(h.controller(id).current_index(), 3);
    h.click(m.next.unwrap());
    h.settle();
    assert_eq!(h.controller(id).current_index(), 0);
    let targets: Vec<usize> = h.dom.slide_changes().iter().map(|(_, c)| c.to).collect();
    assert_eq!(targets, vec![0, 3, 0]);
}

#[test]
fn zoom_scales_inactive_slides() {
    let mut h = Harness::new();
    let (id, m) = h.start("zoom-3").unwrap();
    assert_eq!(h.controller(id).mode(), LayoutMode::Zoom);
    assert!(m.indicators.is_none());
    assert_eq!(
        h.dom.style(m.slides[0], "transition").as_deref(),
        Some("opacity 600ms ease, transform 600ms ease")
    );
    assert_eq!(h.dom.style(m.slides[0], "transform").as_deref(), Some("scale(1)"));
    assert_eq!(h.dom.style(m.slides[1], "transform").as_deref(), Some("scale(0.9)"));

    h.click(m.next.unwrap());
    assert_eq!(h.dom.style(m.slides[1], "transform").as_deref(), Some("scale(1)"));
    assert_eq!(h.dom.style(m.slides[0], "transform").as_deref(), Some("scale(0.9)"));
    // Slide transitions never complete the track transition.
    h.advance(600);
    assert!(h.controller(id).is_animating());
    h.advance(50);
    assert!(!h.controller(id).is_animating());
}
