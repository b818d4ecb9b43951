use sliderberg_core::{Direction, LayoutMode, SlideChange};
use sliderberg_test_fixtures::{Harness, Mounted, FRAME_MS};

fn started(preset: &str) -> (Harness, sliderberg_core::SliderId, Mounted) {
    let mut h = Harness::new();
    let (id, mounted) = h.start(preset).unwrap();
    h.dom.take_slide_changes();
    h.dom.take_style_log();
    (h, id, mounted)
}

fn last_change(h: &Harness) -> SlideChange {
    h.dom.slide_changes().last().unwrap().1.clone()
}

fn track_transition_disables(h: &Harness, track: sliderberg_test_fixtures::NodeId) -> usize {
    h.dom
        .style_log()
        .iter()
        .filter(|w| w.node == track && w.property == "transition" && w.value.as_deref() == Some("none"))
        .count()
}

#[test]
fn single_slide_next_moves_one_track_width() {
    let (mut h, id, m) = started("single-slide-3");
    assert_eq!(h.controller(id).mode(), LayoutMode::Single);
    assert_eq!(h.transform(m.track).as_deref(), Some("translateX(-100%)"));
    assert_eq!(h.controller(id).current_index(), 0);

    h.click(m.next.unwrap());
    assert!(h.controller(id).is_animating());
    assert_eq!(h.transform(m.track).as_deref(), Some("translateX(-200%)"));

    h.advance(549);
    assert!(h.controller(id).is_animating());
    h.advance(1);
    assert!(!h.controller(id).is_animating());
    assert_eq!(h.controller(id).current_index(), 1);

    let changes = h.dom.take_slide_changes();
    assert_eq!(
        changes,
        vec![(
            m.wrapper,
            SlideChange {
                slider_id: "hero".into(),
                from: 0,
                to: 1
            }
        )]
    );
}

#[test]
fn single_slide_wraps_forward_through_trailing_clone_and_snaps_once() {
    let (mut h, id, m) = started("single-slide-3");
    assert!(h.controller_mut(id).go_to_slide(2, Direction::Jump));
    h.settle();
    assert_eq!(h.transform(m.track).as_deref(), Some("translateX(-300%)"));
    h.dom.take_style_log();

    h.click(m.next.unwrap());
    assert_eq!(h.transform(m.track).as_deref(), Some("translateX(-400%)"));
    assert_eq!(last_change(&h).from, 2);
    assert_eq!(last_change(&h).to, 0);

    h.advance(550);
    // Landed on the clone: snapped without animation, waiting one frame.
    assert!(h.controller(id).is_animating());
    assert_eq!(h.transform(m.track).as_deref(), Some("translateX(-100%)"));
    assert_eq!(h.dom.style(m.track, "transition").as_deref(), Some("none"));

    h.advance(FRAME_MS);
    assert!(!h.controller(id).is_animating());
    assert_eq!(
        h.dom.style(m.track, "transition").as_deref(),
        Some("transform 500ms ease")
    );
    assert_eq!(h.controller(id).current_index(), 0);
    assert_eq!(track_transition_disables(&h, m.track), 1);
}

#[test]
fn single_slide_wraps_backward_through_leading_clone() {
    let (mut h, id, m) = started("single-slide-3");
    h.click(m.prev.unwrap());
    assert_eq!(h.transform(m.track).as_deref(), Some("translateX(0%)"));
    h.settle();
    assert_eq!(h.transform(m.track).as_deref(), Some("translateX(-300%)"));
    assert_eq!(h.controller(id).current_index(), 2);
    assert_eq!(
        last_change(&h),
        SlideChange {
            slider_id: "hero".into(),
            from: 0,
            to: 2
        }
    );
}

#[test]
fn direct_moves_never_snap() {
    let (mut h, _id, m) = started("single-slide-3");
    h.click(m.next.unwrap());
    h.settle();
    h.click(m.next.unwrap());
    h.settle();
    assert_eq!(track_transition_disables(&h, m.track), 0);
}

#[test]
fn navigation_during_a_transition_is_dropped() {
    let (mut h, id, m) = started("single-slide-3");
    h.click(m.next.unwrap());
    h.click(m.next.unwrap());
    assert!(!h.controller_mut(id).go_to_slide(2, Direction::Jump));
    assert!(!h.controller_mut(id).prev_slide());
    h.settle();
    assert_eq!(h.dom.slide_changes().len(), 1);
    assert_eq!(h.controller(id).current_index(), 1);
}

#[test]
fn slide_change_targets_follow_index_modulo_count() {
    let (mut h, _id, m) = started("single-slide-3");
    for step in 1..=7 {
        h.click(m.next.unwrap());
        h.settle();
        assert_eq!(last_change(&h).to, step % 3);
    }
    for step in (0..7).rev() {
        h.click(m.prev.unwrap());
        h.settle();
        assert_eq!(last_change(&h).to, step % 3);
    }
}

#[test]
fn go_to_slide_wraps_out_of_range_indices() {
    let (mut h, id, _m) = started("single-slide-3");
    assert!(h.controller_mut(id).go_to_slide(-1, Direction::Jump));
    h.settle();
    assert_eq!(last_change(&h).to, 2);
    assert!(h.controller_mut(id).go_to_slide(4, Direction::Jump));
    h.settle();
    assert_eq!(last_change(&h).to, 1);
}

#[test]
fn single_slide_markup_never_navigates() {
    let (mut h, id, m) = started("single-slide-1");
    assert!(h.dom.slide_changes().is_empty());
    assert!(!h.controller_mut(id).next_slide());
    assert!(!h.controller_mut(id).prev_slide());
    h.click(m.next.unwrap());
    h.settle();
    assert!(h.dom.slide_changes().is_empty());
    assert_eq!(h.transform(m.track).as_deref(), Some("translateX(0%)"));
    assert_eq!(h.dom.child_nodes(m.track).len(), 1);
}

#[test]
fn single_layout_adds_one_clone_per_side() {
    let mut h = Harness::new();
    let m = h.mount("single-slide-3").unwrap();
    h.dom.set_attr(m.slides[0], "id", "first-slide");
    let id = h.create(m.wrapper).unwrap();

    let children = h.dom.child_nodes(m.track);
    assert_eq!(children.len(), 5);
    assert_eq!(&children[1..4], m.slides.as_slice());
    for clone in [children[0], children[4]] {
        assert!(h.dom.classes(clone).contains(&"sliderberg-clone".to_string()));
        assert_eq!(h.dom.attr(clone, "aria-hidden").as_deref(), Some("true"));
        assert_eq!(h.dom.attr(clone, "tabindex").as_deref(), Some("-1"));
    }
    // Trailing clone copies the first slide but never its id.
    assert_eq!(h.dom.attr(children[4], "data-slide").as_deref(), Some("0"));
    assert_eq!(h.dom.attr(children[4], "id"), None);
    assert_eq!(h.dom.attr(children[0], "data-slide").as_deref(), Some("2"));
    assert_eq!(h.controller(id).layout().clones().len(), 2);
}

#[test]
fn looping_without_clone_support_moves_directly() {
    let mut h = Harness::new();
    let m = h.mount("single-slide-3").unwrap();
    h.dom.set_supports_clone(false);
    let id = h.create(m.wrapper).unwrap();
    h.settle();
    assert_eq!(h.dom.child_nodes(m.track).len(), 3);
    assert_eq!(h.transform(m.track).as_deref(), Some("translateX(0%)"));

    h.controller_mut(id).go_to_slide(2, Direction::Jump);
    h.settle();
    h.click(m.next.unwrap());
    assert_eq!(h.transform(m.track).as_deref(), Some("translateX(0%)"));
    h.settle();
    assert_eq!(h.controller(id).current_index(), 0);
    assert!(!h.controller(id).is_animating());
}

#[test]
fn looping_carousel_settles_on_transition_end() {
    let (mut h, id, m) = started("carousel-loop-6x3");
    assert_eq!(h.controller(id).mode(), LayoutMode::CarouselLoop);
    assert_eq!(h.dom.child_nodes(m.track).len(), 12);
    assert_eq!(h.transform(m.track).as_deref(), Some("translateX(-100%)"));

    h.click(m.next.unwrap());
    assert_eq!(
        h.transform(m.track).as_deref(),
        Some("translateX(-133.3333%)")
    );
    h.advance(399);
    assert!(h.controller(id).is_animating());
    h.advance(1);
    assert!(!h.controller(id).is_animating());
    assert_eq!(h.controller(id).state().start_index, 1);
}

#[test]
fn looping_carousel_wraps_forward_with_one_snap() {
    let (mut h, id, m) = started("carousel-loop-6x3");
    h.controller_mut(id).go_to_slide(5, Direction::Jump);
    h.settle();
    h.dom.take_style_log();

    h.click(m.next.unwrap());
    assert_eq!(h.transform(m.track).as_deref(), Some("translateX(-300%)"));
    h.advance(400);
    assert!(h.controller(id).is_animating());
    assert_eq!(h.transform(m.track).as_deref(), Some("translateX(-100%)"));
    h.advance(FRAME_MS);
    assert!(!h.controller(id).is_animating());
    assert_eq!(h.controller(id).state().start_index, 0);
    assert_eq!(track_transition_disables(&h, m.track), 1);
    assert_eq!(last_change(&h).to, 0);
}

#[test]
fn looping_carousel_wraps_backward() {
    let (mut h, id, m) = started("carousel-loop-6x3");
    h.click(m.prev.unwrap());
    assert_eq!(
        h.transform(m.track).as_deref(),
        Some("translateX(-66.6667%)")
    );
    h.settle();
    assert_eq!(
        h.transform(m.track).as_deref(),
        Some("translateX(-266.6667%)")
    );
    assert_eq!(h.controller(id).state().start_index, 5);
    assert_eq!(last_change(&h).to, 5);
}

#[test]
fn looping_carousel_returns_home_after_a_full_cycle() {
    let (mut h, id, _m) = started("carousel-loop-6x3");
    let total = h.controller(id).slide_count();
    for step in 1..=total {
        assert!(h.controller_mut(id).next_slide());
        h.settle();
        assert_eq!(h.controller(id).state().start_index, step % total);
    }
    assert_eq!(h.controller(id).state().start_index, 0);
    assert_eq!(h.dom.slide_changes().len(), total);
    assert_eq!(last_change(&h).to, 0);
}

#[test]
fn looping_carousel_scrolls_by_window_step() {
    let (mut h, id, m) = started("carousel-loop-5x3-scroll2");
    let mut seen = Vec::new();
    for _ in 0..5 {
        h.click(m.next.unwrap());
        h.settle();
        seen.push(h.controller(id).state().start_index);
        assert!(!h.controller(id).is_animating());
    }
    assert_eq!(seen, vec![2, 4, 1, 3, 0]);
}

#[test]
fn bounded_carousel_clamps_at_both_ends() {
    let (mut h, id, m) = started("carousel-bounded-5x3");
    assert_eq!(h.controller(id).mode(), LayoutMode::CarouselBounded);
    assert_eq!(h.dom.child_nodes(m.track).len(), 5);
    assert!(!h.controller_mut(id).prev_slide());

    h.click(m.next.unwrap());
    assert_eq!(
        h.transform(m.track).as_deref(),
        Some("translateX(calc(-33.3333% - 6.6667px))")
    );
    h.settle();
    h.click(m.next.unwrap());
    h.settle();
    assert_eq!(h.controller(id).state().start_index, 2);

    h.dom.take_slide_changes();
    assert!(!h.controller_mut(id).next_slide());
    h.click(m.next.unwrap());
    h.settle();
    assert!(h.dom.slide_changes().is_empty());
    assert!(h.controller(id).state().start_index <= 2);

    assert!(h.controller_mut(id).go_to_slide(7, Direction::Jump));
    h.settle();
    assert_eq!(h.controller(id).state().start_index, 2);
}

#[test]
fn bounded_carousel_marks_disabled_controls() {
    let (mut h, id, m) = started("carousel-bounded-5x3");
    let (prev, next) = (m.prev.unwrap(), m.next.unwrap());
    assert_eq!(h.dom.attr(prev, "aria-disabled").as_deref(), Some("true"));
    assert_eq!(h.dom.attr(next, "aria-disabled"), None);

    h.controller_mut(id).go_to_slide(2, Direction::Jump);
    h.settle();
    assert_eq!(h.dom.attr(prev, "aria-disabled"), None);
    assert_eq!(h.dom.attr(next, "aria-disabled").as_deref(), Some("true"));
}

#[test]
fn visible_slides_are_exposed_to_assistive_tech() {
    let (mut h, id, m) = started("carousel-bounded-5x3");
    let hidden = |h: &Harness| -> Vec<String> {
        m.slides
            .iter()
            .map(|s| h.dom.attr(*s, "aria-hidden").unwrap())
            .collect()
    };
    assert_eq!(hidden(&h), ["false", "false", "false", "true", "true"]);
    h.controller_mut(id).go_to_slide(1, Direction::Jump);
    h.settle();
    assert_eq!(hidden(&h), ["true", "false", "false", "false", "true"]);
    assert_eq!(h.dom.attr(m.slides[0], "tabindex").as_deref(), Some("-1"));
    assert_eq!(h.dom.attr(m.slides[1], "tabindex").as_deref(), Some("0"));
    assert_eq!(h.dom.attr(m.slides[1], "aria-label").as_deref(), Some("2 of 5"));
    assert_eq!(h.dom.attr(m.wrapper, "role").as_deref(), Some("region"));
}

#[test]
fn indicators_match_layout() {
    let (h, _id, m) = started("single-slide-3");
    assert_eq!(h.dom.child_nodes(m.indicators.unwrap()).len(), 3);

    let (h, _id, m) = started("carousel-bounded-5x3");
    assert_eq!(h.dom.child_nodes(m.indicators.unwrap()).len(), 3);

    let (h, _id, m) = started("carousel-loop-6x3");
    assert_eq!(h.dom.child_nodes(m.indicators.unwrap()).len(), 6);
}

#[test]
fn indicator_dots_are_labelled_buttons_tracking_the_active_slide() {
    let (mut h, id, m) = started("single-slide-3");
    let dots = h.dom.child_nodes(m.indicators.unwrap());
    assert_eq!(dots, h.controller(id).dots());
    assert_eq!(h.dom.tag(dots[0]), "button");
    assert_eq!(h.dom.attr(dots[0], "type").as_deref(), Some("button"));
    assert_eq!(
        h.dom.attr(dots[1], "aria-label").as_deref(),
        Some("Go to slide 2")
    );
    assert!(h.dom.classes(dots[0]).contains(&"active".to_string()));
    assert_eq!(h.dom.attr(dots[0], "aria-current").as_deref(), Some("true"));

    h.click(dots[2]);
    assert_eq!(h.transform(m.track).as_deref(), Some("translateX(-300%)"));
    h.settle();
    assert_eq!(last_change(&h).to, 2);
    assert!(!h.dom.classes(dots[0]).contains(&"active".to_string()));
    assert_eq!(h.dom.attr(dots[0], "aria-current"), None);
    assert!(h.dom.classes(dots[2]).contains(&"active".to_string()));
    // Dots are reused while the count holds.
    assert_eq!(h.dom.child_nodes(m.indicators.unwrap()), dots);
}

#[test]
fn clicks_outside_dots_are_ignored() {
    let (mut h, _id, m) = started("single-slide-3");
    h.click(m.indicators.unwrap());
    h.click(m.wrapper);
    h.settle();
    assert!(h.dom.slide_changes().is_empty());
}
