//! Input routing: listeners, observers, autoplay and the resize debounce.
//!
//! Every listener and observer the router creates is held as a
//! [`Subscription`] and disposed uniformly by [`InputRouter::cleanup`]. Events
//! are translated into [`Intent`]s; the controller performs the navigation.

use log::{error, trace};

use crate::elements::owning_wrapper;
use crate::events::{EventOutcome, SliderEvent};
use crate::host::{ListenKind, SliderHost};
use crate::ids::{ListenerId, ObserverId};
use crate::layout::{LayoutMode, SliderCx};
use crate::state::RuntimeState;

/// Visible fraction of the wrapper required for autoplay to run.
pub const INTERSECTION_THRESHOLD: f64 = 0.1;
/// Quiet period before a burst of resize notifications triggers a relayout.
pub const RESIZE_DEBOUNCE_MS: u32 = 150;

/// Navigation requested by an input source.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Next,
    Prev,
    GoTo(usize),
    /// The autoplay interval ticked.
    Autoplay,
    Relayout,
}

/// Dispose handle for one listener or observer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Subscription {
    Listener(ListenerId),
    Observer(ObserverId),
}

impl Subscription {
    /// Release the underlying host resource. Failures are logged, never raised.
    pub fn dispose<H: SliderHost>(self, host: &H) {
        match self {
            Self::Listener(id) => host.unlisten(id),
            Self::Observer(id) => {
                if let Err(err) = host.disconnect(id) {
                    error!("{err}");
                }
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct InputRouter {
    subscriptions: Vec<Subscription>,
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Register every listener and observer for `mode`.
    pub fn attach<H: SliderHost>(
        &mut self,
        cx: SliderCx<'_, H>,
        state: &mut RuntimeState,
        mode: LayoutMode,
    ) {
        let els = cx.elements;
        for button in [&els.prev, &els.next, &els.indicators].into_iter().flatten() {
            self.listen(cx, button, ListenKind::Click);
        }
        for kind in [ListenKind::TouchStart, ListenKind::TouchEnd, ListenKind::KeyDown] {
            self.listen(cx, &els.wrapper, kind);
        }
        if cx.config.autoplay && cx.config.pause_on_hover {
            for kind in [
                ListenKind::PointerEnter,
                ListenKind::PointerLeave,
                ListenKind::FocusIn,
                ListenKind::FocusOut,
            ] {
                self.listen(cx, &els.wrapper, kind);
            }
        }
        self.listen(cx, &els.track, ListenKind::TransitionEnd);

        let mut resize_targets = vec![els.wrapper.clone()];
        if mode.is_stacked() {
            resize_targets.extend(els.slides.iter().cloned());
        }
        state.resize_observer = cx.host.observe_resize(&resize_targets);
        if let Some(id) = state.resize_observer {
            self.subscriptions.push(Subscription::Observer(id));
        }

        if cx.config.autoplay {
            state.intersection_observer = cx
                .host
                .observe_intersection(&els.wrapper, INTERSECTION_THRESHOLD);
            match state.intersection_observer {
                Some(id) => {
                    // Autoplay starts once the observer reports the wrapper in view.
                    state.in_view = false;
                    self.subscriptions.push(Subscription::Observer(id));
                }
                None => self.start_autoplay(cx, state),
            }
        }
    }

    fn listen<H: SliderHost>(&mut self, cx: SliderCx<'_, H>, node: &H::Node, kind: ListenKind) {
        match cx.host.listen(node, kind) {
            Some(id) => self.subscriptions.push(Subscription::Listener(id)),
            None => trace!("host declined {} listener", kind.event_name()),
        }
    }

    /// Translate one event. Timers that are not the router's pass through
    /// untouched (`None`).
    pub fn route<H: SliderHost>(
        &mut self,
        cx: SliderCx<'_, H>,
        state: &mut RuntimeState,
        event: &SliderEvent<H::Node>,
    ) -> (Option<Intent>, EventOutcome) {
        if state.destroyed {
            return (None, EventOutcome::IGNORED);
        }
        let els = cx.elements;
        if let Some(target) = gesture_target(event) {
            if owning_wrapper(cx.host, target).as_ref() != Some(&els.wrapper) {
                trace!("gesture from a nested slider ignored");
                return (None, EventOutcome::IGNORED);
            }
        }
        let slide_count = els.slide_count();
        let intent = match event {
            SliderEvent::Click { current, target } => {
                if els.prev.as_ref() == Some(current) {
                    Some(Intent::Prev)
                } else if els.next.as_ref() == Some(current) {
                    Some(Intent::Next)
                } else if els.indicators.as_ref() == Some(current) {
                    indicator_index(cx.host, current, target).map(Intent::GoTo)
                } else {
                    None
                }
            }
            SliderEvent::TouchStart { x, y, .. } => {
                state.touch_start_x = *x;
                state.touch_start_y = *y;
                None
            }
            SliderEvent::TouchEnd { x, y, .. } => {
                let dx = state.touch_start_x - x;
                let dy = state.touch_start_y - y;
                if slide_count > 1 && dx.abs() > state.swipe_threshold && dx.abs() > dy.abs() {
                    Some(if dx > 0.0 { Intent::Next } else { Intent::Prev })
                } else {
                    None
                }
            }
            SliderEvent::KeyDown { key, .. } => {
                if slide_count <= 1 || !cx.host.focus_within(&els.wrapper) {
                    return (None, EventOutcome::IGNORED);
                }
                return match key.as_str() {
                    "ArrowLeft" => (Some(Intent::Prev), EventOutcome::CONSUMED),
                    "ArrowRight" => (Some(Intent::Next), EventOutcome::CONSUMED),
                    _ => (None, EventOutcome::IGNORED),
                };
            }
            SliderEvent::PointerEnter => {
                if cx.config.pause_on_hover {
                    state.hover_paused = true;
                    self.stop_autoplay(cx, state);
                }
                None
            }
            SliderEvent::PointerLeave { related } => {
                if !moved_within(cx.host, &els.wrapper, related.as_ref()) {
                    state.hover_paused = false;
                    self.start_autoplay(cx, state);
                }
                None
            }
            SliderEvent::FocusIn => {
                if cx.config.pause_on_hover {
                    state.focus_paused = true;
                    self.stop_autoplay(cx, state);
                }
                None
            }
            SliderEvent::FocusOut { related } => {
                if !moved_within(cx.host, &els.wrapper, related.as_ref()) {
                    state.focus_paused = false;
                    self.start_autoplay(cx, state);
                }
                None
            }
            SliderEvent::Resized => {
                if let Some(pending) = state.resize_timer.take() {
                    cx.host.clear_timer(pending);
                }
                state.resize_timer = Some(cx.host.set_timeout(RESIZE_DEBOUNCE_MS));
                None
            }
            SliderEvent::Intersection {
                is_intersecting,
                ratio,
            } => {
                state.in_view = *is_intersecting && *ratio >= INTERSECTION_THRESHOLD;
                if state.in_view {
                    self.start_autoplay(cx, state);
                } else {
                    self.stop_autoplay(cx, state);
                }
                None
            }
            SliderEvent::Timer(id) if state.autoplay_interval == Some(*id) => {
                state.accepts_navigation().then_some(Intent::Autoplay)
            }
            SliderEvent::Timer(id) if state.resize_timer == Some(*id) => {
                state.resize_timer = None;
                Some(Intent::Relayout)
            }
            SliderEvent::Timer(_) | SliderEvent::Frame(_) | SliderEvent::TransitionEnd { .. } => {
                None
            }
        };
        (intent, EventOutcome::IGNORED)
    }

    /// Start the autoplay interval when every precondition holds.
    pub fn start_autoplay<H: SliderHost>(&self, cx: SliderCx<'_, H>, state: &mut RuntimeState) {
        if state.destroyed
            || !cx.config.autoplay
            || cx.elements.slide_count() <= 1
            || state.autoplay_interval.is_some()
            || state.hover_paused
            || state.focus_paused
            || !state.in_view
        {
            return;
        }
        state.autoplay_interval = Some(cx.host.set_interval(cx.config.autoplay_speed));
    }

    pub fn stop_autoplay<H: SliderHost>(&self, cx: SliderCx<'_, H>, state: &mut RuntimeState) {
        if let Some(interval) = state.autoplay_interval.take() {
            cx.host.clear_timer(interval);
        }
    }

    /// Stop timers, disconnect observers, remove listeners. Safe to repeat.
    pub fn cleanup<H: SliderHost>(&mut self, cx: SliderCx<'_, H>, state: &mut RuntimeState) {
        self.stop_autoplay(cx, state);
        if let Some(pending) = state.resize_timer.take() {
            cx.host.clear_timer(pending);
        }
        for subscription in self.subscriptions.drain(..) {
            subscription.dispose(cx.host);
        }
        state.resize_observer = None;
        state.intersection_observer = None;
    }
}

/// Target of a touch or key event, which bubble up through nested sliders.
fn gesture_target<N>(event: &SliderEvent<N>) -> Option<&N> {
    match event {
        SliderEvent::TouchStart { target, .. }
        | SliderEvent::TouchEnd { target, .. }
        | SliderEvent::KeyDown { target, .. } => Some(target),
        _ => None,
    }
}

/// True when pointer or focus moved to another element inside `wrapper`.
fn moved_within<H: SliderHost>(host: &H, wrapper: &H::Node, related: Option<&H::Node>) -> bool {
    related.is_some_and(|node| host.contains(wrapper, node))
}

/// `data-slide-index` of the clicked dot, searching from `target` up to the
/// indicator container.
fn indicator_index<H: SliderHost>(host: &H, container: &H::Node, target: &H::Node) -> Option<usize> {
    let mut cursor = Some(target.clone());
    while let Some(node) = cursor {
        if let Some(raw) = host.attribute(&node, "data-slide-index") {
            return raw.trim().parse().ok();
        }
        if &node == container {
            return None;
        }
        cursor = host.parent(&node);
    }
    None
}
