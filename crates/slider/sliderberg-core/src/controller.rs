//! Controller: one slider instance.
//!
//! Owns the config + state + elements triple, wires the layout engine and
//! the input router together, and implements navigation, indicators, ARIA
//! sync and teardown.
//!
//! Lifecycle: `ready -> animating -> ready -> ... -> destroyed`. Destroy is
//! terminal, reachable from any state, and idempotent.

use std::fmt;

use log::{debug, trace};

use crate::config::{Breakpoint, NodeAttributes, SliderConfig};
use crate::elements::{SliderElements, DOT_CLASS};
use crate::error::SliderError;
use crate::events::{Direction, EventOutcome, SlideChange, SliderEvent};
use crate::host::SliderHost;
use crate::ids::SliderId;
use crate::input::{InputRouter, Intent};
use crate::layout::{LayoutEngine, LayoutMode, Phase, SliderCx};
use crate::state::RuntimeState;

/// Delay before the first activation, letting layout settle.
pub const INITIAL_ACTIVATION_DELAY_MS: u32 = 100;

const ACTIVE_DOT_CLASS: &str = "active";

// A borrowed view built from disjoint fields, so the layout engine, router
// and state stay mutably borrowable alongside it.
macro_rules! cx {
    ($controller:ident) => {
        SliderCx {
            host: &$controller.host,
            config: &$controller.config,
            elements: &$controller.elements,
        }
    };
}

pub struct Controller<H: SliderHost> {
    id: SliderId,
    /// `sliderId` reported in `slidechange`.
    name: String,
    host: H,
    config: SliderConfig,
    state: RuntimeState,
    elements: SliderElements<H::Node>,
    layout: LayoutEngine<H::Node>,
    router: InputRouter,
    dots: Vec<H::Node>,
    /// Slides that received a generated `aria-label`.
    labelled: Vec<usize>,
}

impl<H: SliderHost> fmt::Debug for Controller<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("mode", &self.layout.mode())
            .field("slides", &self.elements.slide_count())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<H: SliderHost> Controller<H> {
    /// Build and start an instance on `root`. `host` must already be scoped
    /// to `id` (see [`SliderHost::for_slider`]).
    pub fn create(host: H, id: SliderId, root: &H::Node) -> Result<Self, SliderError> {
        let name = host
            .attribute(root, "id")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| id.to_string());
        let elements = SliderElements::discover(&host, root, &name)?;
        let config = SliderConfig::read(&NodeAttributes {
            host: &host,
            node: &elements.config_source,
        });
        let breakpoint = Breakpoint::from_width(host.viewport_width());
        let layout = LayoutEngine::new(&config, elements.slide_count(), breakpoint);

        let mut controller = Self {
            id,
            name,
            host,
            config,
            state: RuntimeState::new(breakpoint),
            elements,
            layout,
            router: InputRouter::new(),
            dots: Vec::new(),
            labelled: Vec::new(),
        };
        controller.initialize();
        Ok(controller)
    }

    fn initialize(&mut self) {
        let cx = cx!(self);
        self.layout.setup(cx, &mut self.state, 0);
        self.router.attach(cx, &mut self.state, self.layout.mode());
        self.apply_roles();
        self.sync_indicators();
        self.sync_aria();
        if self.elements.slide_count() > 1 {
            self.state.init_timer = Some(self.host.set_timeout(INITIAL_ACTIVATION_DELAY_MS));
        }
        debug!(
            "created {} ({} slides, {:?}, {:?})",
            self.name,
            self.elements.slide_count(),
            self.layout.mode(),
            self.state.breakpoint
        );
    }

    pub fn id(&self) -> SliderId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    pub fn elements(&self) -> &SliderElements<H::Node> {
        &self.elements
    }

    pub fn layout(&self) -> &LayoutEngine<H::Node> {
        &self.layout
    }

    pub fn router(&self) -> &InputRouter {
        &self.router
    }

    pub fn dots(&self) -> &[H::Node] {
        &self.dots
    }

    pub fn mode(&self) -> LayoutMode {
        self.layout.mode()
    }

    pub fn slide_count(&self) -> usize {
        self.elements.slide_count()
    }

    /// Logical index of the current slide (window start in carousel layouts).
    pub fn current_index(&self) -> usize {
        self.layout.logical_position(&self.state)
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.destroyed
    }

    /// Navigate to `index` (wrapped or clamped). Returns whether a transition
    /// started; requests during a transition or after destroy are dropped.
    pub fn go_to_slide(&mut self, index: isize, direction: Direction) -> bool {
        if !self.state.accepts_navigation() {
            trace!("{}: navigation to {index} dropped", self.name);
            return false;
        }
        if self.elements.slide_count() == 0 {
            return false;
        }
        let target = self.layout.normalize(index);
        let from = self.layout.logical_position(&self.state);

        self.state.is_animating = true;
        let cx = cx!(self);
        self.layout
            .transition_to(cx, &mut self.state, target, direction);
        self.sync_indicators();
        self.sync_aria();

        let change = SlideChange {
            slider_id: self.name.clone(),
            from,
            to: target,
        };
        self.host
            .dispatch_slide_change(&self.elements.wrapper, &change);
        true
    }

    pub fn next_slide(&mut self) -> bool {
        if self.elements.slide_count() <= 1 {
            return false;
        }
        let start = self.state.start_index;
        let scroll = self.layout.settings().slides_to_scroll;
        match self.layout.mode() {
            LayoutMode::CarouselLoop => {
                self.go_to_slide((start + scroll) as isize, Direction::Next)
            }
            LayoutMode::CarouselBounded => {
                let max_start = self.layout.max_start();
                if start >= max_start {
                    return false;
                }
                self.go_to_slide((start + scroll).min(max_start) as isize, Direction::Next)
            }
            LayoutMode::Single | LayoutMode::Fade | LayoutMode::Zoom => {
                let current = self.current_index();
                self.go_to_slide(current as isize + 1, Direction::Next)
            }
        }
    }

    pub fn prev_slide(&mut self) -> bool {
        if self.elements.slide_count() <= 1 {
            return false;
        }
        let start = self.state.start_index;
        let scroll = self.layout.settings().slides_to_scroll;
        match self.layout.mode() {
            LayoutMode::CarouselLoop => {
                self.go_to_slide(start as isize - scroll as isize, Direction::Prev)
            }
            LayoutMode::CarouselBounded => {
                if start == 0 {
                    return false;
                }
                self.go_to_slide(start.saturating_sub(scroll) as isize, Direction::Prev)
            }
            LayoutMode::Single | LayoutMode::Fade | LayoutMode::Zoom => {
                let current = self.current_index();
                self.go_to_slide(current as isize - 1, Direction::Prev)
            }
        }
    }

    /// Feed one host event into the instance.
    pub fn handle(&mut self, event: SliderEvent<H::Node>) -> EventOutcome {
        if self.state.destroyed {
            return EventOutcome::IGNORED;
        }

        if let SliderEvent::Timer(id) = &event {
            if self.state.init_timer == Some(*id) {
                self.state.init_timer = None;
                self.go_to_slide(0, Direction::Jump);
                return EventOutcome::IGNORED;
            }
        }

        let cx = cx!(self);
        let phase = match &event {
            SliderEvent::Timer(id) => self.layout.on_timer(cx, &mut self.state, *id),
            SliderEvent::Frame(id) => self.layout.on_frame(cx, &mut self.state, *id),
            SliderEvent::TransitionEnd { target, property } => {
                self.layout
                    .on_transition_end(cx, &mut self.state, target, property)
            }
            _ => Phase::Ignored,
        };
        match phase {
            Phase::Settled => {
                if self.state.relayout_pending {
                    self.relayout();
                }
                return EventOutcome::IGNORED;
            }
            Phase::Snapping => return EventOutcome::IGNORED,
            Phase::Ignored => {}
        }

        let (intent, outcome) = self.router.route(cx!(self), &mut self.state, &event);
        if let Some(intent) = intent {
            self.perform(intent);
        }
        outcome
    }

    fn perform(&mut self, intent: Intent) {
        match intent {
            Intent::Next => {
                self.next_slide();
            }
            Intent::Prev => {
                self.prev_slide();
            }
            Intent::GoTo(index) => {
                self.go_to_slide(index as isize, Direction::Jump);
            }
            Intent::Autoplay => {
                let at_end = self.layout.mode() == LayoutMode::CarouselBounded
                    && self.state.start_index >= self.layout.max_start();
                if at_end {
                    self.go_to_slide(0, Direction::Jump);
                } else {
                    self.next_slide();
                }
            }
            Intent::Relayout => self.relayout(),
        }
    }

    /// Re-run layout for the current viewport. Deferred while animating.
    pub fn relayout(&mut self) {
        if self.state.destroyed {
            return;
        }
        if self.state.is_animating {
            self.state.relayout_pending = true;
            return;
        }
        self.state.relayout_pending = false;
        let breakpoint = Breakpoint::from_width(self.host.viewport_width());
        let cx = cx!(self);
        if self.layout.relayout(cx, &mut self.state, breakpoint) {
            self.sync_indicators();
            self.sync_aria();
        }
    }

    /// Tear the instance down. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.state.destroyed {
            return;
        }
        // Set first so any callback racing the teardown sees it.
        self.state.destroyed = true;

        if let Some(timer) = self.state.init_timer.take() {
            self.host.clear_timer(timer);
        }
        let cx = cx!(self);
        self.layout.cancel_pending(cx, &mut self.state);
        self.router.cleanup(cx, &mut self.state);
        self.layout.teardown(cx);

        for dot in self.dots.drain(..) {
            if self.host.is_connected(&dot) {
                self.host.remove_node(&dot);
            }
        }
        self.strip_roles();
        debug!("destroyed {}", self.name);
    }

    fn sync_indicators(&mut self) {
        let Some(container) = self.elements.indicators.clone() else {
            return;
        };
        let count = self.layout.indicator_count();
        if self.dots.len() != count {
            for dot in self.dots.drain(..) {
                if self.host.is_connected(&dot) {
                    self.host.remove_node(&dot);
                }
            }
            for index in 0..count {
                let Some(dot) = self.host.create_element("button") else {
                    continue;
                };
                self.host.add_class(&dot, DOT_CLASS);
                self.host.set_attribute(&dot, "type", "button");
                self.host
                    .set_attribute(&dot, "data-slide-index", &index.to_string());
                self.host
                    .set_attribute(&dot, "aria-label", &format!("Go to slide {}", index + 1));
                self.host.append_child(&container, &dot);
                self.dots.push(dot);
            }
        }

        let active = self.current_index();
        for (index, dot) in self.dots.iter().enumerate() {
            if index == active {
                self.host.add_class(dot, ACTIVE_DOT_CLASS);
                self.host.set_attribute(dot, "aria-current", "true");
            } else {
                self.host.remove_class(dot, ACTIVE_DOT_CLASS);
                self.host.remove_attribute(dot, "aria-current");
            }
        }
    }

    /// Only slides in view are exposed and tab-reachable.
    fn sync_aria(&self) {
        let visible = self.layout.visible_slides(&self.state);
        for (index, slide) in self.elements.slides.iter().enumerate() {
            if visible.contains(&index) {
                self.host.set_attribute(slide, "aria-hidden", "false");
                self.host.set_attribute(slide, "tabindex", "0");
            } else {
                self.host.set_attribute(slide, "aria-hidden", "true");
                self.host.set_attribute(slide, "tabindex", "-1");
            }
        }

        if self.layout.mode() == LayoutMode::CarouselBounded {
            let start = self.state.start_index;
            let ends = [
                (&self.elements.prev, start == 0),
                (&self.elements.next, start >= self.layout.max_start()),
            ];
            for (button, disabled) in ends {
                let Some(button) = button else { continue };
                if disabled {
                    self.host.set_attribute(button, "aria-disabled", "true");
                } else {
                    self.host.remove_attribute(button, "aria-disabled");
                }
            }
        }
    }

    fn apply_roles(&mut self) {
        let wrapper = &self.elements.wrapper;
        self.host.set_attribute(wrapper, "role", "region");
        self.host
            .set_attribute(wrapper, "aria-roledescription", "carousel");
        let total = self.elements.slide_count();
        for (index, slide) in self.elements.slides.iter().enumerate() {
            self.host.set_attribute(slide, "role", "group");
            self.host
                .set_attribute(slide, "aria-roledescription", "slide");
            if self.host.attribute(slide, "aria-label").is_none() {
                self.host
                    .set_attribute(slide, "aria-label", &format!("{} of {total}", index + 1));
                self.labelled.push(index);
            }
        }
    }

    fn strip_roles(&mut self) {
        let wrapper = &self.elements.wrapper;
        self.host.remove_attribute(wrapper, "role");
        self.host.remove_attribute(wrapper, "aria-roledescription");
        for slide in &self.elements.slides {
            for name in ["role", "aria-roledescription", "aria-hidden", "tabindex"] {
                self.host.remove_attribute(slide, name);
            }
        }
        for index in self.labelled.drain(..) {
            if let Some(slide) = self.elements.slides.get(index) {
                self.host.remove_attribute(slide, "aria-label");
            }
        }
        for button in [&self.elements.prev, &self.elements.next].into_iter().flatten() {
            self.host.remove_attribute(button, "aria-disabled");
        }
    }
}
