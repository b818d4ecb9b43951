//! Drives a [`SliderRegistry`] over a [`MockDom`] on the fake clock.

use anyhow::Result;
use sliderberg_core::{
    Controller, EventOutcome, ListenKind, SliderEvent, SliderHost, SliderId, SliderRegistry,
};

use crate::dom::{MockDom, NodeId, ObserverKind, BODY};
use crate::{sliders, SliderMarkup};

/// Long enough for any transition (max duration + guard + frame) to settle.
pub const SETTLE_MS: u64 = 2_500;

const WRAPPER: &str = "sliderberg-wrapper";
const CONTAINER: &str = "sliderberg-slides-container";

/// Handles to the markup built for one slider.
#[derive(Clone, Debug)]
pub struct Mounted {
    pub wrapper: NodeId,
    /// Outer slides container (carries the config attributes).
    pub container: NodeId,
    /// Element holding the slides.
    pub track: NodeId,
    pub slides: Vec<NodeId>,
    pub prev: Option<NodeId>,
    pub next: Option<NodeId>,
    pub indicators: Option<NodeId>,
}

#[derive(Debug)]
pub struct Harness {
    pub dom: MockDom,
    pub registry: SliderRegistry<MockDom>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// Desktop viewport.
    pub fn new() -> Self {
        Self::with_viewport(1280.0)
    }

    pub fn with_viewport(width: f64) -> Self {
        let dom = MockDom::new(width);
        let registry = SliderRegistry::new(dom.clone());
        Self { dom, registry }
    }

    pub fn controller(&self, id: SliderId) -> &Controller<MockDom> {
        self.registry.get(id).expect("slider should be registered")
    }

    pub fn controller_mut(&mut self, id: SliderId) -> &mut Controller<MockDom> {
        self.registry
            .get_mut(id)
            .expect("slider should be registered")
    }

    // ----- markup -----

    pub fn mount(&mut self, preset: &str) -> Result<Mounted> {
        let markup = sliders::markup(preset)?;
        Ok(self.mount_markup(&markup))
    }

    pub fn mount_markup(&mut self, markup: &SliderMarkup) -> Mounted {
        self.mount_into(BODY, markup)
    }

    /// Build slider markup as the last child of `parent`.
    pub fn mount_into(&mut self, parent: NodeId, markup: &SliderMarkup) -> Mounted {
        let dom = &self.dom;
        let wrapper = dom.element("div", &[WRAPPER]);
        if let Some(id) = &markup.wrapper_id {
            dom.set_attr(wrapper, "id", id);
        }
        dom.append(parent, wrapper);

        let container = dom.element("div", &[CONTAINER]);
        for (name, value) in &markup.attributes {
            dom.set_attr(container, name, value);
        }
        dom.append(wrapper, container);

        let track = if markup.legacy {
            let inner = dom.element("div", &[CONTAINER]);
            dom.append(container, inner);
            inner
        } else {
            container
        };

        let slide_class = if markup.legacy {
            "wp-block-sliderberg-slide"
        } else {
            "sliderberg-slide"
        };
        let slides: Vec<NodeId> = (0..markup.slides)
            .map(|index| {
                let slide = dom.element("div", &[slide_class]);
                dom.set_attr(slide, "data-slide", &index.to_string());
                let content = dom.element("p", &[]);
                dom.append(slide, content);
                if let Some(height) = markup.slide_heights.get(index) {
                    dom.set_height(slide, *height);
                }
                dom.append(track, slide);
                slide
            })
            .collect();

        let (prev, next) = if markup.prev_next {
            let nav = dom.element("div", &["sliderberg-navigation"]);
            dom.append(wrapper, nav);
            let prev = dom.element("button", &["sliderberg-prev"]);
            let next = dom.element("button", &["sliderberg-next"]);
            dom.append(nav, prev);
            dom.append(nav, next);
            (Some(prev), Some(next))
        } else {
            (None, None)
        };

        let indicators = markup.indicators.then(|| {
            let node = dom.element("div", &["sliderberg-slide-indicators"]);
            dom.append(wrapper, node);
            node
        });

        Mounted {
            wrapper,
            container,
            track,
            slides,
            prev,
            next,
            indicators,
        }
    }

    // ----- lifecycle -----

    pub fn create(&mut self, wrapper: NodeId) -> Option<SliderId> {
        self.registry.create_instance(&wrapper)
    }

    /// Create an instance for every wrapper in the document, in order.
    pub fn init(&mut self) -> Vec<SliderId> {
        self.dom
            .find_all(BODY, WRAPPER)
            .into_iter()
            .filter_map(|wrapper| self.registry.create_instance(&wrapper))
            .collect()
    }

    /// Mount a preset, create it and let the initial activation settle.
    pub fn start(&mut self, preset: &str) -> Result<(SliderId, Mounted)> {
        let mounted = self.mount(preset)?;
        let id = self
            .create(mounted.wrapper)
            .ok_or_else(|| anyhow::anyhow!("preset '{preset}' did not create a slider"))?;
        self.advance(SETTLE_MS);
        Ok((id, mounted))
    }

    // ----- clock -----

    /// Run every callback due within the next `ms` milliseconds, in order.
    pub fn advance(&mut self, ms: u64) {
        let until = self.dom.now() + ms;
        while let Some(deliveries) = self.dom.pop_due(until) {
            for (slider, event) in deliveries {
                self.registry.dispatch(slider, event);
            }
        }
        self.dom.set_now(until);
    }

    pub fn settle(&mut self) {
        self.advance(SETTLE_MS);
    }

    // ----- input -----

    fn fire(&mut self, node: NodeId, kind: ListenKind, event: SliderEvent<NodeId>) -> EventOutcome {
        let mut outcome = EventOutcome::IGNORED;
        for slider in self.dom.listeners_on(node, kind) {
            let result = self.registry.dispatch(slider, event.clone());
            outcome.prevent_default |= result.prevent_default;
        }
        outcome
    }

    /// Deliver to listeners on `target` and each ancestor.
    fn bubble<F>(&mut self, target: NodeId, kind: ListenKind, make: F) -> EventOutcome
    where
        F: Fn(NodeId) -> SliderEvent<NodeId>,
    {
        let mut outcome = EventOutcome::IGNORED;
        let mut cursor = Some(target);
        while let Some(node) = cursor {
            let result = self.fire(node, kind, make(node));
            outcome.prevent_default |= result.prevent_default;
            cursor = self.dom.parent_of(node);
        }
        outcome
    }

    pub fn click(&mut self, target: NodeId) -> EventOutcome {
        self.bubble(target, ListenKind::Click, |current| SliderEvent::Click {
            current,
            target,
        })
    }

    pub fn swipe(&mut self, on: NodeId, from: (f64, f64), to: (f64, f64)) {
        self.bubble(on, ListenKind::TouchStart, |_| SliderEvent::TouchStart {
            target: on,
            x: from.0,
            y: from.1,
        });
        self.bubble(on, ListenKind::TouchEnd, |_| SliderEvent::TouchEnd {
            target: on,
            x: to.0,
            y: to.1,
        });
    }

    /// Key press on the focused element (or the body).
    pub fn key(&mut self, key: &str) -> EventOutcome {
        let target = self.dom.focused().unwrap_or(BODY);
        self.key_on(target, key)
    }

    pub fn key_on(&mut self, target: NodeId, key: &str) -> EventOutcome {
        self.bubble(target, ListenKind::KeyDown, |_| SliderEvent::KeyDown {
            target,
            key: key.to_string(),
        })
    }

    /// Move focus to `node`, firing `focusout` then `focusin`.
    pub fn focus(&mut self, node: NodeId) {
        let previous = self.dom.focused();
        self.dom.set_focus(Some(node));
        if let Some(previous) = previous {
            self.bubble(previous, ListenKind::FocusOut, |_| SliderEvent::FocusOut {
                related: Some(node),
            });
        }
        self.bubble(node, ListenKind::FocusIn, |_| SliderEvent::FocusIn);
    }

    pub fn blur(&mut self) {
        if let Some(previous) = self.dom.focused() {
            self.dom.set_focus(None);
            self.bubble(previous, ListenKind::FocusOut, |_| SliderEvent::FocusOut {
                related: None,
            });
        }
    }

    pub fn hover(&mut self, node: NodeId) {
        self.fire(node, ListenKind::PointerEnter, SliderEvent::PointerEnter);
    }

    /// Pointer leaves `node` towards `related`.
    pub fn unhover(&mut self, node: NodeId, related: Option<NodeId>) {
        self.fire(node, ListenKind::PointerLeave, SliderEvent::PointerLeave { related });
    }

    /// Change the viewport width and notify every resize observer.
    pub fn resize_viewport(&mut self, width: f64) {
        self.dom.set_viewport_width(width);
        let targets: Vec<SliderId> = self
            .dom
            .observers()
            .into_iter()
            .filter(|record| matches!(record.kind, ObserverKind::Resize(_)))
            .map(|record| record.slider)
            .collect();
        for slider in targets {
            self.registry.dispatch(slider, SliderEvent::Resized);
        }
    }

    /// Report the intersection state of `node` to its observers.
    pub fn intersect(&mut self, node: NodeId, is_intersecting: bool, ratio: f64) {
        let targets: Vec<SliderId> = self
            .dom
            .observers()
            .into_iter()
            .filter(|record| record.kind == ObserverKind::Intersection(node))
            .map(|record| record.slider)
            .collect();
        for slider in targets {
            self.registry.dispatch(
                slider,
                SliderEvent::Intersection {
                    is_intersecting,
                    ratio,
                },
            );
        }
    }

    /// `transform` currently applied to `node`.
    pub fn transform(&self, node: NodeId) -> Option<String> {
        self.dom.style(node, "transform")
    }

    pub fn is_connected(&self, node: NodeId) -> bool {
        self.dom.is_connected(&node)
    }
}
