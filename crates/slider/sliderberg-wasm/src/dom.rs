//! [`SliderHost`] over the browser DOM.
//!
//! Every timer, frame, listener and observer is backed by a `Closure` owned by
//! [`WebShared`]. Closures hold only a `Weak` back-reference and hand their
//! translated event to the runtime's sink. Retired closures are parked in a
//! graveyard and dropped once no callback of ours is on the stack, since
//! wasm-bindgen forbids dropping a closure while it runs.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use js_sys::{Array, Function};
use log::{debug, warn};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, CustomEvent, CustomEventInit, Document, Element, Event, EventTarget,
    FocusEvent, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, MouseEvent, Node, ResizeObserver, TouchEvent,
    TouchList, TransitionEvent, Window,
};

use sliderberg_core::elements::WRAPPER_CLASS;
use sliderberg_core::{
    EventOutcome, FrameId, HostError, ListenKind, ListenerId, ObserverId, SlideChange,
    SliderEvent, SliderHost, SliderId, TimerId, SLIDE_CHANGE_EVENT,
};

/// Where translated callbacks go. Installed by the runtime.
pub(crate) type EventSink = Rc<dyn Fn(SliderId, SliderEvent<Element>) -> EventOutcome>;

struct TimerEntry {
    handle: i32,
    interval: bool,
    _closure: Closure<dyn FnMut()>,
}

struct FrameEntry {
    handle: i32,
    _closure: Closure<dyn FnMut(f64)>,
}

struct ListenerEntry {
    target: Element,
    kind: ListenKind,
    closure: Closure<dyn FnMut(Event)>,
}

enum Observer {
    Resize(ResizeObserver),
    Intersection(IntersectionObserver),
}

struct ObserverEntry {
    observer: Observer,
    _closure: Closure<dyn FnMut(Array)>,
}

pub(crate) struct WebShared {
    window: Window,
    document: Document,
    next_handle: Cell<u32>,
    timers: RefCell<HashMap<u32, TimerEntry>>,
    frames: RefCell<HashMap<u32, FrameEntry>>,
    listeners: RefCell<HashMap<u32, ListenerEntry>>,
    observers: RefCell<HashMap<u32, ObserverEntry>>,
    sink: RefCell<Option<EventSink>>,
    graveyard: RefCell<Vec<Box<dyn Any>>>,
    /// Callbacks of ours currently on the stack.
    depth: Cell<u32>,
}

/// Marks a callback in progress; see [`WebShared::enter`].
struct Entered<'a>(&'a WebShared);

impl Drop for Entered<'_> {
    fn drop(&mut self) {
        self.0.depth.set(self.0.depth.get().saturating_sub(1));
    }
}

impl WebShared {
    fn alloc(&self) -> u32 {
        let handle = self.next_handle.get();
        self.next_handle.set(handle.wrapping_add(1));
        handle
    }

    fn enter(&self) -> Entered<'_> {
        self.reap();
        self.depth.set(self.depth.get() + 1);
        Entered(self)
    }

    fn deliver(&self, slider: SliderId, event: SliderEvent<Element>) -> EventOutcome {
        let sink = self.sink.borrow().clone();
        match sink {
            Some(sink) => sink(slider, event),
            None => EventOutcome::IGNORED,
        }
    }

    fn bury(&self, retired: Box<dyn Any>) {
        self.graveyard.borrow_mut().push(retired);
    }

    fn reap(&self) {
        if self.depth.get() > 0 {
            return;
        }
        let dead = std::mem::take(&mut *self.graveyard.borrow_mut());
        drop(dead);
    }

    fn supports(&self, global: &str) -> bool {
        js_sys::Reflect::has(&self.window, &JsValue::from_str(global)).unwrap_or(false)
    }
}

/// Browser host handle. Clones share state; [`SliderHost::for_slider`] picks
/// the instance callbacks are routed to.
#[derive(Clone)]
pub struct WebHost {
    shared: Rc<WebShared>,
    slider: Option<SliderId>,
}

impl fmt::Debug for WebHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebHost")
            .field("slider", &self.slider)
            .field("timers", &self.shared.timers.borrow().len())
            .field("listeners", &self.shared.listeners.borrow().len())
            .field("observers", &self.shared.observers.borrow().len())
            .finish_non_exhaustive()
    }
}

impl WebHost {
    /// `None` outside a window with a document (workers, node).
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self {
            shared: Rc::new(WebShared {
                window,
                document,
                next_handle: Cell::new(0),
                timers: RefCell::new(HashMap::new()),
                frames: RefCell::new(HashMap::new()),
                listeners: RefCell::new(HashMap::new()),
                observers: RefCell::new(HashMap::new()),
                sink: RefCell::new(None),
                graveyard: RefCell::new(Vec::new()),
                depth: Cell::new(0),
            }),
            slider: None,
        })
    }

    pub fn window(&self) -> &Window {
        &self.shared.window
    }

    pub fn document(&self) -> &Document {
        &self.shared.document
    }

    pub(crate) fn set_sink(&self, sink: EventSink) {
        *self.shared.sink.borrow_mut() = Some(sink);
    }

    pub(crate) fn bury(&self, retired: Box<dyn Any>) {
        self.shared.bury(retired);
    }

    pub(crate) fn reap(&self) {
        self.shared.reap();
    }

    /// Live host resources, for diagnostics.
    pub fn pending(&self) -> usize {
        self.shared.timers.borrow().len()
            + self.shared.frames.borrow().len()
            + self.shared.listeners.borrow().len()
            + self.shared.observers.borrow().len()
    }

    /// Slider wrappers at or below `root` (the whole document when `None`).
    pub fn wrappers(&self, root: Option<&Element>) -> Result<Vec<Element>, JsValue> {
        let selector = format!(".{WRAPPER_CLASS}");
        let list = match root {
            Some(root) => root.query_selector_all(&selector)?,
            None => self.shared.document.query_selector_all(&selector)?,
        };
        let mut found = Vec::new();
        if let Some(root) = root {
            if root.class_list().contains(WRAPPER_CLASS) {
                found.push(root.clone());
            }
        }
        found.extend(
            (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<Element>().ok()),
        );
        Ok(found)
    }

    fn schedule(&self, delay_ms: u32, interval: bool) -> TimerId {
        let shared = &self.shared;
        let id = shared.alloc();
        let weak: Weak<WebShared> = Rc::downgrade(shared);
        let route = self.slider;
        let closure = Closure::<dyn FnMut()>::new(move || {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let _entered = shared.enter();
            if interval {
                if !shared.timers.borrow().contains_key(&id) {
                    return;
                }
            } else {
                let retired = shared.timers.borrow_mut().remove(&id);
                match retired {
                    Some(entry) => shared.bury(Box::new(entry)),
                    None => return,
                }
            }
            if let Some(slider) = route {
                shared.deliver(slider, SliderEvent::Timer(TimerId(id)));
            }
        });

        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        let callback: &Function = closure.as_ref().unchecked_ref();
        let scheduled = if interval {
            shared
                .window
                .set_interval_with_callback_and_timeout_and_arguments_0(callback, delay)
        } else {
            shared
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(callback, delay)
        };
        match scheduled {
            Ok(handle) => {
                shared.timers.borrow_mut().insert(
                    id,
                    TimerEntry {
                        handle,
                        interval,
                        _closure: closure,
                    },
                );
            }
            Err(err) => warn!("timer scheduling failed: {err:?}"),
        }
        TimerId(id)
    }
}

impl SliderHost for WebHost {
    type Node = Element;

    fn for_slider(&self, slider: SliderId) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            slider: Some(slider),
        }
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let list = node.children();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }

    fn parent(&self, node: &Element) -> Option<Element> {
        node.parent_element()
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn is_connected(&self, node: &Element) -> bool {
        node.is_connected()
    }

    fn focus_within(&self, node: &Element) -> bool {
        match self.shared.document.active_element() {
            Some(active) => {
                let active: &Node = active.as_ref();
                node.contains(Some(active))
            }
            None => false,
        }
    }

    fn viewport_width(&self) -> f64 {
        self.shared
            .window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn offset_height(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map_or(0.0, |el| f64::from(el.offset_height()))
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            if let Err(err) = el.style().set_property(property, value) {
                debug!("style {property} rejected: {err:?}");
            }
        }
    }

    fn remove_style(&self, node: &Element, property: &str) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            let _ = el.style().remove_property(property);
        }
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(err) = node.set_attribute(name, value) {
            debug!("attribute {name} rejected: {err:?}");
        }
    }

    fn remove_attribute(&self, node: &Element, name: &str) {
        let _ = node.remove_attribute(name);
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        self.shared.document.create_element(tag).ok()
    }

    fn clone_node(&self, node: &Element) -> Option<Element> {
        node.clone_node_with_deep(true)
            .ok()
            .and_then(|copy| copy.dyn_into::<Element>().ok())
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        if let Err(err) = parent.append_child(child) {
            warn!("append failed: {err:?}");
        }
    }

    fn prepend_child(&self, parent: &Element, child: &Element) {
        if let Err(err) = parent.prepend_with_node_1(child) {
            warn!("prepend failed: {err:?}");
        }
    }

    fn remove_node(&self, node: &Element) {
        node.remove();
    }

    fn force_reflow(&self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            let _ = el.offset_height();
        }
    }

    fn set_timeout(&self, delay_ms: u32) -> TimerId {
        self.schedule(delay_ms, false)
    }

    fn set_interval(&self, period_ms: u32) -> TimerId {
        self.schedule(period_ms, true)
    }

    fn clear_timer(&self, timer: TimerId) {
        let retired = self.shared.timers.borrow_mut().remove(&timer.0);
        if let Some(entry) = retired {
            if entry.interval {
                self.shared.window.clear_interval_with_handle(entry.handle);
            } else {
                self.shared.window.clear_timeout_with_handle(entry.handle);
            }
            self.shared.bury(Box::new(entry));
        }
    }

    fn request_frame(&self) -> FrameId {
        let shared = &self.shared;
        let id = shared.alloc();
        let weak = Rc::downgrade(shared);
        let route = self.slider;
        let closure = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let _entered = shared.enter();
            let retired = shared.frames.borrow_mut().remove(&id);
            let Some(entry) = retired else {
                return;
            };
            shared.bury(Box::new(entry));
            if let Some(slider) = route {
                shared.deliver(slider, SliderEvent::Frame(FrameId(id)));
            }
        });
        match shared
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(handle) => {
                shared.frames.borrow_mut().insert(
                    id,
                    FrameEntry {
                        handle,
                        _closure: closure,
                    },
                );
            }
            Err(err) => warn!("requestAnimationFrame failed: {err:?}"),
        }
        FrameId(id)
    }

    fn cancel_frame(&self, frame: FrameId) {
        let retired = self.shared.frames.borrow_mut().remove(&frame.0);
        if let Some(entry) = retired {
            let _ = self.shared.window.cancel_animation_frame(entry.handle);
            self.shared.bury(Box::new(entry));
        }
    }

    fn listen(&self, node: &Element, kind: ListenKind) -> Option<ListenerId> {
        let route = self.slider?;
        let shared = &self.shared;
        let id = shared.alloc();
        let weak = Rc::downgrade(shared);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let _entered = shared.enter();
            let Some(translated) = translate(kind, &event) else {
                return;
            };
            if shared.deliver(route, translated).prevent_default {
                event.prevent_default();
            }
        });

        let options = AddEventListenerOptions::new();
        if kind.is_passive() {
            options.set_passive(true);
        }
        match node.add_event_listener_with_callback_and_add_event_listener_options(
            kind.event_name(),
            closure.as_ref().unchecked_ref(),
            &options,
        ) {
            Ok(()) => {
                shared.listeners.borrow_mut().insert(
                    id,
                    ListenerEntry {
                        target: node.clone(),
                        kind,
                        closure,
                    },
                );
                Some(ListenerId(id))
            }
            Err(err) => {
                warn!("{} listener rejected: {err:?}", kind.event_name());
                None
            }
        }
    }

    fn unlisten(&self, listener: ListenerId) {
        let retired = self.shared.listeners.borrow_mut().remove(&listener.0);
        if let Some(entry) = retired {
            let _ = entry.target.remove_event_listener_with_callback(
                entry.kind.event_name(),
                entry.closure.as_ref().unchecked_ref(),
            );
            self.shared.bury(Box::new(entry));
        }
    }

    fn observe_resize(&self, targets: &[Element]) -> Option<ObserverId> {
        let route = self.slider?;
        let shared = &self.shared;
        if !shared.supports("ResizeObserver") {
            return None;
        }
        let id = shared.alloc();
        let weak = Rc::downgrade(shared);
        let closure = Closure::<dyn FnMut(Array)>::new(move |_entries: Array| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let _entered = shared.enter();
            shared.deliver(route, SliderEvent::Resized);
        });
        let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())
            .map_err(|err| debug!("ResizeObserver unavailable: {err:?}"))
            .ok()?;
        for target in targets {
            observer.observe(target);
        }
        shared.observers.borrow_mut().insert(
            id,
            ObserverEntry {
                observer: Observer::Resize(observer),
                _closure: closure,
            },
        );
        Some(ObserverId(id))
    }

    fn observe_intersection(&self, target: &Element, threshold: f64) -> Option<ObserverId> {
        let route = self.slider?;
        let shared = &self.shared;
        if !shared.supports("IntersectionObserver") {
            return None;
        }
        let id = shared.alloc();
        let weak = Rc::downgrade(shared);
        let closure = Closure::<dyn FnMut(Array)>::new(move |entries: Array| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let _entered = shared.enter();
            let latest = entries
                .iter()
                .last()
                .and_then(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok());
            if let Some(entry) = latest {
                shared.deliver(
                    route,
                    SliderEvent::Intersection {
                        is_intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    },
                );
            }
        });
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)
                .map_err(|err| debug!("IntersectionObserver unavailable: {err:?}"))
                .ok()?;
        observer.observe(target);
        shared.observers.borrow_mut().insert(
            id,
            ObserverEntry {
                observer: Observer::Intersection(observer),
                _closure: closure,
            },
        );
        Some(ObserverId(id))
    }

    fn disconnect(&self, observer: ObserverId) -> Result<(), HostError> {
        let retired = self.shared.observers.borrow_mut().remove(&observer.0);
        let entry = retired.ok_or(HostError::UnknownHandle { handle: observer.0 })?;
        match &entry.observer {
            Observer::Resize(observer) => observer.disconnect(),
            Observer::Intersection(observer) => observer.disconnect(),
        }
        self.shared.bury(Box::new(entry));
        Ok(())
    }

    fn dispatch_slide_change(&self, target: &Element, change: &SlideChange) {
        let detail = match swb::to_value(change) {
            Ok(detail) => detail,
            Err(err) => {
                warn!("slidechange detail error: {err}");
                return;
            }
        };
        let init = CustomEventInit::new();
        init.set_bubbles(true);
        init.set_detail(&detail);
        match CustomEvent::new_with_event_init_dict(SLIDE_CHANGE_EVENT, &init) {
            Ok(event) => {
                if let Err(err) = target.dispatch_event(&event) {
                    warn!("slidechange listener threw: {err:?}");
                }
            }
            Err(err) => warn!("slidechange event error: {err:?}"),
        }
    }
}

/// Turn a DOM event into the core's event for `kind`. `None` drops it.
fn translate(kind: ListenKind, event: &Event) -> Option<SliderEvent<Element>> {
    let translated = match kind {
        ListenKind::Click => SliderEvent::Click {
            current: element(event.current_target())?,
            target: element(event.target())?,
        },
        ListenKind::TouchStart => {
            let (x, y) = first_touch(event.dyn_ref::<TouchEvent>()?.touches())?;
            SliderEvent::TouchStart {
                target: element(event.target())?,
                x,
                y,
            }
        }
        ListenKind::TouchEnd => {
            let (x, y) = first_touch(event.dyn_ref::<TouchEvent>()?.changed_touches())?;
            SliderEvent::TouchEnd {
                target: element(event.target())?,
                x,
                y,
            }
        }
        ListenKind::KeyDown => SliderEvent::KeyDown {
            target: element(event.target())?,
            key: event.dyn_ref::<KeyboardEvent>()?.key(),
        },
        ListenKind::PointerEnter => SliderEvent::PointerEnter,
        ListenKind::PointerLeave => SliderEvent::PointerLeave {
            related: element(event.dyn_ref::<MouseEvent>()?.related_target()),
        },
        ListenKind::FocusIn => SliderEvent::FocusIn,
        ListenKind::FocusOut => SliderEvent::FocusOut {
            related: element(event.dyn_ref::<FocusEvent>()?.related_target()),
        },
        ListenKind::TransitionEnd => SliderEvent::TransitionEnd {
            target: element(event.target())?,
            property: event.dyn_ref::<TransitionEvent>()?.property_name(),
        },
    };
    Some(translated)
}

fn element(target: Option<EventTarget>) -> Option<Element> {
    target?.dyn_into::<Element>().ok()
}

fn first_touch(list: TouchList) -> Option<(f64, f64)> {
    let touch = list.get(0)?;
    Some((f64::from(touch.client_x()), f64::from(touch.client_y())))
}
