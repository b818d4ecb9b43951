//! wasm-bindgen bindings for the SliderBerg runtime.
//!
//! `SliderBergRuntime` owns a [`SliderRegistry`] over the real DOM. Host
//! callbacks re-enter through a sink that holds only a `Weak` reference to the
//! runtime. Calls that arrive while the registry is busy (a `slidechange`
//! listener navigating, say) are queued and run as soon as the current
//! dispatch returns.

mod dom;
mod logger;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use log::LevelFilter;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, PageTransitionEvent};

use sliderberg_core::{EventOutcome, SliderEvent, SliderId, SliderRegistry};

pub use dom::WebHost;

const UNLOAD_EVENT: &str = "pagehide";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logger::init(LevelFilter::Warn);
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen(js_name = abiVersion)]
pub fn abi_version() -> u32 {
    1
}

/// Adjust console logging: "off", "error", "warn", "info", "debug" or "trace".
#[wasm_bindgen(js_name = setLogLevel)]
pub fn set_log_level(level: &str) -> Result<(), JsError> {
    let filter: LevelFilter = level
        .parse()
        .map_err(|_| JsError::new(&format!("unknown log level '{level}'")))?;
    logger::init(filter);
    Ok(())
}

/// Work that must wait for the registry.
enum Deferred {
    Event(SliderId, SliderEvent<Element>),
    Next(SliderId),
    Prev(SliderId),
    GoTo(SliderId, isize),
    Destroy(SliderId),
    DestroyAll,
}

impl Deferred {
    fn apply(self, registry: &mut SliderRegistry<WebHost>) -> EventOutcome {
        match self {
            Self::Event(id, event) => return registry.dispatch(id, event),
            Self::Next(id) => {
                registry.next_slide(id);
            }
            Self::Prev(id) => {
                registry.prev_slide(id);
            }
            Self::GoTo(id, index) => {
                registry.go_to_slide(id, index);
            }
            Self::Destroy(id) => {
                registry.destroy(id);
            }
            Self::DestroyAll => {
                registry.destroy_all();
            }
        }
        EventOutcome::IGNORED
    }
}

struct RuntimeInner {
    host: WebHost,
    registry: RefCell<SliderRegistry<WebHost>>,
    deferred: RefCell<VecDeque<Deferred>>,
    unload: RefCell<Option<Closure<dyn FnMut(Event)>>>,
}

impl RuntimeInner {
    /// Run `f` on the registry, then any work queued meanwhile. `None` when
    /// the registry is already borrowed further up the stack.
    fn with_registry<R>(&self, f: impl FnOnce(&mut SliderRegistry<WebHost>) -> R) -> Option<R> {
        let result = {
            let mut registry = self.registry.try_borrow_mut().ok()?;
            f(&mut registry)
        };
        self.drain();
        self.host.reap();
        Some(result)
    }

    fn read<R>(&self, f: impl FnOnce(&SliderRegistry<WebHost>) -> R) -> Result<R, JsError> {
        let registry = self.registry.try_borrow().map_err(|_| busy())?;
        Ok(f(&registry))
    }

    fn defer(&self, job: Deferred) {
        self.deferred.borrow_mut().push_back(job);
    }

    fn submit(&self, job: Deferred) -> EventOutcome {
        if self.registry.try_borrow_mut().is_err() {
            self.defer(job);
            return EventOutcome::IGNORED;
        }
        self.with_registry(|registry| job.apply(registry))
            .unwrap_or(EventOutcome::IGNORED)
    }

    fn drain(&self) {
        loop {
            let Some(job) = self.deferred.borrow_mut().pop_front() else {
                break;
            };
            match self.registry.try_borrow_mut() {
                Ok(mut registry) => {
                    job.apply(&mut registry);
                }
                Err(_) => {
                    self.deferred.borrow_mut().push_front(job);
                    break;
                }
            }
        }
    }
}

#[wasm_bindgen]
pub struct SliderBergRuntime {
    inner: Rc<RuntimeInner>,
}

#[wasm_bindgen]
impl SliderBergRuntime {
    /// Create an empty runtime bound to the current document.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<SliderBergRuntime, JsError> {
        console_error_panic_hook::set_once();
        let host = WebHost::new()
            .ok_or_else(|| JsError::new("SliderBergRuntime needs a window with a document"))?;
        let inner = Rc::new(RuntimeInner {
            host: host.clone(),
            registry: RefCell::new(SliderRegistry::new(host.clone())),
            deferred: RefCell::new(VecDeque::new()),
            unload: RefCell::new(None),
        });
        let weak = Rc::downgrade(&inner);
        host.set_sink(Rc::new(
            move |id: SliderId, event: SliderEvent<Element>| match weak.upgrade() {
                Some(inner) => inner.submit(Deferred::Event(id, event)),
                None => EventOutcome::IGNORED,
            },
        ));
        Ok(SliderBergRuntime { inner })
    }

    /// Create an instance for every `.sliderberg-wrapper` at or below `root`
    /// (the whole document when omitted). Returns the ids of all matched
    /// sliders, including ones that were already live.
    pub fn init(&self, root: Option<Element>) -> Result<Vec<u32>, JsError> {
        let wrappers = self
            .inner
            .host
            .wrappers(root.as_ref())
            .map_err(|e| JsError::new(&format!("init query error: {e:?}")))?;
        self.inner
            .with_registry(|registry| {
                wrappers
                    .iter()
                    .filter_map(|wrapper| registry.create_instance(wrapper))
                    .map(|id| id.0)
                    .collect()
            })
            .ok_or_else(busy)
    }

    /// Create one instance. `undefined` when the markup is not a valid slider.
    pub fn create(&self, element: Element) -> Result<Option<u32>, JsError> {
        self.inner
            .with_registry(|registry| registry.create_instance(&element).map(|id| id.0))
            .ok_or_else(busy)
    }

    /// Advance one step. `false` when the request was dropped or queued.
    pub fn next(&self, id: u32) -> bool {
        let id = SliderId(id);
        self.inner
            .with_registry(|registry| registry.next_slide(id))
            .unwrap_or_else(|| {
                self.inner.defer(Deferred::Next(id));
                false
            })
    }

    pub fn prev(&self, id: u32) -> bool {
        let id = SliderId(id);
        self.inner
            .with_registry(|registry| registry.prev_slide(id))
            .unwrap_or_else(|| {
                self.inner.defer(Deferred::Prev(id));
                false
            })
    }

    /// Jump to a real slide; out-of-range indices wrap.
    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&self, id: u32, index: i32) -> bool {
        let id = SliderId(id);
        let index = index as isize;
        self.inner
            .with_registry(|registry| registry.go_to_slide(id, index))
            .unwrap_or_else(|| {
                self.inner.defer(Deferred::GoTo(id, index));
                false
            })
    }

    /// Logical index of the first visible real slide.
    pub fn current(&self, id: u32) -> Result<Option<u32>, JsError> {
        self.inner.read(|registry| {
            registry
                .get(SliderId(id))
                .map(|controller| controller.current_index() as u32)
        })
    }

    /// The parsed configuration as a plain object, `undefined` for unknown ids.
    pub fn config(&self, id: u32) -> Result<JsValue, JsError> {
        let config = self
            .inner
            .read(|registry| registry.get(SliderId(id)).map(|c| c.config().clone()))?;
        match config {
            Some(config) => swb::to_value(&config)
                .map_err(|e| JsError::new(&format!("config error: {e}"))),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn destroy(&self, id: u32) -> bool {
        let id = SliderId(id);
        self.inner
            .with_registry(|registry| registry.destroy(id))
            .unwrap_or_else(|| {
                self.inner.defer(Deferred::Destroy(id));
                false
            })
    }

    /// Destroy every live instance. Returns how many were destroyed.
    #[wasm_bindgen(js_name = destroyAll)]
    pub fn destroy_all(&self) -> u32 {
        self.inner
            .with_registry(|registry| registry.destroy_all() as u32)
            .unwrap_or_else(|| {
                self.inner.defer(Deferred::DestroyAll);
                0
            })
    }

    pub fn count(&self) -> Result<u32, JsError> {
        self.inner.read(|registry| registry.len() as u32)
    }

    /// Live timers, frames, listeners and observers held for all instances.
    #[wasm_bindgen(js_name = pendingHostResources)]
    pub fn pending_host_resources(&self) -> u32 {
        self.inner.host.pending() as u32
    }

    /// Destroy all instances when the page is hidden for unload. Pages kept in
    /// the back/forward cache (`persisted`) are left intact. Idempotent.
    #[wasm_bindgen(js_name = installUnloadCleanup)]
    pub fn install_unload_cleanup(&self) -> Result<(), JsError> {
        if self.inner.unload.borrow().is_some() {
            return Ok(());
        }
        let weak = Rc::downgrade(&self.inner);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let cached = event
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(PageTransitionEvent::persisted);
            if cached {
                return;
            }
            if let Some(inner) = weak.upgrade() {
                inner.submit(Deferred::DestroyAll);
            }
        });
        self.inner
            .host
            .window()
            .add_event_listener_with_callback(UNLOAD_EVENT, closure.as_ref().unchecked_ref())
            .map_err(|e| JsError::new(&format!("unload listener error: {e:?}")))?;
        *self.inner.unload.borrow_mut() = Some(closure);
        Ok(())
    }
}

impl Drop for SliderBergRuntime {
    fn drop(&mut self) {
        let unload = self.inner.unload.borrow_mut().take();
        if let Some(closure) = unload {
            let _ = self.inner.host.window().remove_event_listener_with_callback(
                UNLOAD_EVENT,
                closure.as_ref().unchecked_ref(),
            );
            self.inner.host.bury(Box::new(closure));
        }
        self.inner.submit(Deferred::DestroyAll);
    }
}

fn busy() -> JsError {
    JsError::new("SliderBergRuntime is busy dispatching")
}
