//! In-memory document implementing [`SliderHost`].
//!
//! Nodes live in an arena addressed by [`NodeId`]. Timers, frames and
//! `transitionend` notifications are queued against a fake millisecond clock
//! and handed out by [`MockDom::pop_due`]; the harness delivers them to the
//! registry. Every inline style write is logged for assertions.

use std::cell::{Ref, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use sliderberg_core::{
    FrameId, HostError, ListenKind, ListenerId, ObserverId, SlideChange, SliderEvent, SliderHost,
    SliderId, TimerId,
};

/// The document body; everything attached below it is connected.
pub const BODY: NodeId = NodeId(0);
/// Delay of an animation frame on the fake clock.
pub const FRAME_MS: u64 = 16;
const DEFAULT_HEIGHT: f64 = 300.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Clone, Debug, Default)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    height: f64,
}

/// One inline style mutation. `value` is `None` for a removal.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleWrite {
    pub node: NodeId,
    pub property: String,
    pub value: Option<String>,
}

#[derive(Clone, Debug)]
enum TaskKind {
    Timer { id: TimerId, period: Option<u64> },
    Frame(FrameId),
    TransitionEnd { node: NodeId, property: String },
}

#[derive(Clone, Debug)]
struct Task {
    seq: u64,
    due: u64,
    slider: Option<SliderId>,
    kind: TaskKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListenerRecord {
    pub slider: SliderId,
    pub node: NodeId,
    pub kind: ListenKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObserverKind {
    Resize(Vec<NodeId>),
    Intersection(NodeId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ObserverRecord {
    pub slider: SliderId,
    pub kind: ObserverKind,
}

struct DomState {
    nodes: Vec<NodeData>,
    now: u64,
    viewport_width: f64,
    next_handle: u32,
    next_seq: u64,
    tasks: Vec<Task>,
    listeners: BTreeMap<u32, ListenerRecord>,
    observers: BTreeMap<u32, ObserverRecord>,
    slide_changes: Vec<(NodeId, SlideChange)>,
    style_log: Vec<StyleWrite>,
    focused: Option<NodeId>,
    reflows: usize,
    supports_intersection: bool,
    supports_clone: bool,
    fail_disconnect: bool,
}

impl DomState {
    fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    fn handle(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }

    fn schedule(&mut self, due: u64, slider: Option<SliderId>, kind: TaskKind) {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.tasks.push(Task {
            seq,
            due,
            slider,
            kind,
        });
    }

    fn is_connected(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == BODY {
                return true;
            }
            cursor = self.node(current).parent;
        }
        false
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|child| *child != id);
        }
    }

    fn deep_clone(&mut self, id: NodeId) -> NodeId {
        let mut data = self.node(id).clone();
        let children = std::mem::take(&mut data.children);
        data.parent = None;
        let copy = NodeId(self.nodes.len());
        self.nodes.push(data);
        for child in children {
            let child_copy = self.deep_clone(child);
            self.node_mut(child_copy).parent = Some(copy);
            self.node_mut(copy).children.push(child_copy);
        }
        copy
    }

    fn cancel_transition_end(&mut self, node: NodeId, property: &str) {
        self.tasks.retain(|task| {
            !matches!(&task.kind, TaskKind::TransitionEnd { node: n, property: p } if *n == node && p == property)
        });
    }
}

/// Duration in ms that `transition` assigns to `property`.
fn transition_duration(transition: &str, property: &str) -> Option<u64> {
    transition.split(',').find_map(|segment| {
        let mut parts = segment.split_whitespace();
        let name = parts.next()?;
        if name != property && name != "all" {
            return None;
        }
        parts.next()?.strip_suffix("ms")?.parse().ok()
    })
}

#[derive(Clone)]
pub struct MockDom {
    inner: Rc<RefCell<DomState>>,
    slider: Option<SliderId>,
}

impl fmt::Debug for MockDom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("MockDom")
            .field("slider", &self.slider)
            .field("nodes", &state.nodes.len())
            .field("now", &state.now)
            .field("tasks", &state.tasks.len())
            .finish()
    }
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new(1280.0)
    }
}

impl MockDom {
    pub fn new(viewport_width: f64) -> Self {
        let body = NodeData {
            tag: "body".to_string(),
            height: DEFAULT_HEIGHT,
            ..NodeData::default()
        };
        let state = DomState {
            nodes: vec![body],
            now: 0,
            viewport_width,
            next_handle: 0,
            next_seq: 0,
            tasks: Vec::new(),
            listeners: BTreeMap::new(),
            observers: BTreeMap::new(),
            slide_changes: Vec::new(),
            style_log: Vec::new(),
            focused: None,
            reflows: 0,
            supports_intersection: true,
            supports_clone: true,
            fail_disconnect: false,
        };
        Self {
            inner: Rc::new(RefCell::new(state)),
            slider: None,
        }
    }

    fn state(&self) -> Ref<'_, DomState> {
        self.inner.borrow()
    }

    // ----- building -----

    /// Detached element with `classes`.
    pub fn element(&self, tag: &str, classes: &[&str]) -> NodeId {
        let mut state = self.inner.borrow_mut();
        let id = NodeId(state.nodes.len());
        state.nodes.push(NodeData {
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            height: DEFAULT_HEIGHT,
            ..NodeData::default()
        });
        id
    }

    pub fn append(&self, parent: NodeId, child: NodeId) {
        let mut state = self.inner.borrow_mut();
        state.detach(child);
        state.node_mut(child).parent = Some(parent);
        state.node_mut(parent).children.push(child);
    }

    pub fn set_attr(&self, node: NodeId, name: &str, value: &str) {
        self.inner
            .borrow_mut()
            .node_mut(node)
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_height(&self, node: NodeId, height: f64) {
        self.inner.borrow_mut().node_mut(node).height = height;
    }

    pub fn set_viewport_width(&self, width: f64) {
        self.inner.borrow_mut().viewport_width = width;
    }

    pub fn set_focus(&self, node: Option<NodeId>) {
        self.inner.borrow_mut().focused = node;
    }

    pub fn set_supports_intersection(&self, supported: bool) {
        self.inner.borrow_mut().supports_intersection = supported;
    }

    pub fn set_supports_clone(&self, supported: bool) {
        self.inner.borrow_mut().supports_clone = supported;
    }

    pub fn set_fail_disconnect(&self, fail: bool) {
        self.inner.borrow_mut().fail_disconnect = fail;
    }

    // ----- inspection -----

    pub fn tag(&self, node: NodeId) -> String {
        self.state().node(node).tag.clone()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.state().node(node).styles.get(property).cloned()
    }

    pub fn styles(&self, node: NodeId) -> BTreeMap<String, String> {
        self.state().node(node).styles.clone()
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.state().node(node).attrs.get(name).cloned()
    }

    pub fn attrs(&self, node: NodeId) -> BTreeMap<String, String> {
        self.state().node(node).attrs.clone()
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.state().node(node).classes.clone()
    }

    pub fn child_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.state().node(node).children.clone()
    }

    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.state().node(node).parent
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.state().is_connected(node)
    }

    /// Descendants of `root` carrying `class`, in document order.
    pub fn find_all(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        fn walk(state: &DomState, node: NodeId, class: &str, out: &mut Vec<NodeId>) {
            for child in &state.node(node).children {
                if state.node(*child).classes.iter().any(|c| c == class) {
                    out.push(*child);
                }
                walk(state, *child, class, out);
            }
        }
        let state = self.state();
        let mut out = Vec::new();
        walk(&state, root, class, &mut out);
        out
    }

    pub fn now(&self) -> u64 {
        self.state().now
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.state().focused
    }

    pub fn reflow_count(&self) -> usize {
        self.state().reflows
    }

    pub fn style_log(&self) -> Vec<StyleWrite> {
        self.state().style_log.clone()
    }

    pub fn take_style_log(&self) -> Vec<StyleWrite> {
        std::mem::take(&mut self.inner.borrow_mut().style_log)
    }

    pub fn slide_changes(&self) -> Vec<(NodeId, SlideChange)> {
        self.state().slide_changes.clone()
    }

    pub fn take_slide_changes(&self) -> Vec<(NodeId, SlideChange)> {
        std::mem::take(&mut self.inner.borrow_mut().slide_changes)
    }

    pub fn listeners(&self) -> Vec<ListenerRecord> {
        self.state().listeners.values().cloned().collect()
    }

    /// Sliders listening for `kind` directly on `node`, in registration order.
    pub fn listeners_on(&self, node: NodeId, kind: ListenKind) -> Vec<SliderId> {
        self.state()
            .listeners
            .values()
            .filter(|record| record.node == node && record.kind == kind)
            .map(|record| record.slider)
            .collect()
    }

    pub fn listener_count(&self, slider: SliderId) -> usize {
        self.state()
            .listeners
            .values()
            .filter(|record| record.slider == slider)
            .count()
    }

    pub fn observers(&self) -> Vec<ObserverRecord> {
        self.state().observers.values().cloned().collect()
    }

    pub fn observer_count(&self, slider: SliderId) -> usize {
        self.state()
            .observers
            .values()
            .filter(|record| record.slider == slider)
            .count()
    }

    /// Timers and frames still queued for `slider`.
    pub fn pending_callbacks(&self, slider: SliderId) -> usize {
        self.state()
            .tasks
            .iter()
            .filter(|task| task.slider == Some(slider))
            .count()
    }

    pub fn pending_intervals(&self, slider: SliderId) -> usize {
        self.state()
            .tasks
            .iter()
            .filter(|task| {
                task.slider == Some(slider)
                    && matches!(task.kind, TaskKind::Timer { period: Some(_), .. })
            })
            .count()
    }

    // ----- clock -----

    pub fn set_now(&self, now: u64) {
        let mut state = self.inner.borrow_mut();
        state.now = state.now.max(now);
    }

    /// Pop the earliest callback due at or before `until`, advancing the
    /// clock to it. Intervals are re-queued before they are handed out.
    /// Returns `None` once nothing is due.
    pub fn pop_due(&self, until: u64) -> Option<Vec<(SliderId, SliderEvent<NodeId>)>> {
        let mut state = self.inner.borrow_mut();
        let index = state
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due <= until)
            .min_by_key(|(_, task)| (task.due, task.seq))
            .map(|(index, _)| index)?;
        let task = state.tasks.remove(index);
        state.now = state.now.max(task.due);

        let deliveries = match task.kind {
            TaskKind::Timer { id, period } => {
                if let Some(period) = period {
                    let due = task.due + period.max(1);
                    state.schedule(due, task.slider, TaskKind::Timer { id, period: Some(period) });
                }
                task.slider
                    .map(|slider| (slider, SliderEvent::Timer(id)))
                    .into_iter()
                    .collect()
            }
            TaskKind::Frame(id) => task
                .slider
                .map(|slider| (slider, SliderEvent::Frame(id)))
                .into_iter()
                .collect(),
            TaskKind::TransitionEnd { node, property } => state
                .listeners
                .values()
                .filter(|record| record.node == node && record.kind == ListenKind::TransitionEnd)
                .map(|record| {
                    (
                        record.slider,
                        SliderEvent::TransitionEnd {
                            target: node,
                            property: property.clone(),
                        },
                    )
                })
                .collect(),
        };
        Some(deliveries)
    }
}

impl SliderHost for MockDom {
    type Node = NodeId;

    fn for_slider(&self, slider: SliderId) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            slider: Some(slider),
        }
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.child_nodes(*node)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.parent_of(*node)
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.state().node(*node).classes.iter().any(|c| c == class)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.attr(*node, name)
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        self.is_attached(*node)
    }

    fn focus_within(&self, node: &NodeId) -> bool {
        match self.focused() {
            Some(focused) => self.contains(node, &focused),
            None => false,
        }
    }

    fn viewport_width(&self) -> f64 {
        self.state().viewport_width
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        let state = self.state();
        if state.is_connected(*node) {
            state.node(*node).height
        } else {
            0.0
        }
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        let mut state = self.inner.borrow_mut();
        let previous = state
            .node_mut(*node)
            .styles
            .insert(property.to_string(), value.to_string());
        state.style_log.push(StyleWrite {
            node: *node,
            property: property.to_string(),
            value: Some(value.to_string()),
        });

        match property {
            "transform" if previous.as_deref() != Some(value) => {
                state.cancel_transition_end(*node, "transform");
                let duration = state
                    .node(*node)
                    .styles
                    .get("transition")
                    .and_then(|t| transition_duration(t, "transform"));
                if let (Some(duration), Some(_)) = (duration, previous) {
                    if state.is_connected(*node) {
                        let due = state.now + duration;
                        state.schedule(
                            due,
                            None,
                            TaskKind::TransitionEnd {
                                node: *node,
                                property: "transform".to_string(),
                            },
                        );
                    }
                }
            }
            "transition" if transition_duration(value, "transform").is_none() => {
                state.cancel_transition_end(*node, "transform");
            }
            _ => {}
        }
    }

    fn remove_style(&self, node: &NodeId, property: &str) {
        let mut state = self.inner.borrow_mut();
        state.node_mut(*node).styles.remove(property);
        state.style_log.push(StyleWrite {
            node: *node,
            property: property.to_string(),
            value: None,
        });
        if property == "transition" || property == "transform" {
            state.cancel_transition_end(*node, "transform");
        }
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.set_attr(*node, name, value);
    }

    fn remove_attribute(&self, node: &NodeId, name: &str) {
        self.inner.borrow_mut().node_mut(*node).attrs.remove(name);
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut state = self.inner.borrow_mut();
        let classes = &mut state.node_mut(*node).classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.inner
            .borrow_mut()
            .node_mut(*node)
            .classes
            .retain(|c| c != class);
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.element(tag, &[]))
    }

    fn clone_node(&self, node: &NodeId) -> Option<NodeId> {
        let mut state = self.inner.borrow_mut();
        if !state.supports_clone {
            return None;
        }
        Some(state.deep_clone(*node))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.append(*parent, *child);
    }

    fn prepend_child(&self, parent: &NodeId, child: &NodeId) {
        let mut state = self.inner.borrow_mut();
        state.detach(*child);
        state.node_mut(*child).parent = Some(*parent);
        state.node_mut(*parent).children.insert(0, *child);
    }

    fn remove_node(&self, node: &NodeId) {
        self.inner.borrow_mut().detach(*node);
    }

    fn force_reflow(&self, _node: &NodeId) {
        self.inner.borrow_mut().reflows += 1;
    }

    fn set_timeout(&self, delay_ms: u32) -> TimerId {
        let mut state = self.inner.borrow_mut();
        let id = TimerId(state.handle());
        let due = state.now + u64::from(delay_ms);
        state.schedule(due, self.slider, TaskKind::Timer { id, period: None });
        id
    }

    fn set_interval(&self, period_ms: u32) -> TimerId {
        let mut state = self.inner.borrow_mut();
        let id = TimerId(state.handle());
        let period = u64::from(period_ms);
        let due = state.now + period;
        state.schedule(
            due,
            self.slider,
            TaskKind::Timer {
                id,
                period: Some(period),
            },
        );
        id
    }

    fn clear_timer(&self, timer: TimerId) {
        self.inner
            .borrow_mut()
            .tasks
            .retain(|task| !matches!(task.kind, TaskKind::Timer { id, .. } if id == timer));
    }

    fn request_frame(&self) -> FrameId {
        let mut state = self.inner.borrow_mut();
        let id = FrameId(state.handle());
        let due = state.now + FRAME_MS;
        state.schedule(due, self.slider, TaskKind::Frame(id));
        id
    }

    fn cancel_frame(&self, frame: FrameId) {
        self.inner
            .borrow_mut()
            .tasks
            .retain(|task| !matches!(task.kind, TaskKind::Frame(id) if id == frame));
    }

    fn listen(&self, node: &NodeId, kind: ListenKind) -> Option<ListenerId> {
        let slider = self.slider?;
        let mut state = self.inner.borrow_mut();
        let handle = state.handle();
        state.listeners.insert(
            handle,
            ListenerRecord {
                slider,
                node: *node,
                kind,
            },
        );
        Some(ListenerId(handle))
    }

    fn unlisten(&self, listener: ListenerId) {
        self.inner.borrow_mut().listeners.remove(&listener.0);
    }

    fn observe_resize(&self, targets: &[NodeId]) -> Option<ObserverId> {
        let slider = self.slider?;
        let mut state = self.inner.borrow_mut();
        let handle = state.handle();
        state.observers.insert(
            handle,
            ObserverRecord {
                slider,
                kind: ObserverKind::Resize(targets.to_vec()),
            },
        );
        Some(ObserverId(handle))
    }

    fn observe_intersection(&self, target: &NodeId, _threshold: f64) -> Option<ObserverId> {
        let slider = self.slider?;
        let mut state = self.inner.borrow_mut();
        if !state.supports_intersection {
            return None;
        }
        let handle = state.handle();
        state.observers.insert(
            handle,
            ObserverRecord {
                slider,
                kind: ObserverKind::Intersection(*target),
            },
        );
        Some(ObserverId(handle))
    }

    fn disconnect(&self, observer: ObserverId) -> Result<(), HostError> {
        let mut state = self.inner.borrow_mut();
        // The record goes away either way; failure is only reported.
        let known = state.observers.remove(&observer.0).is_some();
        if state.fail_disconnect {
            return Err(HostError::Disconnect {
                reason: "observer already torn down".to_string(),
            });
        }
        if known {
            Ok(())
        } else {
            Err(HostError::UnknownHandle { handle: observer.0 })
        }
    }

    fn dispatch_slide_change(&self, target: &NodeId, change: &SlideChange) {
        self.inner
            .borrow_mut()
            .slide_changes
            .push((*target, change.clone()));
    }
}
