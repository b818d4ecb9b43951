//! The document seam.
//!
//! A [`SliderHost`] exposes exactly the DOM operations the runtime needs. Hosts
//! are cheap handles over shared state (`Rc` inside), so every method takes
//! `&self`. Anything asynchronous the host schedules (timers, frames,
//! listeners, observers) must later be delivered back to the owning instance
//! as a [`SliderEvent`](crate::SliderEvent) through
//! [`SliderRegistry::dispatch`](crate::SliderRegistry::dispatch).

use std::fmt;

use crate::error::HostError;
use crate::events::SlideChange;
use crate::ids::{FrameId, ListenerId, ObserverId, SliderId, TimerId};

/// DOM events the runtime subscribes to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenKind {
    Click,
    TouchStart,
    TouchEnd,
    KeyDown,
    PointerEnter,
    PointerLeave,
    FocusIn,
    FocusOut,
    TransitionEnd,
}

impl ListenKind {
    /// DOM event type name.
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::TouchStart => "touchstart",
            Self::TouchEnd => "touchend",
            Self::KeyDown => "keydown",
            Self::PointerEnter => "mouseenter",
            Self::PointerLeave => "mouseleave",
            Self::FocusIn => "focusin",
            Self::FocusOut => "focusout",
            Self::TransitionEnd => "transitionend",
        }
    }

    /// Touch listeners are registered passive so they never block scrolling.
    pub fn is_passive(self) -> bool {
        matches!(self, Self::TouchStart | Self::TouchEnd)
    }
}

pub trait SliderHost: Clone {
    type Node: Clone + PartialEq + fmt::Debug;

    /// A handle whose callbacks are routed to `slider`.
    fn for_slider(&self, slider: SliderId) -> Self;

    // Tree queries
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn is_connected(&self, node: &Self::Node) -> bool;
    /// Whether keyboard focus currently sits on `node` or one of its descendants.
    fn focus_within(&self, node: &Self::Node) -> bool;
    fn viewport_width(&self) -> f64;
    fn offset_height(&self, node: &Self::Node) -> f64;

    /// Inclusive descendant check.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool {
        let mut cursor = Some(node.clone());
        while let Some(current) = cursor {
            if &current == ancestor {
                return true;
            }
            cursor = self.parent(&current);
        }
        false
    }

    // Mutations
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn remove_style(&self, node: &Self::Node, property: &str);
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn remove_attribute(&self, node: &Self::Node, name: &str);
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn create_element(&self, tag: &str) -> Option<Self::Node>;
    /// Deep clone, detached.
    fn clone_node(&self, node: &Self::Node) -> Option<Self::Node>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);
    fn prepend_child(&self, parent: &Self::Node, child: &Self::Node);
    fn remove_node(&self, node: &Self::Node);
    /// Flush pending style changes so the next write starts a fresh transition.
    fn force_reflow(&self, node: &Self::Node);

    // Scheduling
    fn set_timeout(&self, delay_ms: u32) -> TimerId;
    fn set_interval(&self, period_ms: u32) -> TimerId;
    fn clear_timer(&self, timer: TimerId);
    fn request_frame(&self) -> FrameId;
    fn cancel_frame(&self, frame: FrameId);

    // Subscriptions. `None` means the host cannot provide the facility.
    fn listen(&self, node: &Self::Node, kind: ListenKind) -> Option<ListenerId>;
    /// Must tolerate listeners on nodes that have since left the document.
    fn unlisten(&self, listener: ListenerId);
    fn observe_resize(&self, targets: &[Self::Node]) -> Option<ObserverId>;
    fn observe_intersection(&self, target: &Self::Node, threshold: f64) -> Option<ObserverId>;
    fn disconnect(&self, observer: ObserverId) -> Result<(), HostError>;

    fn dispatch_slide_change(&self, target: &Self::Node, change: &SlideChange);
}
