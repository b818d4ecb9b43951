//! Event contracts between hosts and the core.
//!
//! Inbound: [`SliderEvent`] values built by a host driver from DOM events,
//! timers, frames and observers. Outbound: [`SlideChange`], dispatched on the
//! wrapper as a bubbling `slidechange` custom event.

use serde::{Deserialize, Serialize};

use crate::ids::{FrameId, TimerId};

/// Name of the outbound DOM event.
pub const SLIDE_CHANGE_EVENT: &str = "slidechange";

/// Detail payload of the `slidechange` event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideChange {
    pub slider_id: String,
    pub from: usize,
    pub to: usize,
}

/// Navigation direction. Looping layouts use it to pick the clone route.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Prev,
    /// Direct jump (indicators, API calls); never routed through clones.
    Jump,
}

/// Everything that can re-enter a slider instance.
#[derive(Clone, Debug, PartialEq)]
pub enum SliderEvent<N> {
    /// `current` is the element the listener sits on, `target` the clicked one.
    Click { current: N, target: N },
    /// Touch and key events carry their original `target` so an instance can
    /// ignore ones bubbling out of a nested slider.
    TouchStart { target: N, x: f64, y: f64 },
    TouchEnd { target: N, x: f64, y: f64 },
    KeyDown { target: N, key: String },
    PointerEnter,
    PointerLeave { related: Option<N> },
    FocusIn,
    FocusOut { related: Option<N> },
    TransitionEnd { target: N, property: String },
    /// A resize observer reported a size change.
    Resized,
    Intersection { is_intersecting: bool, ratio: f64 },
    Timer(TimerId),
    Frame(FrameId),
}

/// What the host should do with the originating DOM event.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub prevent_default: bool,
}

impl EventOutcome {
    pub const IGNORED: Self = Self {
        prevent_default: false,
    };

    pub const CONSUMED: Self = Self {
        prevent_default: true,
    };
}
