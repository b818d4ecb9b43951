//! Mutable per-instance runtime record.

use crate::config::Breakpoint;
use crate::ids::{FrameId, ObserverId, TimerId};

/// Horizontal travel (px) a touch must exceed to count as a swipe.
pub const SWIPE_THRESHOLD: f64 = 50.0;

/// Owned exclusively by one [`Controller`](crate::Controller).
///
/// Invariants: once `destroyed` is set nothing else changes and no timer is
/// scheduled; `is_animating` holds only while a transition is in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct RuntimeState {
    /// Leftmost visible real slide (carousel layouts).
    pub start_index: usize,
    /// Position in single/stacked layouts. In the single slide layout this is
    /// a visual index, offset by the leading clone.
    pub current_slide: usize,
    pub is_animating: bool,
    pub autoplay_interval: Option<TimerId>,
    pub touch_start_x: f64,
    pub touch_start_y: f64,
    pub swipe_threshold: f64,
    pub resize_observer: Option<ObserverId>,
    pub intersection_observer: Option<ObserverId>,
    pub destroyed: bool,

    /// Phase-2 completion timer of the running transition.
    pub settle_timer: Option<TimerId>,
    /// The running transition completes on the track's `transitionend`.
    pub awaiting_transition_end: bool,
    /// Visual index the track must snap to once the transition lands.
    pub pending_snap: Option<usize>,
    /// Frame re-enabling the transition after a snap.
    pub snap_frame: Option<FrameId>,
    /// Delayed first activation scheduled at creation.
    pub init_timer: Option<TimerId>,
    pub resize_timer: Option<TimerId>,
    pub breakpoint: Breakpoint,
    /// A relayout arrived mid-transition and runs once it settles.
    pub relayout_pending: bool,
    pub hover_paused: bool,
    pub focus_paused: bool,
    /// Cleared by the intersection observer while the wrapper is off screen.
    pub in_view: bool,
}

impl RuntimeState {
    pub fn new(breakpoint: Breakpoint) -> Self {
        Self {
            start_index: 0,
            current_slide: 0,
            is_animating: false,
            autoplay_interval: None,
            touch_start_x: 0.0,
            touch_start_y: 0.0,
            swipe_threshold: SWIPE_THRESHOLD,
            resize_observer: None,
            intersection_observer: None,
            destroyed: false,
            settle_timer: None,
            awaiting_transition_end: false,
            pending_snap: None,
            snap_frame: None,
            init_timer: None,
            resize_timer: None,
            breakpoint,
            relayout_pending: false,
            hover_paused: false,
            focus_paused: false,
            in_view: true,
        }
    }

    /// Whether a navigation request may start now.
    #[inline]
    pub fn accepts_navigation(&self) -> bool {
        !self.is_animating && !self.destroyed
    }
}
