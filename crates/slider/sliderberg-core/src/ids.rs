//! Identifiers for slider instances and host-side handles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One live slider instance inside a [`SliderRegistry`](crate::SliderRegistry).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SliderId(pub u32);

/// A timeout or interval scheduled through the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TimerId(pub u32);

/// An animation-frame request scheduled through the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct FrameId(pub u32);

/// A DOM event listener registered through the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ListenerId(pub u32);

/// A resize or intersection observer created through the host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ObserverId(pub u32);

impl fmt::Display for SliderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sliderberg-{}", self.0)
    }
}

/// Monotonic allocator for SliderId.
/// Host handles are allocated by the hosts themselves.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_slider: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_slider(&mut self) -> SliderId {
        let id = SliderId(self.next_slider);
        self.next_slider = self.next_slider.wrapping_add(1);
        id
    }
}
