//! SliderBerg core (host-agnostic)
//!
//! The slide-transition runtime behind SliderBerg sliders: configuration
//! parsing, layout and transition sequencing, input routing, autoplay, and
//! instance lifecycle. The document is reached only through [`SliderHost`];
//! every asynchronous callback comes back in as a [`SliderEvent`] delivered to
//! [`SliderRegistry::dispatch`]. Adapters (web, tests) implement the host and
//! drive the registry.

pub mod config;
pub mod controller;
pub mod elements;
pub mod error;
pub mod events;
pub mod host;
pub mod ids;
pub mod index_space;
pub mod input;
pub mod layout;
pub mod registry;
pub mod state;

// Re-exports for consumers (adapters)
pub use config::{
    AttributeSource, Breakpoint, Easing, NodeAttributes, ResponsiveSettings, SliderConfig,
    TransitionEffect,
};
pub use controller::Controller;
pub use elements::SliderElements;
pub use error::{HostError, SliderError};
pub use events::{Direction, EventOutcome, SlideChange, SliderEvent, SLIDE_CHANGE_EVENT};
pub use host::{ListenKind, SliderHost};
pub use ids::{FrameId, IdAllocator, ListenerId, ObserverId, SliderId, TimerId};
pub use index_space::IndexSpace;
pub use input::{InputRouter, Intent, Subscription};
pub use layout::{LayoutEngine, LayoutMode};
pub use registry::SliderRegistry;
pub use state::RuntimeState;
