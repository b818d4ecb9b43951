//! Error types for slider creation and host interaction.

/// Structural failures while creating an instance. The element is skipped.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SliderError {
    /// No `.sliderberg-slides-container` below the root.
    #[error("slider {slider}: no slide container found")]
    MissingContainer { slider: String },

    /// The container holds no real slides.
    #[error("slider {slider}: no slides found")]
    NoSlides { slider: String },
}

/// Failures reported by a host while tearing resources down.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HostError {
    #[error("observer disconnect failed: {reason}")]
    Disconnect { reason: String },

    #[error("unknown host handle {handle}")]
    UnknownHandle { handle: u32 },
}
