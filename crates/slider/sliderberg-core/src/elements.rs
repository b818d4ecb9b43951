//! Markup discovery for one slider instance.

use crate::error::SliderError;
use crate::host::SliderHost;

pub const WRAPPER_CLASS: &str = "sliderberg-wrapper";
pub const CONTAINER_CLASS: &str = "sliderberg-slides-container";
pub const SLIDE_CLASS: &str = "sliderberg-slide";
pub const LEGACY_SLIDE_CLASS: &str = "wp-block-sliderberg-slide";
pub const CLONE_CLASS: &str = "sliderberg-clone";
pub const PREV_CLASS: &str = "sliderberg-prev";
pub const NEXT_CLASS: &str = "sliderberg-next";
pub const INDICATORS_CLASS: &str = "sliderberg-slide-indicators";
pub const DOT_CLASS: &str = "sliderberg-dot";

/// Attributes whose presence marks the element that carries the configuration.
const CONFIG_MARKERS: [&str; 4] = [
    "data-transition-effect",
    "data-is-carousel",
    "data-autoplay",
    "data-slides-to-show",
];

/// Non-owning handles into one slider's markup.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderElements<N> {
    pub wrapper: N,
    /// The element whose children are the slides (and receives the transform).
    pub track: N,
    /// The element the `data-*` configuration is read from.
    pub config_source: N,
    /// Real slides in document order, clones excluded.
    pub slides: Vec<N>,
    pub prev: Option<N>,
    pub next: Option<N>,
    pub indicators: Option<N>,
}

impl<N: Clone + PartialEq> SliderElements<N> {
    /// Locate the container, slides and controls below `root`.
    ///
    /// Controls are matched only within this instance: the search never
    /// descends into a nested `.sliderberg-wrapper`.
    pub fn discover<H>(host: &H, root: &N, slider: &str) -> Result<Self, SliderError>
    where
        H: SliderHost<Node = N>,
    {
        let outer = find_scoped(host, root, CONTAINER_CLASS).ok_or_else(|| {
            SliderError::MissingContainer {
                slider: slider.to_string(),
            }
        })?;

        // Legacy markup wrapped the container in a second container.
        let children = host.children(&outer);
        let (track, config_source) = match children.as_slice() {
            [only] if host.has_class(only, CONTAINER_CLASS) => {
                let carries_config = |node: &N| {
                    CONFIG_MARKERS
                        .iter()
                        .any(|name| host.attribute(node, name).is_some())
                };
                let source = if carries_config(only) || !carries_config(&outer) {
                    only.clone()
                } else {
                    outer.clone()
                };
                (only.clone(), source)
            }
            _ => (outer.clone(), outer),
        };

        let slides: Vec<N> = host
            .children(&track)
            .into_iter()
            .filter(|child| is_real_slide(host, child))
            .collect();
        if slides.is_empty() {
            return Err(SliderError::NoSlides {
                slider: slider.to_string(),
            });
        }

        Ok(Self {
            wrapper: root.clone(),
            prev: find_scoped(host, root, PREV_CLASS),
            next: find_scoped(host, root, NEXT_CLASS),
            indicators: find_scoped(host, root, INDICATORS_CLASS),
            track,
            config_source,
            slides,
        })
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }
}

/// Whether `node` sits inside a slide clone. Cloned slider markup is never
/// initialized.
pub fn is_inside_clone<H: SliderHost>(host: &H, node: &H::Node) -> bool {
    let mut cursor = host.parent(node);
    while let Some(current) = cursor {
        if host.has_class(&current, CLONE_CLASS) {
            return true;
        }
        cursor = host.parent(&current);
    }
    false
}

/// The live slider wrapper closest to `node`, `node` itself included.
/// Wrappers copied into slide clones are skipped.
pub fn owning_wrapper<H: SliderHost>(host: &H, node: &H::Node) -> Option<H::Node> {
    let mut cursor = Some(node.clone());
    while let Some(current) = cursor {
        if host.has_class(&current, WRAPPER_CLASS) && !is_inside_clone(host, &current) {
            return Some(current);
        }
        cursor = host.parent(&current);
    }
    None
}

fn is_real_slide<H: SliderHost>(host: &H, node: &H::Node) -> bool {
    (host.has_class(node, SLIDE_CLASS) || host.has_class(node, LEGACY_SLIDE_CLASS))
        && !host.has_class(node, CLONE_CLASS)
}

/// First descendant of `root` with `class`, in document order, skipping
/// nested slider wrappers.
fn find_scoped<H: SliderHost>(host: &H, root: &H::Node, class: &str) -> Option<H::Node> {
    for child in host.children(root) {
        if host.has_class(&child, WRAPPER_CLASS) {
            continue;
        }
        if host.has_class(&child, class) {
            return Some(child);
        }
        if let Some(found) = find_scoped(host, &child, class) {
            return Some(found);
        }
    }
    None
}
