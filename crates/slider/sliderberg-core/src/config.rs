//! Slider configuration read from declarative markup attributes.
//!
//! Every value is validated on the way in: missing or malformed input falls
//! back to a default, numeric input is clamped into range. Reading never
//! fails, so a malformed render cannot block the rest of the page.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::host::SliderHost;

pub const MIN_TRANSITION_DURATION_MS: u32 = 200;
pub const MAX_TRANSITION_DURATION_MS: u32 = 2000;
pub const DEFAULT_TRANSITION_DURATION_MS: u32 = 500;

pub const MIN_AUTOPLAY_SPEED_MS: u32 = 1000;
pub const MAX_AUTOPLAY_SPEED_MS: u32 = 10_000;
pub const DEFAULT_AUTOPLAY_SPEED_MS: u32 = 5000;

pub const MAX_SLIDES_TO_SHOW: usize = 10;
pub const MAX_SLIDE_SPACING_PX: u32 = 100;
pub const DEFAULT_SLIDE_SPACING_PX: u32 = 20;

/// Viewport widths below this are [`Breakpoint::Mobile`].
pub const TABLET_MIN_WIDTH: f64 = 768.0;
/// Viewport widths at or above this are [`Breakpoint::Desktop`].
pub const DESKTOP_MIN_WIDTH: f64 = 1024.0;

/// Read access to the attributes of one element.
pub trait AttributeSource {
    fn attribute(&self, name: &str) -> Option<String>;
}

impl AttributeSource for HashMap<String, String> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl AttributeSource for BTreeMap<String, String> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Attributes of a host node.
pub struct NodeAttributes<'a, H: SliderHost> {
    pub host: &'a H,
    pub node: &'a H::Node,
}

impl<H: SliderHost> AttributeSource for NodeAttributes<'_, H> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.host.attribute(self.node, name)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionEffect {
    #[default]
    Slide,
    Fade,
    Zoom,
}

impl TransitionEffect {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "slide" => Some(Self::Slide),
            "fade" => Some(Self::Fade),
            "zoom" => Some(Self::Zoom),
            _ => None,
        }
    }

    /// Fade and zoom stack every slide on top of each other.
    pub fn is_stacked(self) -> bool {
        matches!(self, Self::Fade | Self::Zoom)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    Linear,
}

impl Easing {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ease" => Some(Self::Ease),
            "ease-in" => Some(Self::EaseIn),
            "ease-out" => Some(Self::EaseOut),
            "ease-in-out" => Some(Self::EaseInOut),
            "linear" => Some(Self::Linear),
            _ => None,
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            Self::Ease => "ease",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
            Self::Linear => "linear",
        }
    }
}

/// Viewport width bucket selecting the active carousel triple.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Desktop,
    Tablet,
    Mobile,
}

impl Breakpoint {
    pub fn from_width(width: f64) -> Self {
        if width < TABLET_MIN_WIDTH {
            Self::Mobile
        } else if width < DESKTOP_MIN_WIDTH {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }
}

/// Carousel numerics for one breakpoint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsiveSettings {
    pub slides_to_show: usize,
    pub slides_to_scroll: usize,
    /// Gap between visible slides, in px.
    pub slide_spacing: u32,
}

impl Default for ResponsiveSettings {
    fn default() -> Self {
        Self {
            slides_to_show: 1,
            slides_to_scroll: 1,
            slide_spacing: DEFAULT_SLIDE_SPACING_PX,
        }
    }
}

/// Immutable per-instance configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderConfig {
    pub transition_effect: TransitionEffect,
    /// Milliseconds, clamped to 200..=2000.
    pub transition_duration: u32,
    pub transition_easing: Easing,
    pub autoplay: bool,
    /// Milliseconds between autoplay advances, clamped to 1000..=10000.
    pub autoplay_speed: u32,
    pub pause_on_hover: bool,
    pub is_carousel_mode: bool,
    pub infinite_loop: bool,
    pub desktop: ResponsiveSettings,
    pub tablet: ResponsiveSettings,
    pub mobile: ResponsiveSettings,
}

impl Default for SliderConfig {
    fn default() -> Self {
        let desktop = ResponsiveSettings::default();
        Self {
            transition_effect: TransitionEffect::Slide,
            transition_duration: DEFAULT_TRANSITION_DURATION_MS,
            transition_easing: Easing::Ease,
            autoplay: false,
            autoplay_speed: DEFAULT_AUTOPLAY_SPEED_MS,
            pause_on_hover: true,
            is_carousel_mode: false,
            infinite_loop: false,
            desktop,
            tablet: desktop,
            mobile: ResponsiveSettings {
                slides_to_show: 1,
                slides_to_scroll: 1,
                slide_spacing: desktop.slide_spacing,
            },
        }
    }
}

impl SliderConfig {
    /// Parse the fixed attribute set. Never fails.
    pub fn read(src: &impl AttributeSource) -> Self {
        let defaults = Self::default();

        let is_carousel_mode = read_bool(src, "data-is-carousel", defaults.is_carousel_mode);
        let declared_effect = src
            .attribute("data-transition-effect")
            .and_then(|v| TransitionEffect::parse(&v))
            .unwrap_or(defaults.transition_effect);
        // Carousel layout only supports the slide effect.
        let transition_effect = if is_carousel_mode {
            TransitionEffect::Slide
        } else {
            declared_effect
        };

        let desktop = read_settings(src, "", &defaults.desktop);
        let tablet = read_settings(src, "tablet-", &desktop);
        let mobile_fallback = ResponsiveSettings {
            slides_to_show: 1,
            slides_to_scroll: 1,
            slide_spacing: tablet.slide_spacing,
        };
        let mobile = read_settings(src, "mobile-", &mobile_fallback);

        Self {
            transition_effect,
            transition_duration: read_clamped(
                src,
                "data-transition-duration",
                defaults.transition_duration,
                MIN_TRANSITION_DURATION_MS,
                MAX_TRANSITION_DURATION_MS,
            ),
            transition_easing: src
                .attribute("data-transition-easing")
                .and_then(|v| Easing::parse(&v))
                .unwrap_or(defaults.transition_easing),
            autoplay: read_bool(src, "data-autoplay", defaults.autoplay),
            autoplay_speed: read_clamped(
                src,
                "data-autoplay-speed",
                defaults.autoplay_speed,
                MIN_AUTOPLAY_SPEED_MS,
                MAX_AUTOPLAY_SPEED_MS,
            ),
            pause_on_hover: read_bool(src, "data-pause-on-hover", defaults.pause_on_hover),
            is_carousel_mode,
            infinite_loop: read_bool(src, "data-infinite-loop", defaults.infinite_loop),
            desktop,
            tablet,
            mobile,
        }
    }

    pub fn settings_for(&self, breakpoint: Breakpoint) -> ResponsiveSettings {
        match breakpoint {
            Breakpoint::Desktop => self.desktop,
            Breakpoint::Tablet => self.tablet,
            Breakpoint::Mobile => self.mobile,
        }
    }

    /// `"{duration}ms {easing}"`
    pub fn transition_timing(&self) -> String {
        format!(
            "{}ms {}",
            self.transition_duration,
            self.transition_easing.as_css()
        )
    }

    /// A CSS `transition` value animating `property` with the configured timing.
    pub fn transition_for(&self, property: &str) -> String {
        format!("{property} {}", self.transition_timing())
    }
}

fn read_bool(src: &impl AttributeSource, name: &str, default: bool) -> bool {
    match src.attribute(name) {
        Some(raw) => matches!(raw.trim().to_ascii_lowercase().as_str(), "true" | "1"),
        None => default,
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Integer attribute, truncated toward zero like `parseInt`, then clamped.
fn read_clamped(src: &impl AttributeSource, name: &str, default: u32, min: u32, max: u32) -> u32 {
    match src.attribute(name).as_deref().and_then(parse_number) {
        Some(v) => v.trunc().clamp(min as f64, max as f64) as u32,
        None => default,
    }
}

fn read_settings(
    src: &impl AttributeSource,
    prefix: &str,
    fallback: &ResponsiveSettings,
) -> ResponsiveSettings {
    let show = read_clamped(
        src,
        &format!("data-{prefix}slides-to-show"),
        fallback.slides_to_show as u32,
        1,
        MAX_SLIDES_TO_SHOW as u32,
    ) as usize;
    let scroll = read_clamped(
        src,
        &format!("data-{prefix}slides-to-scroll"),
        fallback.slides_to_scroll as u32,
        1,
        MAX_SLIDES_TO_SHOW as u32,
    ) as usize;
    let spacing = read_clamped(
        src,
        &format!("data-{prefix}slide-spacing"),
        fallback.slide_spacing,
        0,
        MAX_SLIDE_SPACING_PX,
    );
    ResponsiveSettings {
        slides_to_show: show,
        slides_to_scroll: scroll.min(show),
        slide_spacing: spacing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_markup_yields_defaults() {
        let cfg = SliderConfig::read(&attrs(&[]));
        assert_eq!(cfg, SliderConfig::default());
        assert_eq!(cfg.transition_timing(), "500ms ease");
        assert!(cfg.pause_on_hover);
        assert!(!cfg.autoplay);
    }

    #[test]
    fn numeric_values_are_clamped() {
        let cfg = SliderConfig::read(&attrs(&[
            ("data-transition-duration", "50"),
            ("data-autoplay-speed", "999999"),
            ("data-slides-to-show", "42"),
            ("data-slide-spacing", "-5"),
        ]));
        assert_eq!(cfg.transition_duration, MIN_TRANSITION_DURATION_MS);
        assert_eq!(cfg.autoplay_speed, MAX_AUTOPLAY_SPEED_MS);
        assert_eq!(cfg.desktop.slides_to_show, MAX_SLIDES_TO_SHOW);
        assert_eq!(cfg.desktop.slide_spacing, 0);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let cfg = SliderConfig::read(&attrs(&[
            ("data-transition-duration", "fast"),
            ("data-transition-easing", "bouncy"),
            ("data-transition-effect", "spin"),
            ("data-autoplay-speed", "NaN"),
        ]));
        assert_eq!(cfg.transition_duration, DEFAULT_TRANSITION_DURATION_MS);
        assert_eq!(cfg.transition_easing, Easing::Ease);
        assert_eq!(cfg.transition_effect, TransitionEffect::Slide);
        assert_eq!(cfg.autoplay_speed, DEFAULT_AUTOPLAY_SPEED_MS);
    }

    #[test]
    fn carousel_mode_forces_slide_effect() {
        let cfg = SliderConfig::read(&attrs(&[
            ("data-is-carousel", "true"),
            ("data-transition-effect", "fade"),
        ]));
        assert!(cfg.is_carousel_mode);
        assert_eq!(cfg.transition_effect, TransitionEffect::Slide);

        let cfg = SliderConfig::read(&attrs(&[("data-transition-effect", "zoom")]));
        assert_eq!(cfg.transition_effect, TransitionEffect::Zoom);
    }

    #[test]
    fn scroll_never_exceeds_show() {
        let cfg = SliderConfig::read(&attrs(&[
            ("data-slides-to-show", "2"),
            ("data-slides-to-scroll", "5"),
        ]));
        assert_eq!(cfg.desktop.slides_to_show, 2);
        assert_eq!(cfg.desktop.slides_to_scroll, 2);
    }

    #[test]
    fn tablet_inherits_desktop_and_mobile_defaults_to_one() {
        let cfg = SliderConfig::read(&attrs(&[
            ("data-slides-to-show", "4"),
            ("data-slides-to-scroll", "2"),
            ("data-slide-spacing", "12px"),
            ("data-tablet-slides-to-show", "3"),
        ]));
        assert_eq!(
            cfg.tablet,
            ResponsiveSettings {
                slides_to_show: 3,
                slides_to_scroll: 2,
                slide_spacing: 12
            }
        );
        assert_eq!(
            cfg.mobile,
            ResponsiveSettings {
                slides_to_show: 1,
                slides_to_scroll: 1,
                slide_spacing: 12
            }
        );
    }

    #[test]
    fn booleans_accept_true_and_one_only() {
        let cfg = SliderConfig::read(&attrs(&[
            ("data-autoplay", "TRUE"),
            ("data-infinite-loop", "1"),
            ("data-pause-on-hover", "no"),
        ]));
        assert!(cfg.autoplay);
        assert!(cfg.infinite_loop);
        assert!(!cfg.pause_on_hover);
    }

    #[test]
    fn breakpoint_buckets() {
        assert_eq!(Breakpoint::from_width(320.0), Breakpoint::Mobile);
        assert_eq!(Breakpoint::from_width(767.9), Breakpoint::Mobile);
        assert_eq!(Breakpoint::from_width(768.0), Breakpoint::Tablet);
        assert_eq!(Breakpoint::from_width(1023.0), Breakpoint::Tablet);
        assert_eq!(Breakpoint::from_width(1024.0), Breakpoint::Desktop);
    }

    #[test]
    fn transition_strings() {
        let cfg = SliderConfig::read(&attrs(&[
            ("data-transition-duration", "800"),
            ("data-transition-easing", "ease-in-out"),
        ]));
        assert_eq!(cfg.transition_for("transform"), "transform 800ms ease-in-out");
    }
}
