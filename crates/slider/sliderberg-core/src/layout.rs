//! Layout engine: styling and transition sequencing.
//!
//! Each layout mode is a small state machine over the track position. A
//! navigation is phase 1 ([`LayoutEngine::transition_to`], synchronous style
//! writes) followed by phase 2, which arrives later as a timer, a
//! `transitionend`, or a snap frame and ends in [`Phase::Settled`]. Only the
//! engine clears `is_animating`.

use log::{debug, warn};

use crate::config::{Breakpoint, ResponsiveSettings, SliderConfig, TransitionEffect};
use crate::elements::{SliderElements, CLONE_CLASS};
use crate::events::Direction;
use crate::host::SliderHost;
use crate::ids::{FrameId, TimerId};
use crate::index_space::IndexSpace;
use crate::state::RuntimeState;

/// Added to the transition duration before a timer-settled transition completes.
pub const SETTLE_BUFFER_MS: u32 = 50;
/// Fallback for a `transitionend` that never arrives (hidden tab, detached node).
pub const TRANSITION_END_GUARD_MS: u32 = 250;
/// Scale of inactive slides in the zoom effect.
pub const ZOOM_INACTIVE_SCALE: f64 = 0.9;

const TRACK_STYLES: [&str; 5] = ["transform", "transition", "gap", "height", "position"];
const SLIDE_STYLES: [&str; 10] = [
    "flex-basis",
    "flex-shrink",
    "position",
    "top",
    "left",
    "width",
    "opacity",
    "z-index",
    "transform",
    "transition",
];

/// Borrowed view of one instance, handed to the engine and the router.
pub struct SliderCx<'a, H: SliderHost> {
    pub host: &'a H,
    pub config: &'a SliderConfig,
    pub elements: &'a SliderElements<H::Node>,
}

impl<H: SliderHost> Clone for SliderCx<'_, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<H: SliderHost> Copy for SliderCx<'_, H> {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    /// One slide per view, slide effect, looping through one clone per side.
    Single,
    /// Several slides per view, looping through cloned windows.
    CarouselLoop,
    /// Several slides per view, clamped to `[0, total - show]`.
    CarouselBounded,
    Fade,
    Zoom,
}

impl LayoutMode {
    pub fn resolve(config: &SliderConfig, settings: &ResponsiveSettings, total: usize) -> Self {
        match config.transition_effect {
            TransitionEffect::Fade => Self::Fade,
            TransitionEffect::Zoom => Self::Zoom,
            TransitionEffect::Slide if !config.is_carousel_mode => Self::Single,
            TransitionEffect::Slide => {
                if config.infinite_loop && total > settings.slides_to_show {
                    Self::CarouselLoop
                } else {
                    Self::CarouselBounded
                }
            }
        }
    }

    pub fn is_carousel(self) -> bool {
        matches!(self, Self::CarouselLoop | Self::CarouselBounded)
    }

    pub fn is_stacked(self) -> bool {
        matches!(self, Self::Fade | Self::Zoom)
    }

    /// Whether navigation wraps around instead of clamping.
    pub fn wraps(self) -> bool {
        !matches!(self, Self::CarouselBounded)
    }
}

/// Progress reported by phase-2 callbacks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The callback does not belong to the running transition.
    Ignored,
    /// The transition landed on a clone; a snap frame is pending.
    Snapping,
    /// The transition is complete and `is_animating` is cleared.
    Settled,
}

#[derive(Debug)]
pub struct LayoutEngine<N> {
    mode: LayoutMode,
    settings: ResponsiveSettings,
    space: IndexSpace,
    clones: Vec<N>,
    /// Visual index the track is translated to.
    position: isize,
    /// Slide fading out in a stacked transition.
    outgoing: Option<usize>,
}

impl<N: Clone + PartialEq> LayoutEngine<N> {
    pub fn new(config: &SliderConfig, total: usize, breakpoint: Breakpoint) -> Self {
        let settings = config.settings_for(breakpoint);
        let mode = LayoutMode::resolve(config, &settings, total);
        let space = match mode {
            LayoutMode::Single => IndexSpace::with_clones(total, 1),
            LayoutMode::CarouselLoop => IndexSpace::with_clones(
                total,
                settings.slides_to_show + settings.slides_to_scroll - 1,
            ),
            _ => IndexSpace::plain(total),
        };
        Self {
            mode,
            settings,
            space,
            clones: Vec::new(),
            position: 0,
            outgoing: None,
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn settings(&self) -> ResponsiveSettings {
        self.settings
    }

    pub fn index_space(&self) -> IndexSpace {
        self.space
    }

    pub fn clones(&self) -> &[N] {
        &self.clones
    }

    /// Visual index the track currently sits at.
    pub fn position(&self) -> isize {
        self.position
    }

    pub fn total(&self) -> usize {
        self.space.real_len()
    }

    /// Largest valid `start_index` in the bounded carousel.
    pub fn max_start(&self) -> usize {
        self.total().saturating_sub(self.settings.slides_to_show)
    }

    /// Wrap (looping modes) or clamp (bounded carousel) a requested index.
    pub fn normalize(&self, index: isize) -> usize {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        if self.mode.wraps() {
            index.rem_euclid(total as isize) as usize
        } else {
            index.clamp(0, self.max_start() as isize) as usize
        }
    }

    /// Logical index of the current slide (or window start).
    pub fn logical_position(&self, state: &RuntimeState) -> usize {
        match self.mode {
            LayoutMode::Single => self.space.logical_of(state.current_slide as isize),
            LayoutMode::CarouselLoop | LayoutMode::CarouselBounded => state.start_index,
            LayoutMode::Fade | LayoutMode::Zoom => state.current_slide,
        }
    }

    pub fn indicator_count(&self) -> usize {
        match self.mode {
            LayoutMode::CarouselBounded => self.max_start() + 1,
            _ => self.total(),
        }
    }

    /// Real slides currently in view.
    pub fn visible_slides(&self, state: &RuntimeState) -> Vec<usize> {
        let total = self.total();
        match self.mode {
            LayoutMode::CarouselLoop => (0..self.settings.slides_to_show)
                .map(|k| (state.start_index + k) % total)
                .collect(),
            LayoutMode::CarouselBounded => (state.start_index
                ..(state.start_index + self.settings.slides_to_show).min(total))
                .collect(),
            _ => vec![self.logical_position(state)],
        }
    }

    /// Initial layout positioned on `logical`, without animation.
    pub fn setup<H>(&mut self, cx: SliderCx<'_, H>, state: &mut RuntimeState, logical: usize)
    where
        H: SliderHost<Node = N>,
    {
        let logical = self.normalize(logical as isize);
        match self.mode {
            LayoutMode::Fade | LayoutMode::Zoom => {
                cx.host.set_style(&cx.elements.track, "position", "relative");
                let transition = self.stacked_transition(cx.config);
                for slide in &cx.elements.slides {
                    cx.host.set_style(slide, "position", "absolute");
                    cx.host.set_style(slide, "top", "0");
                    cx.host.set_style(slide, "left", "0");
                    cx.host.set_style(slide, "width", "100%");
                    cx.host.set_style(slide, "transition", &transition);
                }
                state.current_slide = logical;
                self.apply_stacked(cx, logical, None);
                self.sync_height(cx, logical);
            }
            LayoutMode::Single | LayoutMode::CarouselLoop | LayoutMode::CarouselBounded => {
                self.build_clones(cx);
                let basis = slide_basis(&self.settings, self.mode);
                if self.mode.is_carousel() {
                    let gap = format!("{}px", self.settings.slide_spacing);
                    cx.host.set_style(&cx.elements.track, "gap", &gap);
                }
                for slide in cx.elements.slides.iter().chain(self.clones.iter()) {
                    cx.host.set_style(slide, "flex-basis", &basis);
                    cx.host.set_style(slide, "flex-shrink", "0");
                }
                let visual = self.space.visual_of(logical);
                if self.mode == LayoutMode::Single {
                    state.current_slide = visual as usize;
                } else {
                    state.start_index = logical;
                }
                cx.host.set_style(&cx.elements.track, "transition", "none");
                self.move_track(cx, visual);
                cx.host.force_reflow(&cx.elements.track);
                cx.host.set_style(
                    &cx.elements.track,
                    "transition",
                    &cx.config.transition_for("transform"),
                );
            }
        }
    }

    /// Phase 1 of a navigation to the normalized logical `target`.
    pub fn transition_to<H>(
        &mut self,
        cx: SliderCx<'_, H>,
        state: &mut RuntimeState,
        target: usize,
        direction: Direction,
    ) where
        H: SliderHost<Node = N>,
    {
        match self.mode {
            LayoutMode::Single => {
                let from = self.space.logical_of(self.position);
                let visual = self.space.route(from, target, direction, 1);
                self.move_track(cx, visual);
                state.current_slide = visual as usize;
                if self.space.is_clone(visual) {
                    state.pending_snap = Some(self.space.visual_of(target) as usize);
                }
                self.schedule_settle(cx, state);
            }
            LayoutMode::CarouselLoop => {
                let from = state.start_index;
                let visual =
                    self.space
                        .route(from, target, direction, self.settings.slides_to_show);
                let moved = visual != self.position;
                self.move_track(cx, visual);
                state.start_index = target;
                if self.space.is_clone(visual) {
                    state.pending_snap = Some(self.space.visual_of(target) as usize);
                }
                if moved {
                    state.awaiting_transition_end = true;
                    state.settle_timer = Some(cx.host.set_timeout(
                        cx.config.transition_duration + TRANSITION_END_GUARD_MS,
                    ));
                } else {
                    self.schedule_settle(cx, state);
                }
            }
            LayoutMode::CarouselBounded => {
                let target = target.min(self.max_start());
                self.move_track(cx, target as isize);
                state.start_index = target;
                self.schedule_settle(cx, state);
            }
            LayoutMode::Fade | LayoutMode::Zoom => {
                let from = state.current_slide;
                let outgoing = (from != target).then_some(from);
                self.apply_stacked(cx, target, outgoing);
                self.outgoing = outgoing;
                state.current_slide = target;
                self.sync_height(cx, target);
                self.schedule_settle(cx, state);
            }
        }
    }

    /// Phase 2 via timer (the settle timer or the transition-end guard).
    pub fn on_timer<H>(&mut self, cx: SliderCx<'_, H>, state: &mut RuntimeState, timer: TimerId) -> Phase
    where
        H: SliderHost<Node = N>,
    {
        if state.settle_timer != Some(timer) {
            return Phase::Ignored;
        }
        state.settle_timer = None;
        state.awaiting_transition_end = false;
        self.land(cx, state)
    }

    /// Phase 2 via the track's `transitionend`.
    pub fn on_transition_end<H>(
        &mut self,
        cx: SliderCx<'_, H>,
        state: &mut RuntimeState,
        target: &N,
        property: &str,
    ) -> Phase
    where
        H: SliderHost<Node = N>,
    {
        if !state.awaiting_transition_end || target != &cx.elements.track || property != "transform"
        {
            return Phase::Ignored;
        }
        state.awaiting_transition_end = false;
        if let Some(guard) = state.settle_timer.take() {
            cx.host.clear_timer(guard);
        }
        self.land(cx, state)
    }

    /// End of a snap: re-enable the track transition.
    pub fn on_frame<H>(&mut self, cx: SliderCx<'_, H>, state: &mut RuntimeState, frame: FrameId) -> Phase
    where
        H: SliderHost<Node = N>,
    {
        if state.snap_frame != Some(frame) {
            return Phase::Ignored;
        }
        state.snap_frame = None;
        cx.host.set_style(
            &cx.elements.track,
            "transition",
            &cx.config.transition_for("transform"),
        );
        self.finish(cx, state);
        Phase::Settled
    }

    /// Cancel every phase-2 callback still scheduled.
    pub fn cancel_pending<H>(&mut self, cx: SliderCx<'_, H>, state: &mut RuntimeState)
    where
        H: SliderHost<Node = N>,
    {
        if let Some(timer) = state.settle_timer.take() {
            cx.host.clear_timer(timer);
        }
        if let Some(frame) = state.snap_frame.take() {
            cx.host.cancel_frame(frame);
        }
        state.awaiting_transition_end = false;
        state.pending_snap = None;
        self.outgoing = None;
    }

    /// Recompute for `breakpoint`, keeping the logical position. Returns
    /// whether the layout was rebuilt.
    pub fn relayout<H>(
        &mut self,
        cx: SliderCx<'_, H>,
        state: &mut RuntimeState,
        breakpoint: Breakpoint,
    ) -> bool
    where
        H: SliderHost<Node = N>,
    {
        let settings = cx.config.settings_for(breakpoint);
        if breakpoint == state.breakpoint && settings == self.settings {
            if self.mode.is_stacked() {
                self.sync_height(cx, state.current_slide);
            }
            return false;
        }

        let logical = self.logical_position(state);
        debug!(
            "relayout {:?} -> {:?} at slide {}",
            state.breakpoint, breakpoint, logical
        );
        self.teardown(cx);
        *self = Self::new(cx.config, cx.elements.slide_count(), breakpoint);
        state.breakpoint = breakpoint;
        self.setup(cx, state, logical);
        true
    }

    /// Remove clones and every inline style the engine wrote.
    pub fn teardown<H>(&mut self, cx: SliderCx<'_, H>)
    where
        H: SliderHost<Node = N>,
    {
        for clone in self.clones.drain(..) {
            if cx.host.is_connected(&clone) {
                cx.host.remove_node(&clone);
            }
        }
        for property in TRACK_STYLES {
            cx.host.remove_style(&cx.elements.track, property);
        }
        for slide in &cx.elements.slides {
            for property in SLIDE_STYLES {
                cx.host.remove_style(slide, property);
            }
        }
        self.position = 0;
        self.outgoing = None;
    }

    /// Fade/zoom: size the track after the active slide, or the tallest one
    /// while the active slide has no height yet.
    pub fn sync_height<H>(&self, cx: SliderCx<'_, H>, active: usize)
    where
        H: SliderHost<Node = N>,
    {
        if !self.mode.is_stacked() {
            return;
        }
        let slides = &cx.elements.slides;
        let mut height = slides
            .get(active)
            .map(|slide| cx.host.offset_height(slide))
            .unwrap_or(0.0);
        if height <= 0.0 {
            height = slides
                .iter()
                .map(|slide| cx.host.offset_height(slide))
                .fold(0.0, f64::max);
        }
        if height > 0.0 {
            cx.host
                .set_style(&cx.elements.track, "height", &format!("{}px", fmt_num(height)));
        }
    }

    fn build_clones<H>(&mut self, cx: SliderCx<'_, H>)
    where
        H: SliderHost<Node = N>,
    {
        if !self.space.has_clones() {
            return;
        }
        let slides = &cx.elements.slides;
        let mut leading = Vec::with_capacity(self.space.clones_before());
        let mut trailing = Vec::with_capacity(self.space.clones_after());
        for source in self.space.leading_sources() {
            match cx.host.clone_node(&slides[source]) {
                Some(node) => leading.push(node),
                None => return self.abandon_clones(cx, leading),
            }
        }
        for source in self.space.trailing_sources() {
            match cx.host.clone_node(&slides[source]) {
                Some(node) => trailing.push(node),
                None => {
                    leading.extend(trailing);
                    return self.abandon_clones(cx, leading);
                }
            }
        }

        for node in leading.iter().chain(trailing.iter()) {
            mark_clone(cx.host, node);
        }
        for node in leading.iter().rev() {
            cx.host.prepend_child(&cx.elements.track, node);
        }
        for node in &trailing {
            cx.host.append_child(&cx.elements.track, node);
        }
        self.clones = leading;
        self.clones.extend(trailing);
    }

    /// Cloning failed: fall back to the clone-free index space.
    fn abandon_clones<H>(&mut self, cx: SliderCx<'_, H>, created: Vec<N>)
    where
        H: SliderHost<Node = N>,
    {
        warn!("slide cloning unavailable; looping without clones");
        for node in created {
            if cx.host.is_connected(&node) {
                cx.host.remove_node(&node);
            }
        }
        self.space = IndexSpace::plain(self.space.real_len());
    }

    fn move_track<H>(&mut self, cx: SliderCx<'_, H>, visual: isize)
    where
        H: SliderHost<Node = N>,
    {
        self.position = visual;
        let offset = track_offset(
            visual,
            self.settings.slides_to_show,
            self.settings.slide_spacing,
            self.mode,
        );
        cx.host.set_style(&cx.elements.track, "transform", &offset);
    }

    fn schedule_settle<H>(&self, cx: SliderCx<'_, H>, state: &mut RuntimeState)
    where
        H: SliderHost<Node = N>,
    {
        state.settle_timer = Some(
            cx.host
                .set_timeout(cx.config.transition_duration + SETTLE_BUFFER_MS),
        );
    }

    fn land<H>(&mut self, cx: SliderCx<'_, H>, state: &mut RuntimeState) -> Phase
    where
        H: SliderHost<Node = N>,
    {
        match state.pending_snap.take() {
            Some(visual) => {
                self.snap(cx, state, visual);
                Phase::Snapping
            }
            None => {
                self.finish(cx, state);
                Phase::Settled
            }
        }
    }

    /// Non-animated jump from a clone to the equivalent real position.
    fn snap<H>(&mut self, cx: SliderCx<'_, H>, state: &mut RuntimeState, visual: usize)
    where
        H: SliderHost<Node = N>,
    {
        cx.host.set_style(&cx.elements.track, "transition", "none");
        self.move_track(cx, visual as isize);
        cx.host.force_reflow(&cx.elements.track);
        if self.mode == LayoutMode::Single {
            state.current_slide = visual;
        }
        state.snap_frame = Some(cx.host.request_frame());
    }

    fn finish<H>(&mut self, cx: SliderCx<'_, H>, state: &mut RuntimeState)
    where
        H: SliderHost<Node = N>,
    {
        if let Some(outgoing) = self.outgoing.take() {
            if outgoing != state.current_slide {
                if let Some(slide) = cx.elements.slides.get(outgoing) {
                    cx.host.set_style(slide, "z-index", "0");
                }
            }
        }
        state.is_animating = false;
    }

    fn stacked_transition(&self, config: &SliderConfig) -> String {
        match self.mode {
            LayoutMode::Zoom => format!(
                "{}, {}",
                config.transition_for("opacity"),
                config.transition_for("transform")
            ),
            _ => config.transition_for("opacity"),
        }
    }

    /// Incoming slide on top, outgoing just beneath it, the rest at the bottom.
    fn apply_stacked<H>(&self, cx: SliderCx<'_, H>, active: usize, outgoing: Option<usize>)
    where
        H: SliderHost<Node = N>,
    {
        let zoom = self.mode == LayoutMode::Zoom;
        let inactive_scale = format!("scale({ZOOM_INACTIVE_SCALE})");
        for (index, slide) in cx.elements.slides.iter().enumerate() {
            let (opacity, z_index) = if index == active {
                ("1", "2")
            } else if Some(index) == outgoing {
                ("0", "1")
            } else {
                ("0", "0")
            };
            cx.host.set_style(slide, "opacity", opacity);
            cx.host.set_style(slide, "z-index", z_index);
            if zoom {
                let scale = if index == active {
                    "scale(1)"
                } else {
                    inactive_scale.as_str()
                };
                cx.host.set_style(slide, "transform", scale);
            }
        }
    }
}

fn mark_clone<H: SliderHost>(host: &H, node: &H::Node) {
    host.add_class(node, CLONE_CLASS);
    host.remove_attribute(node, "id");
    host.set_attribute(node, "aria-hidden", "true");
    host.set_attribute(node, "tabindex", "-1");
}

/// Flex basis giving `show` slides per view with `spacing` px gaps.
pub fn slide_basis(settings: &ResponsiveSettings, mode: LayoutMode) -> String {
    let show = settings.slides_to_show;
    if !mode.is_carousel() || show <= 1 {
        return "100%".to_string();
    }
    let gaps = (show as u32 - 1) * settings.slide_spacing;
    if gaps == 0 {
        format!("calc(100% / {show})")
    } else {
        format!("calc((100% - {gaps}px) / {show})")
    }
}

/// Track transform placing visual slide `visual` at the left edge.
///
/// One step is `(100% + spacing) / show` of the track width.
pub fn track_offset(visual: isize, show: usize, spacing: u32, mode: LayoutMode) -> String {
    let (show, spacing) = if mode.is_carousel() {
        (show.max(1) as f64, spacing as f64)
    } else {
        (1.0, 0.0)
    };
    let percent = visual as f64 * 100.0 / show;
    let px = visual as f64 * spacing / show;
    if px == 0.0 {
        format!("translateX({}%)", fmt_num(-percent))
    } else {
        format!(
            "translateX(calc({}% - {}px))",
            fmt_num(-percent),
            fmt_num(px)
        )
    }
}

/// Compact decimal rendering for CSS values.
fn fmt_num(value: f64) -> String {
    let rendered = format!("{value:.4}");
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(show: usize, scroll: usize, spacing: u32) -> ResponsiveSettings {
        ResponsiveSettings {
            slides_to_show: show,
            slides_to_scroll: scroll,
            slide_spacing: spacing,
        }
    }

    #[test]
    fn single_offsets_are_whole_track_widths() {
        assert_eq!(track_offset(0, 1, 0, LayoutMode::Single), "translateX(0%)");
        assert_eq!(track_offset(1, 3, 20, LayoutMode::Single), "translateX(-100%)");
        assert_eq!(track_offset(4, 1, 0, LayoutMode::Single), "translateX(-400%)");
    }

    #[test]
    fn carousel_offsets_divide_by_show_and_correct_for_gaps() {
        assert_eq!(
            track_offset(3, 3, 0, LayoutMode::CarouselBounded),
            "translateX(-100%)"
        );
        assert_eq!(
            track_offset(1, 3, 0, LayoutMode::CarouselLoop),
            "translateX(-33.3333%)"
        );
        assert_eq!(
            track_offset(2, 4, 20, LayoutMode::CarouselBounded),
            "translateX(calc(-50% - 10px))"
        );
    }

    #[test]
    fn basis_accounts_for_gaps() {
        assert_eq!(
            slide_basis(&settings(3, 1, 20), LayoutMode::CarouselLoop),
            "calc((100% - 40px) / 3)"
        );
        assert_eq!(
            slide_basis(&settings(2, 1, 0), LayoutMode::CarouselBounded),
            "calc(100% / 2)"
        );
        assert_eq!(slide_basis(&settings(3, 1, 20), LayoutMode::Single), "100%");
    }

    #[test]
    fn mode_resolution() {
        let mut config = SliderConfig::default();
        assert_eq!(
            LayoutMode::resolve(&config, &config.desktop, 3),
            LayoutMode::Single
        );
        config.transition_effect = TransitionEffect::Fade;
        assert_eq!(
            LayoutMode::resolve(&config, &config.desktop, 3),
            LayoutMode::Fade
        );
        config.transition_effect = TransitionEffect::Slide;
        config.is_carousel_mode = true;
        config.infinite_loop = true;
        let three = settings(3, 1, 0);
        assert_eq!(
            LayoutMode::resolve(&config, &three, 5),
            LayoutMode::CarouselLoop
        );
        assert_eq!(
            LayoutMode::resolve(&config, &three, 3),
            LayoutMode::CarouselBounded
        );
    }

    #[test]
    fn bounded_normalization_clamps() {
        let mut config = SliderConfig::default();
        config.is_carousel_mode = true;
        config.desktop = settings(3, 1, 0);
        let engine: LayoutEngine<u32> = LayoutEngine::new(&config, 5, Breakpoint::Desktop);
        assert_eq!(engine.mode(), LayoutMode::CarouselBounded);
        assert_eq!(engine.normalize(7), 2);
        assert_eq!(engine.normalize(-1), 0);
        assert_eq!(engine.indicator_count(), 3);
    }

    #[test]
    fn looping_normalization_wraps() {
        let config = SliderConfig::default();
        let engine: LayoutEngine<u32> = LayoutEngine::new(&config, 4, Breakpoint::Desktop);
        assert_eq!(engine.normalize(5), 1);
        assert_eq!(engine.normalize(-1), 3);
        assert_eq!(engine.indicator_count(), 4);
    }

    #[test]
    fn numbers_render_compactly() {
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(120.0), "120");
        assert_eq!(fmt_num(12.5), "12.5");
    }
}
