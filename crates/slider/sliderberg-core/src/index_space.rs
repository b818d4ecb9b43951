//! Augmented index space for clone-based looping.
//!
//! Real slides occupy logical indices `0..real`. Looping layouts surround them
//! with clones, giving visual indices `0..len` where
//! `visual = logical + clones_before`. Visual indices outside the real block
//! are clones of `logical_of(visual)`.

use crate::events::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IndexSpace {
    real: usize,
    before: usize,
    after: usize,
}

impl IndexSpace {
    /// No clones.
    pub fn plain(real: usize) -> Self {
        Self {
            real,
            before: 0,
            after: 0,
        }
    }

    /// `span` clones on each side; degenerates to [`plain`](Self::plain) with
    /// fewer than two slides.
    pub fn with_clones(real: usize, span: usize) -> Self {
        if real < 2 {
            return Self::plain(real);
        }
        Self {
            real,
            before: span,
            after: span,
        }
    }

    #[inline]
    pub fn real_len(&self) -> usize {
        self.real
    }

    #[inline]
    pub fn clones_before(&self) -> usize {
        self.before
    }

    #[inline]
    pub fn clones_after(&self) -> usize {
        self.after
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.before + self.real + self.after
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.real == 0
    }

    #[inline]
    pub fn has_clones(&self) -> bool {
        self.before + self.after > 0
    }

    #[inline]
    pub fn visual_of(&self, logical: usize) -> isize {
        (logical + self.before) as isize
    }

    /// The real slide shown at `visual` (itself or the slide it clones).
    pub fn logical_of(&self, visual: isize) -> usize {
        if self.real == 0 {
            return 0;
        }
        (visual - self.before as isize).rem_euclid(self.real as isize) as usize
    }

    pub fn is_clone(&self, visual: isize) -> bool {
        visual < self.before as isize || visual >= (self.before + self.real) as isize
    }

    /// Sources of the leading clones, in track order.
    pub fn leading_sources(&self) -> Vec<usize> {
        (0..self.before)
            .map(|v| self.logical_of(v as isize))
            .collect()
    }

    /// Sources of the trailing clones, in track order.
    pub fn trailing_sources(&self) -> Vec<usize> {
        (self.before + self.real..self.len())
            .map(|v| self.logical_of(v as isize))
            .collect()
    }

    /// Visual index to animate to when moving from logical `from` to `to`.
    ///
    /// A wrapping `Next` continues forward into the trailing clones and a
    /// wrapping `Prev` continues backward into the leading clones, as long as
    /// a full `window` of slides stays inside the track. Everything else takes
    /// the direct route.
    pub fn route(&self, from: usize, to: usize, direction: Direction, window: usize) -> isize {
        let direct = self.visual_of(to);
        if !self.has_clones() {
            return direct;
        }
        match direction {
            Direction::Next if to < from => {
                let candidate = direct + self.real as isize;
                if candidate + window as isize <= self.len() as isize {
                    candidate
                } else {
                    direct
                }
            }
            Direction::Prev if to > from => {
                let candidate = direct - self.real as isize;
                if candidate >= 0 {
                    candidate
                } else {
                    direct
                }
            }
            _ => direct,
        }
    }
}
