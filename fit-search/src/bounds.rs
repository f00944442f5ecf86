// SPDX-License-Identifier: MIT
//! # Search Bounds
//!
//! The two closed intervals the budget search narrows: an integer quality
//! range within `[0, 100]` and a real scale range within `(0.0, 1.0]`.
//!
//! Narrowing is monotone: the feasible branch only ever raises the lower
//! ends, the infeasible branch only ever lowers the upper ends, and both
//! knobs move on every step. The scale interval moves by one fixed `step`
//! past the probed midpoint in either direction, so a single step magnitude
//! governs both branches.

/// Default lower/upper quality bounds.
pub const DEFAULT_QUALITY_RANGE: (u8, u8) = (0, 100);
/// Default lower/upper scale bounds. Scale 0.1 keeps the smallest probe at
/// a tenth of the source per side rather than degenerating to a 1×1 image.
pub const DEFAULT_SCALE_RANGE: (f64, f64) = (0.1, 1.0);
/// Default scale step, applied symmetrically on both narrowing directions.
pub const DEFAULT_SCALE_STEP: f64 = 0.01;

/// One (quality, scale) pair proposed for a single probe iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    pub quality: u8,
    pub scale: f64,
}

/// The mutable pair of search intervals.
///
/// Quality bounds are held as `i32` so the infeasible branch can step below
/// zero and the feasible branch above 100, which is exactly how the ranges
/// empty out and terminate the loop.
#[derive(Clone, Copy, Debug)]
pub struct SearchBounds {
    q_lo: i32,
    q_hi: i32,
    s_lo: f64,
    s_hi: f64,
    step: f64,
}

impl SearchBounds {
    /// Build bounds from inclusive quality and scale ranges plus the scale
    /// step. Range validity is the caller's problem (the search constructor
    /// checks it); this type only does the arithmetic.
    pub fn new(quality: (u8, u8), scale: (f64, f64), step: f64) -> Self {
        Self {
            q_lo: quality.0 as i32,
            q_hi: quality.1 as i32,
            s_lo: scale.0,
            s_hi: scale.1,
            step,
        }
    }

    /// True once either interval is empty. The search loop runs only while
    /// both are non-empty.
    pub fn is_exhausted(&self) -> bool {
        self.q_lo > self.q_hi || self.s_lo > self.s_hi
    }

    /// The midpoint candidate of the *current* intervals.
    ///
    /// Both midpoints are recomputed from the live bounds on every call; the
    /// scale midpoint in particular must track the narrowing interval or the
    /// search never converges on the scale axis.
    pub fn candidate(&self) -> Candidate {
        Candidate {
            quality: ((self.q_lo + self.q_hi) / 2) as u8,
            scale: (self.s_lo + self.s_hi) / 2.0,
        }
    }

    /// Feasible branch: push both lower ends past the probed candidate.
    pub fn raise_min(&mut self, probed: Candidate) {
        self.q_lo = probed.quality as i32 + 1;
        self.s_lo = probed.scale + self.step;
    }

    /// Infeasible branch: pull both upper ends below the probed candidate.
    pub fn lower_max(&mut self, probed: Candidate) {
        self.q_hi = probed.quality as i32 - 1;
        self.s_hi = probed.scale - self.step;
    }

    /// Lower end of the quality interval as first constructed, used by the
    /// tracker as its sentinel quality.
    pub fn quality_floor(&self) -> u8 {
        self.q_lo.clamp(0, 100) as u8
    }

    /// Lower end of the scale interval, the tracker's sentinel scale.
    pub fn scale_floor(&self) -> f64 {
        self.s_lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_bounds() -> SearchBounds {
        SearchBounds::new(DEFAULT_QUALITY_RANGE, DEFAULT_SCALE_RANGE, DEFAULT_SCALE_STEP)
    }

    #[test]
    fn midpoint_of_default_ranges() {
        let c = default_bounds().candidate();
        assert_eq!(c.quality, 50);
        assert!((c.scale - 0.55).abs() < 1e-9);
    }

    #[test]
    fn quality_midpoint_floors() {
        let b = SearchBounds::new((0, 5), DEFAULT_SCALE_RANGE, DEFAULT_SCALE_STEP);
        assert_eq!(b.candidate().quality, 2);
    }

    #[test]
    fn feasible_branch_raises_both_lower_ends() {
        let mut b = default_bounds();
        let c = b.candidate();
        b.raise_min(c);
        let next = b.candidate();
        assert!(next.quality > c.quality);
        assert!(next.scale > c.scale);
        assert!(!b.is_exhausted());
    }

    #[test]
    fn infeasible_branch_lowers_both_upper_ends() {
        let mut b = default_bounds();
        let c = b.candidate();
        b.lower_max(c);
        let next = b.candidate();
        assert!(next.quality < c.quality);
        assert!(next.scale < c.scale);
    }

    #[test]
    fn quality_range_exhausts_in_logarithmic_steps() {
        // Repeated infeasible narrowing is the slowest path to exhaustion on
        // the quality axis: 100 → 49 → 23 → 10 → 4 → 1 → -1.
        let mut b = default_bounds();
        let mut steps = 0;
        while !b.is_exhausted() {
            let c = b.candidate();
            b.lower_max(c);
            steps += 1;
            assert!(steps <= 8, "bounds failed to converge");
        }
        assert!(steps <= 8);
    }

    #[test]
    fn degenerate_single_point_range() {
        let mut b = SearchBounds::new((80, 80), (0.5, 0.5), DEFAULT_SCALE_STEP);
        let c = b.candidate();
        assert_eq!(c.quality, 80);
        assert!((c.scale - 0.5).abs() < 1e-9);
        b.raise_min(c);
        assert!(b.is_exhausted());
    }

    #[test]
    fn floors_reflect_initial_ranges() {
        let b = SearchBounds::new((10, 90), (0.2, 0.8), DEFAULT_SCALE_STEP);
        assert_eq!(b.quality_floor(), 10);
        assert!((b.scale_floor() - 0.2).abs() < 1e-9);
    }
}
