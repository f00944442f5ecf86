// SPDX-License-Identifier: MIT
//! # Budget Search Controller
//!
//! Drives the iterative narrowing of the quality and scale bounds against an
//! [`EncodeProbe`], decides termination and tie-breaks, and produces the
//! final encoded artifact.
//!
//! ## Control Flow
//!
//! 1. Probe the midpoint of both current ranges (resample, then encode).
//! 2. Exact budget hit → return those bytes immediately ([`Outcome::Exact`]).
//! 3. Under budget → record in the tracker, raise the lower bounds.
//! 4. Over budget → lower the upper bounds.
//! 5. Ranges exhausted → re-encode once at the best recorded parameters
//!    ([`Outcome::BestEffort`]), or report [`Outcome::Infeasible`].
//!
//! Every probe is reported to a caller-supplied [`SearchObserver`]; there is
//! no process-wide logging state inside the search.
//!
//! ## What the controller does NOT assume
//!
//! Encoded size is not strictly monotone in quality or scale for real
//! codecs. The narrowing rules are a heuristic bisection that behaves well
//! for JPEG-family encoders, not a proof-carrying binary search, and the
//! code must stay honest about that: feasibility is only ever decided by
//! measuring an actual encode.

use std::error::Error as StdError;
use std::fmt;

use crate::bounds::{
    Candidate, SearchBounds, DEFAULT_QUALITY_RANGE, DEFAULT_SCALE_RANGE, DEFAULT_SCALE_STEP,
};
use crate::tracker::{BestCandidate, BestTracker};

/// The two capabilities the codec collaborator must supply.
///
/// Both operations must be deterministic for a fixed input; the controller
/// relies on that when it re-encodes the winning candidate after the loop.
/// Failures are surfaced to the caller unretried: a failing probe aborts
/// the whole search rather than being folded into "nothing fit".
pub trait EncodeProbe {
    /// The pixel-buffer type this probe resamples and encodes.
    type Buffer;
    /// Error type for resample/encode failures.
    type Error: StdError + Send + Sync + 'static;

    /// Produce a new buffer scaled by `scale` in both spatial dimensions.
    fn resample(&mut self, src: &Self::Buffer, scale: f64) -> Result<Self::Buffer, Self::Error>;

    /// Encode a buffer at the given quality, returning the compressed bytes.
    fn encode(&mut self, src: &Self::Buffer, quality: u8) -> Result<Vec<u8>, Self::Error>;
}

/// Per-call probe observer, replacing any notion of a global logger.
///
/// Implemented for plain closures, so `|q, s, size| println!(...)` works.
pub trait SearchObserver {
    /// Called once per probe with the candidate and the measured size.
    fn on_probe(&mut self, quality: u8, scale: f64, size: usize);
}

impl<F: FnMut(u8, f64, usize)> SearchObserver for F {
    fn on_probe(&mut self, quality: u8, scale: f64, size: usize) {
        self(quality, scale, size)
    }
}

fn ignore_probe(_quality: u8, _scale: f64, _size: usize) {}

/// How a search concluded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A probe landed exactly on the budget; its bytes were returned as-is.
    Exact,
    /// The best feasible candidate was re-encoded and returned.
    BestEffort,
    /// No explored candidate fit the budget. A normal result, not an error.
    Infeasible,
}

/// What to hand back when the search is [`Outcome::Infeasible`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InfeasiblePolicy {
    /// Return an empty byte sequence.
    ReturnEmpty,
    /// Re-encode at the smallest-sized parameters seen during the search
    /// and return those bytes even though they exceed the budget.
    ReturnSmallest,
}

/// Knobs for one search call.
#[derive(Clone, Copy, Debug)]
pub struct SearchOptions {
    /// Inclusive quality bounds, within `[0, 100]`.
    pub quality: (u8, u8),
    /// Inclusive scale bounds, within `(0.0, 1.0]`.
    pub scale: (f64, f64),
    /// Fixed scale step applied on both narrowing directions.
    pub scale_step: f64,
    /// Payload policy for the infeasible outcome.
    pub on_infeasible: InfeasiblePolicy,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY_RANGE,
            scale: DEFAULT_SCALE_RANGE,
            scale_step: DEFAULT_SCALE_STEP,
            on_infeasible: InfeasiblePolicy::ReturnEmpty,
        }
    }
}

/// The encoded artifact plus how the search got there.
#[derive(Clone, Debug)]
pub struct SearchOutput {
    /// Encoded bytes. Empty on [`Outcome::Infeasible`] with
    /// [`InfeasiblePolicy::ReturnEmpty`].
    pub data: Vec<u8>,
    /// How the search concluded.
    pub outcome: Outcome,
    /// The selected (quality, scale, size) record for diagnostics.
    /// `None` when no feasible candidate was found.
    pub best: Option<BestCandidate>,
}

/// Search failures. `Infeasible` is deliberately absent: finding nothing
/// under budget is an [`Outcome`], not an error.
#[derive(Debug)]
pub enum SearchError {
    /// Budget must be a positive byte count.
    InvalidBudget(usize),
    /// Quality bounds empty or outside `[0, 100]`.
    InvalidQualityRange { lo: u8, hi: u8 },
    /// Scale bounds empty, non-finite, or outside `(0.0, 1.0]`.
    InvalidScaleRange { lo: f64, hi: f64 },
    /// Scale step must be positive and finite.
    InvalidScaleStep(f64),
    /// The probe failed during resample or encode; the underlying cause is
    /// attached and the search was aborted, not masked.
    Probe(Box<dyn StdError + Send + Sync>),
}

impl SearchError {
    fn probe<E: StdError + Send + Sync + 'static>(source: E) -> Self {
        Self::Probe(Box::new(source))
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidBudget(budget) => {
                write!(f, "Byte budget must be positive (got {})", budget)
            }
            SearchError::InvalidQualityRange { lo, hi } => {
                write!(f, "Invalid quality range [{}, {}]", lo, hi)
            }
            SearchError::InvalidScaleRange { lo, hi } => {
                write!(f, "Invalid scale range [{}, {}]", lo, hi)
            }
            SearchError::InvalidScaleStep(step) => {
                write!(f, "Invalid scale step {}", step)
            }
            SearchError::Probe(source) => write!(f, "Encode probe failed: {}", source),
        }
    }
}

impl StdError for SearchError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            SearchError::Probe(source) => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// One byte-budget search over a probe.
///
/// Holds the bounds and tracker for a single call; the controller has no
/// shared mutable state, so independent searches may run on separate
/// threads, each with its own probe and `BudgetSearch`.
pub struct BudgetSearch<'p, P: EncodeProbe> {
    probe: &'p mut P,
    budget: usize,
    bounds: SearchBounds,
    tracker: BestTracker,
    policy: InfeasiblePolicy,
}

impl<'p, P: EncodeProbe> BudgetSearch<'p, P> {
    /// Validate inputs and set up the search state.
    ///
    /// # Errors
    ///
    /// Rejects a zero budget, empty or out-of-domain quality/scale ranges,
    /// and non-positive scale steps before any probe runs.
    pub fn new(probe: &'p mut P, budget: usize, opts: SearchOptions) -> Result<Self, SearchError> {
        if budget == 0 {
            return Err(SearchError::InvalidBudget(budget));
        }
        let (q_lo, q_hi) = opts.quality;
        if q_lo > q_hi || q_hi > 100 {
            return Err(SearchError::InvalidQualityRange { lo: q_lo, hi: q_hi });
        }
        let (s_lo, s_hi) = opts.scale;
        if !s_lo.is_finite() || !s_hi.is_finite() || s_lo <= 0.0 || s_lo > s_hi || s_hi > 1.0 {
            return Err(SearchError::InvalidScaleRange { lo: s_lo, hi: s_hi });
        }
        if !opts.scale_step.is_finite() || opts.scale_step <= 0.0 {
            return Err(SearchError::InvalidScaleStep(opts.scale_step));
        }

        let bounds = SearchBounds::new(opts.quality, opts.scale, opts.scale_step);
        let tracker = BestTracker::new(bounds.quality_floor(), bounds.scale_floor());
        Ok(Self {
            probe,
            budget,
            bounds,
            tracker,
            policy: opts.on_infeasible,
        })
    }

    /// Run the search without observation.
    pub fn run(self, buffer: &P::Buffer) -> Result<SearchOutput, SearchError> {
        self.run_with_observer(buffer, &mut ignore_probe)
    }

    /// Run the search, reporting every probe to `observer`.
    ///
    /// Returned `Exact` and `BestEffort` artifacts are always at or under
    /// the budget. The loop performs at most O(log2(101) + log2(span/step))
    /// probes; in practice the quality axis exhausts first, after about
    /// seven iterations over the full `[0, 100]` range.
    pub fn run_with_observer<O: SearchObserver + ?Sized>(
        mut self,
        buffer: &P::Buffer,
        observer: &mut O,
    ) -> Result<SearchOutput, SearchError> {
        // Smallest artifact seen anywhere, feasible or not; only consulted
        // for the ReturnSmallest infeasible policy.
        let mut smallest: Option<(usize, Candidate)> = None;

        while !self.bounds.is_exhausted() {
            let candidate = self.bounds.candidate();
            let size = {
                let resampled = self
                    .probe
                    .resample(buffer, candidate.scale)
                    .map_err(SearchError::probe)?;
                let data = self
                    .probe
                    .encode(&resampled, candidate.quality)
                    .map_err(SearchError::probe)?;
                let size = data.len();
                observer.on_probe(candidate.quality, candidate.scale, size);

                if size == self.budget {
                    // Exact-budget hit is treated as optimal regardless of
                    // the remaining search space.
                    return Ok(SearchOutput {
                        data,
                        outcome: Outcome::Exact,
                        best: Some(BestCandidate {
                            quality: candidate.quality,
                            scale: candidate.scale,
                            size,
                        }),
                    });
                }
                size
            };

            if smallest.map_or(true, |(s, _)| size < s) {
                smallest = Some((size, candidate));
            }

            if size < self.budget {
                self.tracker.observe(candidate, size, self.budget);
                self.bounds.raise_min(candidate);
            } else {
                self.bounds.lower_max(candidate);
            }
        }

        match self.tracker.current() {
            Some(best) => {
                let data = self.encode_at(buffer, best.quality, best.scale)?;
                Ok(SearchOutput {
                    data,
                    outcome: Outcome::BestEffort,
                    best: Some(best),
                })
            }
            None => {
                let data = match (self.policy, smallest) {
                    (InfeasiblePolicy::ReturnSmallest, Some((_, c))) => {
                        self.encode_at(buffer, c.quality, c.scale)?
                    }
                    _ => Vec::new(),
                };
                Ok(SearchOutput {
                    data,
                    outcome: Outcome::Infeasible,
                    best: None,
                })
            }
        }
    }

    fn encode_at(
        &mut self,
        buffer: &P::Buffer,
        quality: u8,
        scale: f64,
    ) -> Result<Vec<u8>, SearchError> {
        let resampled = self
            .probe
            .resample(buffer, scale)
            .map_err(SearchError::probe)?;
        self.probe
            .encode(&resampled, quality)
            .map_err(SearchError::probe)
    }
}
