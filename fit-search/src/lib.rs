// SPDX-License-Identifier: MIT
//! # fit-search: Byte-Budget Search for Lossy Image Encoders
//!
//! This crate finds encoder settings that squeeze an image under a hard byte
//! budget, the situation faced by anything pushing imagery over a
//! bandwidth-starved link (satellite modems, LoRa uplinks, serial radios).
//!
//! ## Architecture Overview
//!
//! The search is a heuristic bisection over two knobs at once:
//! 1. **Quality**: integer in `[0, 100]`, passed to the encoder
//! 2. **Scale**: spatial factor in `(0.0, 1.0]`, applied before encoding
//!
//! Each iteration probes the midpoint of both current ranges, compares the
//! encoded size against the budget, and narrows the ranges toward feasibility.
//! Because encoders are not strictly monotone in either knob, this is a
//! practical heuristic rather than an exact binary search. It converges in a
//! logarithmic number of probes, which matters because every probe is a full
//! resample + encode of the source image.
//!
//! ## Key Components
//!
//! - [`bounds`]: the two closed search intervals and their narrowing rules
//! - [`tracker`]: records the best feasible candidate seen so far
//! - [`search`]: the controller driving probe/narrow/terminate, plus the
//!   [`search::EncodeProbe`] trait the codec collaborator implements
//! - [`presets`]: named byte budgets for common constrained links
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use fit_search::search::{BudgetSearch, Outcome, SearchOptions};
//!
//! let mut probe = MyJpegProbe::new();
//! let out = BudgetSearch::new(&mut probe, 3800, SearchOptions::default())?
//!     .run(&pixels)?;
//! match out.outcome {
//!     Outcome::Exact | Outcome::BestEffort => send(&out.data),
//!     Outcome::Infeasible => report_undeliverable(),
//! }
//! ```

pub mod bounds;
pub mod presets;
pub mod search;
pub mod tracker;

pub use bounds::{Candidate, SearchBounds};
pub use search::{
    BudgetSearch, EncodeProbe, InfeasiblePolicy, Outcome, SearchError, SearchObserver,
    SearchOptions, SearchOutput,
};
pub use tracker::{BestCandidate, BestTracker};
