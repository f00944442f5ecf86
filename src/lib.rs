//! # imgfit: Byte-Budget Image Compression
//!
//! Compress a raster image to fit under a hard byte budget, for links where
//! the budget is non-negotiable: satellite modems, LoRa uplinks, serial
//! radios. The library searches a two-dimensional (quality, scale) space
//! with a logarithmic number of encode probes and returns the best artifact
//! that fits, or an honest "nothing fits" outcome.
//!
//! ## Architecture
//!
//! The library is organized into a few focused modules:
//! - `normalize`: RGB → gray → binary conversion before the search
//! - `probe`: the resample + JPEG-encode probe the search drives
//! - `scale`: SIMD resampling via `fast_image_resize`
//! - `config`: configuration management and validation
//! - `error`: typed error taxonomy
//!
//! The search itself lives in the `fit-search` crate and is generic over
//! the probe, so it carries no codec knowledge.
//!
//! ## Example
//!
//! ```rust,no_run
//! use imgfit::{compress_to_budget, CompressOptions, Outcome};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = image::open("photo.png")?.to_rgb8();
//! let result = compress_to_budget(&img, &CompressOptions::new(3800))?;
//!
//! match result.outcome {
//!     Outcome::Exact | Outcome::BestEffort => std::fs::write("fit.jpg", &result.data)?,
//!     Outcome::Infeasible => eprintln!("image cannot fit the budget"),
//! }
//! # Ok(())
//! # }
//! ```

// External crate imports
use image::RgbImage;

// Internal module imports
pub mod config;
pub mod error;
pub mod normalize;
pub mod probe;
pub mod scale;

/// Re-export error types for convenience
pub use error::{CompressError, CompressResult};

/// Re-export the search vocabulary so callers rarely need `fit_search`
/// directly.
pub use fit_search::presets::BudgetPreset;
pub use fit_search::{BestCandidate, InfeasiblePolicy, Outcome, SearchObserver};
pub use normalize::ColorFormat;
pub use probe::{EncodeFormat, ImageProbe, PixelBuffer};

/// Options for one compression run.
///
/// `CompressOptions::new(budget)` gives the defaults used by the CLI; the
/// fields are public for callers that need to pin the search space.
#[derive(Clone, Copy, Debug)]
pub struct CompressOptions {
    /// Maximum encoded size in bytes. Must be positive.
    pub budget: usize,

    /// Color normalization applied before the search sees the image.
    pub color: ColorFormat,

    /// Encode format the probe targets.
    pub format: EncodeFormat,

    /// Inclusive quality search bounds, within `[0, 100]`.
    pub quality_range: (u8, u8),

    /// Inclusive scale search bounds, within `(0.0, 1.0]`.
    pub scale_range: (f64, f64),

    /// Fixed narrowing step on the scale axis.
    pub scale_step: f64,

    /// What to return when no candidate fits the budget.
    pub on_infeasible: InfeasiblePolicy,
}

impl CompressOptions {
    /// Defaults for the given budget: RGB, JPEG, full search space,
    /// empty payload on infeasible.
    pub fn new(budget: usize) -> Self {
        Self {
            budget,
            color: ColorFormat::Rgb,
            format: EncodeFormat::Jpeg,
            quality_range: fit_search::bounds::DEFAULT_QUALITY_RANGE,
            scale_range: fit_search::bounds::DEFAULT_SCALE_RANGE,
            scale_step: fit_search::bounds::DEFAULT_SCALE_STEP,
            on_infeasible: InfeasiblePolicy::ReturnEmpty,
        }
    }
}

/// The result of a compression run.
#[derive(Clone, Debug)]
pub struct CompressedImage {
    /// Encoded bytes; empty on `Infeasible` with the `ReturnEmpty` policy.
    pub data: Vec<u8>,
    /// How the search concluded.
    pub outcome: Outcome,
    /// The selected (quality, scale, size) record, for diagnostics.
    pub best: Option<BestCandidate>,
}

fn ignore_probe(_quality: u8, _scale: f64, _size: usize) {}

/// Compress `image` to fit under `options.budget`.
///
/// Feasible results (`Exact` or `BestEffort`) are always at or under the
/// budget. `Infeasible` is a normal outcome; errors are reserved for bad
/// inputs and codec failures.
///
/// # Errors
///
/// Returns an error if the image is empty, the budget or search bounds are
/// invalid, or the encode probe fails. A probe failure is surfaced with its
/// cause attached, never silently folded into `Infeasible`.
pub fn compress_to_budget(
    image: &RgbImage,
    options: &CompressOptions,
) -> CompressResult<CompressedImage> {
    compress_with_observer(image, options, &mut ignore_probe)
}

/// Like [`compress_to_budget`], reporting every probe to `observer`.
///
/// The observer is injected per call; the library keeps no process-wide
/// logging state.
pub fn compress_with_observer<O: SearchObserver + ?Sized>(
    image: &RgbImage,
    options: &CompressOptions,
    observer: &mut O,
) -> CompressResult<CompressedImage> {
    if image.width() == 0 || image.height() == 0 {
        return Err(CompressError::config(
            "image",
            format!("{}x{}", image.width(), image.height()),
            "input image must be non-empty",
        ));
    }

    let buffer = normalize::normalize(image, options.color);
    let mut probe = ImageProbe::new(options.format);
    let search_options = fit_search::SearchOptions {
        quality: options.quality_range,
        scale: options.scale_range,
        scale_step: options.scale_step,
        on_infeasible: options.on_infeasible,
    };

    let output = fit_search::BudgetSearch::new(&mut probe, options.budget, search_options)?
        .run_with_observer(&buffer, observer)?;

    Ok(CompressedImage {
        data: output.data,
        outcome: output.outcome,
        best: output.best,
    })
}
