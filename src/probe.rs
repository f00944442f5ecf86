//! # Encode Probe
//!
//! The codec collaborator the budget search drives: one probe is a full
//! resample + encode + measure cycle. Resampling runs through
//! [`crate::scale`]; encoding targets JPEG via the `image` crate. Both
//! halves are deterministic for a fixed input, which the search relies on
//! when it re-encodes the winning candidate.

use std::str::FromStr;

use fast_image_resize::Resizer;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::CompressError;
use crate::scale;

/// Channel layout of a [`PixelBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channels {
    /// Interleaved 8-bit RGB.
    Rgb8,
    /// Single 8-bit luma plane (grayscale and thresholded binary).
    Gray8,
}

impl Channels {
    /// Bytes per pixel.
    pub fn count(self) -> usize {
        match self {
            Channels::Rgb8 => 3,
            Channels::Gray8 => 1,
        }
    }

    fn extended_color_type(self) -> ExtendedColorType {
        match self {
            Channels::Rgb8 => ExtendedColorType::Rgb8,
            Channels::Gray8 => ExtendedColorType::L8,
        }
    }
}

/// One normalized image: tightly packed samples plus dimensions.
///
/// The search only ever reads a buffer; resampling produces fresh copies.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    pub data: Vec<u8>,
    pub w: u32,
    pub h: u32,
    pub channels: Channels,
}

/// Encode formats the probe can target.
///
/// WebP is deliberately absent: the `image` crate ships a lossless-only
/// WebP encoder, so a quality axis over it would be a no-op and the budget
/// search would degenerate to scale-only. Requests for it surface as
/// [`CompressError::UnsupportedFormat`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncodeFormat {
    Jpeg,
}

impl EncodeFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            EncodeFormat::Jpeg => "jpeg",
        }
    }
}

impl FromStr for EncodeFormat {
    type Err = CompressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(EncodeFormat::Jpeg),
            other => Err(CompressError::unsupported_format(other)),
        }
    }
}

/// The probe implementation handed to [`fit_search::BudgetSearch`].
///
/// Owns a reusable resizer so repeated probes don't rebuild SIMD state.
pub struct ImageProbe {
    format: EncodeFormat,
    resizer: Resizer,
}

impl ImageProbe {
    pub fn new(format: EncodeFormat) -> Self {
        Self {
            format,
            resizer: Resizer::new(),
        }
    }
}

impl fit_search::EncodeProbe for ImageProbe {
    type Buffer = PixelBuffer;
    type Error = CompressError;

    fn resample(&mut self, src: &PixelBuffer, scale: f64) -> Result<PixelBuffer, CompressError> {
        scale::scale_buffer(&mut self.resizer, src, scale)
            .map_err(|e| CompressError::probe("resample", e))
    }

    fn encode(&mut self, src: &PixelBuffer, quality: u8) -> Result<Vec<u8>, CompressError> {
        match self.format {
            EncodeFormat::Jpeg => {
                let mut out = Vec::new();
                // The search's quality domain is [0, 100]; the JPEG encoder
                // accepts 1..=100.
                let encoder = JpegEncoder::new_with_quality(&mut out, quality.max(1));
                encoder
                    .write_image(&src.data, src.w, src.h, src.channels.extended_color_type())
                    .map_err(|e| CompressError::probe("encode", e))?;
                Ok(out)
            }
        }
    }
}
