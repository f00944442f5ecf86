//! # Color/Format Normalization
//!
//! Converts the caller's RGB image into the buffer the encode probe
//! accepts, before the budget search ever sees it. The target format is a
//! closed set and the conversion is a single exhaustive match, so an
//! unhandled format is a compile error here rather than a silent fallthrough
//! at run time.

use image::RgbImage;

use crate::probe::{Channels, PixelBuffer};

/// Luma value separating black from white in binary mode.
const BINARY_THRESHOLD: u8 = 127;

/// The color formats the pipeline can feed the encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorFormat {
    /// Full color, three channels.
    #[clap(name = "rgb")]
    Rgb,
    /// Single luma plane (BT.601 weights).
    #[clap(name = "gray")]
    Gray,
    /// Luma plane thresholded to pure black/white, for line art and text.
    #[clap(name = "binary")]
    Binary,
}

/// Convert an RGB image into the probe's buffer for the given format.
pub fn normalize(img: &RgbImage, format: ColorFormat) -> PixelBuffer {
    let (w, h) = img.dimensions();
    match format {
        ColorFormat::Rgb => PixelBuffer {
            data: img.as_raw().clone(),
            w,
            h,
            channels: Channels::Rgb8,
        },
        ColorFormat::Gray => PixelBuffer {
            data: luma_plane(img),
            w,
            h,
            channels: Channels::Gray8,
        },
        ColorFormat::Binary => {
            let mut data = luma_plane(img);
            for px in &mut data {
                *px = if *px > BINARY_THRESHOLD { 255 } else { 0 };
            }
            PixelBuffer {
                data,
                w,
                h,
                channels: Channels::Gray8,
            }
        }
    }
}

/// BT.601 luma, integer arithmetic.
fn luma_plane(img: &RgbImage) -> Vec<u8> {
    img.pixels()
        .map(|p| {
            let [r, g, b] = p.0;
            ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114 + 500) / 1000) as u8
        })
        .collect()
}
