// Resampler built on fast_image_resize (SIMD-accelerated).
// RGB8/L8 in -> same layout out at the requested scale factor.

use fast_image_resize as fir;
use fir::images::{TypedImage, TypedImageRef};
use fir::pixels::{U8, U8x3};
use fir::{ResizeOptions, Resizer};

use crate::probe::{Channels, PixelBuffer};

#[derive(Debug)]
pub enum ScaleError {
    Fir(fir::ResizeError),
    ImageBuf(fir::ImageBufferError),
}

impl From<fir::ResizeError> for ScaleError {
    fn from(e: fir::ResizeError) -> Self {
        Self::Fir(e)
    }
}
impl From<fir::ImageBufferError> for ScaleError {
    fn from(e: fir::ImageBufferError) -> Self {
        Self::ImageBuf(e)
    }
}

impl std::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleError::Fir(e) => write!(f, "Fast image resize error: {}", e),
            ScaleError::ImageBuf(e) => write!(f, "Image buffer error: {}", e),
        }
    }
}

impl std::error::Error for ScaleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaleError::Fir(e) => Some(e),
            ScaleError::ImageBuf(e) => Some(e),
        }
    }
}

/// Produce a new buffer scaled by `scale` in both spatial dimensions.
/// Output sides are rounded and clamped to at least 1px so extreme factors
/// never produce a zero-sized image.
pub fn scale_buffer(
    resizer: &mut Resizer,
    src: &PixelBuffer,
    scale: f64,
) -> Result<PixelBuffer, ScaleError> {
    let out_w = ((src.w as f64 * scale).round() as u32).max(1);
    let out_h = ((src.h as f64 * scale).round() as u32).max(1);
    let mut dst = vec![0u8; out_w as usize * out_h as usize * src.channels.count()];

    let opts = ResizeOptions::new().use_alpha(false);

    match src.channels {
        Channels::Rgb8 => {
            let src_view = TypedImageRef::<U8x3>::from_buffer(src.w, src.h, &src.data)?;
            let mut dst_image = TypedImage::<U8x3>::from_buffer(out_w, out_h, &mut dst)?;
            resizer.resize_typed::<U8x3>(&src_view, &mut dst_image, &opts)?;
        }
        Channels::Gray8 => {
            let src_view = TypedImageRef::<U8>::from_buffer(src.w, src.h, &src.data)?;
            let mut dst_image = TypedImage::<U8>::from_buffer(out_w, out_h, &mut dst)?;
            resizer.resize_typed::<U8>(&src_view, &mut dst_image, &opts)?;
        }
    }

    Ok(PixelBuffer {
        data: dst,
        w: out_w,
        h: out_h,
        channels: src.channels,
    })
}
