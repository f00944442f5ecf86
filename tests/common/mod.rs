//! Common test utilities and helpers for the imgfit integration tests
//!
//! This module provides shared image builders for exercising the budget
//! search against the real JPEG probe.

use image::{Rgb, RgbImage};

/// Create a solid-color test image
pub fn create_solid_image(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

/// Create a gradient image for testing, so the encoder has real content
/// to spend bytes on
pub fn create_gradient_image(width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = ((x as f32 / width as f32) * 255.0) as u8;
            let g = ((y as f32 / height as f32) * 255.0) as u8;
            let b = 128u8; // Constant blue channel
            img.put_pixel(x, y, Rgb([r, g, b]));
        }
    }
    img
}

/// Assert that a result is feasible and fits the given budget
pub fn assert_fits_budget(result: &imgfit::CompressedImage, budget: usize) {
    assert!(
        matches!(
            result.outcome,
            imgfit::Outcome::Exact | imgfit::Outcome::BestEffort
        ),
        "expected a feasible outcome, got {:?}",
        result.outcome
    );
    assert!(
        result.data.len() <= budget,
        "artifact of {} bytes exceeds budget {}",
        result.data.len(),
        budget
    );
    assert!(!result.data.is_empty(), "feasible artifact is empty");
}
