//! # Configuration Module
//!
//! Configuration and validation for budget compression runs. This is the
//! common interface between the CLI and the core library: build a
//! [`CompressConfig`], `validate()` it, then convert it into the library's
//! [`crate::CompressOptions`] with `to_options()`.
//!
//! ## Configuration Parameters
//!
//! | Parameter | Type | Range | Description |
//! |-----------|------|-------|-------------|
//! | `budget` | `usize` | ≥ 1 | Maximum encoded size in bytes |
//! | `color` | `ColorFormat` | rgb/gray/binary | Normalization applied before encoding |
//! | `codec` | `String` | `jpeg` | Encode format handed to the probe |
//! | `quality_range` | `(u8, u8)` | within [0, 100] | Quality search interval |
//! | `scale_range` | `(f64, f64)` | within (0, 1] | Scale search interval |
//! | `scale_step` | `f64` | > 0 | Narrowing step on the scale axis |
//! | `keep_oversized` | `bool` | true/false | On infeasible, keep the smallest artifact |

use fit_search::bounds::{DEFAULT_QUALITY_RANGE, DEFAULT_SCALE_RANGE, DEFAULT_SCALE_STEP};
use fit_search::InfeasiblePolicy;

use crate::error::CompressResult;
use crate::normalize::ColorFormat;
use crate::probe::EncodeFormat;
use crate::CompressOptions;

/// Configuration for one compression run.
#[derive(Clone, Debug)]
pub struct CompressConfig {
    /// Maximum encoded size in bytes.
    pub budget: usize,
    /// Color normalization applied before the search.
    pub color: ColorFormat,
    /// Encode format name; parsed (and possibly rejected) in `to_options`.
    pub codec: String,
    /// Inclusive quality search bounds.
    pub quality_range: (u8, u8),
    /// Inclusive scale search bounds.
    pub scale_range: (f64, f64),
    /// Fixed scale narrowing step.
    pub scale_step: f64,
    /// When nothing fits, keep the smallest oversized artifact instead of
    /// returning nothing.
    pub keep_oversized: bool,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            budget: fit_search::presets::BudgetPreset::FiPy.bytes(),
            color: ColorFormat::Rgb,
            codec: "jpeg".to_string(),
            quality_range: DEFAULT_QUALITY_RANGE,
            scale_range: DEFAULT_SCALE_RANGE,
            scale_step: DEFAULT_SCALE_STEP,
            keep_oversized: false,
        }
    }
}

impl CompressConfig {
    /// Create a configuration with the given budget, color format, and
    /// codec; search knobs start at their defaults.
    pub fn new(budget: usize, color: ColorFormat, codec: impl Into<String>) -> Self {
        Self {
            budget,
            color,
            codec: codec.into(),
            ..Self::default()
        }
    }

    /// Validate all parameters, returning a human-readable reason on the
    /// first violation.
    pub fn validate(&self) -> Result<(), String> {
        if self.budget == 0 {
            return Err("budget must be at least 1 byte".to_string());
        }
        let (q_lo, q_hi) = self.quality_range;
        if q_lo > q_hi || q_hi > 100 {
            return Err(format!(
                "quality range [{}, {}] must be non-empty and within [0, 100]",
                q_lo, q_hi
            ));
        }
        let (s_lo, s_hi) = self.scale_range;
        if !s_lo.is_finite() || !s_hi.is_finite() || s_lo <= 0.0 || s_lo > s_hi || s_hi > 1.0 {
            return Err(format!(
                "scale range [{}, {}] must be non-empty and within (0, 1]",
                s_lo, s_hi
            ));
        }
        if !self.scale_step.is_finite() || self.scale_step <= 0.0 {
            return Err(format!("scale step {} must be positive", self.scale_step));
        }
        if self.codec.parse::<EncodeFormat>().is_err() {
            return Err(format!("unsupported codec '{}'", self.codec));
        }
        Ok(())
    }

    /// Convert to the library's options, parsing the codec string.
    pub fn to_options(&self) -> CompressResult<CompressOptions> {
        let format = self.codec.parse::<EncodeFormat>()?;
        Ok(CompressOptions {
            budget: self.budget,
            color: self.color,
            format,
            quality_range: self.quality_range,
            scale_range: self.scale_range,
            scale_step: self.scale_step,
            on_infeasible: if self.keep_oversized {
                InfeasiblePolicy::ReturnSmallest
            } else {
                InfeasiblePolicy::ReturnEmpty
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(CompressConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_budget_is_rejected() {
        let config = CompressConfig::new(0, ColorFormat::Rgb, "jpeg");
        assert!(config.validate().unwrap_err().contains("budget"));
    }

    #[test]
    fn inverted_quality_range_is_rejected() {
        let config = CompressConfig {
            quality_range: (90, 10),
            ..CompressConfig::default()
        };
        assert!(config.validate().unwrap_err().contains("quality"));
    }

    #[test]
    fn out_of_domain_scale_range_is_rejected() {
        let config = CompressConfig {
            scale_range: (0.0, 1.0),
            ..CompressConfig::default()
        };
        assert!(config.validate().unwrap_err().contains("scale"));
    }

    #[test]
    fn unknown_codec_is_rejected_by_validate_and_to_options() {
        let config = CompressConfig::new(1000, ColorFormat::Rgb, "webp");
        assert!(config.validate().unwrap_err().contains("webp"));
        assert!(config.to_options().is_err());
    }

    #[test]
    fn keep_oversized_maps_to_policy() {
        let config = CompressConfig {
            keep_oversized: true,
            ..CompressConfig::default()
        };
        let options = config.to_options().unwrap();
        assert_eq!(options.on_infeasible, InfeasiblePolicy::ReturnSmallest);
    }
}
