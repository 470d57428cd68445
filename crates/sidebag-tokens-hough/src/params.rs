use serde::{Deserialize, Serialize};

/// Tuning for [`detect_circles`](crate::detect_circles).
///
/// Defaults target 25-45 px token radii on a 150 DPI scan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughCircleParams {
    /// Minimum distance between accepted circle centers (pixels).
    pub min_dist: f32,
    /// Upper Canny threshold; the lower one is half of it.
    pub canny_high: f32,
    /// Minimum votes for a center and minimum edge support for its radius.
    pub accumulator_threshold: u32,
    /// Smallest radius searched (pixels).
    pub min_radius: u32,
    /// Largest radius searched (pixels).
    pub max_radius: u32,
    /// Optional cap on the number of circles returned.
    #[serde(default)]
    pub max_circles: Option<usize>,
}

impl Default for HoughCircleParams {
    fn default() -> Self {
        Self {
            min_dist: 50.0,
            canny_high: 50.0,
            accumulator_threshold: 30,
            min_radius: 25,
            max_radius: 45,
            max_circles: None,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HoughParamsError {
    #[error("min_radius must be at least 1")]
    ZeroMinRadius,

    #[error("radius band is empty (min_radius={min}, max_radius={max})")]
    EmptyRadiusBand { min: u32, max: u32 },

    #[error("canny_high must be positive and finite (got {0})")]
    InvalidCannyThreshold(f32),

    #[error("min_dist must be non-negative and finite (got {0})")]
    InvalidMinDist(f32),
}

impl HoughCircleParams {
    pub fn validate(&self) -> Result<(), HoughParamsError> {
        if self.min_radius == 0 {
            return Err(HoughParamsError::ZeroMinRadius);
        }
        if self.min_radius > self.max_radius {
            return Err(HoughParamsError::EmptyRadiusBand {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        if !(self.canny_high.is_finite() && self.canny_high > 0.0) {
            return Err(HoughParamsError::InvalidCannyThreshold(self.canny_high));
        }
        if !(self.min_dist.is_finite() && self.min_dist >= 0.0) {
            return Err(HoughParamsError::InvalidMinDist(self.min_dist));
        }
        Ok(())
    }

    pub(crate) fn canny_low(&self) -> f32 {
        0.5 * self.canny_high
    }
}
