//! Hough gradient circle detector.
//!
//! ## Quickstart
//!
//! ```
//! use image::GrayImage;
//! use sidebag_tokens_hough::{detect_circles, HoughCircleParams};
//!
//! let img = GrayImage::new(64, 64);
//! let circles = detect_circles(&img, &HoughCircleParams::default());
//! assert!(circles.is_empty());
//! ```
//!
//! Algorithm:
//! 1. Canny edges (`canny_high`, low threshold at half of it).
//! 2. Sobel gradients of the input, which is expected to be blurred already.
//! 3. Every edge pixel votes for centers along both gradient directions at
//!    each integer radius of the band `[min_radius, max_radius]`.
//! 4. Accumulator cells above `accumulator_threshold` that are local maxima
//!    become center candidates, strongest first.
//! 5. Candidates closer than `min_dist` to an accepted circle are dropped.
//! 6. The radius is the best-supported 3-pixel distance bin between the
//!    center and the edge pixels; weak support rejects the candidate.

mod accumulator;
mod detect;
mod params;
mod radius;

pub use accumulator::{Accumulator, CenterCandidate, EdgeMap, EdgePoint};
pub use detect::detect_circles;
pub use params::{HoughCircleParams, HoughParamsError};
pub use radius::{estimate_radius, RadiusEstimate};

pub use sidebag_tokens_core::Circle;
