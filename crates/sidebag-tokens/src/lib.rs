//! Extract circular game tokens from scanned reference pages.
//!
//! Each page is blurred, searched for circles with a Hough gradient
//! detector, split into a left and a right column at the horizontal
//! midpoint, sorted top-to-bottom (then left-to-right) and matched by
//! position against the page's name lists. Every circle is cropped from the
//! color page and written as `<name>.png`; an annotated `debug_page<N>.png`
//! can be written alongside.
//!
//! ## Quickstart
//!
//! ```no_run
//! use sidebag_tokens::{driver, ExtractConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractConfig {
//!     input_dir: "reference/tokens_extracted".into(),
//!     output_dir: "out/tokens".into(),
//!     ..ExtractConfig::default()
//! };
//! let report = driver::run(&config)?;
//! println!("extracted {} tokens", report.total_tokens());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `sidebag_tokens::core`: circles, columns, crop rectangles, logging.
//! - `sidebag_tokens::hough`: the circle detector and its parameters.
//! - [`layout`]: per-page name lists and position-to-name assignment.
//! - [`extract`]: detection, naming and token files for one page.
//! - [`overlay`]: the annotated debug image.
//! - [`driver`]: output directory preparation and the page loop.

pub use sidebag_tokens_core as core;
pub use sidebag_tokens_hough as hough;

pub mod config;
pub mod driver;
mod error;
pub mod extract;
pub mod layout;
pub mod overlay;
pub mod report;

pub use config::ExtractConfig;
pub use error::{ExtractError, JsonFileError};
pub use extract::{
    detect_and_name, extract_page, try_extract_page, ExtractedToken, PageDetection,
    PageExtraction, TokenFailure, WrittenTokens,
};
pub use layout::{fallback_name, NamedCircle, PageLayout};
pub use report::{PageReport, PageStatus, RunReport, TokenRecord};
