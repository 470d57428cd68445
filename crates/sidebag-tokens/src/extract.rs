//! Per-page pipeline: detect, name, crop, write.
//!
//! [`detect_and_name`] does no I/O. Its [`PageDetection`] feeds two
//! independent consumers: [`write_tokens`] (one crop per circle) and
//! [`write_overlay`] (the debug overview).

use std::path::{Path, PathBuf};

use image::{ImageFormat, ImageReader, RgbImage};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use sidebag_tokens_core::{blur_gray, partition_columns, to_gray, Circle, CropRect, Side};
use sidebag_tokens_hough::detect_circles;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::layout::{NamedCircle, PageLayout};
use crate::overlay::render_overlay;

/// Detection and naming result for one page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDetection {
    pub page: u32,
    pub width: u32,
    pub height: u32,
    /// Named circles, left column first, each column in reading order.
    pub named: Vec<NamedCircle>,
}

impl PageDetection {
    pub fn circles_found(&self) -> usize {
        self.named.len()
    }

    pub fn count(&self, side: Side) -> usize {
        self.named.iter().filter(|n| n.side == side).count()
    }
}

/// A token image written to disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedToken {
    pub name: String,
    pub side: Side,
    pub circle: Circle,
    pub crop: CropRect,
    pub path: PathBuf,
}

/// A named circle whose image could not be written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFailure {
    pub name: String,
    pub side: Side,
    pub circle: Circle,
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of [`write_tokens`]: one failed token never stops the others.
#[derive(Clone, Debug, Default)]
pub struct WrittenTokens {
    pub tokens: Vec<ExtractedToken>,
    pub failures: Vec<TokenFailure>,
}

/// Everything produced for one page.
#[derive(Clone, Debug)]
pub struct PageExtraction {
    pub detection: PageDetection,
    pub tokens: Vec<ExtractedToken>,
    pub failed_tokens: Vec<TokenFailure>,
    pub debug_image: Option<PathBuf>,
    /// Set when the debug overview could not be written.
    pub debug_error: Option<String>,
}

/// Decode a page as 8-bit RGB (alpha is dropped).
pub fn load_page(path: &Path) -> Result<RgbImage, ExtractError> {
    let load_err = |source| ExtractError::ImageLoad {
        path: path.to_path_buf(),
        source,
    };
    let img = ImageReader::open(path)
        .map_err(|e| load_err(image::ImageError::IoError(e)))?
        .decode()
        .map_err(load_err)?;
    Ok(img.to_rgb8())
}

/// Blur, detect circles, split into columns and assign names.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(color, layout, config), fields(page = layout.page))
)]
pub fn detect_and_name(
    color: &RgbImage,
    layout: &PageLayout,
    config: &ExtractConfig,
) -> PageDetection {
    let blurred = blur_gray(&to_gray(color), config.blur_sigma);
    let circles = detect_circles(&blurred, &config.hough);
    let columns = partition_columns(&circles, color.width());

    if columns.is_empty() {
        warn!("No circles detected on page {}", layout.page);
    } else {
        info!("Found {} circles on page {}", columns.len(), layout.page);
        info!("  Left column: {} tokens", columns.left.len());
        info!("  Right column: {} tokens", columns.right.len());
    }

    PageDetection {
        page: layout.page,
        width: color.width(),
        height: color.height(),
        named: layout.assign_names(&columns),
    }
}

/// Crop every named circle from `color` and save it as `<name>.png`,
/// overwriting any existing file.
///
/// A token that cannot be cropped or written is logged and recorded in
/// [`WrittenTokens::failures`]; the remaining tokens are still written.
pub fn write_tokens(
    color: &RgbImage,
    detection: &PageDetection,
    config: &ExtractConfig,
) -> WrittenTokens {
    let (width, height) = color.dimensions();
    let mut out = WrittenTokens {
        tokens: Vec::with_capacity(detection.named.len()),
        failures: Vec::new(),
    };

    for named in &detection.named {
        let circle = named.circle;
        let path = config.token_path(&named.name);
        let fail = |error: String| TokenFailure {
            name: named.name.clone(),
            side: named.side,
            circle,
            path: path.clone(),
            error,
        };

        let Some(crop) = CropRect::around_circle(&circle, config.crop_padding, width, height)
        else {
            warn!(
                "  Skipped: {} ({}, {}) lies outside the page",
                named.name, circle.x, circle.y
            );
            out.failures.push(fail("crop box lies outside the page".into()));
            continue;
        };

        let saved = image::imageops::crop_imm(color, crop.x, crop.y, crop.width, crop.height)
            .to_image()
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| ExtractError::ImageWrite {
                path: path.clone(),
                source,
            });
        if let Err(err) = saved {
            error!("  Failed: {}: {err}", named.name);
            out.failures.push(fail(err.to_string()));
            continue;
        }
        info!("  Saved: {}.png ({}, {})", named.name, circle.x, circle.y);

        out.tokens.push(ExtractedToken {
            name: named.name.clone(),
            side: named.side,
            circle,
            crop,
            path,
        });
    }

    out
}

/// Render and save `debug_page<N>.png`.
pub fn write_overlay(
    color: &RgbImage,
    detection: &PageDetection,
    config: &ExtractConfig,
) -> Result<PathBuf, ExtractError> {
    let path = config.debug_path(detection.page);
    render_overlay(color, detection, config.label_max_chars)
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|source| ExtractError::ImageWrite {
            path: path.clone(),
            source,
        })?;
    info!("Debug image saved to {}", path.display());
    Ok(path)
}

/// Run the whole pipeline on one page image.
///
/// The output directory must already exist. No debug overview is written
/// when the page has no circles. Only an unreadable page is an error; token
/// and overview write failures are recorded in the result.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(layout, config), fields(page = layout.page))
)]
pub fn try_extract_page(
    path: &Path,
    layout: &PageLayout,
    config: &ExtractConfig,
) -> Result<PageExtraction, ExtractError> {
    let color = load_page(path)?;
    let detection = detect_and_name(&color, layout, config);
    let written = write_tokens(&color, &detection, config);

    let (mut debug_image, mut debug_error) = (None, None);
    if config.debug && !detection.named.is_empty() {
        match write_overlay(&color, &detection, config) {
            Ok(path) => debug_image = Some(path),
            Err(err) => {
                error!("Error: {err}");
                debug_error = Some(err.to_string());
            }
        }
    }

    Ok(PageExtraction {
        detection,
        tokens: written.tokens,
        failed_tokens: written.failures,
        debug_image,
        debug_error,
    })
}

/// Like [`try_extract_page`], but failures are logged and yield no tokens.
pub fn extract_page(path: &Path, layout: &PageLayout, config: &ExtractConfig) -> Vec<ExtractedToken> {
    match try_extract_page(path, layout, config) {
        Ok(extraction) => extraction.tokens,
        Err(err) => {
            error!("Error: {err}");
            Vec::new()
        }
    }
}
