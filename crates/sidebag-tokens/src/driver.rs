//! Run every configured page against a freshly cleared output directory.

use std::fs;
use std::path::Path;

use log::{debug, error, info, warn};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::extract::try_extract_page;
use crate::report::{PageReport, RunReport};

/// Delete every `*.png` file directly inside `dir`.
///
/// A missing directory is not an error. Returns the number of files removed.
pub fn clear_output_dir(dir: &Path) -> Result<usize, ExtractError> {
    if !dir.is_dir() {
        return Ok(0);
    }
    let entries = fs::read_dir(dir).map_err(|e| ExtractError::io("list", dir, e))?;

    let mut removed = 0;
    for entry in entries {
        let path = entry.map_err(|e| ExtractError::io("list", dir, e))?.path();
        let is_png = path.extension().is_some_and(|ext| ext == "png");
        if !is_png || !path.is_file() {
            continue;
        }
        fs::remove_file(&path).map_err(|e| ExtractError::io("remove", &path, e))?;
        removed += 1;
    }
    if removed > 0 {
        debug!("removed {removed} stale images from {}", dir.display());
    }
    Ok(removed)
}

/// Clear and (re)create the output directory.
pub fn prepare_output_dir(dir: &Path) -> Result<usize, ExtractError> {
    let removed = clear_output_dir(dir)?;
    fs::create_dir_all(dir).map_err(|e| ExtractError::io("create", dir, e))?;
    Ok(removed)
}

/// Process the configured pages in order.
///
/// Only output-directory preparation can fail the run. A missing or broken
/// page is logged, recorded in the report and skipped; pages already
/// written stay on disk.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(config)))]
pub fn run(config: &ExtractConfig) -> Result<RunReport, ExtractError> {
    let removed_files = prepare_output_dir(&config.output_dir)?;

    let mut report = RunReport {
        input_dir: config.input_dir.to_string_lossy().into_owned(),
        output_dir: config.output_dir.to_string_lossy().into_owned(),
        removed_files,
        pages: Vec::with_capacity(config.pages.len()),
    };

    for layout in &config.pages {
        let source = config.page_source_path(layout.page);
        if !source.exists() {
            warn!("Page not found: {}", source.display());
            report.pages.push(PageReport::missing(layout.page, &source));
            continue;
        }

        info!("Processing {}...", source.display());
        match try_extract_page(&source, layout, config) {
            Ok(extraction) => {
                info!(
                    "Extracted {} tokens from page {}",
                    extraction.tokens.len(),
                    layout.page
                );
                if !extraction.failed_tokens.is_empty() {
                    warn!(
                        "{} tokens on page {} could not be written",
                        extraction.failed_tokens.len(),
                        layout.page
                    );
                }
                report
                    .pages
                    .push(PageReport::extracted(&source, &extraction));
            }
            Err(err) => {
                error!("Error: {err}");
                report.pages.push(PageReport::failed(layout.page, &source, err));
            }
        }
    }

    Ok(report)
}
