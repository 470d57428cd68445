//! JSON configuration for a token extraction run.
//!
//! Every field has a default, and the defaults reproduce the fixed setup:
//! two reference pages, 25-45 px tokens, a 1 px crop margin and debug
//! overviews enabled.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sidebag_tokens_hough::HoughCircleParams;

use crate::error::JsonFileError;
use crate::layout::PageLayout;

fn default_input_dir() -> PathBuf {
    PathBuf::from("reference/tokens_extracted")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("app/assets/images/tokens/sidebag")
}

/// Settings for [`driver::run`](crate::driver::run) and the page extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Directory holding `page-<N>.png`.
    pub input_dir: PathBuf,
    /// Directory receiving token images; its `*.png` files are deleted first.
    pub output_dir: PathBuf,
    /// Write `debug_page<N>.png` overviews.
    pub debug: bool,
    /// Gaussian sigma applied before circle detection.
    pub blur_sigma: f32,
    /// Extra pixels kept around each circle when cropping.
    pub crop_padding: u32,
    /// Label length on the debug overview.
    pub label_max_chars: usize,
    pub hough: HoughCircleParams,
    /// Pages processed, in order.
    pub pages: Vec<PageLayout>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            debug: true,
            blur_sigma: 2.0,
            crop_padding: 1,
            label_max_chars: 8,
            hough: HoughCircleParams::default(),
            pages: PageLayout::builtin_pages(),
        }
    }
}

impl ExtractConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, JsonFileError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), JsonFileError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Source image of a page: `<input_dir>/page-<N>.png`.
    pub fn page_source_path(&self, page: u32) -> PathBuf {
        self.input_dir.join(format!("page-{page}.png"))
    }

    pub fn token_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{name}.png"))
    }

    pub fn debug_path(&self, page: u32) -> PathBuf {
        self.output_dir.join(format!("debug_page{page}.png"))
    }
}
