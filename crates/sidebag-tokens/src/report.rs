//! JSON summary of a run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sidebag_tokens_core::Side;

use crate::error::JsonFileError;
use crate::extract::{ExtractedToken, PageExtraction, TokenFailure};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    Extracted,
    Missing,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub name: String,
    pub side: Side,
    pub file: String,
    pub x: u32,
    pub y: u32,
    pub radius: u32,
}

impl From<&ExtractedToken> for TokenRecord {
    fn from(t: &ExtractedToken) -> Self {
        Self {
            name: t.name.clone(),
            side: t.side,
            file: t.path.to_string_lossy().into_owned(),
            x: t.circle.x,
            y: t.circle.y,
            radius: t.circle.radius,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageReport {
    pub page: u32,
    pub source: String,
    pub status: PageStatus,
    #[serde(default)]
    pub circles_found: usize,
    #[serde(default)]
    pub tokens: Vec<TokenRecord>,
    /// Tokens that were detected and named but not written.
    #[serde(default)]
    pub failed_tokens: Vec<TokenFailure>,
    #[serde(default)]
    pub debug_image: Option<String>,
    /// Page failure, or a debug overview write failure on an extracted page.
    #[serde(default)]
    pub error: Option<String>,
}

impl PageReport {
    pub fn missing(page: u32, source: &Path) -> Self {
        Self {
            page,
            source: source.to_string_lossy().into_owned(),
            status: PageStatus::Missing,
            circles_found: 0,
            tokens: Vec::new(),
            failed_tokens: Vec::new(),
            debug_image: None,
            error: None,
        }
    }

    pub fn failed(page: u32, source: &Path, err: impl ToString) -> Self {
        Self {
            status: PageStatus::Failed,
            error: Some(err.to_string()),
            ..Self::missing(page, source)
        }
    }

    pub fn extracted(source: &Path, extraction: &PageExtraction) -> Self {
        Self {
            page: extraction.detection.page,
            source: source.to_string_lossy().into_owned(),
            status: PageStatus::Extracted,
            circles_found: extraction.detection.circles_found(),
            tokens: extraction.tokens.iter().map(TokenRecord::from).collect(),
            failed_tokens: extraction.failed_tokens.clone(),
            debug_image: extraction
                .debug_image
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            error: extraction.debug_error.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub input_dir: String,
    pub output_dir: String,
    /// Stale `*.png` files deleted before extraction.
    #[serde(default)]
    pub removed_files: usize,
    pub pages: Vec<PageReport>,
}

impl RunReport {
    pub fn total_tokens(&self) -> usize {
        self.pages.iter().map(|p| p.tokens.len()).sum()
    }

    pub fn page(&self, page: u32) -> Option<&PageReport> {
        self.pages.iter().find(|p| p.page == page)
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, JsonFileError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), JsonFileError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_page_keeps_error_text() {
        let r = PageReport::failed(2, Path::new("in/page-2.png"), "bad header");
        assert_eq!(r.status, PageStatus::Failed);
        assert_eq!(r.error.as_deref(), Some("bad header"));
        assert_eq!(r.source, "in/page-2.png");
        assert!(r.tokens.is_empty());
    }

    #[test]
    fn status_serializes_lowercase() {
        let r = PageReport::missing(1, Path::new("page-1.png"));
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["status"], "missing");
        assert_eq!(json["debug_image"], serde_json::Value::Null);
    }

    #[test]
    fn totals_and_lookup() {
        let token = TokenRecord {
            name: "ale".into(),
            side: Side::Left,
            file: "out/ale.png".into(),
            x: 100,
            y: 100,
            radius: 30,
        };
        let mut page = PageReport::missing(1, Path::new("page-1.png"));
        page.status = PageStatus::Extracted;
        page.tokens = vec![token.clone(), TokenRecord { name: "bomb".into(), ..token }];
        let report = RunReport {
            input_dir: "in".into(),
            output_dir: "out".into(),
            removed_files: 0,
            pages: vec![page, PageReport::missing(2, Path::new("page-2.png"))],
        };
        assert_eq!(report.total_tokens(), 2);
        assert_eq!(report.page(2).map(|p| p.status), Some(PageStatus::Missing));
        assert!(report.page(3).is_none());
    }
}
