//! Extracted page content

use serde::{Deserialize, Serialize};

/// One PDF page's extracted content, produced once during preprocessing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    /// 1-based page number, unique within a document
    pub page: u32,

    /// Raw extracted text
    #[serde(default)]
    pub text: String,

    /// OCR text, when OCR was run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ocr: Option<String>,

    /// Rendered page image (opaque to the miner)
    #[serde(default)]
    pub image_path: String,

    /// Rendered image width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Rendered image height in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl PageContext {
    /// Create a page context from text alone
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
            ocr: None,
            image_path: String::new(),
            width: None,
            height: None,
        }
    }
}
