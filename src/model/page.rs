//! Page-level types.

use serde::{Deserialize, Serialize};

/// One positioned run of text from a page's content stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// The text content
    pub text: String,

    /// X position (left edge of the run)
    pub x: f32,

    /// Y position (baseline)
    pub y: f32,

    /// Approximate font size in points (selected size scaled by the text
    /// matrix)
    pub font_size: f32,
}

impl TextFragment {
    /// Create a new fragment.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
        }
    }
}

/// A lightweight handle to a page within a loaded document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageHandle {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points
    pub width: f32,

    /// Page height in points
    pub height: f32,
}

/// Extracted text state for one page.
///
/// Created lazily on first access and cached for the lifetime of the
/// document handle; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Flattened text: fragments joined in content-stream order with
    /// whitespace runs collapsed and ends trimmed
    pub text: String,

    /// Positioned fragments in content-stream order
    pub fragments: Vec<TextFragment>,
}

impl PageInfo {
    /// Mean fragment font size, or `None` for a page with no fragments.
    pub fn average_font_size(&self) -> Option<f32> {
        if self.fragments.is_empty() {
            return None;
        }
        let sum: f32 = self.fragments.iter().map(|f| f.font_size).sum();
        Some(sum / self.fragments.len() as f32)
    }

    /// Check if the page holds no extracted text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_font_size() {
        let page = PageInfo {
            number: 1,
            width: 612.0,
            height: 792.0,
            text: "a b".to_string(),
            fragments: vec![
                TextFragment::new("a", 72.0, 700.0, 10.0),
                TextFragment::new("b", 90.0, 700.0, 14.0),
            ],
        };
        assert_eq!(page.average_font_size(), Some(12.0));
    }

    #[test]
    fn test_average_font_size_empty() {
        let page = PageInfo {
            number: 1,
            width: 612.0,
            height: 792.0,
            text: String::new(),
            fragments: vec![],
        };
        assert_eq!(page.average_font_size(), None);
        assert!(page.is_empty());
    }
}
