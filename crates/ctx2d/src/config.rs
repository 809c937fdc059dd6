//! Context Configuration

use ctx2d_css::DEFAULT_FONT_SIZE_PX;

/// Context configuration options
#[derive(Debug, Clone, PartialEq)]
pub struct ContextConfig {
    /// Font size for the initial state and for fonts without a pixel size
    pub fallback_font_size_px: f64,

    /// Family for the initial state and for unparsable fonts
    pub default_font_family: String,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            fallback_font_size_px: DEFAULT_FONT_SIZE_PX,
            default_font_family: "sans-serif".to_string(),
        }
    }
}
