//! Font shorthand expansion
//!
//! Splits a CSS `font` shorthand into its longhands with lightningcss.
//! Only a pixel `font-size` is resolved to a number; anything else is left
//! for the caller to replace with its default size.

use lightningcss::properties::font::{FontFamily, FontSize};
use lightningcss::properties::{Property, PropertyId};
use lightningcss::stylesheet::{ParserOptions, PrinterOptions};
use lightningcss::traits::ToCss;
use lightningcss::values::length::{LengthPercentage, LengthValue};

use crate::CssError;

/// Size used when the shorthand carries no pixel size
pub const DEFAULT_FONT_SIZE_PX: f64 = 14.0;

/// Longhand components of a `font` shorthand
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    pub style: String,
    pub variant: String,
    pub weight: String,
    pub stretch: String,
    /// Serialized `font-size`
    pub size: String,
    /// `font-size` in pixels, when expressed in `px`
    pub size_px: Option<f64>,
    pub line_height: String,
    pub family: String,
}

impl FontDescriptor {
    /// Pixel size, or `fallback` when the size is not in `px`
    pub fn resolved_size_px(&self, fallback: f64) -> f64 {
        self.size_px.unwrap_or(fallback)
    }
}

/// Expand a `font` shorthand such as `italic bold 16px/2 "Fira Sans", serif`.
pub fn parse_font(input: &str) -> Result<FontDescriptor, CssError> {
    let property = Property::parse_string(PropertyId::Font, input.trim(), ParserOptions::default())
        .map_err(|e| invalid_font(input, format!("{:?}", e)))?;

    match property {
        Property::Font(font) => {
            let size_px = size_in_px(&font.size);
            Ok(FontDescriptor {
                style: serialize(&font.style),
                variant: serialize(&font.variant_caps),
                weight: serialize(&font.weight),
                stretch: serialize(&font.stretch),
                size: serialize(&font.size),
                size_px,
                line_height: serialize(&font.line_height),
                family: serialize_families(&font.family),
            })
        }
        _ => Err(invalid_font(input, "not a font shorthand".to_string())),
    }
}

/// Parse a bare `font-family` list, e.g. `sans-serif` or `Arial, serif`.
pub fn parse_font_family(input: &str) -> Result<String, CssError> {
    let property = Property::parse_string(PropertyId::FontFamily, input.trim(), ParserOptions::default())
        .map_err(|e| invalid_font(input, format!("{:?}", e)))?;

    match property {
        Property::FontFamily(families) if !families.is_empty() => Ok(serialize_families(&families)),
        _ => Err(invalid_font(input, "not a font family list".to_string())),
    }
}

fn size_in_px(size: &FontSize) -> Option<f64> {
    match size {
        FontSize::Length(LengthPercentage::Dimension(LengthValue::Px(px))) => Some(f64::from(*px)),
        _ => None,
    }
}

fn serialize<T: ToCss>(value: &T) -> String {
    value.to_css_string(PrinterOptions::default()).unwrap_or_default()
}

fn serialize_families(families: &[FontFamily]) -> String {
    families.iter().map(serialize).collect::<Vec<_>>().join(", ")
}

fn invalid_font(input: &str, message: String) -> CssError {
    CssError::InvalidFont {
        input: input.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_and_family() {
        let font = parse_font("16px sans-serif").unwrap();
        assert_eq!(font.size_px, Some(16.0));
        assert_eq!(font.family, "sans-serif");
        assert_eq!(font.resolved_size_px(DEFAULT_FONT_SIZE_PX), 16.0);
    }

    #[test]
    fn test_full_shorthand() {
        let font = parse_font("italic bold 20px/30px Georgia, serif").unwrap();
        assert_eq!(font.style, "italic");
        assert_eq!(font.weight, "bold");
        assert_eq!(font.size_px, Some(20.0));
        assert_eq!(font.line_height, "30px");
        assert!(font.family.contains("Georgia"));
        assert!(font.family.ends_with("serif"));
    }

    #[test]
    fn test_non_pixel_size_falls_back() {
        let font = parse_font("2em serif").unwrap();
        assert_eq!(font.size_px, None);
        assert_eq!(font.resolved_size_px(DEFAULT_FONT_SIZE_PX), DEFAULT_FONT_SIZE_PX);
    }

    #[test]
    fn test_missing_size_is_invalid() {
        assert!(matches!(parse_font("sans-serif"), Err(CssError::InvalidFont { .. })));
        assert!(parse_font("").is_err());
    }

    #[test]
    fn test_family_only() {
        assert_eq!(parse_font_family("sans-serif").unwrap(), "sans-serif");
        assert!(parse_font_family("").is_err());
    }
}
