//! CSS color parsing using lightningcss
//!
//! Named colors, `#rgb`/`#rrggbb`, `rgb()`/`rgba()` and the other notations
//! lightningcss understands are reduced to 8-bit sRGB with alpha.

use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;

use crate::CssError;

/// Color (RGBA)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Alpha channel in `0.0..=1.0`
    pub fn alpha(&self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// Serialize the way canvas style getters report a color:
    /// `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
    pub fn to_css_string(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, serialize_alpha(self.a))
        }
    }
}

/// Shortest decimal alpha that maps back onto the same 8-bit value.
fn serialize_alpha(a: u8) -> f64 {
    let exact = f64::from(a) / 255.0;
    let two_places = (exact * 100.0).round() / 100.0;
    if (two_places * 255.0).round() as u8 == a {
        two_places
    } else {
        (exact * 1000.0).round() / 1000.0
    }
}

/// Parse a CSS `<color>` token.
pub fn parse_color(input: &str) -> Result<Color, CssError> {
    let token = input.trim();
    let parsed = CssColor::parse_string(token).map_err(|e| CssError::InvalidColor {
        input: input.to_string(),
        message: format!("{:?}", e),
    })?;

    convert_color(&parsed).ok_or_else(|| CssError::InvalidColor {
        input: input.to_string(),
        message: "color has no sRGB representation".to_string(),
    })
}

fn convert_color(color: &CssColor) -> Option<Color> {
    match color {
        CssColor::RGBA(rgba) => Some(Color::rgba(rgba.red, rgba.green, rgba.blue, rgba.alpha)),
        // A canvas has no inherited `color`, so currentColor is the initial black
        CssColor::CurrentColor => Some(Color::BLACK),
        other => match other.to_rgb() {
            Ok(CssColor::RGBA(rgba)) => Some(Color::rgba(rgba.red, rgba.green, rgba.blue, rgba.alpha)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_color("red").unwrap(), Color::RED);
        assert_eq!(parse_color("white").unwrap(), Color::WHITE);
        assert_eq!(parse_color("transparent").unwrap(), Color::TRANSPARENT);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(parse_color("#ff0000").unwrap(), Color::RED);
        assert_eq!(parse_color("#0f0").unwrap(), Color::rgb(0, 255, 0));
        assert_eq!(parse_color("  #336699 ").unwrap(), Color::rgb(0x33, 0x66, 0x99));
    }

    #[test]
    fn test_functional_colors() {
        assert_eq!(parse_color("rgb(0, 0, 255)").unwrap(), Color::rgb(0, 0, 255));
        let half = parse_color("rgba(255, 0, 0, 0.5)").unwrap();
        assert_eq!((half.r, half.g, half.b), (255, 0, 0));
        assert!((half.alpha() - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_current_color_is_black() {
        assert_eq!(parse_color("currentcolor").unwrap(), Color::BLACK);
    }

    #[test]
    fn test_invalid_colors() {
        assert!(parse_color("").is_err());
        assert!(parse_color("not-a-color").is_err());
        assert!(parse_color("#12345").is_err());
    }

    #[test]
    fn test_serialization() {
        assert_eq!(Color::RED.to_css_string(), "#ff0000");
        assert_eq!(Color::rgba(255, 0, 0, 128).to_css_string(), "rgba(255, 0, 0, 0.5)");
        assert_eq!(Color::TRANSPARENT.to_css_string(), "rgba(0, 0, 0, 0)");
    }
}
