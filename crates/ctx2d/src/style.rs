//! Style resolution
//!
//! Turns `fillStyle`/`strokeStyle` values and `font` shorthands into the
//! concrete fields of the graphics state.

use std::fmt;

use ctx2d_css::{parse_color, parse_font, parse_font_family, Color, CssError};

use crate::config::ContextConfig;

/// Value assignable to `fillStyle` / `strokeStyle`
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// CSS `<color>` token
    Color(String),
    Gradient(CanvasGradient),
    Pattern(CanvasPattern),
}

impl From<&str> for StyleValue {
    fn from(token: &str) -> Self {
        Self::Color(token.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(token: String) -> Self {
        Self::Color(token)
    }
}

impl From<CanvasGradient> for StyleValue {
    fn from(gradient: CanvasGradient) -> Self {
        Self::Gradient(gradient)
    }
}

impl From<CanvasPattern> for StyleValue {
    fn from(pattern: CanvasPattern) -> Self {
        Self::Pattern(pattern)
    }
}

/// Gradient
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasGradient {
    pub gradient_type: GradientType,
    pub stops: Vec<ColorStop>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientType {
    Linear { x0: f64, y0: f64, x1: f64, y1: f64 },
    Radial { x0: f64, y0: f64, r0: f64, x1: f64, y1: f64, r1: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Color,
}

impl CanvasGradient {
    pub fn new(gradient_type: GradientType) -> Self {
        Self {
            gradient_type,
            stops: Vec::new(),
        }
    }

    /// Add a stop; offsets outside `[0, 1]` and invalid colors are rejected
    pub fn add_color_stop(&mut self, offset: f64, color: &str) -> Result<(), CssError> {
        let color = parse_color(color)?;
        if !(0.0..=1.0).contains(&offset) {
            tracing::debug!("gradient stop offset {} out of range", offset);
            return Ok(());
        }
        self.stops.push(ColorStop { offset, color });
        Ok(())
    }
}

/// Pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanvasPattern {
    pub repetition: PatternRepetition,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PatternRepetition {
    #[default]
    Repeat,
    RepeatX,
    RepeatY,
    NoRepeat,
}

/// Style kind without a rasterizer implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Gradient,
    Pattern,
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gradient => f.write_str("gradient"),
            Self::Pattern => f.write_str("pattern"),
        }
    }
}

/// Resolve a color token; invalid tokens leave the current color alone.
pub(crate) fn resolve_color(token: &str) -> Option<Color> {
    match parse_color(token) {
        Ok(color) => Some(color),
        Err(e) => {
            tracing::debug!("ignoring style: {}", e);
            None
        }
    }
}

/// Font fields written into the graphics state
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedFont {
    pub size_px: f64,
    pub family: String,
}

/// Resolve a `font` shorthand.
///
/// A shorthand without a pixel size resolves to the fallback size. A
/// shorthand that does not parse at all is an [`CssError::InvalidFont`];
/// the returned font still carries the fallback size, and the family when
/// the input reads as a bare family list.
pub(crate) fn resolve_font(
    input: &str,
    config: &ContextConfig,
    current_family: &str,
) -> (ResolvedFont, Option<CssError>) {
    match parse_font(input) {
        Ok(descriptor) => {
            let font = ResolvedFont {
                size_px: descriptor.resolved_size_px(config.fallback_font_size_px),
                family: descriptor.family,
            };
            (font, None)
        }
        Err(e) => {
            let family = parse_font_family(input).unwrap_or_else(|_| current_family.to_string());
            let font = ResolvedFont {
                size_px: config.fallback_font_size_px,
                family,
            };
            (font, Some(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_color() {
        assert_eq!(resolve_color("red"), Some(Color::RED));
        assert_eq!(resolve_color("nonsense"), None);
    }

    #[test]
    fn test_resolve_font_pixel_size() {
        let (font, error) = resolve_font("16px sans-serif", &ContextConfig::default(), "serif");
        assert_eq!(font.size_px, 16.0);
        assert_eq!(font.family, "sans-serif");
        assert!(error.is_none());
    }

    #[test]
    fn test_resolve_font_family_only() {
        let (font, error) = resolve_font("monospace", &ContextConfig::default(), "serif");
        assert_eq!(font.size_px, 14.0);
        assert_eq!(font.family, "monospace");
        assert!(matches!(error, Some(CssError::InvalidFont { .. })));
    }

    #[test]
    fn test_resolve_font_garbage_keeps_family() {
        let (font, error) = resolve_font("16px", &ContextConfig::default(), "serif");
        assert_eq!(font.size_px, 14.0);
        assert_eq!(font.family, "serif");
        assert!(error.is_some());
    }

    #[test]
    fn test_gradient_stops() {
        let mut gradient = CanvasGradient::new(GradientType::Linear { x0: 0.0, y0: 0.0, x1: 1.0, y1: 0.0 });
        gradient.add_color_stop(0.0, "red").unwrap();
        gradient.add_color_stop(2.0, "blue").unwrap();
        assert!(gradient.add_color_stop(0.5, "nope").is_err());
        assert_eq!(gradient.stops.len(), 1);
    }
}
