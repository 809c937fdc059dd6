//! Graphics state
//!
//! One snapshot of transform and style. Each stack slot owns its state;
//! `save` copies it by value.

use std::str::FromStr;

use ctx2d_css::Color;

use crate::config::ContextConfig;
use crate::transforms::TransformMatrix;

/// Draw mode a backend is synchronized for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawMode {
    Fill,
    Stroke,
}

/// Line cap
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Line join
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineCap {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

impl FromStr for LineCap {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(Self::Butt),
            "round" => Ok(Self::Round),
            "square" => Ok(Self::Square),
            _ => Err(()),
        }
    }
}

impl LineJoin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

impl FromStr for LineJoin {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "miter" => Ok(Self::Miter),
            "round" => Ok(Self::Round),
            "bevel" => Ok(Self::Bevel),
            _ => Err(()),
        }
    }
}

/// Canvas state (for save/restore)
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsState {
    pub transform: TransformMatrix,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub line_width: f64,
    pub global_alpha: f64,
    pub font_size_px: f64,
    pub font_family: String,
    /// Last accepted `font` shorthand, as given
    pub font: String,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,
    pub line_dash: Vec<f64>,
    pub line_dash_offset: f64,
}

impl GraphicsState {
    /// Initial state for a fresh context
    pub fn new(config: &ContextConfig) -> Self {
        Self {
            transform: TransformMatrix::IDENTITY,
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            line_width: 1.0,
            global_alpha: 1.0,
            font_size_px: config.fallback_font_size_px,
            font_family: config.default_font_family.clone(),
            font: format!("{}px {}", config.fallback_font_size_px, config.default_font_family),
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            line_dash: Vec::new(),
            line_dash_offset: 0.0,
        }
    }

    /// Color used by draws in `mode`
    pub fn color_for(&self, mode: DrawMode) -> Color {
        match mode {
            DrawMode::Fill => self.fill_color,
            DrawMode::Stroke => self.stroke_color,
        }
    }
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self::new(&ContextConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = GraphicsState::default();
        assert!(state.transform.is_identity());
        assert_eq!(state.fill_color, Color::BLACK);
        assert_eq!(state.line_width, 1.0);
        assert_eq!(state.global_alpha, 1.0);
        assert_eq!(state.font_size_px, 14.0);
        assert_eq!(state.font, "14px sans-serif");
    }

    #[test]
    fn test_color_for_mode() {
        let mut state = GraphicsState::default();
        state.fill_color = Color::RED;
        assert_eq!(state.color_for(DrawMode::Fill), Color::RED);
        assert_eq!(state.color_for(DrawMode::Stroke), Color::BLACK);
    }

    #[test]
    fn test_line_style_keywords() {
        assert_eq!("round".parse::<LineCap>(), Ok(LineCap::Round));
        assert_eq!("bevel".parse::<LineJoin>(), Ok(LineJoin::Bevel));
        assert!("Round".parse::<LineCap>().is_err());
        assert_eq!(LineJoin::Miter.as_str(), "miter");
    }
}
