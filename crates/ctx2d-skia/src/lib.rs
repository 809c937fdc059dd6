//! ctx2d Skia - CPU rasterizer backend
//!
//! Implements the ctx2d [`Backend`](ctx2d::Backend) on a tiny-skia `Pixmap`.
//!
//! This crate provides:
//! - Path filling and stroking under the synchronized transform and paint
//! - Arc to cubic bezier conversion
//! - Rect fill, stroke and clear
//! - Placeholder text (one box per glyph; no shaping)
//! - PNG export

mod convert;
mod surface;

pub use convert::{to_skia_path, to_skia_transform};
pub use surface::SkiaSurface;

use ctx2d::Color;

/// Rasterizer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    /// Anti-alias paths and rects
    pub anti_alias: bool,

    /// Color a freshly allocated surface is filled with
    pub background: Color,

    /// Advance of one character, in ems
    pub glyph_advance_em: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            anti_alias: true,
            background: Color::TRANSPARENT,
            glyph_advance_em: 0.55,
        }
    }
}

/// Surface error
#[derive(Debug, thiserror::Error)]
pub enum SkiaError {
    #[error("No surface allocated")]
    NoSurface,

    #[error("PNG encoding failed: {0}")]
    Png(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
