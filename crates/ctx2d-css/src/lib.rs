//! ctx2d CSS
//!
//! CSS value resolution for the canvas 2D engine.
//! `<color>` tokens and the `font` shorthand are parsed with lightningcss
//! and reduced to the plain values the graphics state stores.

mod color;
mod font;

pub use color::{parse_color, Color};
pub use font::{parse_font, parse_font_family, FontDescriptor, DEFAULT_FONT_SIZE_PX};

/// CSS resolution error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CssError {
    #[error("Invalid color {input:?}: {message}")]
    InvalidColor { input: String, message: String },

    #[error("Invalid font {input:?}: {message}")]
    InvalidFont { input: String, message: String },
}
