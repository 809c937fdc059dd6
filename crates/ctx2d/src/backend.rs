//! Backend drawing surface
//!
//! The rasterizer a context drives. State reaches it only through
//! `apply_state`/`apply_text_state`, which the context calls from its lazy
//! sync step; draw calls then use whatever was applied last.

use ctx2d_css::Color;

use crate::path::{Path, Rect};
use crate::state::{DrawMode, GraphicsState, LineCap, LineJoin};
use crate::transforms::TransformMatrix;

/// State pushed to the backend before a rasterizing call
#[derive(Debug, Clone, PartialEq)]
pub struct SyncedState {
    pub transform: TransformMatrix,
    /// Fill or stroke color, depending on `mode`
    pub color: Color,
    pub line_width: f64,
    pub global_alpha: f64,
    pub mode: DrawMode,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,
    pub line_dash: Vec<f64>,
    pub line_dash_offset: f64,
    pub font_size_px: f64,
    pub font_family: String,
}

impl SyncedState {
    pub fn capture(state: &GraphicsState, mode: DrawMode) -> Self {
        Self {
            transform: state.transform,
            color: state.color_for(mode),
            line_width: state.line_width,
            global_alpha: state.global_alpha,
            mode,
            line_cap: state.line_cap,
            line_join: state.line_join,
            miter_limit: state.miter_limit,
            line_dash: state.line_dash.clone(),
            line_dash_offset: state.line_dash_offset,
            font_size_px: state.font_size_px,
            font_family: state.font_family.clone(),
        }
    }
}

/// Mode-agnostic subset used for text measurement
#[derive(Debug, Clone, PartialEq)]
pub struct TextState {
    pub transform: TransformMatrix,
    pub font_size_px: f64,
    pub font_family: String,
}

impl TextState {
    pub fn capture(state: &GraphicsState) -> Self {
        Self {
            transform: state.transform,
            font_size_px: state.font_size_px,
            font_family: state.font_family.clone(),
        }
    }
}

/// Backend error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("Failed to allocate {width}x{height} surface")]
    SurfaceAllocation { width: u32, height: u32 },
}

/// Drawing surface driven by a canvas context
pub trait Backend {
    /// (Re)allocate the surface, discarding its contents
    fn allocate_surface(&mut self, width: u32, height: u32) -> Result<(), BackendError>;

    /// Synchronize state for subsequent draws
    fn apply_state(&mut self, state: &SyncedState);

    /// Synchronize transform and font for text measurement
    fn apply_text_state(&mut self, state: &TextState);

    /// Fill `path` (user space) under the applied state
    fn fill_path(&mut self, path: &Path);

    /// Stroke `path` (user space) under the applied state
    fn stroke_path(&mut self, path: &Path);

    fn fill_rect(&mut self, rect: Rect);

    fn stroke_rect(&mut self, rect: Rect);

    /// Reset the covered pixels to transparent black
    fn clear_rect(&mut self, rect: Rect);

    fn draw_text(&mut self, text: &str, x: f64, y: f64);

    /// Advance width of `text` in user-space units
    fn measure_advance(&mut self, text: &str) -> f64;
}
