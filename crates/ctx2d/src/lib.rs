//! ctx2d
//!
//! Immediate-mode Canvas 2D context engine.
//!
//! Features:
//! - Path construction (lines, quadratic and cubic curves, arcs, rectangles)
//! - Transform and style state stack with save/restore
//! - CSS color and font shorthand resolution
//! - Lazy synchronization of graphics state with a pluggable [`Backend`]
//! - A recording backend for display lists and tests

pub mod backend;
pub mod config;
pub mod context2d;
pub mod path;
pub mod recording;
pub mod stack;
pub mod state;
pub mod style;
pub mod sync;
pub mod text;
pub mod transforms;

pub use backend::{Backend, BackendError, SyncedState, TextState};
pub use config::ContextConfig;
pub use context2d::CanvasRenderingContext2D;
pub use ctx2d_css::{Color, CssError};
pub use path::{ArcSegment, Path, PathSegment, Point, Polyline, Rect};
pub use recording::{BackendCall, RecordingBackend};
pub use stack::StateStack;
pub use state::{DrawMode, GraphicsState, LineCap, LineJoin};
pub use style::{
    CanvasGradient, CanvasPattern, ColorStop, GradientType, PatternRepetition, StyleKind, StyleValue,
};
pub use sync::{LazySync, SyncStats};
pub use text::TextMetrics;
pub use transforms::TransformMatrix;

/// Canvas error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CanvasError {
    #[error("Unsupported style: {0}")]
    UnsupportedStyle(StyleKind),

    #[error(transparent)]
    Backend(#[from] BackendError),
}
