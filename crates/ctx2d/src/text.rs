//! Text Drawing
//!
//! Canvas 2D text metrics.

/// Text metrics
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width in user-space units
    pub width: f64,
}
