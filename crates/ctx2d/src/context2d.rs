//! Canvas 2D Rendering Context
//!
//! CanvasRenderingContext2D implementation. Composes the current path, the
//! state stack and the lazy sync, and drives a [`Backend`].

use crate::backend::Backend;
use crate::config::ContextConfig;
use crate::path::{Path, Rect};
use crate::stack::StateStack;
use crate::state::{DrawMode, GraphicsState, LineCap, LineJoin};
use crate::style::{resolve_color, resolve_font, CanvasGradient, GradientType, StyleKind, StyleValue};
use crate::sync::{LazySync, SyncStats};
use crate::text::TextMetrics;
use crate::transforms::TransformMatrix;
use crate::CanvasError;

/// Canvas 2D rendering context
///
/// All calls must be serialized by the owner; `resize` in particular
/// discards the surface, the path and every saved state.
#[derive(Debug)]
pub struct CanvasRenderingContext2D<B: Backend> {
    /// Canvas width
    width: u32,
    /// Canvas height
    height: u32,
    backend: B,
    /// Current path
    path: Path,
    /// State stack
    stack: StateStack,
    sync: LazySync,
    config: ContextConfig,
}

impl<B: Backend> CanvasRenderingContext2D<B> {
    /// Create a new 2D context with the default configuration
    pub fn new(backend: B, width: u32, height: u32) -> Result<Self, CanvasError> {
        Self::with_config(backend, width, height, ContextConfig::default())
    }

    /// Create a new 2D context
    pub fn with_config(
        mut backend: B,
        width: u32,
        height: u32,
        config: ContextConfig,
    ) -> Result<Self, CanvasError> {
        tracing::info!("Allocating {}x{} canvas surface", width, height);
        backend.allocate_surface(width, height)?;

        Ok(Self {
            width,
            height,
            backend,
            path: Path::new(),
            stack: StateStack::new(GraphicsState::new(&config)),
            sync: LazySync::new(),
            config,
        })
    }

    /// Get canvas width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get canvas height
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    /// Resize the surface.
    ///
    /// No-op when the size is unchanged. Otherwise the surface is
    /// reallocated, the path discarded and the state stack reset to a
    /// fresh default state.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), CanvasError> {
        if width == self.width && height == self.height {
            return Ok(());
        }

        tracing::info!("Resizing canvas {}x{} -> {}x{}", self.width, self.height, width, height);
        if let Err(e) = self.backend.allocate_surface(width, height) {
            // The backend state can no longer be trusted
            self.sync.mark_dirty();
            return Err(e.into());
        }
        self.width = width;
        self.height = height;
        self.path.begin();
        self.stack.reset(GraphicsState::new(&self.config));
        self.sync.reset();
        Ok(())
    }

    // State management

    /// Current state
    pub fn state(&self) -> &GraphicsState {
        self.stack.top()
    }

    /// Number of states on the stack, including the permanent default
    pub fn state_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Save current state
    pub fn save(&mut self) {
        tracing::trace!("save");
        self.stack.save();
    }

    /// Restore previous state; a no-op on the permanent default state
    pub fn restore(&mut self) {
        tracing::trace!("restore");
        if self.stack.restore() {
            self.sync.mark_dirty();
        } else {
            tracing::debug!("restore without a saved state ignored");
        }
    }

    pub fn is_state_dirty(&self) -> bool {
        self.sync.is_dirty()
    }

    pub fn sync_stats(&self) -> SyncStats {
        self.sync.stats()
    }

    // Transforms

    pub fn scale(&mut self, x: f64, y: f64) {
        tracing::trace!("scale");
        self.concat(TransformMatrix::scaling(x, y));
    }

    pub fn rotate(&mut self, angle: f64) {
        tracing::trace!("rotate");
        self.concat(TransformMatrix::rotation(angle));
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        tracing::trace!("translate");
        self.concat(TransformMatrix::translation(x, y));
    }

    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        tracing::trace!("transform");
        self.concat(TransformMatrix::from_canvas_args(a, b, c, d, e, f));
    }

    /// Replace the CTM outright
    pub fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        tracing::trace!("setTransform");
        let Some(matrix) = TransformMatrix::from_canvas_args(a, b, c, d, e, f) else {
            tracing::debug!("ignoring non-finite setTransform");
            return;
        };
        self.stack.top_mut().transform = matrix;
        self.sync.mark_dirty();
    }

    pub fn reset_transform(&mut self) {
        tracing::trace!("resetTransform");
        self.stack.top_mut().transform = TransformMatrix::IDENTITY;
        self.sync.mark_dirty();
    }

    pub fn get_transform(&self) -> TransformMatrix {
        self.stack.top().transform
    }

    fn concat(&mut self, incoming: Option<TransformMatrix>) {
        let Some(incoming) = incoming else {
            tracing::debug!("ignoring non-finite transform");
            return;
        };
        let state = self.stack.top_mut();
        state.transform = state.transform.compose(&incoming);
        self.sync.mark_dirty();
    }

    // Compositing and line styles

    pub fn global_alpha(&self) -> f64 {
        self.stack.top().global_alpha
    }

    pub fn set_global_alpha(&mut self, alpha: f64) {
        tracing::trace!("globalAlpha set");
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            tracing::debug!("ignoring globalAlpha {}", alpha);
            return;
        }
        self.stack.top_mut().global_alpha = alpha;
        self.sync.mark_dirty();
    }

    pub fn line_width(&self) -> f64 {
        self.stack.top().line_width
    }

    pub fn set_line_width(&mut self, width: f64) {
        tracing::trace!("lineWidth set");
        if !width.is_finite() || width <= 0.0 {
            tracing::debug!("ignoring lineWidth {}", width);
            return;
        }
        self.stack.top_mut().line_width = width;
        self.sync.mark_dirty();
    }

    pub fn line_cap(&self) -> LineCap {
        self.stack.top().line_cap
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        tracing::trace!("lineCap = {}", cap.as_str());
        self.stack.top_mut().line_cap = cap;
        self.sync.mark_dirty();
    }

    /// Assign `lineCap` by keyword; unknown keywords are ignored
    pub fn set_line_cap_keyword(&mut self, keyword: &str) {
        match keyword.parse::<LineCap>() {
            Ok(cap) => self.set_line_cap(cap),
            Err(()) => tracing::debug!("ignoring lineCap {:?}", keyword),
        }
    }

    pub fn line_join(&self) -> LineJoin {
        self.stack.top().line_join
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        tracing::trace!("lineJoin = {}", join.as_str());
        self.stack.top_mut().line_join = join;
        self.sync.mark_dirty();
    }

    /// Assign `lineJoin` by keyword; unknown keywords are ignored
    pub fn set_line_join_keyword(&mut self, keyword: &str) {
        match keyword.parse::<LineJoin>() {
            Ok(join) => self.set_line_join(join),
            Err(()) => tracing::debug!("ignoring lineJoin {:?}", keyword),
        }
    }

    pub fn miter_limit(&self) -> f64 {
        self.stack.top().miter_limit
    }

    pub fn set_miter_limit(&mut self, limit: f64) {
        tracing::trace!("miterLimit set");
        if !limit.is_finite() || limit <= 0.0 {
            tracing::debug!("ignoring miterLimit {}", limit);
            return;
        }
        self.stack.top_mut().miter_limit = limit;
        self.sync.mark_dirty();
    }

    /// Set the dash list; an odd-length list is repeated to make it even
    pub fn set_line_dash(&mut self, segments: &[f64]) {
        tracing::trace!("setLineDash");
        if segments.iter().any(|s| !s.is_finite() || *s < 0.0) {
            tracing::debug!("ignoring line dash {:?}", segments);
            return;
        }
        let mut dash = segments.to_vec();
        if dash.len() % 2 == 1 {
            dash.extend_from_slice(segments);
        }
        self.stack.top_mut().line_dash = dash;
        self.sync.mark_dirty();
    }

    pub fn get_line_dash(&self) -> &[f64] {
        &self.stack.top().line_dash
    }

    pub fn line_dash_offset(&self) -> f64 {
        self.stack.top().line_dash_offset
    }

    pub fn set_line_dash_offset(&mut self, offset: f64) {
        tracing::trace!("lineDashOffset set");
        if !offset.is_finite() {
            return;
        }
        self.stack.top_mut().line_dash_offset = offset;
        self.sync.mark_dirty();
    }

    // Fill and stroke styles

    /// Serialized fill color
    pub fn fill_style(&self) -> String {
        self.stack.top().fill_color.to_css_string()
    }

    /// Assign `fillStyle`. Unparsable colors are ignored; gradients and
    /// patterns are rejected with [`CanvasError::UnsupportedStyle`].
    pub fn set_fill_style(&mut self, value: impl Into<StyleValue>) -> Result<(), CanvasError> {
        tracing::trace!("fillStyle set");
        self.set_style(value.into(), DrawMode::Fill)
    }

    /// Serialized stroke color
    pub fn stroke_style(&self) -> String {
        self.stack.top().stroke_color.to_css_string()
    }

    /// Assign `strokeStyle`, same rules as [`Self::set_fill_style`]
    pub fn set_stroke_style(&mut self, value: impl Into<StyleValue>) -> Result<(), CanvasError> {
        tracing::trace!("strokeStyle set");
        self.set_style(value.into(), DrawMode::Stroke)
    }

    fn set_style(&mut self, value: StyleValue, mode: DrawMode) -> Result<(), CanvasError> {
        match value {
            StyleValue::Color(token) => {
                if let Some(color) = resolve_color(&token) {
                    let state = self.stack.top_mut();
                    match mode {
                        DrawMode::Fill => state.fill_color = color,
                        DrawMode::Stroke => state.stroke_color = color,
                    }
                    self.sync.mark_dirty();
                }
                Ok(())
            }
            StyleValue::Gradient(_) => Err(CanvasError::UnsupportedStyle(StyleKind::Gradient)),
            StyleValue::Pattern(_) => Err(CanvasError::UnsupportedStyle(StyleKind::Pattern)),
        }
    }

    pub fn create_linear_gradient(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> CanvasGradient {
        tracing::trace!("createLinearGradient");
        CanvasGradient::new(GradientType::Linear { x0, y0, x1, y1 })
    }

    pub fn create_radial_gradient(&self, x0: f64, y0: f64, r0: f64, x1: f64, y1: f64, r1: f64) -> CanvasGradient {
        tracing::trace!("createRadialGradient");
        CanvasGradient::new(GradientType::Radial { x0, y0, r0, x1, y1, r1 })
    }

    // Text

    /// Last accepted `font` shorthand, or the fallback it resolved to
    pub fn font(&self) -> &str {
        &self.stack.top().font
    }

    /// Assign the `font` shorthand.
    ///
    /// Sizes not given in `px`, and shorthands that do not parse, fall back
    /// to the configured default size.
    pub fn set_font(&mut self, font: &str) {
        tracing::trace!("font set");
        let current_family = self.stack.top().font_family.clone();
        let (resolved, error) = resolve_font(font, &self.config, &current_family);
        let shorthand = match error {
            None => font.trim().to_string(),
            Some(e) => {
                tracing::debug!("font falls back to {}px: {}", resolved.size_px, e);
                format!("{}px {}", resolved.size_px, resolved.family)
            }
        };

        let state = self.stack.top_mut();
        state.font_size_px = resolved.size_px;
        state.font_family = resolved.family;
        state.font = shorthand;
        self.sync.mark_dirty();
    }

    pub fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        tracing::trace!("fillText");
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.sync.ensure_state(self.stack.top(), &mut self.backend, DrawMode::Fill);
        self.backend.draw_text(text, x, y);
    }

    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        tracing::trace!("measureText");
        self.sync.ensure_text_state(self.stack.top(), &mut self.backend);
        TextMetrics {
            width: self.backend.measure_advance(text),
        }
    }

    // Path methods

    /// Begin a new path
    pub fn begin_path(&mut self) {
        tracing::trace!("beginPath");
        self.path.begin();
    }

    /// Close the current path
    pub fn close_path(&mut self) {
        tracing::trace!("closePath");
        self.path.close_path();
    }

    /// Move to point
    pub fn move_to(&mut self, x: f64, y: f64) {
        tracing::trace!("moveTo");
        self.path.move_to(x, y);
    }

    /// Line to point
    pub fn line_to(&mut self, x: f64, y: f64) {
        tracing::trace!("lineTo");
        self.path.line_to(x, y);
    }

    pub fn quadratic_curve_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        tracing::trace!("quadraticCurveTo");
        self.path.quadratic_curve_to(cpx, cpy, x, y);
    }

    pub fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        tracing::trace!("bezierCurveTo");
        self.path.bezier_curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        tracing::trace!("rect");
        self.path.rect(x, y, width, height);
    }

    pub fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64, anticlockwise: bool) {
        tracing::trace!("arc");
        self.path.arc(x, y, radius, start_angle, end_angle, anticlockwise);
    }

    #[allow(clippy::too_many_arguments)]
    pub fn ellipse(
        &mut self,
        x: f64,
        y: f64,
        radius_x: f64,
        radius_y: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        anticlockwise: bool,
    ) {
        tracing::trace!("ellipse");
        self.path.ellipse(x, y, radius_x, radius_y, rotation, start_angle, end_angle, anticlockwise);
    }

    /// Current path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fill the current path
    pub fn fill(&mut self) {
        tracing::trace!("fill");
        if !self.path.is_drawable() {
            return;
        }
        self.sync.ensure_state(self.stack.top(), &mut self.backend, DrawMode::Fill);
        self.backend.fill_path(&self.path);
    }

    /// Stroke the current path
    pub fn stroke(&mut self) {
        tracing::trace!("stroke");
        if !self.path.is_drawable() {
            return;
        }
        self.sync.ensure_state(self.stack.top(), &mut self.backend, DrawMode::Stroke);
        self.backend.stroke_path(&self.path);
    }

    /// Whether the device-space point lies inside the current path
    /// (non-zero winding, current CTM)
    pub fn is_point_in_path(&self, x: f64, y: f64) -> bool {
        tracing::trace!("isPointInPath");
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let Some(inverse) = self.stack.top().transform.inverse() else {
            return false;
        };
        let (ux, uy) = inverse.map_point(x, y);
        self.path.contains_point(ux, uy)
    }

    // Drawing rectangles

    /// Fill a rectangle
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        tracing::trace!("fillRect");
        let Some(rect) = finite_rect(x, y, width, height) else {
            return;
        };
        self.sync.ensure_state(self.stack.top(), &mut self.backend, DrawMode::Fill);
        self.backend.fill_rect(rect);
    }

    /// Stroke a rectangle
    pub fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        tracing::trace!("strokeRect {} {} {} {}", x, y, width, height);
        let Some(rect) = finite_rect(x, y, width, height) else {
            return;
        };
        self.sync.ensure_state(self.stack.top(), &mut self.backend, DrawMode::Stroke);
        self.backend.stroke_rect(rect);
    }

    /// Clear a rectangle
    pub fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        tracing::trace!("clearRect {} {} {} {}", x, y, width, height);
        let Some(rect) = finite_rect(x, y, width, height) else {
            return;
        };
        self.sync.ensure_state(self.stack.top(), &mut self.backend, DrawMode::Fill);
        self.backend.clear_rect(rect);
    }
}

fn finite_rect(x: f64, y: f64, width: f64, height: f64) -> Option<Rect> {
    if [x, y, width, height].iter().all(|v| v.is_finite()) {
        Some(Rect::new(x, y, width, height))
    } else {
        None
    }
}
