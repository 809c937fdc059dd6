//! Recording backend
//!
//! A display-list backend: every call is kept in order so it can be
//! inspected or replayed onto another backend later.

use crate::backend::{Backend, BackendError, SyncedState, TextState};
use crate::path::{Path, Rect};

/// Advance of one character, in ems
const ADVANCE_EM: f64 = 0.5;

/// Recorded backend call
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    AllocateSurface { width: u32, height: u32 },
    ApplyState(SyncedState),
    ApplyTextState(TextState),
    FillPath(Path),
    StrokePath(Path),
    FillRect(Rect),
    StrokeRect(Rect),
    ClearRect(Rect),
    DrawText { text: String, x: f64, y: f64 },
    MeasureAdvance(String),
}

impl BackendCall {
    /// Whether the call touches pixels
    pub fn is_rasterizing(&self) -> bool {
        matches!(
            self,
            Self::FillPath(_)
                | Self::StrokePath(_)
                | Self::FillRect(_)
                | Self::StrokeRect(_)
                | Self::ClearRect(_)
                | Self::DrawText { .. }
        )
    }
}

#[derive(Debug, Clone)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    font_size_px: f64,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            font_size_px: crate::ContextConfig::default().fallback_font_size_px,
        }
    }

    /// Calls in the order they were made
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the list empty
    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn apply_state_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, BackendCall::ApplyState(_)))
            .count()
    }

    pub fn rasterize_count(&self) -> usize {
        self.calls.iter().filter(|call| call.is_rasterizing()).count()
    }

    /// Replay the recorded calls onto another backend
    pub fn replay<B: Backend + ?Sized>(&self, target: &mut B) -> Result<(), BackendError> {
        for call in &self.calls {
            match call {
                BackendCall::AllocateSurface { width, height } => target.allocate_surface(*width, *height)?,
                BackendCall::ApplyState(state) => target.apply_state(state),
                BackendCall::ApplyTextState(state) => target.apply_text_state(state),
                BackendCall::FillPath(path) => target.fill_path(path),
                BackendCall::StrokePath(path) => target.stroke_path(path),
                BackendCall::FillRect(rect) => target.fill_rect(*rect),
                BackendCall::StrokeRect(rect) => target.stroke_rect(*rect),
                BackendCall::ClearRect(rect) => target.clear_rect(*rect),
                BackendCall::DrawText { text, x, y } => target.draw_text(text, *x, *y),
                BackendCall::MeasureAdvance(text) => {
                    target.measure_advance(text);
                }
            }
        }
        Ok(())
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for RecordingBackend {
    fn allocate_surface(&mut self, width: u32, height: u32) -> Result<(), BackendError> {
        self.calls.push(BackendCall::AllocateSurface { width, height });
        Ok(())
    }

    fn apply_state(&mut self, state: &SyncedState) {
        self.font_size_px = state.font_size_px;
        self.calls.push(BackendCall::ApplyState(state.clone()));
    }

    fn apply_text_state(&mut self, state: &TextState) {
        self.font_size_px = state.font_size_px;
        self.calls.push(BackendCall::ApplyTextState(state.clone()));
    }

    fn fill_path(&mut self, path: &Path) {
        self.calls.push(BackendCall::FillPath(path.clone()));
    }

    fn stroke_path(&mut self, path: &Path) {
        self.calls.push(BackendCall::StrokePath(path.clone()));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.calls.push(BackendCall::FillRect(rect));
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.calls.push(BackendCall::StrokeRect(rect));
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.calls.push(BackendCall::ClearRect(rect));
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64) {
        self.calls.push(BackendCall::DrawText {
            text: text.to_string(),
            x,
            y,
        });
    }

    fn measure_advance(&mut self, text: &str) -> f64 {
        self.calls.push(BackendCall::MeasureAdvance(text.to_string()));
        text.chars().count() as f64 * self.font_size_px * ADVANCE_EM
    }
}
