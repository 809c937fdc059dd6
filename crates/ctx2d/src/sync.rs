//! Lazy state synchronization
//!
//! Mutators only mark the sync dirty. Rasterizing calls go through
//! [`LazySync::ensure_state`], which pushes the active state to the backend
//! when it is dirty or when the draw mode differs from the one last pushed.

use crate::backend::{Backend, SyncedState, TextState};
use crate::state::{DrawMode, GraphicsState};

/// Sync statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Full state pushes
    pub pushes: u64,
    /// `ensure_state` calls that found the backend up to date
    pub skipped: u64,
    /// Text-only pushes
    pub text_pushes: u64,
}

#[derive(Debug, Clone)]
pub struct LazySync {
    dirty: bool,
    text_dirty: bool,
    last_mode: Option<DrawMode>,
    stats: SyncStats,
}

impl LazySync {
    /// Nothing pushed yet: the first draw of any mode syncs
    pub fn new() -> Self {
        Self {
            dirty: false,
            text_dirty: true,
            last_mode: None,
            stats: SyncStats::default(),
        }
    }

    /// Record that the active state no longer matches the backend
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.text_dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mode the backend was last synchronized for
    pub fn last_mode(&self) -> Option<DrawMode> {
        self.last_mode
    }

    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    /// Forget everything pushed so far (surface was reallocated)
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Push `state` for `mode` unless the backend already reflects it
    pub(crate) fn ensure_state<B: Backend + ?Sized>(
        &mut self,
        state: &GraphicsState,
        backend: &mut B,
        mode: DrawMode,
    ) {
        if self.dirty || self.last_mode != Some(mode) {
            tracing::trace!("sync state for {:?}", mode);
            backend.apply_state(&SyncedState::capture(state, mode));
            self.dirty = false;
            self.text_dirty = false;
            self.last_mode = Some(mode);
            self.stats.pushes += 1;
        } else {
            self.stats.skipped += 1;
        }
    }

    /// Push transform and font only; leaves the mode-dependent sync alone
    pub(crate) fn ensure_text_state<B: Backend + ?Sized>(&mut self, state: &GraphicsState, backend: &mut B) {
        if self.text_dirty {
            tracing::trace!("sync text state");
            backend.apply_text_state(&TextState::capture(state));
            self.text_dirty = false;
            self.stats.text_pushes += 1;
        }
    }
}

impl Default for LazySync {
    fn default() -> Self {
        Self::new()
    }
}
