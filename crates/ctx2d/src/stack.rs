//! State stack
//!
//! Save/restore discipline over [`GraphicsState`]. The bottom entry is the
//! permanent default state and is never popped.

use crate::state::GraphicsState;

#[derive(Debug, Clone)]
pub struct StateStack {
    current: GraphicsState,
    saved: Vec<GraphicsState>,
}

impl StateStack {
    pub fn new(base: GraphicsState) -> Self {
        Self {
            current: base,
            saved: Vec::new(),
        }
    }

    /// Active state
    pub fn top(&self) -> &GraphicsState {
        &self.current
    }

    /// Mutable active state
    pub fn top_mut(&mut self) -> &mut GraphicsState {
        &mut self.current
    }

    /// Push a copy of the active state
    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    /// Pop back to the last saved state.
    ///
    /// Returns `false` when only the permanent default remains.
    pub fn restore(&mut self) -> bool {
        match self.saved.pop() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    /// Number of entries, including the permanent default
    pub fn depth(&self) -> usize {
        self.saved.len() + 1
    }

    /// Drop every entry and start over from `base`
    pub fn reset(&mut self, base: GraphicsState) {
        self.saved.clear();
        self.current = base;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_restore() {
        let mut stack = StateStack::new(GraphicsState::default());
        stack.top_mut().global_alpha = 0.5;
        stack.save();
        stack.top_mut().global_alpha = 0.3;
        assert_eq!(stack.top().global_alpha, 0.3);
        assert_eq!(stack.depth(), 2);

        assert!(stack.restore());
        assert_eq!(stack.top().global_alpha, 0.5);
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_restore_underflow_is_noop() {
        let mut stack = StateStack::new(GraphicsState::default());
        stack.top_mut().line_width = 3.0;
        assert!(!stack.restore());
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top().line_width, 3.0);
    }

    #[test]
    fn test_saved_snapshot_is_independent() {
        let mut stack = StateStack::new(GraphicsState::default());
        stack.save();
        stack.top_mut().line_dash.push(4.0);
        stack.restore();
        assert!(stack.top().line_dash.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut stack = StateStack::new(GraphicsState::default());
        stack.save();
        stack.save();
        stack.top_mut().line_width = 7.0;
        stack.reset(GraphicsState::default());
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top().line_width, 1.0);
    }
}
