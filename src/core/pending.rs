//! Line-pending tracking
//!
//! Remembers, per execution context, whether the last write left the cursor
//! in the middle of a line.

/// Who is writing, relative to the current foreground owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Writes go straight to the terminal
    Foreground,
    /// Writes are held back until the owner hands the terminal over
    Background,
}

impl ExecutionContext {
    pub fn is_background(self) -> bool {
        self == ExecutionContext::Background
    }
}

/// Line-pending flag per context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinePending {
    foreground: bool,
    background: bool,
}

impl LinePending {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, context: ExecutionContext) -> bool {
        match context {
            ExecutionContext::Foreground => self.foreground,
            ExecutionContext::Background => self.background,
        }
    }

    pub fn set(&mut self, context: ExecutionContext, pending: bool) {
        match context {
            ExecutionContext::Foreground => self.foreground = pending,
            ExecutionContext::Background => self.background = pending,
        }
    }

    /// Background output becomes foreground output: its state moves over.
    pub fn hand_over(&mut self) {
        self.foreground = self.background;
        self.background = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_not_pending() {
        let pending = LinePending::new();
        assert!(!pending.get(ExecutionContext::Foreground));
        assert!(!pending.get(ExecutionContext::Background));
    }

    #[test]
    fn test_contexts_are_independent() {
        let mut pending = LinePending::new();
        pending.set(ExecutionContext::Background, true);
        assert!(pending.get(ExecutionContext::Background));
        assert!(!pending.get(ExecutionContext::Foreground));
    }

    #[test]
    fn test_hand_over_moves_background_state() {
        let mut pending = LinePending::new();
        pending.set(ExecutionContext::Foreground, true);
        pending.set(ExecutionContext::Background, false);
        pending.hand_over();
        assert!(!pending.get(ExecutionContext::Foreground));

        pending.set(ExecutionContext::Background, true);
        pending.hand_over();
        assert!(pending.get(ExecutionContext::Foreground));
        assert!(!pending.get(ExecutionContext::Background));
    }
}
