//! Call depth accounting and native stack growth.
//!
//! Every script function or method call enters a [`CallDepth`] frame. The
//! active mode decides whether depth is bounded; on native targets `stacker`
//! grows the host stack on demand so the mode's limit, not the thread's stack
//! size, is what stops a runaway recursion.

use fable_value::{stack_overflow, EvalError};

/// Current call depth and the limit it may not exceed.
#[derive(Clone, Copy, Debug, Default)]
pub struct CallDepth {
    depth: usize,
    limit: Option<usize>,
}

impl CallDepth {
    pub fn new(limit: Option<usize>) -> Self {
        CallDepth { depth: 0, limit }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Enter one call frame, failing once the limit would be exceeded.
    pub fn enter(&mut self) -> Result<(), EvalError> {
        if self.limit.is_some_and(|limit| self.depth >= limit) {
            return Err(stack_overflow(self.depth));
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave the frame entered by the matching [`CallDepth::enter`].
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Run `f` with at least a red zone of stack available, growing it if needed.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
