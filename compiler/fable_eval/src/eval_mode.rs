//! Evaluation modes.
//!
//! `fable run` interprets against the terminal; tests run scripts against a
//! buffered console with a bounded call depth. Policy lives on the enum so
//! the interpreter never branches on the mode directly.

use crate::console::{buffer_console, stdout_console, SharedConsole};

/// Evaluation mode: determines interpreter policy via match dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Standard mode for `fable run`: terminal I/O, unbounded call depth.
    #[default]
    Interpret,
    /// Test execution: captured output, bounded call depth.
    TestRun,
}

impl EvalMode {
    /// Maximum script call depth, or `None` for unlimited (native `stacker` growth).
    ///
    /// - `Interpret`: `None` on native, 200 on WASM
    /// - `TestRun`: always 500
    #[inline]
    pub fn max_call_depth(self) -> Option<usize> {
        match self {
            Self::Interpret => {
                #[cfg(target_arch = "wasm32")]
                {
                    Some(200)
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    None
                }
            }
            Self::TestRun => Some(500),
        }
    }

    /// Console used when the host does not supply one.
    pub fn default_console(self) -> SharedConsole {
        match self {
            Self::Interpret => stdout_console(),
            Self::TestRun => buffer_console(),
        }
    }

    /// Whether console output is captured rather than shown.
    #[inline]
    pub fn captures_output(self) -> bool {
        matches!(self, Self::TestRun)
    }
}
