//! Command handlers for the `fable` CLI.
//!
//! Each submodule implements one command. Handlers return a
//! [`CommandError`]; `main` reports it on stderr and exits with status 1.

use std::fmt;
use std::path::PathBuf;

use fable_compose::ComposeError;
use fable_value::EvalError;

use crate::loader::LoadError;

mod check_cache;
mod compose;
mod run;

pub use check_cache::check_cache;
pub use compose::show_composition;
pub use run::{run_dir, RunOptions, DEFAULT_ENTRY};

#[derive(Debug)]
pub enum CommandError {
    Load(LoadError),
    Compose(ComposeError),
    Eval(EvalError),
    /// The requested entry program was not among the loaded programs.
    MissingEntry { dir: PathBuf, entry: String },
    /// `check-cache` found caches that cannot be used.
    UnusableCaches(usize),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Load(e) => write!(f, "{e}"),
            CommandError::Compose(e) => write!(f, "{e}"),
            CommandError::Eval(e) => write!(f, "{e}"),
            CommandError::MissingEntry { dir, entry } => {
                write!(f, "no program named {entry} under {}", dir.display())
            }
            CommandError::UnusableCaches(count) => {
                write!(f, "{count} program cache(s) are stale or unreadable")
            }
        }
    }
}

impl std::error::Error for CommandError {}

impl From<LoadError> for CommandError {
    fn from(e: LoadError) -> Self {
        CommandError::Load(e)
    }
}

impl From<ComposeError> for CommandError {
    fn from(e: ComposeError) -> Self {
        CommandError::Compose(e)
    }
}

impl From<EvalError> for CommandError {
    fn from(e: EvalError) -> Self {
        CommandError::Eval(e)
    }
}
