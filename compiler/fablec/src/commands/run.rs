//! The `run` command: load a directory and run its entry program.

use std::path::PathBuf;

use fable_eval::{Engine, EvalMode, SharedConsole, Value};

use super::CommandError;
use crate::loader::load_dir;

/// Entry program run when `--entry` is not given.
pub const DEFAULT_ENTRY: &str = "main";

#[derive(Clone, Debug)]
pub struct RunOptions {
    pub dir: PathBuf,
    pub entry: String,
    /// Display collaborator; the terminal when unset.
    pub console: Option<SharedConsole>,
}

impl RunOptions {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        RunOptions {
            dir: dir.into(),
            entry: DEFAULT_ENTRY.to_string(),
            console: None,
        }
    }
}

/// Load `options.dir` and run the entry program, returning its result.
pub fn run_dir(options: &RunOptions) -> Result<Value, CommandError> {
    let mut builder = Engine::builder().mode(EvalMode::Interpret);
    if let Some(console) = &options.console {
        builder = builder.console(SharedConsole::clone(console));
    }
    let engine = builder.build();

    let report = load_dir(&engine, &options.dir)?;
    tracing::debug!(
        programs = report.programs.len(),
        compositions = report.compositions.len(),
        stale = report.stale.len(),
        "directory loaded"
    );
    if !report.programs.contains(&options.entry) {
        return Err(CommandError::MissingEntry {
            dir: options.dir.clone(),
            entry: options.entry.clone(),
        });
    }
    Ok(engine.run(&options.entry)?)
}
