//! Directory loader: cached programs and text compositions.
//!
//! Walks a directory tree in name order. Every `*.fbc` cache whose source is
//! not newer is loaded as a program; stale caches are skipped with a warning.
//! Every `*.ftx` file is read as a composition.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fable_compose::{read_composition, ComposeError, COMPOSITION_EXTENSION};
use fable_eval::Engine;
use fable_ir::cache::{self, CacheError, CACHE_EXTENSION};
use fable_value::EvalError;

/// What a directory load found.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub programs: Vec<String>,
    pub compositions: Vec<String>,
    /// Caches skipped because their source changed after they were written.
    pub stale: Vec<PathBuf>,
}

#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: io::Error },
    Cache(CacheError),
    Compose(ComposeError),
    Program { path: PathBuf, error: EvalError },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            LoadError::Cache(e) => write!(f, "{e}"),
            LoadError::Compose(e) => write!(f, "{e}"),
            LoadError::Program { path, error } => {
                write!(f, "cannot load {}: {error}", path.display())
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Cache(e) => Some(e),
            LoadError::Compose(e) => Some(e),
            LoadError::Program { error, .. } => Some(error),
        }
    }
}

impl From<CacheError> for LoadError {
    fn from(e: CacheError) -> Self {
        LoadError::Cache(e)
    }
}

impl From<ComposeError> for LoadError {
    fn from(e: ComposeError) -> Self {
        LoadError::Compose(e)
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

/// Source path a cache was written for: the cache path minus its extension.
pub fn source_of(cache: &Path) -> PathBuf {
    cache.with_extension("")
}

/// All files under `dir`, depth first, in name order.
fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort();
    for path in entries {
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

/// Load every fresh cached program and every composition under `dir`.
#[tracing::instrument(level = "debug", skip(engine))]
pub fn load_dir(engine: &Engine, dir: &Path) -> Result<LoadReport, LoadError> {
    let mut files = Vec::new();
    collect_files(dir, &mut files)?;

    let mut report = LoadReport::default();
    for path in files {
        if has_extension(&path, CACHE_EXTENSION) {
            let source = source_of(&path);
            if !cache::is_fresh(&source, &path) {
                tracing::warn!(cache = %path.display(), "stale program cache skipped");
                report.stale.push(path);
                continue;
            }
            let program = cache::load(&path)?;
            let name = program.name.clone();
            engine
                .load_program(program)
                .map_err(|error| LoadError::Program {
                    path: path.clone(),
                    error,
                })?;
            tracing::debug!(program = %name, path = %path.display(), "program loaded");
            report.programs.push(name);
        } else if has_extension(&path, COMPOSITION_EXTENSION) {
            let composition = read_composition(&path)?;
            let name = composition.name.clone();
            engine.load_composition(composition);
            tracing::debug!(composition = %name, path = %path.display(), "composition loaded");
            report.compositions.push(name);
        }
    }
    Ok(report)
}

/// State of one program cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheStatus {
    Fresh,
    Stale,
    /// Fresh, but unreadable; carries the reason.
    Broken(String),
}

/// Status of every program cache under `dir`, in path order.
pub fn cache_status(dir: &Path) -> Result<Vec<(PathBuf, CacheStatus)>, LoadError> {
    let mut files = Vec::new();
    collect_files(dir, &mut files)?;
    Ok(files
        .into_iter()
        .filter(|path| has_extension(path, CACHE_EXTENSION))
        .map(|path| {
            let status = if !cache::is_fresh(&source_of(&path), &path) {
                CacheStatus::Stale
            } else {
                match cache::load(&path) {
                    Ok(_) => CacheStatus::Fresh,
                    Err(e) => CacheStatus::Broken(e.to_string()),
                }
            };
            (path, status)
        })
        .collect())
}
