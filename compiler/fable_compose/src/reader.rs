//! Composition file reader.
//!
//! Format, line by line:
//!
//! - line 1: `$Name` (leading `$` required, surrounding whitespace trimmed)
//! - `[name]`: opens a named paragraph (`name` is word characters only)
//! - a line of exactly two backticks: opens an anonymous paragraph
//! - any other non-blank line: appended to the open paragraph, verbatim
//!
//! Lines before the first paragraph header are ignored. Paragraphs that end
//! up without lines are dropped.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::composition::{Composition, Paragraph};

/// File extension of composition files.
pub const COMPOSITION_EXTENSION: &str = "ftx";

const ANONYMOUS_HEADER: &str = "``";

/// Error reading a composition file.
#[derive(Debug)]
pub enum ComposeError {
    Io { path: PathBuf, source: io::Error },
    MissingHeader { path: Option<PathBuf> },
}

impl ComposeError {
    fn with_path(self, path: &Path) -> Self {
        match self {
            ComposeError::MissingHeader { .. } => ComposeError::MissingHeader {
                path: Some(path.to_path_buf()),
            },
            other => other,
        }
    }
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeError::Io { path, source } => {
                write!(f, "cannot read composition {}: {source}", path.display())
            }
            ComposeError::MissingHeader { path: Some(path) } => write!(
                f,
                "composition {} must start with a `$Name` line",
                path.display()
            ),
            ComposeError::MissingHeader { path: None } => {
                write!(f, "composition must start with a `$Name` line")
            }
        }
    }
}

impl std::error::Error for ComposeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ComposeError::Io { source, .. } => Some(source),
            ComposeError::MissingHeader { .. } => None,
        }
    }
}

/// Parse composition text.
pub fn parse_composition(text: &str) -> Result<Composition, ComposeError> {
    let mut lines = text.lines();
    let name = lines
        .next()
        .and_then(|header| header.strip_prefix('$'))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ComposeError::MissingHeader { path: None })?;

    let mut paragraphs = Vec::new();
    let mut current: Option<Paragraph> = None;

    for line in lines {
        if let Some(header) = paragraph_header(line) {
            if let Some(done) = current.take().filter(|p| !p.lines.is_empty()) {
                paragraphs.push(done);
            }
            current = Some(Paragraph::new(header.map(str::to_string), Vec::new()));
        } else if !line.trim().is_empty() {
            if let Some(open) = current.as_mut() {
                open.lines.push(line.to_string());
            }
        }
    }
    if let Some(done) = current.filter(|p| !p.lines.is_empty()) {
        paragraphs.push(done);
    }

    tracing::trace!(composition = name, paragraphs = paragraphs.len(), "parsed composition");
    Ok(Composition::new(name, paragraphs))
}

/// Read and parse a composition file.
pub fn read_composition(path: &Path) -> Result<Composition, ComposeError> {
    let text = fs::read_to_string(path).map_err(|source| ComposeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_composition(&text).map_err(|e| e.with_path(path))
}

/// `Some(Some(name))` for `[name]`, `Some(None)` for the anonymous header.
fn paragraph_header(line: &str) -> Option<Option<&str>> {
    if line == ANONYMOUS_HEADER {
        return Some(None);
    }
    let name = line.strip_prefix('[')?.strip_suffix(']')?;
    let is_word = !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    is_word.then_some(Some(name))
}
