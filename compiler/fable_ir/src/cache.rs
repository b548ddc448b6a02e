//! Persisted Program Cache
//!
//! Stores a parsed [`Program`] next to its source file so hosts can skip the
//! front end when the source has not changed.
//!
//! # Layout
//!
//! ```text
//! scripts/
//! ├── intro.fable       # source, read by the external front end
//! └── intro.fable.fbc   # bincode-encoded CachedProgram
//! ```
//!
//! A cache is fresh when it exists and its modification time is newer than
//! the source's. A missing source leaves any existing cache fresh.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::Program;

/// File extension appended to the source path.
pub const CACHE_EXTENSION: &str = "fbc";

/// Bumped whenever the AST shape changes incompatibly.
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// On-disk wrapper around a program.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct CachedProgram {
    version: u32,
    program: Program,
}

/// Error reading or writing a program cache.
#[derive(Debug)]
pub enum CacheError {
    Io { path: PathBuf, source: io::Error },
    Codec { path: PathBuf, message: String },
    VersionMismatch { path: PathBuf, found: u32 },
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::Io { path, source } => {
                write!(f, "cache I/O error at {}: {source}", path.display())
            }
            CacheError::Codec { path, message } => {
                write!(f, "corrupt program cache {}: {message}", path.display())
            }
            CacheError::VersionMismatch { path, found } => write!(
                f,
                "program cache {} has format version {found}, expected {CACHE_FORMAT_VERSION}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Cache path for a source file: `<source>.fbc`.
pub fn cache_path(source: &Path) -> PathBuf {
    let mut os = source.as_os_str().to_owned();
    os.push(".");
    os.push(CACHE_EXTENSION);
    PathBuf::from(os)
}

/// Whether `cache` can stand in for `source`.
pub fn is_fresh(source: &Path, cache: &Path) -> bool {
    let Ok(cache_meta) = fs::metadata(cache) else {
        return false;
    };
    let Ok(source_meta) = fs::metadata(source) else {
        return true;
    };
    match (source_meta.modified(), cache_meta.modified()) {
        (Ok(source_time), Ok(cache_time)) => source_time < cache_time,
        _ => false,
    }
}

/// Write `program` to `path`, replacing any existing file.
pub fn store(program: &Program, path: &Path) -> Result<(), CacheError> {
    let cached = CachedProgram {
        version: CACHE_FORMAT_VERSION,
        program: program.clone(),
    };
    let bytes = bincode::serialize(&cached).map_err(|e| CacheError::Codec {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    fs::write(path, bytes).map_err(|source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(program = %program.name, path = %path.display(), "stored program cache");
    Ok(())
}

/// Read a program previously written by [`store`].
pub fn load(path: &Path) -> Result<Program, CacheError> {
    let bytes = fs::read(path).map_err(|source| CacheError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cached: CachedProgram = bincode::deserialize(&bytes).map_err(|e| CacheError::Codec {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    if cached.version != CACHE_FORMAT_VERSION {
        return Err(CacheError::VersionMismatch {
            path: path.to_path_buf(),
            found: cached.version,
        });
    }
    Ok(cached.program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Expr, FunctionDecl, ObjectTypeDecl, Stmt, VariableType};
    use pretty_assertions::assert_eq;

    fn sample_program() -> Program {
        Program::new(
            "intro",
            vec![
                Stmt::object_type(ObjectTypeDecl::new(
                    "Point",
                    &[("x", VariableType::Int32), ("y", VariableType::Int32)],
                )),
                Stmt::global_function(FunctionDecl::new(
                    "double",
                    &["n"],
                    vec![Stmt::ret(Expr::binary(
                        Expr::var("n"),
                        crate::BinaryOp::Mul,
                        Expr::int32(2),
                    ))],
                )),
                Stmt::declare("name", VariableType::String, Some(Expr::string("Ada"))),
                Stmt::reference("greeting", None),
            ],
        )
    }

    #[test]
    fn cache_path_appends_extension() {
        assert_eq!(
            cache_path(Path::new("scripts/intro.fable")),
            PathBuf::from("scripts/intro.fable.fbc")
        );
    }

    #[test]
    fn store_then_load_restores_program() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("failed to create temp dir: {e}"));
        let path = dir.path().join("intro.fable.fbc");
        let program = sample_program();

        store(&program, &path).unwrap_or_else(|e| panic!("store failed: {e}"));
        let restored = load(&path).unwrap_or_else(|e| panic!("load failed: {e}"));

        assert_eq!(restored, program);
    }

    #[test]
    fn load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("failed to create temp dir: {e}"));
        let path = dir.path().join("bad.fbc");
        fs::write(&path, [0xff, 0xff, 0xff]).unwrap_or_else(|e| panic!("write failed: {e}"));

        assert!(matches!(load(&path), Err(CacheError::Codec { .. })));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("failed to create temp dir: {e}"));
        assert!(matches!(
            load(&dir.path().join("absent.fbc")),
            Err(CacheError::Io { .. })
        ));
    }

    #[test]
    fn freshness_follows_modification_times() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("failed to create temp dir: {e}"));
        let source = dir.path().join("intro.fable");
        let cache = cache_path(&source);

        // No cache yet.
        fs::write(&source, "source").unwrap_or_else(|e| panic!("write failed: {e}"));
        assert!(!is_fresh(&source, &cache));

        store(&sample_program(), &cache).unwrap_or_else(|e| panic!("store failed: {e}"));
        let old = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_000);
        let file = fs::File::options()
            .write(true)
            .open(&source)
            .unwrap_or_else(|e| panic!("open failed: {e}"));
        file.set_modified(old)
            .unwrap_or_else(|e| panic!("set_modified failed: {e}"));
        assert!(is_fresh(&source, &cache));

        // Source removed: cache still usable.
        fs::remove_file(&source).unwrap_or_else(|e| panic!("remove failed: {e}"));
        assert!(is_fresh(&source, &cache));
    }
}
