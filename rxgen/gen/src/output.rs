//! Emission of generated types.
//!
//! The processor hands finished [`SyntheticType`]s to an [`EmissionSink`].
//! Two sinks ship with the crate:
//!
//! - [`MemorySink`] - keeps the types, used by tests and library callers
//! - [`JavaFileSink`] - renders each type and writes `<package path>/<Name>.java`
//!
//! ## Output Structure
//!
//! For the default package:
//! ```text
//! out/
//! └── rxhttp/wrapper/param/
//!     ├── RxHttpPostEncryptFormParam.java
//!     ├── RxHttp.java
//!     └── RxHttpExtensions.java
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Atomic writes**: Uses temp file + rename pattern to prevent partial writes
//! - **Determinism**: Rendering is byte-identical for identical input

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::{GeneratorError, Result};
use crate::render::render_type;
use crate::synthetic::SyntheticType;

/// Accepts fully-formed synthetic types.
pub trait EmissionSink {
    /// Persists one generated type.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::Write` when the type cannot be persisted.
    fn emit(&mut self, ty: &SyntheticType) -> Result<()>;
}

/// Collects emitted types in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    types: Vec<SyntheticType>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn types(&self) -> &[SyntheticType] {
        &self.types
    }

    /// Renders every collected type, in emission order.
    pub fn render_all(&self) -> Vec<String> {
        self.types.iter().map(render_type).collect()
    }
}

impl EmissionSink for MemorySink {
    fn emit(&mut self, ty: &SyntheticType) -> Result<()> {
        self.types.push(ty.clone());
        Ok(())
    }
}

/// Renders types to Java source files under an output root.
///
/// ## Examples
///
/// ```no_run
/// use rxgen_gen::output::{EmissionSink, JavaFileSink};
/// use rxgen_gen::synthetic::SyntheticType;
///
/// let mut sink = JavaFileSink::new("build/generated", false);
/// sink.emit(&SyntheticType::new("rxhttp.wrapper.param", "RxHttp")).unwrap();
/// assert_eq!(sink.written().len(), 1);
/// ```
#[derive(Debug)]
pub struct JavaFileSink {
    root: PathBuf,
    dry_run: bool,
    written: Vec<PathBuf>,
}

impl JavaFileSink {
    /// Creates a sink writing below `root`.
    ///
    /// ## Arguments
    ///
    /// * `root` - Source root; package directories are created below it
    /// * `dry_run` - If true, print sources to stdout instead of writing files
    pub fn new(root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            root: root.into(),
            dry_run,
            written: Vec::new(),
        }
    }

    /// Paths written so far (empty in dry-run mode).
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Where `ty` is written: `<root>/<package as dirs>/<Name>.java`.
    pub fn source_path(&self, ty: &SyntheticType) -> PathBuf {
        source_path(&self.root, ty)
    }
}

impl EmissionSink for JavaFileSink {
    fn emit(&mut self, ty: &SyntheticType) -> Result<()> {
        let source = render_type(ty);

        if self.dry_run {
            println!("// ===== {} =====", ty.qualified_name());
            println!("{source}");
            return Ok(());
        }

        let path = self.source_path(ty);
        write_atomic(&path, &source)?;
        info!(path = %path.display(), "wrote {}", ty.name);
        self.written.push(path);
        Ok(())
    }
}

/// Returns `<root>/<package as dirs>/<Name>.java`.
pub fn source_path(root: &Path, ty: &SyntheticType) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in ty.package.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(format!("{}.java", ty.name));
    path
}

/// Writes content to a file atomically using a temp file + rename pattern.
///
/// This ensures that the target file is never left in a partial state.
/// Parent directories are created if they don't exist.
///
/// ## Arguments
///
/// * `path` - Target file path
/// * `content` - Content to write
///
/// ## Errors
///
/// Returns `GeneratorError::Write` if any file operation fails.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::Write {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::Write {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::Write {
        path: path.display().to_string(),
        source: e,
    })?;

    debug!(path = %path.display(), bytes = content.len(), "atomic write");
    Ok(())
}
