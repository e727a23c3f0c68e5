use std::path::{Path, PathBuf};

use crate::config::consts::DIST_DIR_NAME;
use crate::config::BuildConfig;

/// Directory layout of a build run.
///
/// ```text
/// {root}/
///   extensions/{Name}/dist/*.whl   produced by the build tool
///   wheels/                        renamed copies
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    pub root: PathBuf,
    pub extensions_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl BuildLayout {
    /// Relative `extensions_dir` and `output_dir` are resolved against `root`.
    pub fn new(
        root: impl Into<PathBuf>,
        extensions_dir: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
    ) -> Self {
        let root = root.into();
        Self {
            extensions_dir: root.join(extensions_dir),
            output_dir: root.join(output_dir),
            root,
        }
    }

    pub fn from_config(root: impl Into<PathBuf>, cfg: &BuildConfig) -> Self {
        Self::new(root, &cfg.extensions_dir, &cfg.output_dir)
    }

    pub fn extension_dir(&self, name: &str) -> PathBuf {
        self.extensions_dir.join(name)
    }

    pub fn dist_dir(&self, name: &str) -> PathBuf {
        self.extension_dir(name).join(DIST_DIR_NAME)
    }

    /// Working directory for the build tool: the parent of the extensions
    /// directory.
    pub fn working_dir(&self) -> &Path {
        self.extensions_dir.parent().unwrap_or(self.root.as_path())
    }
}
