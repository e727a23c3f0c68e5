use std::path::{Path, PathBuf};

/// Lists the artifacts a build left in a distribution directory.
///
/// Implementations must return paths sorted by file name so that the
/// orchestrator's "first artifact" tie-break is reproducible. A missing
/// directory yields an empty list rather than an error.
pub trait ArtifactLocator: Send + Sync {
    fn artifacts(&self, dist_dir: &Path) -> std::io::Result<Vec<PathBuf>>;
}
