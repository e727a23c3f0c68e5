// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Best-effort removal of build output left over from earlier runs.

use std::path::{Path, PathBuf};

use crate::config::consts::{STALE_ARTIFACT_DIRS, STALE_METADATA_SUFFIX};
use crate::observability::messages::orchestrator::{
    StaleArtifactRemovalFailed, StaleArtifactRemoved,
};
use crate::observability::messages::StructuredLog;

/// Remove `build/`, `dist/` and `*.egg-info/` directories directly inside
/// `extension_dir`.
///
/// Only directories are touched. Failures are logged and otherwise ignored;
/// returns the directories that were removed.
pub fn clean_stale_artifacts(extension_dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(extension_dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut stale: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_dir() && is_stale_name(path))
        .collect();
    stale.sort();

    let mut removed = Vec::new();
    for path in stale {
        let display = path.display().to_string();
        StaleArtifactRemoved { path: &display }.log();
        match std::fs::remove_dir_all(&path) {
            Ok(()) => removed.push(path),
            Err(error) => StaleArtifactRemovalFailed {
                path: &display,
                error: &error,
            }
            .log(),
        }
    }
    removed
}

fn is_stale_name(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    STALE_ARTIFACT_DIRS.contains(&name) || name.ends_with(STALE_METADATA_SUFFIX)
}
