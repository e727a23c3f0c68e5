// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::config::consts::WHEEL_EXTENSION;
use crate::traits::ArtifactLocator;

/// Finds wheel files directly inside a distribution directory.
#[derive(Debug, Clone)]
pub struct DistDirLocator {
    extension: String,
}

impl DistDirLocator {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }
}

impl Default for DistDirLocator {
    fn default() -> Self {
        Self::new(WHEEL_EXTENSION)
    }
}

impl ArtifactLocator for DistDirLocator {
    fn artifacts(&self, dist_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        if !dist_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut found = Vec::new();
        for entry in std::fs::read_dir(dist_dir)? {
            let path = entry?.path();
            if path.is_file() && path.extension() == Some(OsStr::new(&self.extension)) {
                found.push(path);
            }
        }

        found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(found)
    }
}

/// Sorted file names of every wheel in `dir`, for the end-of-run listing.
pub fn list_wheels(dir: &Path) -> std::io::Result<Vec<String>> {
    Ok(DistDirLocator::default()
        .artifacts(dir)?
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .collect())
}
