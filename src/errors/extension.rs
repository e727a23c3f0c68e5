// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-extension failures.
//!
//! None of these abort a run. The orchestrator records them against the
//! extension that produced them and moves on to the next one.

use std::path::PathBuf;
use thiserror::Error;

use crate::traits::BuildStatus;

#[derive(Error, Debug)]
pub enum ExtensionError {
    /// `{extensions_dir}/{name}` does not exist.
    #[error("Extension directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// The build tool could not be started at all.
    #[error("Failed to launch build tool '{program}': {source}")]
    BuilderUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The build tool ran and reported failure.
    #[error("Build failed for {name} ({status})")]
    BuildFailed { name: String, status: BuildStatus },

    /// The build succeeded but left no wheel behind.
    #[error("No wheel found in {}", .0.display())]
    NoArtifact(PathBuf),

    /// More than one wheel was produced and the policy requires exactly one.
    #[error("Expected exactly one wheel in {}, found {}", .dist_dir.display(), .count)]
    AmbiguousArtifacts { dist_dir: PathBuf, count: usize },

    /// Listing or copying artifacts failed.
    #[error("I/O error on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
