// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for extension build lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Run start and summary
//! * Per-extension build start, success and failure
//! * Stale artifact cleanup
//! * Artifact selection and renaming

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Build run started.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RunStarted<'a> {
    pub extension_count: usize,
    pub output_dir: &'a str,
}

impl Display for RunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Building {} extensions into {}",
            self.extension_count, self.output_dir
        )
    }
}

impl StructuredLog for RunStarted<'_> {
    fn log(&self) {
        tracing::info!(
            extension_count = self.extension_count,
            output_dir = self.output_dir,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "build_run",
            span_name = name,
            extension_count = self.extension_count,
        )
    }
}

/// Build of one extension started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use ext_wheel_builder::observability::messages::orchestrator::ExtensionBuildStarted;
///
/// let msg = ExtensionBuildStarted {
///     extension: "FlexGEMM",
///     position: 2,
///     total: 3,
/// };
///
/// assert_eq!(msg.to_string(), "Building FlexGEMM (2/3)");
/// ```
pub struct ExtensionBuildStarted<'a> {
    pub extension: &'a str,
    /// One-based position in the build list.
    pub position: usize,
    pub total: usize,
}

impl Display for ExtensionBuildStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Building {} ({}/{})", self.extension, self.position, self.total)
    }
}

impl StructuredLog for ExtensionBuildStarted<'_> {
    fn log(&self) {
        tracing::info!(
            extension = self.extension,
            position = self.position,
            total = self.total,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "extension_build",
            span_name = name,
            extension = self.extension,
        )
    }
}

/// Stale build output directory removed.
///
/// # Log Level
/// `info!` - Operational event
pub struct StaleArtifactRemoved<'a> {
    pub path: &'a str,
}

impl Display for StaleArtifactRemoved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Removing {}", self.path)
    }
}

impl StructuredLog for StaleArtifactRemoved<'_> {
    fn log(&self) {
        tracing::info!(path = self.path, "{}", self);
    }
}

/// Stale build output could not be removed; the build goes ahead anyway.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct StaleArtifactRemovalFailed<'a> {
    pub path: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for StaleArtifactRemovalFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Could not remove {}: {}", self.path, self.error)
    }
}

impl StructuredLog for StaleArtifactRemovalFailed<'_> {
    fn log(&self) {
        tracing::debug!(path = self.path, error = %self.error, "{}", self);
    }
}

/// External build tool launched.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct BuilderInvoked<'a> {
    pub extension: &'a str,
    pub program: &'a str,
    pub args: &'a [String],
    pub working_dir: &'a str,
}

impl Display for BuilderInvoked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Running `{} {}` in {}",
            self.program,
            self.args.join(" "),
            self.working_dir
        )
    }
}

impl StructuredLog for BuilderInvoked<'_> {
    fn log(&self) {
        tracing::debug!(
            extension = self.extension,
            program = self.program,
            working_dir = self.working_dir,
            "{}", self
        );
    }
}

/// Several wheels found; the first by name is used.
///
/// # Log Level
/// `warn!` - Unexpected but recoverable
pub struct MultipleArtifactsFound<'a> {
    pub extension: &'a str,
    pub count: usize,
    pub chosen: &'a str,
}

impl Display for MultipleArtifactsFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} wheels found for {}; using {}",
            self.count, self.extension, self.chosen
        )
    }
}

impl StructuredLog for MultipleArtifactsFound<'_> {
    fn log(&self) {
        tracing::warn!(
            extension = self.extension,
            count = self.count,
            chosen = self.chosen,
            "{}", self
        );
    }
}

/// Wheel copied under a new name.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ArtifactRenamed<'a> {
    pub original: &'a str,
    pub renamed: &'a str,
}

impl Display for ArtifactRenamed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Copying: {} -> {}", self.original, self.renamed)
    }
}

impl StructuredLog for ArtifactRenamed<'_> {
    fn log(&self) {
        tracing::info!(original = self.original, renamed = self.renamed, "{}", self);
    }
}

/// Wheel name did not have five fields; copied unchanged.
///
/// # Log Level
/// `warn!` - Unexpected but recoverable
pub struct UnparseableArtifactName<'a> {
    pub file_name: &'a str,
}

impl Display for UnparseableArtifactName<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Unexpected wheel name format: {}; copying as-is",
            self.file_name
        )
    }
}

impl StructuredLog for UnparseableArtifactName<'_> {
    fn log(&self) {
        tracing::warn!(file_name = self.file_name, "{}", self);
    }
}

/// Extension built and its wheel copied.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ExtensionBuildSucceeded<'a> {
    pub extension: &'a str,
    pub wheel: &'a str,
    pub duration: Duration,
}

impl Display for ExtensionBuildSucceeded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Built {} -> {} in {:?}",
            self.extension, self.wheel, self.duration
        )
    }
}

impl StructuredLog for ExtensionBuildSucceeded<'_> {
    fn log(&self) {
        tracing::info!(
            extension = self.extension,
            wheel = self.wheel,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }
}

/// Extension failed at some step.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ExtensionBuildFailed<'a> {
    pub extension: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ExtensionBuildFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "ERROR: {}: {}", self.extension, self.error)
    }
}

impl StructuredLog for ExtensionBuildFailed<'_> {
    fn log(&self) {
        tracing::error!(extension = self.extension, error = %self.error, "{}", self);
    }
}

/// Run finished.
///
/// # Log Level
/// `info!` when every extension succeeded, `warn!` otherwise
pub struct RunCompleted {
    pub succeeded: usize,
    pub total: usize,
    pub duration: Duration,
}

impl Display for RunCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Build complete: {}/{} extensions built successfully in {:?}",
            self.succeeded, self.total, self.duration
        )
    }
}

impl StructuredLog for RunCompleted {
    fn log(&self) {
        if self.succeeded == self.total {
            tracing::info!(
                succeeded = self.succeeded,
                total = self.total,
                duration_ms = self.duration.as_millis() as u64,
                "{}", self
            );
        } else {
            tracing::warn!(
                succeeded = self.succeeded,
                failed = self.total - self.succeeded,
                total = self.total,
                duration_ms = self.duration.as_millis() as u64,
                "{}", self
            );
        }
    }
}
