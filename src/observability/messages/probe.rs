// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for version detection.

use crate::observability::messages::StructuredLog;
use crate::probe::VersionContext;
use std::fmt::{Display, Formatter};

/// Version context resolved.
///
/// # Log Level
/// `info!` - Important operational event
pub struct VersionsDetected<'a> {
    pub source: &'a str,
    pub versions: &'a VersionContext,
}

impl Display for VersionsDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Detected versions via {} probe: runtime={} toolkit={} abi={}",
            self.source, self.versions.runtime, self.versions.toolkit, self.versions.abi_tag
        )
    }
}

impl StructuredLog for VersionsDetected<'_> {
    fn log(&self) {
        tracing::info!(
            source = self.source,
            runtime = %self.versions.runtime,
            toolkit = %self.versions.toolkit,
            abi_tag = %self.versions.abi_tag,
            "{}", self
        );
    }
}

/// Version detection failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ProbeFailed<'a> {
    pub source: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ProbeFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Version probe '{}' failed: {}", self.source, self.error)
    }
}

impl StructuredLog for ProbeFailed<'_> {
    fn log(&self) {
        tracing::error!(source = self.source, error = %self.error, "{}", self);
    }
}
