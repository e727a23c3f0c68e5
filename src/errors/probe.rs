// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors from detecting the runtime, toolkit and interpreter versions.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The interpreter could not be spawned.
    #[error("Failed to run '{interpreter}': {source}")]
    Spawn {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },

    /// The probe script exited unsuccessfully (e.g. torch is not installed).
    #[error("Version probe via '{interpreter}' exited with {code:?}: {stderr}")]
    NonZeroExit {
        interpreter: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The probe output was not the expected JSON document.
    #[error("Unreadable probe output: {0}")]
    Parse(#[from] serde_json::Error),

    /// A reported version string could not be normalized.
    #[error("Malformed {field} version: '{value}'")]
    MalformedVersion { field: &'static str, value: String },
}
