// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Version context detection.
//!
//! The orchestrator never inspects the environment itself. An
//! [`EnvironmentProbe`](crate::traits::EnvironmentProbe) produces a
//! [`VersionContext`] once at startup and the same value is used to tag every
//! wheel in the run.
//!
//! Two probes exist:
//! * [`PythonProbe`] asks the configured interpreter for the installed
//!   PyTorch and CUDA versions.
//! * [`PinnedProbe`] returns versions fixed in the configuration file, for
//!   builds where the interpreter should not be consulted.

mod pinned;
mod python;

pub use pinned::PinnedProbe;
pub use python::{ProbeReport, PythonProbe, PROBE_SCRIPT};

use std::fmt::{Display, Formatter};

use crate::config::consts::CPU_TOOLKIT_SENTINEL;
use crate::errors::ProbeError;

/// Acceleration toolkit available to the build, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolkitVersion {
    Cuda {
        /// Dotless form used in tags, e.g. `128`.
        compact: String,
        /// Form reported by the runtime, e.g. `12.8`.
        reported: String,
    },
    /// No toolkit; rendered as the `cpu` sentinel.
    Cpu,
}

impl ToolkitVersion {
    pub fn cuda(compact: impl Into<String>) -> Self {
        let compact = compact.into();
        Self::Cuda {
            reported: compact.clone(),
            compact,
        }
    }

    /// Normalize a toolkit version as reported by the runtime.
    ///
    /// `None`, an empty string and the literal `cpu` all mean no toolkit.
    pub fn from_reported(reported: Option<&str>) -> Result<Self, ProbeError> {
        match reported.map(str::trim) {
            None => Ok(Self::Cpu),
            Some("") => Ok(Self::Cpu),
            Some(value) if value.eq_ignore_ascii_case(CPU_TOOLKIT_SENTINEL) => Ok(Self::Cpu),
            Some(value) => Ok(Self::Cuda {
                compact: compact_version("toolkit", value)?,
                reported: value.to_string(),
            }),
        }
    }

    pub fn is_cpu(&self) -> bool {
        matches!(self, Self::Cpu)
    }

    /// Human-readable form for the startup banner.
    pub fn reported(&self) -> &str {
        match self {
            Self::Cuda { reported, .. } => reported,
            Self::Cpu => "none",
        }
    }
}

impl Display for ToolkitVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cuda { compact, .. } => write!(f, "{}", compact),
            Self::Cpu => write!(f, "{}", CPU_TOOLKIT_SENTINEL),
        }
    }
}

/// Versions shared by every extension build in a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionContext {
    /// Compact runtime version, e.g. `251`.
    pub runtime: String,
    pub toolkit: ToolkitVersion,
    /// Interpreter ABI tag, e.g. `cp310`.
    pub abi_tag: String,
    /// Runtime version as reported, e.g. `2.5.1+cu128`.
    pub runtime_reported: String,
    /// Interpreter version as reported, e.g. `3.10.12`.
    pub interpreter_reported: String,
}

impl VersionContext {
    /// Build a context from already-compact values.
    pub fn new(
        runtime: impl Into<String>,
        toolkit: ToolkitVersion,
        abi_tag: impl Into<String>,
    ) -> Self {
        let runtime = runtime.into();
        let abi_tag = abi_tag.into();
        Self {
            runtime_reported: runtime.clone(),
            interpreter_reported: abi_tag.clone(),
            runtime,
            toolkit,
            abi_tag,
        }
    }

    /// Build a context from versions as the runtime reports them.
    pub fn from_reported(
        runtime: &str,
        toolkit: Option<&str>,
        python_major: u32,
        python_minor: u32,
        interpreter: &str,
    ) -> Result<Self, ProbeError> {
        Ok(Self {
            runtime: compact_runtime_version(runtime)?,
            toolkit: ToolkitVersion::from_reported(toolkit)?,
            abi_tag: abi_tag(python_major, python_minor),
            runtime_reported: runtime.to_string(),
            interpreter_reported: interpreter.to_string(),
        })
    }
}

/// `2.5.1+cu128` -> `251`: drop the local label, then the dots.
pub fn compact_runtime_version(reported: &str) -> Result<String, ProbeError> {
    let public = reported.trim().split('+').next().unwrap_or_default();
    compact_version("runtime", public)
}

/// `cp{major}{minor}`.
pub fn abi_tag(major: u32, minor: u32) -> String {
    format!("cp{}{}", major, minor)
}

fn compact_version(field: &'static str, value: &str) -> Result<String, ProbeError> {
    let compact = value.replace('.', "");
    if compact.is_empty() || !compact.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ProbeError::MalformedVersion {
            field,
            value: value.to_string(),
        });
    }
    Ok(compact)
}
