// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::errors::ProbeError;
use crate::observability::messages::probe::{ProbeFailed, VersionsDetected};
use crate::observability::messages::StructuredLog;
use crate::probe::VersionContext;
use crate::traits::EnvironmentProbe;

/// Inline script run by the interpreter; prints one JSON object on stdout.
pub const PROBE_SCRIPT: &str = r#"import json, sys
import torch
print(json.dumps({
    "torch_version": torch.__version__,
    "cuda_version": torch.version.cuda,
    "python_major": sys.version_info.major,
    "python_minor": sys.version_info.minor,
    "python_version": sys.version.split()[0],
}))"#;

/// What the probe script reports.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ProbeReport {
    pub torch_version: String,
    pub cuda_version: Option<String>,
    pub python_major: u32,
    pub python_minor: u32,
    pub python_version: String,
}

impl ProbeReport {
    /// Parse the last non-empty stdout line; anything printed earlier
    /// (import-time chatter) is ignored.
    pub fn from_stdout(stdout: &str) -> Result<Self, ProbeError> {
        let line = stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .unwrap_or_default();
        Ok(serde_json::from_str(line)?)
    }

    pub fn into_context(self) -> Result<VersionContext, ProbeError> {
        VersionContext::from_reported(
            &self.torch_version,
            self.cuda_version.as_deref(),
            self.python_major,
            self.python_minor,
            &self.python_version,
        )
    }
}

/// Detects versions by running [`PROBE_SCRIPT`] with a Python interpreter.
#[derive(Debug, Clone)]
pub struct PythonProbe {
    interpreter: String,
}

impl PythonProbe {
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    async fn run_script(&self) -> Result<VersionContext, ProbeError> {
        let output = Command::new(&self.interpreter)
            .arg("-c")
            .arg(PROBE_SCRIPT)
            .output()
            .await
            .map_err(|source| ProbeError::Spawn {
                interpreter: self.interpreter.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProbeError::NonZeroExit {
                interpreter: self.interpreter.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        ProbeReport::from_stdout(&String::from_utf8_lossy(&output.stdout))?.into_context()
    }
}

#[async_trait]
impl EnvironmentProbe for PythonProbe {
    async fn probe(&self) -> Result<VersionContext, ProbeError> {
        match self.run_script().await {
            Ok(versions) => {
                VersionsDetected {
                    source: self.name(),
                    versions: &versions,
                }
                .log();
                Ok(versions)
            }
            Err(error) => {
                ProbeFailed {
                    source: self.name(),
                    error: &error,
                }
                .log();
                Err(error)
            }
        }
    }

    fn name(&self) -> &'static str {
        "python"
    }
}
