// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Wheel builder backed by an external command.
//!
//! The default invocation is
//! `uv build --no-build-isolation --wheel --directory extensions --project <name>`,
//! run from the parent of the extensions directory. The child inherits
//! stdout and stderr so compiler output shows up live; nothing is captured.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::config::consts::{DIRECTORY_PLACEHOLDER, PROJECT_PLACEHOLDER};
use crate::config::BuilderConfig;
use crate::observability::messages::orchestrator::BuilderInvoked;
use crate::observability::messages::StructuredLog;
use crate::traits::{BuildRequest, BuildStatus, WheelBuilder};

#[derive(Debug, Clone)]
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    env: BTreeMap<String, String>,
}

impl CommandBuilder {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            env: BTreeMap::new(),
        }
    }

    pub fn from_config(cfg: &BuilderConfig) -> Self {
        Self {
            program: cfg.program.clone(),
            args: cfg.args.clone(),
            env: cfg.env.clone(),
        }
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Substitute `{directory}` and `{project}` in the argument template.
    pub fn render_args(&self, request: BuildRequest<'_>) -> Vec<String> {
        let directory = relative_directory(request.directory, request.working_dir);
        self.args
            .iter()
            .map(|arg| {
                arg.replace(DIRECTORY_PLACEHOLDER, &directory)
                    .replace(PROJECT_PLACEHOLDER, request.project)
            })
            .collect()
    }
}

#[async_trait]
impl WheelBuilder for CommandBuilder {
    async fn build(&self, request: BuildRequest<'_>) -> std::io::Result<BuildStatus> {
        let args = self.render_args(request);

        BuilderInvoked {
            extension: request.project,
            program: &self.program,
            args: &args,
            working_dir: &request.working_dir.display().to_string(),
        }
        .log();

        let status = Command::new(&self.program)
            .args(&args)
            .current_dir(request.working_dir)
            .envs(&self.env)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        Ok(status.into())
    }

    fn name(&self) -> &str {
        &self.program
    }
}

// Paths inside the working directory are passed relative to it.
fn relative_directory(directory: &Path, working_dir: &Path) -> String {
    match directory.strip_prefix(working_dir) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => relative.to_string_lossy().into_owned(),
        Err(_) => directory.to_string_lossy().into_owned(),
    }
}
