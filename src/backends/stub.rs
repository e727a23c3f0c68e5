// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Mutex;

use crate::traits::{BuildRequest, BuildStatus, WheelBuilder};

/// Scripted result of one stub build.
#[derive(Debug, Clone)]
pub struct StubBuild {
    pub exit_code: i32,
    /// Wheel files written into `{directory}/{project}/dist` before returning.
    pub wheels: Vec<String>,
}

impl StubBuild {
    pub fn produces<I, S>(wheels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            exit_code: 0,
            wheels: wheels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn fails(exit_code: i32) -> Self {
        Self {
            exit_code,
            wheels: Vec::new(),
        }
    }
}

/// A builder that records every request and plays back scripted results.
///
/// Projects without a script succeed without producing anything.
#[derive(Default)]
pub struct StubBuilder {
    scripts: HashMap<String, StubBuild>,
    calls: Mutex<Vec<String>>,
}

impl StubBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, project: &str, build: StubBuild) -> Self {
        self.scripts.insert(project.to_string(), build);
        self
    }

    /// Projects built so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl WheelBuilder for StubBuilder {
    async fn build(&self, request: BuildRequest<'_>) -> std::io::Result<BuildStatus> {
        self.calls.lock().unwrap().push(request.project.to_string());

        let build = self
            .scripts
            .get(request.project)
            .cloned()
            .unwrap_or_else(|| StubBuild::produces(Vec::<String>::new()));

        if !build.wheels.is_empty() {
            let dist = request.directory.join(request.project).join("dist");
            std::fs::create_dir_all(&dist)?;
            for wheel in &build.wheels {
                std::fs::write(dist.join(wheel), format!("wheel:{}", wheel))?;
            }
        }

        Ok(BuildStatus::from_code(build.exit_code))
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// A builder whose program can never be launched.
pub struct UnavailableBuilder;

#[async_trait::async_trait]
impl WheelBuilder for UnavailableBuilder {
    async fn build(&self, _request: BuildRequest<'_>) -> std::io::Result<BuildStatus> {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "program not found",
        ))
    }

    fn name(&self) -> &str {
        "missing-tool"
    }
}
