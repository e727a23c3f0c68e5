// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Sequential extension build orchestrator.
//!
//! For every configured extension, in list order and one at a time:
//!
//! 1. **Resolve** `{extensions_dir}/{name}`; a missing directory fails the
//!    extension without invoking the build tool
//! 2. **Clean** stale `build/`, `dist/` and `*.egg-info/` directories (best effort)
//! 3. **Build** through the [`WheelBuilder`], from the parent of the extensions directory
//! 4. **Locate** the wheel in `dist/` through the [`ArtifactLocator`]
//! 5. **Rename** the wheel so its version carries the toolkit and runtime tag
//! 6. **Copy** it into the output directory; the source wheel stays put
//!
//! A failure at any step is recorded against that extension only. Every
//! extension is attempted, and wheels copied earlier in the run are kept
//! whatever happens later.
//!
//! ## Artifact Selection
//!
//! The locator returns wheels sorted by file name. With
//! [`ArtifactPolicy::First`] the first one is used and a warning names how many
//! were found; with [`ArtifactPolicy::ExactlyOne`] more than one wheel fails
//! the extension.
//!
//! ## Concurrency
//!
//! None. Builds are awaited back to back with no timeout, since each one
//! already saturates the compiler and GPU toolchain.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

use crate::config::{ArtifactPolicy, BuildConfig};
use crate::engine::cleaner::clean_stale_artifacts;
use crate::engine::layout::BuildLayout;
use crate::engine::report::{BuildReport, BuiltWheel, ExtensionOutcome};
use crate::errors::ExtensionError;
use crate::observability::messages::orchestrator::{
    ArtifactRenamed, ExtensionBuildFailed, ExtensionBuildStarted, ExtensionBuildSucceeded,
    MultipleArtifactsFound, RunCompleted, RunStarted, UnparseableArtifactName,
};
use crate::observability::messages::StructuredLog;
use crate::probe::VersionContext;
use crate::traits::{ArtifactLocator, BuildRequest, WheelBuilder};
use crate::wheel::{rewrite_wheel_name, DistDirLocator, LocalVersionTag};

pub struct ExtensionOrchestrator {
    layout: BuildLayout,
    versions: VersionContext,
    builder: Arc<dyn WheelBuilder>,
    locator: Arc<dyn ArtifactLocator>,
    extensions: Vec<String>,
    policy: ArtifactPolicy,
    tag: LocalVersionTag,
    clean: bool,
}

impl ExtensionOrchestrator {
    /// Orchestrator over the default extension list with default policies.
    pub fn new(
        layout: BuildLayout,
        versions: VersionContext,
        builder: Arc<dyn WheelBuilder>,
    ) -> Self {
        Self::from_config(layout, &BuildConfig::default(), versions, builder)
    }

    pub fn from_config(
        layout: BuildLayout,
        cfg: &BuildConfig,
        versions: VersionContext,
        builder: Arc<dyn WheelBuilder>,
    ) -> Self {
        Self {
            layout,
            versions,
            builder,
            locator: Arc::new(DistDirLocator::default()),
            extensions: cfg.extensions.clone(),
            policy: cfg.artifact_policy,
            tag: LocalVersionTag::from(&cfg.tag),
            clean: cfg.clean,
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_locator(mut self, locator: Arc<dyn ArtifactLocator>) -> Self {
        self.locator = locator;
        self
    }

    pub fn with_policy(mut self, policy: ArtifactPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub fn layout(&self) -> &BuildLayout {
        &self.layout
    }

    /// The label appended to every wheel version in this run.
    pub fn local_version_tag(&self) -> String {
        self.tag.render(&self.versions)
    }

    pub async fn run(&self) -> std::io::Result<BuildReport> {
        self.run_with(|_| {}).await
    }

    /// Build every extension, calling `on_start` before each one.
    ///
    /// Only preparing the output directory can fail the run as a whole;
    /// everything after that is recorded per extension.
    pub async fn run_with<F>(&self, mut on_start: F) -> std::io::Result<BuildReport>
    where
        F: FnMut(&ExtensionBuildStarted<'_>),
    {
        let started = Instant::now();
        tokio::fs::create_dir_all(&self.layout.output_dir).await?;

        let output_dir = self.layout.output_dir.display().to_string();
        let run = RunStarted {
            extension_count: self.extensions.len(),
            output_dir: &output_dir,
        };
        run.log();
        let run_span = run.span("run");

        let mut outcomes = Vec::with_capacity(self.extensions.len());
        for (index, name) in self.extensions.iter().enumerate() {
            let start = ExtensionBuildStarted {
                extension: name,
                position: index + 1,
                total: self.extensions.len(),
            };
            on_start(&start);
            start.log();

            let span = run_span.in_scope(|| start.span("extension"));
            let outcome = self.build_extension(name).instrument(span).await;
            outcomes.push(outcome);
        }

        let report = BuildReport {
            outcomes,
            duration: started.elapsed(),
        };
        RunCompleted {
            succeeded: report.succeeded(),
            total: report.total(),
            duration: report.duration,
        }
        .log();

        Ok(report)
    }

    /// Run all six steps for a single extension.
    pub async fn build_extension(&self, name: &str) -> ExtensionOutcome {
        let started = Instant::now();
        let result = self.try_build(name).await;

        match &result {
            Ok(wheel) => ExtensionBuildSucceeded {
                extension: name,
                wheel: &wheel.file_name(),
                duration: started.elapsed(),
            }
            .log(),
            Err(error) => ExtensionBuildFailed {
                extension: name,
                error,
            }
            .log(),
        }

        ExtensionOutcome {
            name: name.to_string(),
            result,
        }
    }

    async fn try_build(&self, name: &str) -> Result<BuiltWheel, ExtensionError> {
        let extension_dir = self.layout.extension_dir(name);
        if !extension_dir.is_dir() {
            return Err(ExtensionError::MissingDirectory(extension_dir));
        }

        if self.clean {
            clean_stale_artifacts(&extension_dir);
        }

        let request = BuildRequest {
            project: name,
            directory: &self.layout.extensions_dir,
            working_dir: self.layout.working_dir(),
        };
        let status = self
            .builder
            .build(request)
            .await
            .map_err(|source| ExtensionError::BuilderUnavailable {
                program: self.builder.name().to_string(),
                source,
            })?;
        if !status.success() {
            return Err(ExtensionError::BuildFailed {
                name: name.to_string(),
                status,
            });
        }

        let artifact = self.select_artifact(name, &self.layout.dist_dir(name))?;
        self.copy_artifact(&artifact).await
    }

    fn select_artifact(&self, name: &str, dist_dir: &Path) -> Result<PathBuf, ExtensionError> {
        let mut artifacts = self
            .locator
            .artifacts(dist_dir)
            .map_err(|source| ExtensionError::Io {
                path: dist_dir.to_path_buf(),
                source,
            })?;

        match (artifacts.len(), self.policy) {
            (0, _) => Err(ExtensionError::NoArtifact(dist_dir.to_path_buf())),
            (1, _) => Ok(artifacts.remove(0)),
            (count, ArtifactPolicy::ExactlyOne) => Err(ExtensionError::AmbiguousArtifacts {
                dist_dir: dist_dir.to_path_buf(),
                count,
            }),
            (count, ArtifactPolicy::First) => {
                let chosen = artifacts.remove(0);
                MultipleArtifactsFound {
                    extension: name,
                    count,
                    chosen: &file_name_of(&chosen),
                }
                .log();
                Ok(chosen)
            }
        }
    }

    async fn copy_artifact(&self, source: &Path) -> Result<BuiltWheel, ExtensionError> {
        let original = file_name_of(source);
        let renamed = rewrite_wheel_name(&original, &self.local_version_tag());

        let file_name = match &renamed {
            Some(new_name) => {
                ArtifactRenamed {
                    original: &original,
                    renamed: new_name,
                }
                .log();
                new_name.clone()
            }
            None => {
                UnparseableArtifactName {
                    file_name: &original,
                }
                .log();
                original.clone()
            }
        };

        let destination = self.layout.output_dir.join(&file_name);
        tokio::fs::copy(source, &destination)
            .await
            .map_err(|source| ExtensionError::Io {
                path: destination.clone(),
                source,
            })?;

        Ok(BuiltWheel {
            source: source.to_path_buf(),
            destination,
            renamed: renamed.is_some(),
        })
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
