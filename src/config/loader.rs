// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_BUILD_ARGS, DEFAULT_BUILD_ENV, DEFAULT_BUILD_PROGRAM, DEFAULT_EXTENSIONS,
    DEFAULT_PYTHON, DEFAULT_RUNTIME_PREFIX, DEFAULT_TOOLKIT_PREFIX, EXTENSIONS_DIR_NAME,
    OUTPUT_DIR_NAME,
};
use crate::config::validation::validate_config;
use crate::errors::{ConfigError, ValidationError};
use crate::observability::messages::config::ConfigLoaded;
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Complete configuration for an extension build run.
///
/// Every field has a default, so an empty file (or no file at all) builds
/// `CuMesh`, `FlexGEMM` and `o-voxel` from `extensions/` into `wheels/`
/// with `uv`.
///
/// # Fields
/// * `extensions` - Extension directory names, built in this order
/// * `extensions_dir` - Directory holding the extension projects, relative to the root
/// * `output_dir` - Directory receiving renamed wheels, relative to the root
/// * `clean` - Remove stale `build/`, `dist/` and `*.egg-info/` before building
/// * `artifact_policy` - What to do when a build leaves several wheels
/// * `builder` - External build tool invocation
/// * `probe` - How versions are detected
/// * `versions` - Pinned versions; when present the interpreter is not consulted
/// * `tag` - Prefixes used in the local version label
///
/// # Example
/// ```yaml
/// extensions: ["CuMesh", "FlexGEMM"]
/// artifact_policy: exactly_one
/// builder:
///   program: uv
///   env:
///     DISTUTILS_USE_SDK: "1"
/// versions:
///   runtime: "2.5.1"
///   toolkit: "12.8"
///   abi_tag: cp310
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    pub extensions: Vec<String>,
    pub extensions_dir: PathBuf,
    pub output_dir: PathBuf,
    pub clean: bool,
    pub artifact_policy: ArtifactPolicy,
    pub builder: BuilderConfig,
    pub probe: ProbeConfig,
    pub versions: Option<PinnedVersions>,
    pub tag: TagConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|name| name.to_string()).collect(),
            extensions_dir: PathBuf::from(EXTENSIONS_DIR_NAME),
            output_dir: PathBuf::from(OUTPUT_DIR_NAME),
            clean: true,
            artifact_policy: ArtifactPolicy::default(),
            builder: BuilderConfig::default(),
            probe: ProbeConfig::default(),
            versions: None,
            tag: TagConfig::default(),
        }
    }
}

impl BuildConfig {
    /// Keep only the named extensions, preserving configured order.
    pub fn restrict_to(&mut self, only: &[String]) -> Result<(), ValidationError> {
        if only.is_empty() {
            return Ok(());
        }
        if let Some(unknown) = only.iter().find(|name| !self.extensions.contains(name)) {
            return Err(ValidationError::UnknownExtension {
                name: unknown.clone(),
            });
        }
        self.extensions.retain(|name| only.contains(name));
        Ok(())
    }
}

/// Selection rule when a build leaves more than one wheel in `dist/`.
///
/// # Variants
/// * `First` - Take the first wheel by file name and warn about the rest
/// * `ExactlyOne` - Treat more than one wheel as a failed build
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactPolicy {
    #[default]
    First,
    ExactlyOne,
}

/// External build tool invocation.
///
/// `args` is a template: `{directory}` is replaced with the extensions
/// directory (relative to the working directory when possible) and
/// `{project}` with the extension name.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    pub program: String,
    pub args: Vec<String>,
    pub env: BTreeMap<String, String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_BUILD_PROGRAM.to_string(),
            args: DEFAULT_BUILD_ARGS.iter().map(|arg| arg.to_string()).collect(),
            env: DEFAULT_BUILD_ENV
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProbeConfig {
    /// Interpreter with the target PyTorch installed.
    pub python: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            python: DEFAULT_PYTHON.to_string(),
        }
    }
}

/// Versions fixed in configuration.
///
/// `runtime` and `toolkit` may be dotted (`2.5.1`, `12.8`) or compact.
/// A missing `toolkit`, or `cpu`, means no acceleration toolkit.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PinnedVersions {
    pub runtime: String,
    #[serde(default)]
    pub toolkit: Option<String>,
    pub abi_tag: String,
}

/// Prefixes of the local version label, `{toolkit_prefix}128.{runtime_prefix}251`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TagConfig {
    pub toolkit_prefix: String,
    pub runtime_prefix: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            toolkit_prefix: DEFAULT_TOOLKIT_PREFIX.to_string(),
            runtime_prefix: DEFAULT_RUNTIME_PREFIX.to_string(),
        }
    }
}

/// Load a config from a YAML or TOML file, chosen by extension.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BuildConfig, ConfigError> {
    let path = path.as_ref();
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let cfg = match format.as_deref() {
        Some("yaml") | Some("yml") => parse_yaml(&content)?,
        Some("toml") => toml::from_str(&content)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    ConfigLoaded {
        path: &path.display().to_string(),
        extension_count: cfg.extensions.len(),
    }
    .log();

    Ok(cfg)
}

/// Load a config and validate it before returning.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<BuildConfig, ConfigError> {
    let cfg = load_config(path)?;
    validate_config(&cfg)?;
    Ok(cfg)
}

// An empty YAML document means "all defaults".
fn parse_yaml(content: &str) -> Result<BuildConfig, ConfigError> {
    if content.trim().is_empty() {
        return Ok(BuildConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}
