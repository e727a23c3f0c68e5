// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while validating a build configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The configuration lists no extensions to build
    NoExtensions,
    /// An extension name appears more than once
    DuplicateExtension {
        /// The repeated extension name
        name: String,
    },
    /// An extension name is not a single, plain directory name
    InvalidExtensionName {
        /// The offending name
        name: String,
        /// Why the name was rejected
        reason: &'static str,
    },
    /// The builder program is empty
    EmptyBuilderProgram,
    /// The builder argument template never passes the project name
    MissingProjectPlaceholder {
        /// The template that was configured
        args: Vec<String>,
    },
    /// A local version tag prefix is empty or not ASCII alphanumeric
    InvalidTagPrefix {
        /// Which prefix, `toolkit_prefix` or `runtime_prefix`
        field: &'static str,
        /// The configured value
        value: String,
    },
    /// `--only` named an extension that is not configured
    UnknownExtension {
        /// The requested name
        name: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoExtensions => write!(f, "No extensions configured"),
            ValidationError::DuplicateExtension { name } => {
                write!(f, "Duplicate extension name: '{}'", name)
            }
            ValidationError::InvalidExtensionName { name, reason } => {
                write!(f, "Invalid extension name '{}': {}", name, reason)
            }
            ValidationError::EmptyBuilderProgram => {
                write!(f, "Builder program must not be empty")
            }
            ValidationError::MissingProjectPlaceholder { args } => {
                write!(
                    f,
                    "Builder arguments [{}] never reference {{project}}",
                    args.join(" ")
                )
            }
            ValidationError::InvalidTagPrefix { field, value } => {
                write!(
                    f,
                    "Invalid tag.{} '{}': must be non-empty ASCII letters and digits",
                    field, value
                )
            }
            ValidationError::UnknownExtension { name } => {
                write!(f, "Extension '{}' is not in the configured list", name)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML content did not match the configuration schema.
    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML content did not match the configuration schema.
    #[error("Invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension is neither YAML nor TOML.
    #[error("Unsupported config format for '{0}' (expected .yaml, .yml or .toml)")]
    UnsupportedFormat(PathBuf),

    /// The configuration parsed but is not usable.
    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),
}
