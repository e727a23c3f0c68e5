//! Configuration validation.
//!
//! Checks run in this order and stop at the first failure:
//!
//! 1. The extension list is non-empty
//! 2. Every name is a single plain directory name
//! 3. Names are unique
//! 4. The builder program is set and its arguments pass `{project}`
//! 5. Both tag prefixes are plain ASCII alphanumerics, so the rewritten
//!    version stays a single wheel name field
//!
//! Name checks come first so that a duplicate report never names a path
//! like `../CuMesh`.

use std::collections::HashSet;
use std::path::{Component, Path};

use crate::config::consts::PROJECT_PLACEHOLDER;
use crate::config::BuildConfig;
use crate::errors::ValidationError;

/// Validate a loaded configuration.
///
/// # Example
/// ```rust
/// use ext_wheel_builder::config::{validate_config, BuildConfig};
///
/// let mut cfg = BuildConfig::default();
/// assert!(validate_config(&cfg).is_ok());
///
/// cfg.extensions.push("CuMesh".to_string());
/// assert!(validate_config(&cfg).is_err());
/// ```
pub fn validate_config(cfg: &BuildConfig) -> Result<(), ValidationError> {
    if cfg.extensions.is_empty() {
        return Err(ValidationError::NoExtensions);
    }

    for name in &cfg.extensions {
        validate_extension_name(name)?;
    }

    let mut seen = HashSet::new();
    for name in &cfg.extensions {
        if !seen.insert(name.as_str()) {
            return Err(ValidationError::DuplicateExtension { name: name.clone() });
        }
    }

    if cfg.builder.program.trim().is_empty() {
        return Err(ValidationError::EmptyBuilderProgram);
    }

    if !cfg.builder.args.iter().any(|arg| arg.contains(PROJECT_PLACEHOLDER)) {
        return Err(ValidationError::MissingProjectPlaceholder {
            args: cfg.builder.args.clone(),
        });
    }

    validate_tag_prefix("toolkit_prefix", &cfg.tag.toolkit_prefix)?;
    validate_tag_prefix("runtime_prefix", &cfg.tag.runtime_prefix)?;

    Ok(())
}

fn validate_tag_prefix(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidTagPrefix {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn validate_extension_name(name: &str) -> Result<(), ValidationError> {
    let invalid = |reason| ValidationError::InvalidExtensionName {
        name: name.to_string(),
        reason,
    };

    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("name contains a path separator"));
    }

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid("name must be a plain directory name")),
    }
}
