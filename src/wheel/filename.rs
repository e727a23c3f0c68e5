// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Wheel filename parsing and version rewriting.
//!
//! A wheel filename is treated as exactly five `-` separated fields:
//!
//! ```text
//! {package}-{version}-{python_tag}-{abi_tag}-{platform_tag}.whl
//! ```
//!
//! The last field keeps its file extension. Names with any other field count
//! (including wheels carrying an optional build tag) are not rewritten.

use std::fmt::{Display, Formatter};

const FIELD_DELIMITER: char = '-';
const FIELD_COUNT: usize = 5;

/// The five fields of a wheel filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelFilename {
    pub package: String,
    pub version: String,
    pub python_tag: String,
    pub abi_tag: String,
    /// Platform tag plus the file extension, e.g. `linux_x86_64.whl`.
    pub platform_tail: String,
}

impl WheelFilename {
    /// Parse a file name into its five fields.
    ///
    /// Returns `None` when the name does not split into exactly five
    /// non-empty fields.
    ///
    /// # Example
    /// ```
    /// use ext_wheel_builder::wheel::WheelFilename;
    ///
    /// let wheel = WheelFilename::parse("pkg-1.0.0-cp310-cp310-linux_x86_64.whl").unwrap();
    /// assert_eq!(wheel.version, "1.0.0");
    /// assert!(WheelFilename::parse("pkg-1.0.0.whl").is_none());
    /// ```
    pub fn parse(file_name: &str) -> Option<Self> {
        let fields: Vec<&str> = file_name.split(FIELD_DELIMITER).collect();
        if fields.len() != FIELD_COUNT || fields.iter().any(|field| field.is_empty()) {
            return None;
        }

        Some(Self {
            package: fields[0].to_string(),
            version: fields[1].to_string(),
            python_tag: fields[2].to_string(),
            abi_tag: fields[3].to_string(),
            platform_tail: fields[4].to_string(),
        })
    }

    /// Append `local_tag` to the version as a local version label.
    ///
    /// `1.0.0` becomes `1.0.0+{local_tag}`. A version that already has a local
    /// label keeps it and gains the tag as further dot-separated segments,
    /// so `1.0.0+abc` becomes `1.0.0+abc.{local_tag}`.
    pub fn with_local_version(&self, local_tag: &str) -> Self {
        let version = if self.version.contains('+') {
            format!("{}.{}", self.version, local_tag)
        } else {
            format!("{}+{}", self.version, local_tag)
        };

        Self {
            version,
            ..self.clone()
        }
    }
}

impl Display for WheelFilename {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}-{}",
            self.package, self.version, self.python_tag, self.abi_tag, self.platform_tail
        )
    }
}

/// Rewrite a wheel file name with a local version tag.
///
/// Returns `None` when the name cannot be parsed; callers copy such files
/// under their original name.
pub fn rewrite_wheel_name(file_name: &str, local_tag: &str) -> Option<String> {
    WheelFilename::parse(file_name).map(|wheel| wheel.with_local_version(local_tag).to_string())
}
