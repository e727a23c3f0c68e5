use std::path::PathBuf;
use std::time::Duration;

use crate::config::consts::{EXIT_BUILD_FAILURE, EXIT_SUCCESS};
use crate::errors::ExtensionError;

/// A wheel that made it into the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltWheel {
    /// Wheel as produced in the extension's `dist/`; left in place.
    pub source: PathBuf,
    pub destination: PathBuf,
    /// False when the name could not be parsed and was kept as-is.
    pub renamed: bool,
}

impl BuiltWheel {
    pub fn file_name(&self) -> String {
        self.destination
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

#[derive(Debug)]
pub struct ExtensionOutcome {
    pub name: String,
    pub result: Result<BuiltWheel, ExtensionError>,
}

impl ExtensionOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Tally of one run, outcomes in build order.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub outcomes: Vec<ExtensionOutcome>,
    pub duration: Duration,
}

impl BuildReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.succeeded()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &ExtensionError)> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err().map(|e| (outcome.name.as_str(), e)))
    }

    pub fn all_succeeded(&self) -> bool {
        self.succeeded() == self.total()
    }

    /// 0 only when every attempted extension succeeded.
    pub fn exit_code(&self) -> i32 {
        if self.all_succeeded() {
            EXIT_SUCCESS
        } else {
            EXIT_BUILD_FAILURE
        }
    }
}
