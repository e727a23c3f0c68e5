use async_trait::async_trait;

use crate::config::PinnedVersions;
use crate::errors::ProbeError;
use crate::observability::messages::probe::VersionsDetected;
use crate::observability::messages::StructuredLog;
use crate::probe::{compact_runtime_version, ToolkitVersion, VersionContext};
use crate::traits::EnvironmentProbe;

/// Returns versions fixed in configuration instead of asking an interpreter.
#[derive(Debug, Clone)]
pub struct PinnedProbe {
    pinned: PinnedVersions,
}

impl PinnedProbe {
    pub fn new(pinned: PinnedVersions) -> Self {
        Self { pinned }
    }
}

#[async_trait]
impl EnvironmentProbe for PinnedProbe {
    async fn probe(&self) -> Result<VersionContext, ProbeError> {
        let versions = VersionContext {
            runtime: compact_runtime_version(&self.pinned.runtime)?,
            toolkit: ToolkitVersion::from_reported(self.pinned.toolkit.as_deref())?,
            abi_tag: self.pinned.abi_tag.clone(),
            runtime_reported: self.pinned.runtime.clone(),
            interpreter_reported: self.pinned.abi_tag.clone(),
        };

        VersionsDetected {
            source: self.name(),
            versions: &versions,
        }
        .log();
        Ok(versions)
    }

    fn name(&self) -> &'static str {
        "pinned"
    }
}
