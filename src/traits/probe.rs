use async_trait::async_trait;

use crate::errors::ProbeError;
use crate::probe::VersionContext;

/// Source of the version context shared by every extension build.
#[async_trait]
pub trait EnvironmentProbe: Send + Sync {
    async fn probe(&self) -> Result<VersionContext, ProbeError>;

    fn name(&self) -> &'static str;
}
