use crate::config::TagConfig;
use crate::probe::VersionContext;

/// Formats the local version label appended to every wheel version.
///
/// `{toolkit_prefix}{toolkit}.{runtime_prefix}{runtime}`, for example
/// `cu128.torch251`, or `cucpu.torch251` on a machine without CUDA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalVersionTag {
    toolkit_prefix: String,
    runtime_prefix: String,
}

impl LocalVersionTag {
    pub fn new(toolkit_prefix: impl Into<String>, runtime_prefix: impl Into<String>) -> Self {
        Self {
            toolkit_prefix: toolkit_prefix.into(),
            runtime_prefix: runtime_prefix.into(),
        }
    }

    pub fn render(&self, versions: &VersionContext) -> String {
        format!(
            "{}{}.{}{}",
            self.toolkit_prefix, versions.toolkit, self.runtime_prefix, versions.runtime
        )
    }
}

impl Default for LocalVersionTag {
    fn default() -> Self {
        Self::from(&TagConfig::default())
    }
}

impl From<&TagConfig> for LocalVersionTag {
    fn from(cfg: &TagConfig) -> Self {
        Self::new(cfg.toolkit_prefix.clone(), cfg.runtime_prefix.clone())
    }
}
