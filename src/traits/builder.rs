use async_trait::async_trait;
use std::fmt;
use std::path::Path;

/// One invocation of the external build tool.
#[derive(Debug, Clone, Copy)]
pub struct BuildRequest<'a> {
    /// Extension (project) name, e.g. `FlexGEMM`.
    pub project: &'a str,
    /// Directory holding all extension projects.
    pub directory: &'a Path,
    /// Working directory for the tool, the parent of `directory`.
    pub working_dir: &'a Path,
}

/// Exit status of a finished build tool process.
///
/// `code` is `None` when the process was terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildStatus {
    pub code: Option<i32>,
}

impl BuildStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for BuildStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

/// The external tool that turns an extension project into a wheel.
///
/// Build output is expected to go straight to the console. An `Err` means
/// the tool could not be run at all; a finished run, successful or not, is
/// reported through [`BuildStatus`].
#[async_trait]
pub trait WheelBuilder: Send + Sync {
    async fn build(&self, request: BuildRequest<'_>) -> std::io::Result<BuildStatus>;

    /// Program name used in diagnostics.
    fn name(&self) -> &str;
}
