pub mod builder;
pub mod locator;
pub mod probe;

pub use builder::{BuildRequest, BuildStatus, WheelBuilder};
pub use locator::ArtifactLocator;
pub use probe::EnvironmentProbe;
