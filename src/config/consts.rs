/// Extensions built when no configuration overrides the list, in build order
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["CuMesh", "FlexGEMM", "o-voxel"];
/// Directory under the root holding one project directory per extension
pub const EXTENSIONS_DIR_NAME: &str = "extensions";
/// Directory under the root receiving renamed wheels
pub const OUTPUT_DIR_NAME: &str = "wheels";
/// Directory inside each extension where the build tool writes wheels
pub const DIST_DIR_NAME: &str = "dist";
pub const WHEEL_EXTENSION: &str = "whl";

/// Leftover build directories removed before each build
pub const STALE_ARTIFACT_DIRS: [&str; 2] = ["build", DIST_DIR_NAME];
/// Suffix of leftover packaging metadata directories
pub const STALE_METADATA_SUFFIX: &str = ".egg-info";

/// Toolkit marker used when no acceleration toolkit is available
pub const CPU_TOOLKIT_SENTINEL: &str = "cpu";
pub const DEFAULT_TOOLKIT_PREFIX: &str = "cu";
pub const DEFAULT_RUNTIME_PREFIX: &str = "torch";

pub const DEFAULT_BUILD_PROGRAM: &str = "uv";
/// Argument template for the build tool; see `BuilderConfig::args`
pub const DEFAULT_BUILD_ARGS: [&str; 7] = [
    "build",
    "--no-build-isolation",
    "--wheel",
    "--directory",
    DIRECTORY_PLACEHOLDER,
    "--project",
    PROJECT_PLACEHOLDER,
];
pub const DIRECTORY_PLACEHOLDER: &str = "{directory}";
pub const PROJECT_PLACEHOLDER: &str = "{project}";
/// Environment applied to every build; lets setuptools use an already-activated MSVC toolchain
pub const DEFAULT_BUILD_ENV: [(&str, &str); 1] = [("DISTUTILS_USE_SDK", "1")];

pub const DEFAULT_PYTHON: &str = "python";

/// Process exit status when every extension was built
pub const EXIT_SUCCESS: i32 = 0;
/// Process exit status when at least one extension failed
pub const EXIT_BUILD_FAILURE: i32 = 1;
/// Process exit status when the run could not start at all
pub const EXIT_STARTUP_FAILURE: i32 = 2;
/// Configuration file picked up from the root when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "build-extensions.yaml";
