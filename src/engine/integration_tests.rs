use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use crate::backends::stub::{StubBuild, StubBuilder, UnavailableBuilder};
use crate::config::{ArtifactPolicy, BuildConfig};
use crate::engine::{BuildLayout, ExtensionOrchestrator};
use crate::errors::ExtensionError;
use crate::probe::{ToolkitVersion, VersionContext};
use crate::traits::BuildStatus;
use crate::wheel::list_wheels;

/// Integration tests for the orchestrator using the stub builder
#[cfg(test)]
mod tests {
    use super::*;

    const CUMESH_WHEEL: &str = "cumesh-0.0.1-cp310-cp310-linux_x86_64.whl";
    const FLEXGEMM_WHEEL: &str = "flex_gemm-0.0.1-cp310-cp310-linux_x86_64.whl";
    const OVOXEL_WHEEL: &str = "o_voxel-0.0.1-cp310-cp310-linux_x86_64.whl";

    fn cuda_versions() -> VersionContext {
        VersionContext::new("251", ToolkitVersion::cuda("128"), "cp310")
    }

    /// Root with `extensions/{name}` created for each given name.
    fn workspace(extensions: &[&str]) -> TempDir {
        let root = TempDir::new().unwrap();
        for name in extensions {
            std::fs::create_dir_all(root.path().join("extensions").join(name)).unwrap();
        }
        root
    }

    fn orchestrator(root: &Path, builder: Arc<StubBuilder>) -> ExtensionOrchestrator {
        let layout = BuildLayout::from_config(root, &BuildConfig::default());
        ExtensionOrchestrator::new(layout, cuda_versions(), builder)
    }

    fn single_wheel_builder() -> StubBuilder {
        StubBuilder::new().script("CuMesh", StubBuild::produces([CUMESH_WHEEL]))
    }

    fn all_three_succeed() -> StubBuilder {
        StubBuilder::new()
            .script("CuMesh", StubBuild::produces([CUMESH_WHEEL]))
            .script("FlexGEMM", StubBuild::produces([FLEXGEMM_WHEEL]))
            .script("o-voxel", StubBuild::produces([OVOXEL_WHEEL]))
    }

    #[tokio::test]
    async fn test_builds_all_extensions_in_order() {
        let root = workspace(&["CuMesh", "FlexGEMM", "o-voxel"]);
        let builder = Arc::new(all_three_succeed());

        let report = orchestrator(root.path(), builder.clone()).run().await.unwrap();

        assert_eq!(builder.calls(), vec!["CuMesh", "FlexGEMM", "o-voxel"]);
        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.exit_code(), 0);

        let names: Vec<_> = report.outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["CuMesh", "FlexGEMM", "o-voxel"]);

        assert_eq!(
            list_wheels(&root.path().join("wheels")).unwrap(),
            vec![
                "cumesh-0.0.1+cu128.torch251-cp310-cp310-linux_x86_64.whl",
                "flex_gemm-0.0.1+cu128.torch251-cp310-cp310-linux_x86_64.whl",
                "o_voxel-0.0.1+cu128.torch251-cp310-cp310-linux_x86_64.whl",
            ]
        );
    }

    #[tokio::test]
    async fn test_rename_matches_expected_format() {
        let root = workspace(&["CuMesh"]);
        let builder = Arc::new(
            StubBuilder::new()
                .script("CuMesh", StubBuild::produces(["pkg-1.0.0-cp310-cp310-linux_x86_64.whl"])),
        );

        let report = orchestrator(root.path(), builder)
            .with_extensions(["CuMesh"])
            .run()
            .await
            .unwrap();

        let wheel = report.outcomes[0].result.as_ref().unwrap();
        assert!(wheel.renamed);
        assert_eq!(
            wheel.file_name(),
            "pkg-1.0.0+cu128.torch251-cp310-cp310-linux_x86_64.whl"
        );
    }

    #[tokio::test]
    async fn test_missing_directory_skips_builder() {
        let root = workspace(&["CuMesh", "o-voxel"]);
        let builder = Arc::new(all_three_succeed());

        let report = orchestrator(root.path(), builder.clone()).run().await.unwrap();

        assert_eq!(builder.calls(), vec!["CuMesh", "o-voxel"]);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.exit_code(), 1);

        let failures: Vec<_> = report.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "FlexGEMM");
        assert!(matches!(failures[0].1, ExtensionError::MissingDirectory(_)));
    }

    #[tokio::test]
    async fn test_build_failure_does_not_stop_the_run() {
        let root = workspace(&["CuMesh", "FlexGEMM", "o-voxel"]);
        let builder = Arc::new(
            all_three_succeed().script("CuMesh", StubBuild::fails(1)),
        );

        let report = orchestrator(root.path(), builder.clone()).run().await.unwrap();

        assert_eq!(builder.calls(), vec!["CuMesh", "FlexGEMM", "o-voxel"]);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.exit_code(), 1);
        match &report.outcomes[0].result {
            Err(ExtensionError::BuildFailed { name, status }) => {
                assert_eq!(name, "CuMesh");
                assert_eq!(*status, BuildStatus::from_code(1));
            }
            other => panic!("Expected BuildFailed, got {:?}", other),
        }
        // Later successes are still copied.
        assert_eq!(list_wheels(&root.path().join("wheels")).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_no_artifact_is_a_failure() {
        let root = workspace(&["CuMesh"]);
        let builder = Arc::new(StubBuilder::new());

        let report = orchestrator(root.path(), builder)
            .with_extensions(["CuMesh"])
            .run()
            .await
            .unwrap();

        assert!(matches!(
            report.outcomes[0].result,
            Err(ExtensionError::NoArtifact(_))
        ));
        assert_eq!(report.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_builder_is_a_failure() {
        let root = workspace(&["CuMesh", "FlexGEMM"]);
        let layout = BuildLayout::from_config(root.path(), &BuildConfig::default());

        let builder = Arc::new(UnavailableBuilder);
        let report = ExtensionOrchestrator::new(layout, cuda_versions(), builder)
            .with_extensions(["CuMesh", "FlexGEMM"])
            .run()
            .await
            .unwrap();

        assert_eq!(report.succeeded(), 0);
        for outcome in &report.outcomes {
            match &outcome.result {
                Err(ExtensionError::BuilderUnavailable { program, .. }) => {
                    assert_eq!(program, "missing-tool")
                }
                other => panic!("Expected BuilderUnavailable, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_unparseable_name_copied_verbatim() {
        let root = workspace(&["CuMesh"]);
        let builder = Arc::new(
            StubBuilder::new().script("CuMesh", StubBuild::produces(["cumesh-0.1.whl"])),
        );

        let report = orchestrator(root.path(), builder)
            .with_extensions(["CuMesh"])
            .run()
            .await
            .unwrap();

        let wheel = report.outcomes[0].result.as_ref().unwrap();
        assert!(!wheel.renamed);
        assert_eq!(wheel.file_name(), "cumesh-0.1.whl");

        let source = std::fs::read(&wheel.source).unwrap();
        let copied = std::fs::read(root.path().join("wheels").join("cumesh-0.1.whl")).unwrap();
        assert_eq!(source, copied);
        assert_eq!(report.exit_code(), 0);
    }

    #[tokio::test]
    async fn test_cpu_marker_without_toolkit() {
        let root = workspace(&["CuMesh"]);
        let builder = Arc::new(single_wheel_builder());
        let layout = BuildLayout::from_config(root.path(), &BuildConfig::default());
        let versions = VersionContext::new("251", ToolkitVersion::Cpu, "cp310");

        let orchestrator = ExtensionOrchestrator::new(layout, versions, builder)
            .with_extensions(["CuMesh"]);
        assert_eq!(orchestrator.local_version_tag(), "cucpu.torch251");

        let report = orchestrator.run().await.unwrap();
        assert_eq!(
            report.outcomes[0].result.as_ref().unwrap().file_name(),
            "cumesh-0.0.1+cucpu.torch251-cp310-cp310-linux_x86_64.whl"
        );
    }

    #[tokio::test]
    async fn test_output_dir_created_and_unrelated_files_kept() {
        let root = workspace(&["CuMesh", "FlexGEMM", "o-voxel"]);
        let builder = Arc::new(all_three_succeed());
        let output = root.path().join("wheels");
        assert!(!output.exists());

        orchestrator(root.path(), builder.clone()).run().await.unwrap();
        assert!(output.is_dir());

        std::fs::write(output.join("README.txt"), b"keep me").unwrap();
        std::fs::write(output.join("other-1.0-py3-none-any.whl"), b"unrelated").unwrap();

        orchestrator(root.path(), builder).run().await.unwrap();

        assert_eq!(std::fs::read(output.join("README.txt")).unwrap(), b"keep me");
        assert_eq!(
            std::fs::read(output.join("other-1.0-py3-none-any.whl")).unwrap(),
            b"unrelated"
        );
        assert_eq!(list_wheels(&output).unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_source_wheel_is_copied_not_moved() {
        let root = workspace(&["CuMesh"]);
        let builder = Arc::new(single_wheel_builder());

        let report = orchestrator(root.path(), builder)
            .with_extensions(["CuMesh"])
            .run()
            .await
            .unwrap();

        let wheel = report.outcomes[0].result.as_ref().unwrap();
        assert!(wheel.source.is_file());
        assert!(wheel.destination.is_file());
        assert_eq!(
            wheel.source,
            root.path().join("extensions/CuMesh/dist").join(CUMESH_WHEEL)
        );
    }

    #[tokio::test]
    async fn test_multiple_wheels_first_by_name() {
        let root = workspace(&["CuMesh"]);
        let builder = Arc::new(StubBuilder::new().script(
            "CuMesh",
            StubBuild::produces([
                "cumesh-0.0.2-cp310-cp310-linux_x86_64.whl",
                "cumesh-0.0.1-cp310-cp310-linux_x86_64.whl",
            ]),
        ));

        let report = orchestrator(root.path(), builder)
            .with_extensions(["CuMesh"])
            .with_policy(ArtifactPolicy::First)
            .run()
            .await
            .unwrap();

        assert_eq!(
            report.outcomes[0].result.as_ref().unwrap().file_name(),
            "cumesh-0.0.1+cu128.torch251-cp310-cp310-linux_x86_64.whl"
        );
    }

    #[tokio::test]
    async fn test_multiple_wheels_rejected_when_exactly_one_required() {
        let root = workspace(&["CuMesh"]);
        let builder = Arc::new(StubBuilder::new().script(
            "CuMesh",
            StubBuild::produces([CUMESH_WHEEL, "cumesh-0.0.1-py3-none-any.whl"]),
        ));

        let report = orchestrator(root.path(), builder)
            .with_extensions(["CuMesh"])
            .with_policy(ArtifactPolicy::ExactlyOne)
            .run()
            .await
            .unwrap();

        assert!(matches!(
            report.outcomes[0].result,
            Err(ExtensionError::AmbiguousArtifacts { count: 2, .. })
        ));
        assert!(list_wheels(&root.path().join("wheels")).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_stale_dist_cleaned_before_build() {
        let root = workspace(&["CuMesh"]);
        let ext = root.path().join("extensions/CuMesh");
        std::fs::create_dir_all(ext.join("dist")).unwrap();
        std::fs::create_dir_all(ext.join("cumesh.egg-info")).unwrap();
        std::fs::write(ext.join("dist").join(CUMESH_WHEEL), b"stale").unwrap();

        // The build produces nothing, so only a leftover wheel could be found.
        let builder = Arc::new(StubBuilder::new());
        let report = orchestrator(root.path(), builder)
            .with_extensions(["CuMesh"])
            .run()
            .await
            .unwrap();

        assert!(matches!(
            report.outcomes[0].result,
            Err(ExtensionError::NoArtifact(_))
        ));
        assert!(!ext.join("cumesh.egg-info").exists());
    }

    #[tokio::test]
    async fn test_clean_disabled_keeps_existing_dist() {
        let root = workspace(&["CuMesh"]);
        let dist = root.path().join("extensions/CuMesh/dist");
        std::fs::create_dir_all(&dist).unwrap();
        std::fs::write(dist.join(CUMESH_WHEEL), b"prebuilt").unwrap();

        let builder = Arc::new(StubBuilder::new());
        let report = orchestrator(root.path(), builder)
            .with_extensions(["CuMesh"])
            .with_clean(false)
            .run()
            .await
            .unwrap();

        assert!(report.all_succeeded());
    }

    #[tokio::test]
    async fn test_on_start_called_once_per_extension() {
        let root = workspace(&["CuMesh", "FlexGEMM", "o-voxel"]);
        let builder = Arc::new(all_three_succeed());
        let mut seen = Vec::new();

        orchestrator(root.path(), builder)
            .run_with(|start| seen.push((start.position, start.total, start.extension.to_string())))
            .await
            .unwrap();

        assert_eq!(
            seen,
            vec![
                (1, 3, "CuMesh".to_string()),
                (2, 3, "FlexGEMM".to_string()),
                (3, 3, "o-voxel".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_builder_receives_extensions_dir_and_parent_cwd() {
        use crate::traits::{BuildRequest, WheelBuilder};
        use std::sync::Mutex;

        struct CapturingBuilder(Mutex<Vec<(String, std::path::PathBuf, std::path::PathBuf)>>);

        #[async_trait::async_trait]
        impl WheelBuilder for CapturingBuilder {
            async fn build(&self, request: BuildRequest<'_>) -> std::io::Result<BuildStatus> {
                self.0.lock().unwrap().push((
                    request.project.to_string(),
                    request.directory.to_path_buf(),
                    request.working_dir.to_path_buf(),
                ));
                Ok(BuildStatus::from_code(1))
            }

            fn name(&self) -> &str {
                "capturing"
            }
        }

        let root = workspace(&["FlexGEMM"]);
        let builder = Arc::new(CapturingBuilder(Mutex::new(Vec::new())));
        let layout = BuildLayout::from_config(root.path(), &BuildConfig::default());

        ExtensionOrchestrator::new(layout, cuda_versions(), builder.clone())
            .with_extensions(["FlexGEMM"])
            .run()
            .await
            .unwrap();

        let calls = builder.0.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "FlexGEMM");
        assert_eq!(calls[0].1, root.path().join("extensions"));
        assert_eq!(calls[0].2, root.path());
    }

    #[tokio::test]
    async fn test_locator_error_is_a_failure() {
        use crate::traits::ArtifactLocator;

        struct BrokenLocator;

        impl ArtifactLocator for BrokenLocator {
            fn artifacts(&self, _dist_dir: &Path) -> std::io::Result<Vec<std::path::PathBuf>> {
                Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"))
            }
        }

        let root = workspace(&["CuMesh", "FlexGEMM"]);
        let builder = Arc::new(all_three_succeed());

        let report = orchestrator(root.path(), builder.clone())
            .with_extensions(["CuMesh", "FlexGEMM"])
            .with_locator(Arc::new(BrokenLocator))
            .run()
            .await
            .unwrap();

        assert_eq!(builder.calls(), vec!["CuMesh", "FlexGEMM"]);
        assert!(report
            .outcomes
            .iter()
            .all(|o| matches!(o.result, Err(ExtensionError::Io { .. }))));
    }

    #[tokio::test]
    async fn test_copy_failure_is_a_failure_and_run_continues() {
        let root = workspace(&["CuMesh", "FlexGEMM"]);
        let builder = Arc::new(all_three_succeed());

        let blocked = root
            .path()
            .join("wheels")
            .join("cumesh-0.0.1+cu128.torch251-cp310-cp310-linux_x86_64.whl");
        std::fs::create_dir_all(&blocked).unwrap();

        let report = orchestrator(root.path(), builder.clone())
            .with_extensions(["CuMesh", "FlexGEMM"])
            .run()
            .await
            .unwrap();

        assert_eq!(builder.calls(), vec!["CuMesh", "FlexGEMM"]);
        match &report.outcomes[0].result {
            Err(ExtensionError::Io { path, .. }) => assert_eq!(path, &blocked),
            other => panic!("Expected Io, got {:?}", other),
        }
        assert_eq!(
            report.outcomes[1].result.as_ref().unwrap().file_name(),
            "flex_gemm-0.0.1+cu128.torch251-cp310-cp310-linux_x86_64.whl"
        );
        assert!(blocked.is_dir());
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.exit_code(), 1);
    }
}
