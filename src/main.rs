// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use ext_wheel_builder::backends::CommandBuilder;
use ext_wheel_builder::config::consts::{DEFAULT_CONFIG_FILE, EXIT_STARTUP_FAILURE};
use ext_wheel_builder::config::{load_and_validate_config, validate_config, BuildConfig};
use ext_wheel_builder::engine::{BuildLayout, BuildReport, ExtensionOrchestrator};
use ext_wheel_builder::observability::messages::orchestrator::ExtensionBuildStarted;
use ext_wheel_builder::probe::{PinnedProbe, PythonProbe, VersionContext};
use ext_wheel_builder::traits::EnvironmentProbe;
use ext_wheel_builder::wheel::list_wheels;

const BANNER_WIDTH: usize = 60;

#[derive(Parser)]
#[command(name = "build-extensions")]
#[command(about = "Build extension wheels tagged with their CUDA and PyTorch versions")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    /// Directory containing `extensions/`. Defaults to the current directory.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Configuration file (.yaml, .yml or .toml).
    /// Defaults to `<root>/build-extensions.yaml` when present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Python interpreter used to detect the PyTorch and CUDA versions
    #[arg(long)]
    python: Option<String>,

    /// Build only this extension (repeatable); configured order is kept
    #[arg(long = "only", value_name = "NAME")]
    only: Vec<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(cli.log_level).into())
                .from_env_lossy(),
        )
        .with_target(false)
        .init();

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("ERROR: {:#}", e);
            EXIT_STARTUP_FAILURE
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<i32> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir().context("cannot determine the current directory")?,
    };

    let mut cfg = load_build_config(&root, cli.config.as_deref())?;
    if let Some(python) = cli.python {
        cfg.probe.python = python;
    }
    cfg.restrict_to(&cli.only)?;

    let probe: Box<dyn EnvironmentProbe> = match &cfg.versions {
        Some(pinned) => Box::new(PinnedProbe::new(pinned.clone())),
        None => Box::new(PythonProbe::new(&cfg.probe.python)),
    };
    let versions = probe
        .probe()
        .await
        .with_context(|| format!("failed to detect versions with the {} probe", probe.name()))?;

    let layout = BuildLayout::from_config(&root, &cfg);
    print_header(&versions, &layout);

    let builder = Arc::new(CommandBuilder::from_config(&cfg.builder));
    let orchestrator = ExtensionOrchestrator::from_config(layout, &cfg, versions, builder);

    let report = orchestrator
        .run_with(print_banner)
        .await
        .with_context(|| {
            format!(
                "cannot create output directory {}",
                orchestrator.layout().output_dir.display()
            )
        })?;

    print_summary(&report, &orchestrator.layout().output_dir);
    Ok(report.exit_code())
}

fn load_build_config(root: &Path, explicit: Option<&Path>) -> Result<BuildConfig> {
    let discovered = root.join(DEFAULT_CONFIG_FILE);
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if discovered.is_file() => Some(discovered),
        None => None,
    };

    match path {
        Some(path) => load_and_validate_config(&path)
            .with_context(|| format!("invalid configuration {}", path.display())),
        None => {
            let cfg = BuildConfig::default();
            validate_config(&cfg)?;
            Ok(cfg)
        }
    }
}

fn print_header(versions: &VersionContext, layout: &BuildLayout) {
    println!("Extension Wheel Builder");
    println!("{}", "═".repeat(BANNER_WIDTH));
    println!("PyTorch version: {}", versions.runtime_reported);
    if versions.toolkit.is_cpu() {
        println!("CUDA version: none (CPU-only build)");
    } else {
        println!("CUDA version: {}", versions.toolkit.reported());
    }
    println!("Python version: {}", versions.interpreter_reported);
    println!("Output directory: {}", layout.output_dir.display());
}

fn print_banner(start: &ExtensionBuildStarted<'_>) {
    println!("\n{}", "═".repeat(BANNER_WIDTH));
    println!("{}", start);
    println!("{}", "═".repeat(BANNER_WIDTH));
}

fn print_summary(report: &BuildReport, output_dir: &Path) {
    println!("\n{}", "═".repeat(BANNER_WIDTH));
    println!(
        "Build complete: {}/{} extensions built successfully",
        report.succeeded(),
        report.total()
    );
    println!("Wheels saved to: {}", output_dir.display());
    println!("{}", "═".repeat(BANNER_WIDTH));

    let failures: Vec<_> = report.failures().collect();
    if !failures.is_empty() {
        println!("\nFailed:");
        for (name, error) in failures {
            println!("  {}: {}", name, error);
        }
    }

    println!("\nBuilt wheels:");
    match list_wheels(output_dir) {
        Ok(wheels) => {
            for wheel in wheels {
                println!("  {}", wheel);
            }
        }
        Err(e) => eprintln!("  (cannot list {}: {})", output_dir.display(), e),
    }
}
