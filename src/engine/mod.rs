// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod cleaner;
pub mod layout;
pub mod orchestrator;
pub mod report;
#[cfg(test)]
pub mod integration_tests;

pub use layout::BuildLayout;
pub use orchestrator::ExtensionOrchestrator;
pub use report::{BuildReport, BuiltWheel, ExtensionOutcome};
