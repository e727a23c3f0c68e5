// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging.
//!
//! This module provides centralized message types for all diagnostic and
//! operational logging in the extension builder. Message types follow a
//! struct-based pattern with a `Display` implementation, so log text lives in
//! one place instead of being scattered through the orchestrator.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::orchestrator` - Per-extension build lifecycle and the run summary
//! * `messages::probe` - Version detection
//! * `messages::config` - Configuration loading
//!
//! # Usage
//!
//! ```rust
//! use ext_wheel_builder::observability::messages::orchestrator::ArtifactRenamed;
//! use ext_wheel_builder::observability::messages::StructuredLog;
//!
//! ArtifactRenamed {
//!     original: "pkg-1.0.0-cp310-cp310-linux_x86_64.whl",
//!     renamed: "pkg-1.0.0+cu128.torch251-cp310-cp310-linux_x86_64.whl",
//! }
//! .log();
//! ```

pub mod messages;
