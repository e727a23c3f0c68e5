// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit it at its level with the message fields attached.
//!
//! * `orchestrator` - Extension build lifecycle events
//! * `probe` - Version detection events
//! * `config` - Configuration loading events

pub mod config;
pub mod orchestrator;
pub mod probe;

use tracing::Span;

/// Emit a message as a `tracing` event with structured fields.
pub trait StructuredLog {
    /// Log the message at its level.
    fn log(&self);

    /// Span carrying the message fields; messages that never open a span
    /// return a disabled one.
    fn span(&self, _name: &str) -> Span {
        Span::none()
    }
}
