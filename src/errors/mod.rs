// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod extension;
mod probe;

pub use config::{ConfigError, ValidationError};
pub use extension::ExtensionError;
pub use probe::ProbeError;
