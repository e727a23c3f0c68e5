// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Wheel builder backends.
//!
//! ## Command Backend
//! Runs an external build tool (`uv` by default) once per extension with
//! inherited console output. The argument template and extra environment
//! come from the `builder` section of the configuration.
//!
//! ## Stub Backend (Test-Only)
//! - **StubBuilder**: records requests and writes scripted wheels into `dist/`
//! - **UnavailableBuilder**: simulates a build tool that cannot be launched
//! - **Note**: NOT available in production builds

pub mod command;
#[cfg(test)]
pub mod stub;

pub use command::CommandBuilder;
