// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // wheel builder backends
pub mod config;     // config + validation
pub mod engine;     // build orchestrator
pub mod errors;     // error handling
pub mod observability;
pub mod probe;      // version detection
pub mod traits;     // collaborator abstractions
pub mod wheel;      // wheel filenames and discovery
