// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod filename;
mod locator;
mod tag;

pub use filename::{rewrite_wheel_name, WheelFilename};
pub use locator::{list_wheels, DistDirLocator};
pub use tag::LocalVersionTag;
