// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod api;
mod config;
mod plumb;
mod validation;

pub use api::{ApiError, StoreError};
pub use config::ConfigError;
pub use plumb::PlumbError;
pub use validation::ErrorMap;
