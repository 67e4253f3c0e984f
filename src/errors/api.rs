// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors surfaced by the external collaborators: the pipeline backend and
//! the local draft store.

use thiserror::Error;

/// A rejected backend call. The message is the raw payload the backend sent.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Backend rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Backend unreachable: {0}")]
    Unavailable(String),

    #[error("No {role} plugin named '{plugin}' for template '{template}'")]
    UnknownPlugin {
        role: String,
        plugin: String,
        template: String,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Draft store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Draft store contents are not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),
}
