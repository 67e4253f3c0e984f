// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::errors::{ApiError, ErrorMap, StoreError};

/// Everything the editing service can fail with.
#[derive(Debug, Error)]
pub enum PlumbError {
    /// Metadata or graph problems; nothing was sent to the backend.
    #[error("Pipeline is not valid: {0}")]
    Validation(ErrorMap),

    #[error(transparent)]
    Backend(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No node with id '{0}' on the canvas")]
    NodeNotFound(String),

    #[error("No draft named '{0}'")]
    DraftNotFound(String),

    #[error("Failed to serialize pipeline: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PlumbError {
    /// The field-to-message map when this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ErrorMap> {
        match self {
            PlumbError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
