// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pipeline model validation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Model validation started.
///
/// # Log Level
/// `debug!`
pub struct ValidationStarted<'a> {
    pub pipeline: &'a str,
    pub node_count: usize,
    pub connection_count: usize,
}

impl Display for ValidationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Validating pipeline '{}' with {} nodes and {} connections",
            self.pipeline, self.node_count, self.connection_count
        )
    }
}

impl StructuredLog for ValidationStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            pipeline = self.pipeline,
            node_count = self.node_count,
            connection_count = self.connection_count,
            "{}", self
        );
    }
}

/// Model validation failed; the operation stops before any backend call.
///
/// # Log Level
/// `warn!` - User-correctable problem
pub struct ValidationFailed<'a> {
    pub pipeline: &'a str,
    pub error_count: usize,
    pub fields: &'a str,
}

impl Display for ValidationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline '{}' failed validation with {} errors ({})",
            self.pipeline, self.error_count, self.fields
        )
    }
}

impl StructuredLog for ValidationFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            pipeline = self.pipeline,
            error_count = self.error_count,
            fields = self.fields,
            "{}", self
        );
    }
}
