// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for graph flattening.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Canvas flattened into a role-partitioned config.
///
/// # Log Level
/// `debug!` - Happens on every config read
pub struct ConfigFlattened<'a> {
    pub pipeline: &'a str,
    pub transform_count: usize,
    pub has_source: bool,
    pub has_sink: bool,
    pub omitted_count: usize,
}

impl Display for ConfigFlattened<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Flattened pipeline '{}': source={}, transforms={}, sink={}, omitted={}",
            self.pipeline, self.has_source, self.transform_count, self.has_sink, self.omitted_count
        )
    }
}

impl StructuredLog for ConfigFlattened<'_> {
    fn log(&self) {
        tracing::debug!(
            pipeline = self.pipeline,
            transform_count = self.transform_count,
            has_source = self.has_source,
            has_sink = self.has_sink,
            omitted_count = self.omitted_count,
            "{}", self
        );
    }
}

/// Registered nodes that no connection reaches were left out of the config.
///
/// # Log Level
/// `warn!` - Likely a half-finished canvas
pub struct OrphanNodesOmitted<'a> {
    pub node_ids: &'a [String],
}

impl Display for OrphanNodesOmitted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} unconnected nodes left out of the pipeline: {}",
            self.node_ids.len(),
            self.node_ids.join(", ")
        )
    }
}

impl StructuredLog for OrphanNodesOmitted<'_> {
    fn log(&self) {
        tracing::warn!(
            node_ids = %self.node_ids.join(","),
            omitted_count = self.node_ids.len(),
            "{}", self
        );
    }
}

/// A connection names a node that is not on the canvas.
///
/// # Log Level
/// `warn!`
pub struct DanglingConnectionSkipped<'a> {
    pub source: &'a str,
    pub target: &'a str,
}

impl Display for DanglingConnectionSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Connection '{}' -> '{}' references a node that does not exist",
            self.source, self.target
        )
    }
}

impl StructuredLog for DanglingConnectionSkipped<'_> {
    fn log(&self) {
        tracing::warn!(
            from_node = self.source,
            to_node = self.target,
            "{}", self
        );
    }
}
