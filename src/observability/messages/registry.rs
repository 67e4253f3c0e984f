// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for canvas node lifecycle events:
//! * Nodes added from the palette
//! * Nodes removed from the canvas
//! * Backend property schema fetches, scoped by a span per request

use crate::errors::ApiError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Node placed on the canvas.
///
/// # Log Level
/// `debug!` - Routine editor activity
pub struct NodeAdded<'a> {
    pub node_id: &'a str,
    pub plugin: &'a str,
    pub role: &'a str,
    pub schema_loaded: bool,
}

impl Display for NodeAdded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Added {} '{}' as node '{}'",
            self.role, self.plugin, self.node_id
        )?;
        if !self.schema_loaded {
            write!(f, " (schema pending)")?;
        }
        Ok(())
    }
}

impl StructuredLog for NodeAdded<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            plugin = self.plugin,
            role = self.role,
            schema_loaded = self.schema_loaded,
            "{}", self
        );
    }
}

/// Node removed from the canvas.
///
/// # Log Level
/// `debug!` - Routine editor activity
pub struct NodeRemoved<'a> {
    pub node_id: &'a str,
    pub role: &'a str,
    pub remaining: usize,
}

impl Display for NodeRemoved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Removed {} node '{}', {} nodes remain",
            self.role, self.node_id, self.remaining
        )
    }
}

impl StructuredLog for NodeRemoved<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            role = self.role,
            remaining = self.remaining,
            "{}", self
        );
    }
}

/// Backend property schema requested for a node.
///
/// # Log Level
/// `debug!`
///
/// Its span scopes the backend call.
pub struct SchemaFetchStarted<'a> {
    pub node_id: &'a str,
    pub plugin: &'a str,
    pub template: &'a str,
}

impl Display for SchemaFetchStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Fetching {} properties of plugin '{}' for node '{}'",
            self.template, self.plugin, self.node_id
        )
    }
}

impl StructuredLog for SchemaFetchStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            plugin = self.plugin,
            template = self.template,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::DEBUG,
            "span_name",
            name = name,
            node_id = self.node_id,
            plugin = self.plugin,
            template = self.template,
        )
    }
}

/// Backend property schema fetched for a node.
///
/// # Log Level
/// `debug!` - Routine editor activity
pub struct SchemaResolved<'a> {
    pub node_id: &'a str,
    pub plugin: &'a str,
    pub property_count: usize,
}

impl Display for SchemaResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Plugin '{}' declares {} properties (node '{}')",
            self.plugin, self.property_count, self.node_id
        )
    }
}

impl StructuredLog for SchemaResolved<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            plugin = self.plugin,
            property_count = self.property_count,
            "{}", self
        );
    }
}

/// Backend property schema fetch failed.
///
/// # Log Level
/// `warn!` - The node stays pending; the caller decides what to do
pub struct SchemaFetchFailed<'a> {
    pub node_id: &'a str,
    pub plugin: &'a str,
    pub error: &'a ApiError,
}

impl Display for SchemaFetchFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Could not fetch properties of plugin '{}' for node '{}': {}",
            self.plugin, self.node_id, self.error
        )
    }
}

impl StructuredLog for SchemaFetchFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            node_id = self.node_id,
            plugin = self.plugin,
            error = %self.error,
            "{}", self
        );
    }
}
