// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for saving pipelines and drafts, importing drafts and
//! resetting the editing session.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Pipeline passed validation and is being submitted.
///
/// # Log Level
/// `debug!`
///
/// Its span scopes the backend call and the draft cleanup that follows.
pub struct PipelineSaveStarted<'a> {
    pub namespace: &'a str,
    pub pipeline: &'a str,
    pub node_count: usize,
}

impl Display for PipelineSaveStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Submitting pipeline '{}' ({} nodes) to namespace '{}'",
            self.pipeline, self.node_count, self.namespace
        )
    }
}

impl StructuredLog for PipelineSaveStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            namespace = self.namespace,
            pipeline = self.pipeline,
            node_count = self.node_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::INFO,
            "span_name",
            name = name,
            namespace = self.namespace,
            pipeline = self.pipeline,
        )
    }
}

/// Pipeline accepted by the backend.
///
/// # Log Level
/// `info!` - Important operational event
pub struct PipelineSaved<'a> {
    pub namespace: &'a str,
    pub pipeline: &'a str,
    pub template: &'a str,
}

impl Display for PipelineSaved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Saved {} pipeline '{}' in namespace '{}'",
            self.template, self.pipeline, self.namespace
        )
    }
}

impl StructuredLog for PipelineSaved<'_> {
    fn log(&self) {
        tracing::info!(
            namespace = self.namespace,
            pipeline = self.pipeline,
            template = self.template,
            "{}", self
        );
    }
}

/// Backend refused the pipeline.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct PipelineSaveRejected<'a> {
    pub namespace: &'a str,
    pub pipeline: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for PipelineSaveRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Saving pipeline '{}' in namespace '{}' failed: {}",
            self.pipeline, self.namespace, self.error
        )
    }
}

impl StructuredLog for PipelineSaveRejected<'_> {
    fn log(&self) {
        tracing::error!(
            namespace = self.namespace,
            pipeline = self.pipeline,
            error = %self.error,
            "{}", self
        );
    }
}

/// Draft about to be written to the local store.
///
/// # Log Level
/// `debug!`
///
/// Its span scopes the read-modify-write of the drafts map.
pub struct DraftSaveStarted<'a> {
    pub pipeline: &'a str,
}

impl Display for DraftSaveStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Saving draft '{}'", self.pipeline)
    }
}

impl StructuredLog for DraftSaveStarted<'_> {
    fn log(&self) {
        tracing::debug!(pipeline = self.pipeline, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::INFO,
            "span_name",
            name = name,
            pipeline = self.pipeline,
        )
    }
}

/// Draft written to the local store.
///
/// # Log Level
/// `info!`
pub struct DraftSaved<'a> {
    pub pipeline: &'a str,
    pub draft_count: usize,
    pub replaced: bool,
}

impl Display for DraftSaved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let verb = if self.replaced { "Updated" } else { "Saved" };
        write!(
            f,
            "{} draft '{}' ({} drafts stored)",
            verb, self.pipeline, self.draft_count
        )
    }
}

impl StructuredLog for DraftSaved<'_> {
    fn log(&self) {
        tracing::info!(
            pipeline = self.pipeline,
            draft_count = self.draft_count,
            replaced = self.replaced,
            "{}", self
        );
    }
}

/// Draft removed after its pipeline was saved to the backend.
///
/// # Log Level
/// `debug!`
pub struct DraftCleared<'a> {
    pub pipeline: &'a str,
}

impl Display for DraftCleared<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cleared draft '{}'", self.pipeline)
    }
}

impl StructuredLog for DraftCleared<'_> {
    fn log(&self) {
        tracing::debug!(pipeline = self.pipeline, "{}", self);
    }
}

/// Pipeline was saved but its draft could not be removed. The save stands.
///
/// # Log Level
/// `warn!` - The stale draft stays in the store
pub struct DraftCleanupFailed<'a> {
    pub pipeline: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for DraftCleanupFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pipeline '{}' was saved but its draft could not be cleared: {}",
            self.pipeline, self.error
        )
    }
}

impl StructuredLog for DraftCleanupFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            pipeline = self.pipeline,
            error = %self.error,
            "{}", self
        );
    }
}

/// Draft loaded back onto the canvas.
///
/// # Log Level
/// `info!`
pub struct DraftImported<'a> {
    pub pipeline: &'a str,
    pub node_count: usize,
    pub connection_count: usize,
    pub from_ui_payload: bool,
}

impl Display for DraftImported<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Imported draft '{}': {} nodes, {} connections",
            self.pipeline, self.node_count, self.connection_count
        )?;
        if !self.from_ui_payload {
            write!(f, " (rebuilt as a linear chain)")?;
        }
        Ok(())
    }
}

impl StructuredLog for DraftImported<'_> {
    fn log(&self) {
        tracing::info!(
            pipeline = self.pipeline,
            node_count = self.node_count,
            connection_count = self.connection_count,
            from_ui_payload = self.from_ui_payload,
            "{}", self
        );
    }
}

/// Editing session reset to defaults.
///
/// # Log Level
/// `debug!`
pub struct SessionReset {
    pub kept_name: bool,
}

impl Display for SessionReset {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.kept_name {
            write!(f, "Editing session reset for import, pipeline name kept")
        } else {
            write!(f, "Editing session reset")
        }
    }
}

impl StructuredLog for SessionReset {
    fn log(&self) {
        tracing::debug!(kept_name = self.kept_name, "{}", self);
    }
}
