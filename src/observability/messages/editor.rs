// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// Properties editor opened for a node.
///
/// # Log Level
/// `debug!`
pub struct EditorOpened<'a> {
    pub node_id: &'a str,
    pub has_input_schema: bool,
    pub read_only: bool,
}

impl Display for EditorOpened<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Opened properties editor for node '{}'", self.node_id)
    }
}

impl StructuredLog for EditorOpened<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            has_input_schema = self.has_input_schema,
            read_only = self.read_only,
            "{}", self
        );
    }
}

/// Properties editor closed.
///
/// # Log Level
/// `debug!`
pub struct EditorClosed<'a> {
    pub node_id: &'a str,
    pub reverted: bool,
}

impl Display for EditorClosed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.reverted {
            write!(f, "Properties editor for node '{}' cancelled, edits reverted", self.node_id)
        } else {
            write!(f, "Properties editor for node '{}' closed", self.node_id)
        }
    }
}

impl StructuredLog for EditorClosed<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            reverted = self.reverted,
            "{}", self
        );
    }
}
