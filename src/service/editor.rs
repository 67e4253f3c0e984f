// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::graph::implicit_schema::{parse_record_fields, RecordField};
use crate::graph::{NodeDescriptor, TemplateKind};

/// How a properties editing session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Put the node back the way it was when the editor opened.
    Cancel,
    Keep,
}

/// An open properties editor for one node.
///
/// Holds everything the editor view needs besides the node itself: the
/// schema flowing into the node, its parsed fields, and the snapshot used to
/// revert on cancel.
#[derive(Debug, Clone)]
pub struct PropertyEditor {
    pub node_id: String,
    /// Raw input schema, empty when nothing is known.
    pub input_schema: String,
    /// Fields of the input schema. `None` when there is no input schema or
    /// it is not valid JSON.
    pub input_fields: Option<Vec<RecordField>>,
    pub template: TemplateKind,
    pub read_only: bool,
    snapshot: NodeDescriptor,
}

impl PropertyEditor {
    pub(crate) fn open(
        snapshot: NodeDescriptor,
        input_schema: String,
        template: TemplateKind,
        read_only: bool,
    ) -> Self {
        let input_fields = if input_schema.trim().is_empty() {
            None
        } else {
            parse_record_fields(&input_schema)
        };

        Self {
            node_id: snapshot.id.clone(),
            input_schema,
            input_fields,
            template,
            read_only,
            snapshot,
        }
    }

    pub fn has_input_schema(&self) -> bool {
        self.input_fields.is_some()
    }

    pub(crate) fn into_snapshot(self) -> NodeDescriptor {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::implicit_schema::SYSLOG_SCHEMA;
    use crate::graph::Role;

    #[test]
    fn test_open_parses_input_fields() {
        let node = NodeDescriptor::new("t1", "Projection", Role::Transform);
        let editor =
            PropertyEditor::open(node, SYSLOG_SCHEMA.to_string(), TemplateKind::Batch, false);

        let fields = editor.input_fields.as_ref().unwrap();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0].name, "timestamp");
        assert!(editor.has_input_schema());
    }

    #[test]
    fn test_malformed_input_schema_is_none() {
        let node = NodeDescriptor::new("t1", "Projection", Role::Transform);
        let editor = PropertyEditor::open(node, "{not json".to_string(), TemplateKind::Batch, true);

        assert_eq!(editor.input_schema, "{not json");
        assert!(editor.input_fields.is_none());
        assert!(editor.read_only);
    }
}
