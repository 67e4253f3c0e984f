// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Record schemas implied by well-known log formats, and input-schema
//! lookup for the properties editor.

use serde::Deserialize;

use crate::config::consts::{FORMAT_PROPERTY, SCHEMA_PROPERTY};
use crate::graph::connections::ConnectionList;
use crate::graph::registry::NodeRegistry;

/// Common Log Format, as produced by most HTTP servers.
pub const CLF_SCHEMA: &str = r#"{"type":"record","name":"etlSchemaBody","fields":[{"name":"remote_host","type":["string","null"]},{"name":"remote_login","type":["string","null"]},{"name":"auth_user","type":["string","null"]},{"name":"date","type":["string","null"]},{"name":"request","type":["string","null"]},{"name":"status","type":["int","null"]},{"name":"content_length","type":["int","null"]},{"name":"referrer","type":["string","null"]},{"name":"user_agent","type":["string","null"]}]}"#;

/// RFC 3164 style syslog lines.
pub const SYSLOG_SCHEMA: &str = r#"{"type":"record","name":"etlSchemaBody","fields":[{"name":"timestamp","type":["string","null"]},{"name":"logsource","type":["string","null"]},{"name":"program","type":["string","null"]},{"name":"message","type":["string","null"]},{"name":"pid","type":["string","null"]}]}"#;

/// Preset schema for a `format` property value, if it names one.
pub fn implicit_schema(format: &str) -> Option<&'static str> {
    match format {
        "clf" => Some(CLF_SCHEMA),
        "syslog" => Some(SYSLOG_SCHEMA),
        _ => None,
    }
}

/// The schema flowing into `node_id`.
///
/// With a predecessor (the source of the first edge into the node), that is
/// the predecessor's output schema, or the preset for its declared `format`.
/// Without one, it is the node's own `schema` property. Empty when nothing
/// is known.
pub fn input_schema_for(
    registry: &NodeRegistry,
    connections: &ConnectionList,
    node_id: &str,
) -> String {
    if let Some(edge) = connections.incoming(node_id).next() {
        let Some(predecessor) = registry.get(&edge.source) else {
            return String::new();
        };
        return predecessor
            .properties
            .get(FORMAT_PROPERTY)
            .and_then(|format| implicit_schema(format))
            .map(str::to_string)
            .unwrap_or_else(|| predecessor.output_schema.clone());
    }

    registry
        .get(node_id)
        .and_then(|node| node.properties.get(SCHEMA_PROPERTY))
        .cloned()
        .unwrap_or_default()
}

/// One field of a record schema. `type` is kept as raw JSON since it may be
/// a name, a union list or a nested record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: serde_json::Value,
}

#[derive(Deserialize)]
struct RecordSchema {
    fields: Option<Vec<RecordField>>,
}

/// Fields of a JSON record schema. Malformed JSON, or JSON without a
/// `fields` list, means no input schema is available.
pub fn parse_record_fields(schema: &str) -> Option<Vec<RecordField>> {
    serde_json::from_str::<RecordSchema>(schema)
        .ok()
        .and_then(|record| record.fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::connections::Connection;
    use crate::graph::node::{NodeDescriptor, Role};

    fn registry_with(source: NodeDescriptor) -> NodeRegistry {
        let mut registry = NodeRegistry::new();
        registry.add(source, Role::Source);
        registry.add(NodeDescriptor::new("t", "Projection", Role::Transform), Role::Transform);
        registry
    }

    #[test]
    fn test_presets_parse() {
        let clf = parse_record_fields(CLF_SCHEMA).unwrap();
        assert_eq!(clf.len(), 9);
        assert_eq!(clf[0].name, "remote_host");
        assert_eq!(parse_record_fields(SYSLOG_SCHEMA).unwrap().len(), 5);
        assert!(implicit_schema("json").is_none());
    }

    #[test]
    fn test_predecessor_format_selects_preset() {
        let cases = vec![
            ("clf", CLF_SCHEMA.to_string()),
            ("syslog", SYSLOG_SCHEMA.to_string()),
            ("text", "declared".to_string()),
        ];

        for (format, expected) in cases {
            let source = NodeDescriptor::new("s", "Stream", Role::Source)
                .with_output_schema("declared")
                .with_property("format", format);
            let registry = registry_with(source);
            let connections = ConnectionList::from(vec![Connection::new("s", "t")]);

            assert_eq!(input_schema_for(&registry, &connections, "t"), expected, "format {}", format);
        }
    }

    #[test]
    fn test_without_predecessor_uses_own_schema_property() {
        let registry = registry_with(
            NodeDescriptor::new("s", "Stream", Role::Source).with_property("schema", "{\"fields\":[]}"),
        );
        let connections = ConnectionList::new();

        assert_eq!(input_schema_for(&registry, &connections, "s"), "{\"fields\":[]}");
        assert_eq!(input_schema_for(&registry, &connections, "t"), "");
    }

    #[test]
    fn test_malformed_schema_means_no_fields() {
        assert!(parse_record_fields("{not json").is_none());
        assert!(parse_record_fields("").is_none());
        assert!(parse_record_fields("{\"type\":\"record\"}").is_none());
        assert_eq!(parse_record_fields("{\"fields\":[]}"), Some(vec![]));
    }
}
