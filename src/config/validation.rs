// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline model validation.
//!
//! Runs before anything is sent to the backend. Every check runs and all
//! problems are accumulated into one [`ErrorMap`], so the editor can show
//! them together instead of one per save attempt.
//!
//! # Checks
//!
//! 1. **Name**: present, and made only of letters, digits, `_` and `-`
//! 2. **Template**: a template type is selected
//! 3. **Roles**: exactly one source and exactly one sink on the canvas
//! 4. **Reachability**: every node takes part in at least one connection
//! 5. **References**: every connection joins two nodes that exist
//! 6. **Required properties**: every required backend-declared property of
//!    a flattened plugin has a value
//! 7. **Run settings**: batch pipelines have a cron schedule, realtime
//!    pipelines at least one instance
//!
//! Drafts only need a name and a template to be present, see
//! [`has_name_and_template`]. The name character rule applies to saves only.
//!
//! # Error keys
//!
//! Pipeline-level problems are keyed by field (`name`, `template`, `source`,
//! `sink`, `schedule`, `instances`, `connections`). Node-level problems are
//! keyed by node id so the canvas can highlight the node.

use crate::errors::ErrorMap;
use crate::graph::{
    ConnectionList, FlattenedConfig, NodeRegistry, PipelineMetadata, PluginEntry, Role,
    TemplateKind,
};
use crate::observability::messages::validation::{ValidationFailed, ValidationStarted};
use crate::observability::messages::StructuredLog;

pub const NAME_KEY: &str = "name";
pub const TEMPLATE_KEY: &str = "template";
pub const SOURCE_KEY: &str = "source";
pub const SINK_KEY: &str = "sink";
pub const CONNECTIONS_KEY: &str = "connections";
pub const SCHEDULE_KEY: &str = "schedule";
pub const INSTANCES_KEY: &str = "instances";

/// Validate the whole pipeline model ahead of a backend save.
///
/// `config` must be the flattened form of `registry` and `connections`.
pub fn validate_model(
    registry: &NodeRegistry,
    connections: &ConnectionList,
    metadata: &PipelineMetadata,
    config: &FlattenedConfig,
) -> Result<(), ErrorMap> {
    ValidationStarted {
        pipeline: &metadata.name,
        node_count: registry.len(),
        connection_count: connections.len(),
    }
    .log();

    let mut errors = ErrorMap::new();

    check_name_and_template(metadata, &mut errors);
    check_name_characters(metadata, &mut errors);
    check_role_counts(registry, &mut errors);
    check_unconnected_nodes(registry, connections, &mut errors);
    check_connection_references(registry, connections, &mut errors);
    check_required_properties(config, &mut errors);
    check_run_settings(metadata, &mut errors);

    finish(metadata, errors)
}

/// The checks a draft must pass: a name and a template are present.
pub fn has_name_and_template(metadata: &PipelineMetadata) -> Result<(), ErrorMap> {
    let mut errors = ErrorMap::new();
    check_name_and_template(metadata, &mut errors);
    finish(metadata, errors)
}

fn finish(metadata: &PipelineMetadata, errors: ErrorMap) -> Result<(), ErrorMap> {
    if errors.is_empty() {
        return Ok(());
    }

    let fields: Vec<&str> = errors.iter().map(|(key, _)| key.as_str()).collect();
    ValidationFailed {
        pipeline: &metadata.name,
        error_count: errors.message_count(),
        fields: &fields.join(","),
    }
    .log();
    Err(errors)
}

fn check_name_and_template(metadata: &PipelineMetadata, errors: &mut ErrorMap) {
    if metadata.name.trim().is_empty() {
        errors.insert(NAME_KEY, "Please enter a name for the pipeline");
    }

    if metadata.template_kind().is_none() {
        errors.insert(TEMPLATE_KEY, "Please select a template type");
    }
}

/// Only meaningful once a name is present.
fn check_name_characters(metadata: &PipelineMetadata, errors: &mut ErrorMap) {
    let name = metadata.name.trim();
    if !name.is_empty() && !is_valid_name(&metadata.name) {
        errors.insert(
            NAME_KEY,
            "Pipeline name may contain only letters, digits, '_' and '-'",
        );
    }
}

fn is_valid_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn check_role_counts(registry: &NodeRegistry, errors: &mut ErrorMap) {
    for (role, key) in [(Role::Source, SOURCE_KEY), (Role::Sink, SINK_KEY)] {
        match registry.role_count(role) {
            0 => errors.insert(key, format!("A pipeline needs a {}", role)),
            1 => {}
            n => errors.insert(key, format!("A pipeline can have only one {} ({} found)", role, n)),
        }
    }
}

fn check_unconnected_nodes(
    registry: &NodeRegistry,
    connections: &ConnectionList,
    errors: &mut ErrorMap,
) {
    for node in registry.iter() {
        if !connections.is_connected(&node.id) {
            errors.insert(
                node.id.clone(),
                format!("{} '{}' is not connected to the pipeline", node.role, node.name),
            );
        }
    }
}

fn check_connection_references(
    registry: &NodeRegistry,
    connections: &ConnectionList,
    errors: &mut ErrorMap,
) {
    for connection in connections.iter() {
        for end in [&connection.source, &connection.target] {
            if !registry.contains(end) {
                errors.insert(
                    CONNECTIONS_KEY,
                    format!(
                        "Connection '{}' -> '{}' references missing node '{}'",
                        connection.source, connection.target, end
                    ),
                );
            }
        }
    }
}

fn check_required_properties(config: &FlattenedConfig, errors: &mut ErrorMap) {
    for entry in config.entries() {
        for property in missing_required(entry) {
            let key = entry.id.clone().unwrap_or_else(|| entry.name.clone());
            errors.insert(key, format!("'{}' is required for {}", property, entry.name));
        }
    }
}

fn missing_required(entry: &PluginEntry) -> Vec<&str> {
    let Some(schema) = entry.backend_properties.as_ref() else {
        return Vec::new();
    };
    schema
        .iter()
        .filter(|(_, field)| field.required)
        .filter(|(key, _)| {
            entry
                .properties
                .get(*key)
                .map_or(true, |value| value.trim().is_empty())
        })
        .map(|(key, _)| key.as_str())
        .collect()
}

fn check_run_settings(metadata: &PipelineMetadata, errors: &mut ErrorMap) {
    match metadata.template_kind() {
        Some(TemplateKind::Batch) if metadata.template.schedule.cron.trim().is_empty() => {
            errors.insert(SCHEDULE_KEY, "Batch pipelines need a schedule");
        }
        Some(TemplateKind::Realtime) if metadata.template.instance == 0 => {
            errors.insert(INSTANCES_KEY, "Realtime pipelines need at least one instance");
        }
        _ => {}
    }
}
