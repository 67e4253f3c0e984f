// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Flattening: turning the canvas graph into a role-partitioned config.
//!
//! The flattener walks connections in drawing order. Each connection's
//! source, then target, is placed into the config by role the first time it
//! is seen: sources and sinks fill a single slot (a later one replaces an
//! earlier one), transforms are appended. Nodes that no connection reaches
//! are left out of the config and listed in the [`FlattenReport`];
//! connections naming unknown nodes are skipped and listed too.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::graph::connections::{Connection, ConnectionList};
use crate::graph::metadata::{PipelineMetadata, TemplateKind};
use crate::graph::node::{NodeDescriptor, PropertySchema, Role};
use crate::graph::prune::prune_non_backend_properties;
use crate::graph::registry::NodeRegistry;
use crate::observability::messages::flatten::{
    ConfigFlattened, DanglingConnectionSkipped, OrphanNodesOmitted,
};
use crate::observability::messages::StructuredLog;

/// One plugin in a flattened config.
///
/// `id` and `_backendProperties` are editor bookkeeping. They are present in
/// the editing shape and stripped before backend submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(
        default,
        rename = "_backendProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub backend_properties: Option<PropertySchema>,
}

impl PluginEntry {
    fn from_node(node: &NodeDescriptor) -> Self {
        Self {
            id: Some(node.id.clone()),
            name: node.name.clone(),
            properties: node.properties.clone(),
            backend_properties: node.backend_schema().cloned(),
        }
    }
}

/// The editing shape of a pipeline: metadata plus plugins by role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlattenedConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub template: Option<TemplateKind>,
    #[serde(default)]
    pub source: Option<PluginEntry>,
    #[serde(default)]
    pub sink: Option<PluginEntry>,
    #[serde(default)]
    pub transforms: Vec<PluginEntry>,
}

impl FlattenedConfig {
    pub fn entries(&self) -> impl Iterator<Item = &PluginEntry> {
        self.source
            .iter()
            .chain(self.transforms.iter())
            .chain(self.sink.iter())
    }

    pub fn entries_mut(&mut self) -> impl Iterator<Item = &mut PluginEntry> {
        self.source
            .iter_mut()
            .chain(self.transforms.iter_mut())
            .chain(self.sink.iter_mut())
    }

    /// Rebuild canvas nodes and edges from this config as a straight chain:
    /// source, then each transform in order, then sink.
    ///
    /// Entries that lost their id to pruning get `<role>-<index>` ids.
    pub fn to_graph(&self) -> (Vec<NodeDescriptor>, Vec<Connection>) {
        let mut chain: Vec<(Role, &PluginEntry)> = Vec::new();
        chain.extend(self.source.iter().map(|e| (Role::Source, e)));
        chain.extend(self.transforms.iter().map(|e| (Role::Transform, e)));
        chain.extend(self.sink.iter().map(|e| (Role::Sink, e)));

        let nodes: Vec<NodeDescriptor> = chain
            .iter()
            .enumerate()
            .map(|(index, (role, entry))| {
                let id = entry
                    .id
                    .clone()
                    .unwrap_or_else(|| format!("{}-{}", role, index));
                let mut node = NodeDescriptor::new(id, entry.name.clone(), *role);
                node.properties = entry.properties.clone();
                node.schema = entry.backend_properties.clone().into();
                node
            })
            .collect();

        let connections = nodes
            .windows(2)
            .map(|pair| Connection::new(pair[0].id.clone(), pair[1].id.clone()))
            .collect();

        (nodes, connections)
    }
}

/// What flattening left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenReport {
    /// Registered nodes no connection reaches, sorted by id.
    pub omitted: Vec<String>,
    /// Connections with an end that is not a registered node.
    pub dangling: Vec<Connection>,
}

impl FlattenReport {
    pub fn is_clean(&self) -> bool {
        self.omitted.is_empty() && self.dangling.is_empty()
    }
}

/// Flatten the canvas into its editing shape, with undeclared properties
/// already pruned.
pub fn flatten_graph(
    registry: &NodeRegistry,
    connections: &ConnectionList,
    metadata: &PipelineMetadata,
) -> (FlattenedConfig, FlattenReport) {
    let mut config = FlattenedConfig {
        name: metadata.name.clone(),
        description: metadata.description.clone(),
        template: metadata.template_kind(),
        ..FlattenedConfig::default()
    };
    let mut report = FlattenReport::default();

    let mut remaining: BTreeSet<&str> = registry.iter().map(|n| n.id.as_str()).collect();

    for connection in connections.iter() {
        let mut dangling = false;
        for end in [&connection.source, &connection.target] {
            let Some(node) = registry.get(end) else {
                dangling = true;
                continue;
            };
            if remaining.remove(end.as_str()) {
                place(&mut config, node);
            }
        }

        if dangling {
            DanglingConnectionSkipped {
                source: &connection.source,
                target: &connection.target,
            }
            .log();
            report.dangling.push(connection.clone());
        }
    }

    report.omitted = remaining.into_iter().map(str::to_string).collect();
    if !report.omitted.is_empty() {
        OrphanNodesOmitted {
            node_ids: &report.omitted,
        }
        .log();
    }

    prune_non_backend_properties(&mut config);

    ConfigFlattened {
        pipeline: &config.name,
        transform_count: config.transforms.len(),
        has_source: config.source.is_some(),
        has_sink: config.sink.is_some(),
        omitted_count: report.omitted.len(),
    }
    .log();

    (config, report)
}

fn place(config: &mut FlattenedConfig, node: &NodeDescriptor) {
    let entry = PluginEntry::from_node(node);
    match node.role {
        Role::Source => config.source = Some(entry),
        Role::Sink => config.sink = Some(entry),
        Role::Transform => config.transforms.push(entry),
    }
}
