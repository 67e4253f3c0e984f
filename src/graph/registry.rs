// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use crate::graph::node::{NodeDescriptor, Position, Role};
use crate::observability::messages::registry::{NodeAdded, NodeRemoved};
use crate::observability::messages::StructuredLog;

/// Every node currently on the canvas, keyed by node id.
///
/// Per-role counts drive layout placement. They are derived from the stored
/// nodes on demand, so adds and removes can never leave them out of step
/// with what is actually registered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeRegistry {
    nodes: BTreeMap<String, NodeDescriptor>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from previously stored nodes, keeping their
    /// positions as they were.
    pub fn from_nodes(nodes: impl IntoIterator<Item = NodeDescriptor>) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| (n.id.clone(), n)).collect(),
        }
    }

    /// Place a node on the canvas under `role`.
    ///
    /// The node gets the next layout slot for its role. If it arrives with
    /// a schema already loaded, any declared property it lacks is set to an
    /// empty value. Re-adding an existing id replaces that node.
    pub fn add(&mut self, mut node: NodeDescriptor, role: Role) -> &NodeDescriptor {
        self.nodes.remove(&node.id);

        node.role = role;
        node.position = Position::for_slot(role, self.role_count(role));
        node.reconcile_properties();

        NodeAdded {
            node_id: &node.id,
            plugin: &node.name,
            role: role.as_str(),
            schema_loaded: node.is_ready(),
        }
        .log();

        let id = node.id.clone();
        self.nodes.entry(id).or_insert(node)
    }

    pub fn remove(&mut self, node_id: &str) -> Option<NodeDescriptor> {
        let removed = self.nodes.remove(node_id)?;
        NodeRemoved {
            node_id,
            role: removed.role.as_str(),
            remaining: self.nodes.len(),
        }
        .log();
        Some(removed)
    }

    /// Number of registered nodes playing `role`.
    pub fn role_count(&self, role: Role) -> usize {
        self.nodes.values().filter(|n| n.role == role).count()
    }

    pub fn get(&self, node_id: &str) -> Option<&NodeDescriptor> {
        self.nodes.get(node_id)
    }

    pub fn get_mut(&mut self, node_id: &str) -> Option<&mut NodeDescriptor> {
        self.nodes.get_mut(node_id)
    }

    /// Put a node back exactly as given, position included.
    pub fn restore(&mut self, node: NodeDescriptor) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeDescriptor> {
        self.nodes.values()
    }

    pub fn as_map(&self) -> &BTreeMap<String, NodeDescriptor> {
        &self.nodes
    }
}
