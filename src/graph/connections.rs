// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// A directed edge drawn on the canvas, from one node id to another.
///
/// The canvas reports edges as `sourceId`/`targetId`; they are stored and
/// serialized as `source`/`target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    #[serde(alias = "sourceId")]
    pub source: String,
    #[serde(alias = "targetId")]
    pub target: String,
}

impl Connection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Edges in the order they were drawn. Any topology is accepted: cycles,
/// duplicates and dangling ends are left for validation to report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionList(Vec<Connection>);

impl ConnectionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, connection: Connection) {
        self.0.push(connection);
    }

    /// Replace every edge with `connections`, in order.
    pub fn set(&mut self, connections: impl IntoIterator<Item = Connection>) {
        self.0.clear();
        for connection in connections {
            self.add(connection);
        }
    }

    /// Edges ending at `node_id`, in drawing order.
    pub fn incoming<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Connection> + 'a {
        self.0.iter().filter(move |c| c.target == node_id)
    }

    /// Drop every edge that starts or ends at `node_id`, returning how many
    /// were removed.
    pub fn remove_touching(&mut self, node_id: &str) -> usize {
        let before = self.0.len();
        self.0.retain(|c| !c.touches(node_id));
        before - self.0.len()
    }

    pub fn is_connected(&self, node_id: &str) -> bool {
        self.0.iter().any(|c| c.touches(node_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn as_slice(&self) -> &[Connection] {
        &self.0
    }
}

impl From<Vec<Connection>> for ConnectionList {
    fn from(connections: Vec<Connection>) -> Self {
        Self(connections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_wholesale_and_keeps_duplicates() {
        let mut list = ConnectionList::new();
        list.add(Connection::new("x", "y"));

        list.set(vec![
            Connection::new("a", "b"),
            Connection::new("a", "b"),
            Connection::new("b", "a"),
        ]);

        assert_eq!(list.len(), 3);
        assert_eq!(list.as_slice()[0], Connection::new("a", "b"));
        assert!(!list.is_connected("x"));
    }

    #[test]
    fn test_incoming_in_drawing_order() {
        let list = ConnectionList::from(vec![
            Connection::new("b", "c"),
            Connection::new("a", "c"),
            Connection::new("c", "d"),
        ]);

        let sources: Vec<&str> = list.incoming("c").map(|c| c.source.as_str()).collect();
        assert_eq!(sources, vec!["b", "a"]);
    }

    #[test]
    fn test_remove_touching() {
        let mut list = ConnectionList::from(vec![
            Connection::new("a", "b"),
            Connection::new("b", "c"),
            Connection::new("c", "d"),
        ]);

        assert_eq!(list.remove_touching("b"), 2);
        assert_eq!(list.as_slice(), &[Connection::new("c", "d")]);
    }

    #[test]
    fn test_accepts_canvas_field_names() {
        let parsed: Connection =
            serde_json::from_str(r#"{"sourceId": "a", "targetId": "b"}"#).unwrap();
        assert_eq!(parsed, Connection::new("a", "b"));
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            r#"{"source":"a","target":"b"}"#
        );
    }
}
