// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::consts::DEFAULT_NAMESPACE;
use crate::errors::ConfigError;
use crate::graph::{Connection, NodeDescriptor, PipelineMetadata, PropertySchema, Role, TemplateKind};

/// Editor settings.
///
/// # Example
/// ```yaml
/// namespace: analytics
/// drafts_path: .plumber/drafts.json
/// catalog_path: configs/catalog.yaml
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct EditorSettings {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// File the draft store keeps its JSON document in. Drafts stay in
    /// memory when unset.
    #[serde(default)]
    pub drafts_path: Option<PathBuf>,
    /// YAML plugin catalog backing property-schema lookups.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            drafts_path: None,
            catalog_path: None,
        }
    }
}

/// A saved canvas: metadata, nodes and the edges between them.
///
/// # Example
/// ```yaml
/// metadata:
///   name: purchases
///   template:
///     type: ETLBatch
///     schedule:
///       cron: "0 * * * *"
/// nodes:
///   - id: stream
///     name: Stream
///     type: source
///     properties:
///       name: purchases
/// connections:
///   - sourceId: stream
///     targetId: table
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CanvasDocument {
    #[serde(default)]
    pub metadata: PipelineMetadata,
    #[serde(default)]
    pub nodes: Vec<NodeDescriptor>,
    #[serde(default)]
    pub connections: Vec<Connection>,
}

/// Plugins the catalog backend knows about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PluginCatalog {
    #[serde(default)]
    pub plugins: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub role: Role,
    /// Templates the plugin runs on. Empty means all of them.
    #[serde(default)]
    pub templates: Vec<TemplateKind>,
    #[serde(default)]
    pub properties: PropertySchema,
}

fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<EditorSettings, ConfigError> {
    read_yaml(path.as_ref())
}

pub fn load_canvas<P: AsRef<Path>>(path: P) -> Result<CanvasDocument, ConfigError> {
    read_yaml(path.as_ref())
}

/// Load a plugin catalog, rejecting a plugin listed twice under one role.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<PluginCatalog, ConfigError> {
    let catalog: PluginCatalog = read_yaml(path.as_ref())?;

    let mut seen = std::collections::HashSet::new();
    for entry in &catalog.plugins {
        if !seen.insert((entry.role, entry.name.as_str())) {
            return Err(ConfigError::DuplicatePlugin {
                role: entry.role.to_string(),
                plugin: entry.name.clone(),
            });
        }
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_settings_defaults() {
        let file = write_temp("catalog_path: catalog.yaml\n");
        let settings = load_settings(file.path()).unwrap();

        assert_eq!(settings.namespace, "default");
        assert_eq!(settings.drafts_path, None);
        assert_eq!(settings.catalog_path, Some(PathBuf::from("catalog.yaml")));
    }

    #[test]
    fn test_parse_canvas_document() {
        let yaml = r#"
metadata:
  name: purchases
  description: hourly rollup
  template:
    type: ETLRealtime
    instance: 2
nodes:
  - id: stream
    name: Stream
    type: source
    properties:
      name: purchases
  - id: table
    name: Table
    type: sink
    _backendProperties:
      name: { type: string, required: true }
connections:
  - sourceId: stream
    targetId: table
"#;
        let canvas: CanvasDocument = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(canvas.metadata.name, "purchases");
        assert_eq!(canvas.metadata.template_kind(), Some(TemplateKind::Realtime));
        assert_eq!(canvas.nodes.len(), 2);
        assert!(!canvas.nodes[0].is_ready());
        assert!(canvas.nodes[1].backend_schema().unwrap()["name"].required);
        assert_eq!(canvas.connections, vec![Connection::new("stream", "table")]);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_canvas("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.yaml"));
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let file = write_temp(
            r#"
plugins:
  - name: Stream
    type: source
  - name: Stream
    type: source
"#,
        );
        let err = load_catalog(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePlugin { .. }));
    }

    #[test]
    fn test_same_name_allowed_across_roles() {
        let file = write_temp(
            r#"
plugins:
  - name: Table
    type: source
    templates: [ETLBatch]
  - name: Table
    type: sink
    properties:
      name: { type: string }
"#,
        );
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.plugins.len(), 2);
        assert_eq!(catalog.plugins[0].templates, vec![TemplateKind::Batch]);
        assert_eq!(catalog.plugins[1].properties["name"].kind, "string");
    }
}
