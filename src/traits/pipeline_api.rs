// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::graph::metadata::TemplateKind;
use crate::graph::node::{PropertySchema, Role};
use crate::graph::prune::BackendSubmission;

/// Which plugin's property schema to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyQuery {
    pub role: Role,
    pub plugin: String,
    pub template: TemplateKind,
    /// Editing scope the request belongs to, when opened from the editor.
    pub scope: Option<String>,
}

/// One entry of a property-schema response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginProperties {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: PropertySchema,
}

/// The pipeline backend: plugin property schemas and pipeline saves.
#[async_trait]
pub trait PipelineApi: Send + Sync {
    /// Property schemas for the queried plugin, as returned by the role's
    /// endpoint. May be empty.
    async fn fetch_plugin_properties(
        &self,
        query: &PropertyQuery,
    ) -> Result<Vec<PluginProperties>, ApiError>;

    async fn save_pipeline(
        &self,
        namespace: &str,
        name: &str,
        submission: &BackendSubmission,
    ) -> Result<(), ApiError>;
}
