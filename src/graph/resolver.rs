// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::errors::ApiError;
use crate::graph::metadata::TemplateKind;
use crate::graph::node::{NodeDescriptor, PropertySchema};
use crate::observability::messages::registry::{
    SchemaFetchFailed, SchemaFetchStarted, SchemaResolved,
};
use crate::observability::messages::StructuredLog;
use tracing::Instrument;
use crate::traits::{PipelineApi, PropertyQuery};

/// Fetches a plugin's backend property schema for a node.
///
/// The schema comes from the role-specific endpoint for the active template.
/// Only the first response entry counts; an empty response means the plugin
/// declares no properties. Errors are passed through untouched and never
/// retried.
#[derive(Clone)]
pub struct PropertyResolver {
    api: Arc<dyn PipelineApi>,
}

impl PropertyResolver {
    pub fn new(api: Arc<dyn PipelineApi>) -> Self {
        Self { api }
    }

    pub async fn fetch(
        &self,
        node: &NodeDescriptor,
        template: TemplateKind,
        scope: Option<&str>,
    ) -> Result<PropertySchema, ApiError> {
        let query = PropertyQuery {
            role: node.role,
            plugin: node.name.clone(),
            template,
            scope: scope.map(str::to_string),
        };

        let started = SchemaFetchStarted {
            node_id: &node.id,
            plugin: &node.name,
            template: template.as_str(),
        };
        started.log();
        let span = started.span("fetch_plugin_properties");

        match self.api.fetch_plugin_properties(&query).instrument(span).await {
            Ok(responses) => {
                let schema = responses
                    .into_iter()
                    .next()
                    .map(|r| r.properties)
                    .unwrap_or_default();
                SchemaResolved {
                    node_id: &node.id,
                    plugin: &node.name,
                    property_count: schema.len(),
                }
                .log();
                Ok(schema)
            }
            Err(error) => {
                SchemaFetchFailed {
                    node_id: &node.id,
                    plugin: &node.name,
                    error: &error,
                }
                .log();
                Err(error)
            }
        }
    }

    /// Fetch the schema and cache it on `node`, reconciling its properties.
    pub async fn resolve(
        &self,
        node: &mut NodeDescriptor,
        template: TemplateKind,
        scope: Option<&str>,
    ) -> Result<(), ApiError> {
        let schema = self.fetch(node, template, scope).await?;
        node.apply_schema(schema);
        Ok(())
    }
}
