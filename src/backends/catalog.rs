// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::config::loader::{load_catalog, PluginCatalog};
use crate::errors::{ApiError, ConfigError};
use crate::graph::{BackendSubmission, PropertySchema, Role, TemplateKind};
use crate::traits::{PipelineApi, PluginProperties, PropertyQuery};

struct CatalogPlugin {
    templates: Vec<TemplateKind>,
    properties: PropertySchema,
}

/// A saved pipeline as the catalog backend received it.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedPipeline {
    pub namespace: String,
    pub name: String,
    pub submission: BackendSubmission,
}

/// In-process pipeline backend serving plugin schemas from a catalog.
///
/// Saves are accepted and kept in memory, unless a rejection has been armed
/// with [`CatalogApi::reject_saves`].
#[derive(Default)]
pub struct CatalogApi {
    plugins: HashMap<(Role, String), CatalogPlugin>,
    saved: Mutex<Vec<SavedPipeline>>,
    save_rejection: Mutex<Option<ApiError>>,
    fetches: AtomicUsize,
    saves: AtomicUsize,
}

impl CatalogApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: PluginCatalog) -> Self {
        let mut api = Self::new();
        for entry in catalog.plugins {
            api.plugins.insert(
                (entry.role, entry.name),
                CatalogPlugin {
                    templates: entry.templates,
                    properties: entry.properties,
                },
            );
        }
        api
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Ok(Self::from_catalog(load_catalog(path)?))
    }

    /// Make `plugin` available under `role` on every template.
    pub fn register(&mut self, role: Role, plugin: &str, properties: PropertySchema) {
        self.plugins.insert(
            (role, plugin.to_string()),
            CatalogPlugin {
                templates: Vec::new(),
                properties,
            },
        );
    }

    /// Fail every subsequent save with `error`.
    pub fn reject_saves(&self, error: ApiError) {
        *self
            .save_rejection
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(error);
    }

    pub fn saved(&self) -> Vec<SavedPipeline> {
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Schema fetches served so far, successful or not.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Save calls received so far, accepted or not.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PipelineApi for CatalogApi {
    async fn fetch_plugin_properties(
        &self,
        query: &PropertyQuery,
    ) -> Result<Vec<PluginProperties>, ApiError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let plugin = self
            .plugins
            .get(&(query.role, query.plugin.clone()))
            .filter(|p| p.templates.is_empty() || p.templates.contains(&query.template))
            .ok_or_else(|| ApiError::UnknownPlugin {
                role: query.role.to_string(),
                plugin: query.plugin.clone(),
                template: query.template.to_string(),
            })?;

        Ok(vec![PluginProperties {
            name: query.plugin.clone(),
            properties: plugin.properties.clone(),
        }])
    }

    async fn save_pipeline(
        &self,
        namespace: &str,
        name: &str,
        submission: &BackendSubmission,
    ) -> Result<(), ApiError> {
        self.saves.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self
            .save_rejection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SavedPipeline {
                namespace: namespace.to_string(),
                name: name.to_string(),
                submission: submission.clone(),
            });
        Ok(())
    }
}
