// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Stripping a flattened config down to what the backend understands.
//!
//! Both passes are idempotent; pruning an already pruned config changes
//! nothing.

use serde::{Deserialize, Serialize};

use crate::graph::flatten::{FlattenedConfig, PluginEntry};
use crate::graph::metadata::{PipelineMetadata, TemplateKind};

/// Drop every property the plugin's backend schema does not declare.
///
/// An entry whose schema was never loaded has nothing to prune against and
/// is left as it is.
pub fn prune_non_backend_properties(config: &mut FlattenedConfig) {
    for entry in config.entries_mut() {
        prune_entry(entry);
    }
}

fn prune_entry(entry: &mut PluginEntry) {
    if entry.properties.is_empty() {
        return;
    }
    let Some(schema) = entry.backend_properties.as_ref() else {
        return;
    };
    entry.properties.retain(|key, _| schema.contains_key(key));
}

/// Prune undeclared properties, then strip editor bookkeeping (`id` and the
/// cached backend schema) from every entry.
pub fn prune_properties(config: &mut FlattenedConfig) {
    prune_non_backend_properties(config);
    for entry in config.entries_mut() {
        entry.id = None;
        entry.backend_properties = None;
    }
}

/// Plugins and run settings as submitted to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub source: Option<PluginEntry>,
    #[serde(default)]
    pub sink: Option<PluginEntry>,
    #[serde(default)]
    pub transforms: Vec<PluginEntry>,
    /// Cron expression, batch pipelines only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    /// Worker count, realtime pipelines only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instances: Option<u32>,
}

/// The body of a pipeline save call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendSubmission {
    #[serde(default)]
    pub template: Option<TemplateKind>,
    #[serde(default)]
    pub description: String,
    pub config: BackendConfig,
}

impl BackendSubmission {
    /// Prune `config` and wrap it with the template's run settings.
    pub fn build(mut config: FlattenedConfig, metadata: &PipelineMetadata) -> Self {
        prune_properties(&mut config);

        let template = metadata.template_kind();
        let (schedule, instances) = match template {
            Some(TemplateKind::Batch) => (Some(metadata.template.schedule.cron.clone()), None),
            Some(TemplateKind::Realtime) => (None, Some(metadata.template.instance)),
            None => (None, None),
        };

        Self {
            template,
            description: metadata.description.clone(),
            config: BackendConfig {
                source: config.source,
                sink: config.sink,
                transforms: config.transforms,
                schedule,
                instances,
            },
        }
    }
}
