// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::consts::{DEFAULT_INSTANCES, DEFAULT_SCHEDULE_CRON};

/// Which application template the pipeline runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemplateKind {
    #[serde(rename = "ETLBatch")]
    Batch,
    #[serde(rename = "ETLRealtime")]
    Realtime,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Batch => "ETLBatch",
            TemplateKind::Realtime => "ETLRealtime",
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub cron: String,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            cron: DEFAULT_SCHEDULE_CRON.to_string(),
        }
    }
}

/// Template settings. Batch pipelines use `schedule`, realtime pipelines
/// use `instance`; both are kept so switching templates loses nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "type", default)]
    pub kind: Option<TemplateKind>,
    #[serde(default = "default_instances")]
    pub instance: u32,
    #[serde(default)]
    pub schedule: Schedule,
}

fn default_instances() -> u32 {
    DEFAULT_INSTANCES
}

impl Default for Template {
    fn default() -> Self {
        Self {
            kind: Some(TemplateKind::Batch),
            instance: DEFAULT_INSTANCES,
            schedule: Schedule::default(),
        }
    }
}

/// Name, description and template of the pipeline being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub template: Template,
}

impl PipelineMetadata {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn template_kind(&self) -> Option<TemplateKind> {
        self.template.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fresh_session() {
        let metadata = PipelineMetadata::default();
        assert_eq!(metadata.name, "");
        assert_eq!(metadata.template_kind(), Some(TemplateKind::Batch));
        assert_eq!(metadata.template.instance, 1);
        assert_eq!(metadata.template.schedule.cron, "* * * * *");
    }

    #[test]
    fn test_template_kind_wire_names() {
        let yaml = "name: p\ntemplate:\n  type: ETLRealtime\n  instance: 3\n";
        let metadata: PipelineMetadata = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(metadata.template_kind(), Some(TemplateKind::Realtime));
        assert_eq!(metadata.template.instance, 3);
        assert_eq!(metadata.template.schedule.cron, "* * * * *");

        let missing: PipelineMetadata = serde_yaml::from_str("name: p\ntemplate: {}\n").unwrap();
        assert_eq!(missing.template_kind(), None);
    }
}
