// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod connections;
pub mod flatten;
pub mod implicit_schema;
pub mod metadata;
pub mod node;
pub mod prune;
pub mod registry;
pub mod resolver;

pub use connections::{Connection, ConnectionList};
pub use flatten::{flatten_graph, FlattenReport, FlattenedConfig, PluginEntry};
pub use metadata::{PipelineMetadata, Schedule, Template, TemplateKind};
pub use node::{NodeDescriptor, Position, PropertySchema, Role, SchemaField, SchemaState};
pub use prune::{prune_non_backend_properties, prune_properties, BackendConfig, BackendSubmission};
pub use registry::NodeRegistry;
pub use resolver::PropertyResolver;
