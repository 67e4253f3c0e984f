// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The editing session behind the pipeline canvas.
//!
//! [`PlumbService`] owns the node registry, the connection list and the
//! pipeline metadata for one session. The palette adds plugins through it,
//! the canvas feeds it connections, the properties editor opens and closes
//! edits on it, and it turns the whole canvas into a backend submission or a
//! local draft on request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::consts::DRAFTS_KEY;
use crate::config::{has_name_and_template, validate_model};
use crate::errors::{ErrorMap, PlumbError};
use crate::graph::implicit_schema::input_schema_for;
use crate::graph::{
    flatten_graph, BackendSubmission, Connection, ConnectionList, FlattenReport, FlattenedConfig,
    NodeDescriptor, NodeRegistry, PipelineMetadata, PropertyResolver, Role, TemplateKind,
};
use crate::observability::messages::editor::{EditorClosed, EditorOpened};
use crate::observability::messages::persistence::{
    DraftCleanupFailed, DraftCleared, DraftImported, DraftSaveStarted, DraftSaved,
    PipelineSaveRejected, PipelineSaveStarted, PipelineSaved, SessionReset,
};
use crate::observability::messages::StructuredLog;
use crate::service::editor::{EditOutcome, PropertyEditor};
use crate::service::events::{AddListener, ErrorListener, EventBus, ResetListener, Subscription};
use crate::traits::{DraftStore, PipelineApi};
use tracing::Instrument;

/// The raw canvas stored alongside a draft so it can be reopened exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftUi {
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeDescriptor>,
    #[serde(default)]
    pub connections: ConnectionList,
}

/// A locally stored, possibly incomplete pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineDraft {
    #[serde(flatten)]
    pub submission: BackendSubmission,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<DraftUi>,
}

pub struct PlumbService {
    registry: NodeRegistry,
    connections: ConnectionList,
    metadata: PipelineMetadata,
    api: Arc<dyn PipelineApi>,
    resolver: PropertyResolver,
    drafts: Arc<dyn DraftStore>,
    events: EventBus,
    is_disabled: bool,
    open_editor: Option<String>,
}

impl PlumbService {
    pub fn new(api: Arc<dyn PipelineApi>, drafts: Arc<dyn DraftStore>) -> Self {
        Self {
            registry: NodeRegistry::new(),
            connections: ConnectionList::new(),
            metadata: PipelineMetadata::default(),
            resolver: PropertyResolver::new(Arc::clone(&api)),
            api,
            drafts,
            events: EventBus::new(),
            is_disabled: false,
            open_editor: None,
        }
    }

    pub fn on_add(&mut self, listener: AddListener) -> Subscription {
        self.events.on_add(listener)
    }

    pub fn on_reset(&mut self, listener: ResetListener) -> Subscription {
        self.events.on_reset(listener)
    }

    pub fn on_error(&mut self, listener: ErrorListener) -> Subscription {
        self.events.on_error(listener)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    pub fn metadata(&self) -> &PipelineMetadata {
        &self.metadata
    }

    pub fn metadata_mut(&mut self) -> &mut PipelineMetadata {
        &mut self.metadata
    }

    pub fn set_metadata(&mut self, metadata: PipelineMetadata) {
        self.metadata = metadata;
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn connections(&self) -> &ConnectionList {
        &self.connections
    }

    pub fn node(&self, node_id: &str) -> Option<&NodeDescriptor> {
        self.registry.get(node_id)
    }

    pub fn role_count(&self, role: Role) -> usize {
        self.registry.role_count(role)
    }

    pub fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    /// Put the editor in read-only mode. Editors opened afterwards carry
    /// the flag.
    pub fn set_is_disabled(&mut self, disabled: bool) {
        self.is_disabled = disabled;
    }

    /// Template used for schema lookups. Falls back to batch while no
    /// template is selected.
    fn active_template(&self) -> TemplateKind {
        self.metadata.template_kind().unwrap_or(TemplateKind::Batch)
    }

    /// Place a plugin on the canvas and notify add listeners.
    ///
    /// A node arriving without a backend schema is resolved right after the
    /// listeners ran. If that lookup fails the node stays on the canvas with
    /// its schema pending and the error is returned.
    pub async fn add_node(&mut self, node: NodeDescriptor, role: Role) -> Result<(), PlumbError> {
        let id = node.id.clone();
        let added = self.registry.add(node, role);
        self.events.notify_add(added, role);

        if added.is_ready() {
            return Ok(());
        }

        let template = self.active_template();
        if let Some(node) = self.registry.get_mut(&id) {
            self.resolver.resolve(node, template, None).await?;
        }
        Ok(())
    }

    pub fn remove_node(&mut self, node_id: &str) -> Option<NodeDescriptor> {
        self.registry.remove(node_id)
    }

    pub fn add_connection(&mut self, connection: Connection) {
        self.connections.add(connection);
    }

    pub fn set_connections(&mut self, connections: impl IntoIterator<Item = Connection>) {
        self.connections.set(connections);
    }

    /// Replace the canvas with stored nodes and edges. Positions are kept
    /// and no add listener runs.
    pub fn load_graph(
        &mut self,
        nodes: impl IntoIterator<Item = NodeDescriptor>,
        connections: impl IntoIterator<Item = Connection>,
    ) {
        self.registry = NodeRegistry::from_nodes(nodes);
        self.connections.set(connections);
    }

    /// Resolve the backend schema of every node still pending. Returns how
    /// many nodes were resolved.
    pub async fn resolve_pending(&mut self) -> Result<usize, PlumbError> {
        let pending: Vec<String> = self
            .registry
            .iter()
            .filter(|node| !node.is_ready())
            .map(|node| node.id.clone())
            .collect();

        let template = self.active_template();
        for id in &pending {
            if let Some(node) = self.registry.get_mut(id) {
                self.resolver.resolve(node, template, None).await?;
            }
        }
        Ok(pending.len())
    }

    /// Open the properties editor for a node.
    ///
    /// The node's backend schema is fetched again so the editor shows the
    /// current contract. The returned editor holds a snapshot taken after
    /// that refresh; cancelling restores it.
    pub async fn edit_plugin_properties(
        &mut self,
        node_id: &str,
        scope: Option<&str>,
    ) -> Result<PropertyEditor, PlumbError> {
        if !self.registry.contains(node_id) {
            return Err(PlumbError::NodeNotFound(node_id.to_string()));
        }

        let input_schema = input_schema_for(&self.registry, &self.connections, node_id);
        let template = self.active_template();

        let node = self
            .registry
            .get_mut(node_id)
            .ok_or_else(|| PlumbError::NodeNotFound(node_id.to_string()))?;
        self.resolver.resolve(node, template, scope).await?;

        let snapshot = node.clone();
        if node.output_schema.is_empty() && !input_schema.is_empty() {
            node.set_output_schema(Some(input_schema.clone()));
        }

        let editor = PropertyEditor::open(snapshot, input_schema, template, self.is_disabled);
        EditorOpened {
            node_id,
            has_input_schema: editor.has_input_schema(),
            read_only: editor.read_only,
        }
        .log();

        self.open_editor = Some(node_id.to_string());
        Ok(editor)
    }

    pub fn finish_edit(&mut self, editor: PropertyEditor, outcome: EditOutcome) {
        if self.open_editor.as_deref() == Some(editor.node_id.as_str()) {
            self.open_editor = None;
        }

        let reverted = outcome == EditOutcome::Cancel;
        EditorClosed {
            node_id: &editor.node_id,
            reverted,
        }
        .log();

        if reverted {
            self.registry.restore(editor.into_snapshot());
        }
    }

    /// Close any open editor, keeping its edits.
    pub fn teardown(&mut self) {
        if let Some(node_id) = self.open_editor.take() {
            EditorClosed {
                node_id: &node_id,
                reverted: false,
            }
            .log();
        }
    }

    pub fn has_open_editor(&self) -> bool {
        self.open_editor.is_some()
    }

    pub fn set_output_schema(
        &mut self,
        node_id: &str,
        schema: Option<String>,
    ) -> Result<(), PlumbError> {
        let node = self
            .registry
            .get_mut(node_id)
            .ok_or_else(|| PlumbError::NodeNotFound(node_id.to_string()))?;
        node.set_output_schema(schema);
        Ok(())
    }

    /// Set one property value on a node. Made while an editor is open on
    /// the node, the change is undone if that editor is cancelled.
    pub fn set_property(
        &mut self,
        node_id: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), PlumbError> {
        let node = self
            .registry
            .get_mut(node_id)
            .ok_or_else(|| PlumbError::NodeNotFound(node_id.to_string()))?;
        node.properties.insert(key.into(), value.into());
        Ok(())
    }

    /// Drop one property from a node, returning its old value.
    pub fn remove_property(
        &mut self,
        node_id: &str,
        key: &str,
    ) -> Result<Option<String>, PlumbError> {
        let node = self
            .registry
            .get_mut(node_id)
            .ok_or_else(|| PlumbError::NodeNotFound(node_id.to_string()))?;
        Ok(node.properties.remove(key))
    }

    pub fn flatten(&self) -> (FlattenedConfig, FlattenReport) {
        flatten_graph(&self.registry, &self.connections, &self.metadata)
    }

    /// The canvas in its editing shape: ids and cached schemas kept.
    pub fn get_config(&self) -> FlattenedConfig {
        self.flatten().0
    }

    pub fn get_config_for_backend(&self) -> BackendSubmission {
        BackendSubmission::build(self.get_config(), &self.metadata)
    }

    fn reject(&self, errors: ErrorMap) -> PlumbError {
        self.events.notify_error(&errors);
        PlumbError::Validation(errors)
    }

    /// Validate and submit the pipeline to the backend.
    ///
    /// Nothing is sent when validation fails. After the backend accepts the
    /// pipeline its draft is dropped and the session reset. Returns the name
    /// it was saved under. Once the backend has accepted, a draft store
    /// failure is logged and does not fail the save.
    pub async fn save(&mut self, namespace: &str) -> Result<String, PlumbError> {
        let (config, _) = self.flatten();
        if let Err(errors) =
            validate_model(&self.registry, &self.connections, &self.metadata, &config)
        {
            return Err(self.reject(errors));
        }

        let name = self.metadata.name.clone();
        let submission = BackendSubmission::build(config, &self.metadata);

        let started = PipelineSaveStarted {
            namespace,
            pipeline: &name,
            node_count: self.registry.len(),
        };
        started.log();
        let span = started.span("save_pipeline");

        if let Err(error) = self
            .api
            .save_pipeline(namespace, &name, &submission)
            .instrument(span.clone())
            .await
        {
            PipelineSaveRejected {
                namespace,
                pipeline: &name,
                error: &error,
            }
            .log();
            return Err(error.into());
        }

        PipelineSaved {
            namespace,
            pipeline: &name,
            template: submission.template.map_or("", |t| t.as_str()),
        }
        .log();

        if let Err(error) = self.clear_draft(&name).instrument(span).await {
            DraftCleanupFailed {
                pipeline: &name,
                error: &error,
            }
            .log();
        }
        self.reset_to_defaults(false);
        Ok(name)
    }

    /// Store the pipeline locally, complete or not, under its name.
    ///
    /// Only a name and template are required. An existing draft with the
    /// same name is overwritten.
    pub async fn save_as_draft(&mut self) -> Result<(), PlumbError> {
        if let Err(errors) = has_name_and_template(&self.metadata) {
            return Err(self.reject(errors));
        }

        let draft = PipelineDraft {
            submission: self.get_config_for_backend(),
            ui: Some(DraftUi {
                nodes: self.registry.as_map().clone(),
                connections: self.connections.clone(),
            }),
        };

        let name = self.metadata.name.clone();
        let started = DraftSaveStarted { pipeline: &name };
        started.log();
        let span = started.span("save_as_draft");

        let (draft_count, replaced) = async {
            let mut drafts = self.load_drafts().await?;
            let replaced = drafts
                .insert(name.clone(), serde_json::to_value(&draft)?)
                .is_some();
            let draft_count = drafts.len();
            self.drafts
                .set(DRAFTS_KEY, serde_json::Value::Object(drafts))
                .await?;
            Ok::<_, PlumbError>((draft_count, replaced))
        }
        .instrument(span)
        .await?;

        DraftSaved {
            pipeline: &name,
            draft_count,
            replaced,
        }
        .log();
        Ok(())
    }

    /// Names of all stored drafts.
    pub async fn draft_names(&self) -> Result<Vec<String>, PlumbError> {
        Ok(self.load_drafts().await?.keys().cloned().collect())
    }

    /// Reopen a stored draft on a fresh canvas.
    pub async fn import_draft(&mut self, name: &str) -> Result<(), PlumbError> {
        let value = self
            .load_drafts()
            .await?
            .remove(name)
            .ok_or_else(|| PlumbError::DraftNotFound(name.to_string()))?;
        let draft: PipelineDraft = serde_json::from_value(value)?;

        self.reset_to_defaults(true);
        self.metadata = metadata_from_draft(name, &draft.submission);

        let from_ui_payload = draft.ui.is_some();
        match draft.ui {
            Some(ui) => self.load_graph(ui.nodes.into_values(), ui.connections.as_slice().to_vec()),
            None => {
                let (nodes, connections) = chain_config(name, &draft.submission).to_graph();
                self.load_graph(nodes, connections);
            }
        }

        DraftImported {
            pipeline: name,
            node_count: self.registry.len(),
            connection_count: self.connections.len(),
            from_ui_payload,
        }
        .log();
        Ok(())
    }

    /// Clear the canvas and metadata. With `import` the pipeline name
    /// survives. Reset listeners are notified; subscriptions stay.
    pub fn reset_to_defaults(&mut self, import: bool) {
        let name = std::mem::take(&mut self.metadata.name);

        self.registry.clear();
        self.connections.clear();
        self.metadata = PipelineMetadata::default();
        self.open_editor = None;
        if import {
            self.metadata.name = name;
        }

        SessionReset { kept_name: import }.log();
        self.events.notify_reset();
    }

    async fn load_drafts(&self) -> Result<serde_json::Map<String, serde_json::Value>, PlumbError> {
        match self.drafts.get(DRAFTS_KEY).await? {
            Some(serde_json::Value::Object(drafts)) => Ok(drafts),
            _ => Ok(serde_json::Map::new()),
        }
    }

    async fn clear_draft(&self, name: &str) -> Result<(), PlumbError> {
        let mut drafts = self.load_drafts().await?;
        if drafts.remove(name).is_none() {
            return Ok(());
        }

        self.drafts
            .set(DRAFTS_KEY, serde_json::Value::Object(drafts))
            .await?;
        DraftCleared { pipeline: name }.log();
        Ok(())
    }
}

fn metadata_from_draft(name: &str, submission: &BackendSubmission) -> PipelineMetadata {
    let mut metadata = PipelineMetadata::named(name);
    metadata.description = submission.description.clone();
    metadata.template.kind = submission.template;
    if let Some(cron) = &submission.config.schedule {
        metadata.template.schedule.cron = cron.clone();
    }
    if let Some(instances) = submission.config.instances {
        metadata.template.instance = instances;
    }
    metadata
}

fn chain_config(name: &str, submission: &BackendSubmission) -> FlattenedConfig {
    FlattenedConfig {
        name: name.to_string(),
        description: submission.description.clone(),
        template: submission.template,
        source: submission.config.source.clone(),
        sink: submission.config.sink.clone(),
        transforms: submission.config.transforms.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::catalog::CatalogApi;
    use crate::backends::memory::MemoryDraftStore;
    use crate::backends::stub::{EmptyApi, FailingDraftStore, ScalarDraftStore, UnreachableApi};
    use crate::config::consts::SCHEMA_PROPERTY;
    use crate::errors::ApiError;
    use crate::graph::implicit_schema::CLF_SCHEMA;
    use crate::graph::{PropertySchema, SchemaField};
    use std::sync::Mutex;

    fn fields(keys: &[&str]) -> PropertySchema {
        keys.iter()
            .map(|k| (k.to_string(), SchemaField::new(*k, "string")))
            .collect()
    }

    fn catalog() -> Arc<CatalogApi> {
        let mut api = CatalogApi::new();
        api.register(Role::Source, "Stream", fields(&["name", "format"]));
        api.register(Role::Transform, "Projection", fields(&["drop", "schema"]));
        api.register(Role::Sink, "Table", fields(&["name"]));
        Arc::new(api)
    }

    fn service_with(api: Arc<CatalogApi>, store: Arc<MemoryDraftStore>) -> PlumbService {
        PlumbService::new(api, store)
    }

    async fn linear_pipeline(service: &mut PlumbService) {
        service.metadata_mut().name = "purchases".to_string();
        service
            .add_node(
                NodeDescriptor::new("A", "Stream", Role::Source).with_property("name", "raw"),
                Role::Source,
            )
            .await
            .unwrap();
        service
            .add_node(NodeDescriptor::new("B", "Projection", Role::Transform), Role::Transform)
            .await
            .unwrap();
        service
            .add_node(
                NodeDescriptor::new("C", "Table", Role::Sink).with_property("name", "out"),
                Role::Sink,
            )
            .await
            .unwrap();
        service.set_connections(vec![Connection::new("A", "B"), Connection::new("B", "C")]);
    }

    #[tokio::test]
    async fn test_add_node_notifies_then_resolves_schema() {
        let api = catalog();
        let mut service = service_with(Arc::clone(&api), Arc::new(MemoryDraftStore::new()));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        service.on_add(Box::new(move |node, role| {
            sink.lock().unwrap().push((node.id.clone(), role, node.is_ready()));
        }));

        service
            .add_node(NodeDescriptor::new("A", "Stream", Role::Source), Role::Source)
            .await
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![("A".to_string(), Role::Source, false)]);
        let node = service.node("A").unwrap();
        assert!(node.is_ready());
        assert_eq!(node.properties.get("format").map(String::as_str), Some(""));
        assert_eq!(api.fetch_count(), 1);
        assert_eq!(service.role_count(Role::Source), 1);
    }

    #[tokio::test]
    async fn test_add_node_with_schema_skips_fetch() {
        let api = catalog();
        let mut service = service_with(Arc::clone(&api), Arc::new(MemoryDraftStore::new()));

        service
            .add_node(
                NodeDescriptor::new("A", "Stream", Role::Source).with_schema(fields(&["name"])),
                Role::Source,
            )
            .await
            .unwrap();

        assert_eq!(api.fetch_count(), 0);
        assert_eq!(service.node("A").unwrap().properties.get("name").map(String::as_str), Some(""));
    }

    #[tokio::test]
    async fn test_add_node_fetch_failure_keeps_node_pending() {
        let mut service =
            PlumbService::new(Arc::new(UnreachableApi), Arc::new(MemoryDraftStore::new()));

        let result = service
            .add_node(NodeDescriptor::new("A", "Stream", Role::Source), Role::Source)
            .await;

        assert!(matches!(result, Err(PlumbError::Backend(ApiError::Unavailable(_)))));
        assert!(!service.node("A").unwrap().is_ready());
    }

    #[tokio::test]
    async fn test_role_counts_follow_add_and_remove() {
        let mut service = PlumbService::new(Arc::new(EmptyApi), Arc::new(MemoryDraftStore::new()));
        for id in ["t1", "t2", "t3"] {
            service
                .add_node(NodeDescriptor::new(id, "Projection", Role::Transform), Role::Transform)
                .await
                .unwrap();
        }

        assert_eq!(service.node("t3").unwrap().position.left, 54);
        assert!(service.remove_node("t2").is_some());
        assert!(service.remove_node("t2").is_none());
        assert_eq!(service.role_count(Role::Transform), 2);
    }

    #[tokio::test]
    async fn test_get_config_partitions_by_role() {
        let mut service = service_with(catalog(), Arc::new(MemoryDraftStore::new()));
        linear_pipeline(&mut service).await;

        let config = service.get_config();

        assert_eq!(config.source.as_ref().unwrap().id.as_deref(), Some("A"));
        assert_eq!(config.transforms.len(), 1);
        assert_eq!(config.transforms[0].id.as_deref(), Some("B"));
        assert_eq!(config.sink.as_ref().unwrap().id.as_deref(), Some("C"));
    }

    #[tokio::test]
    async fn test_backend_config_round_trips_through_editing_config() {
        let mut service = service_with(catalog(), Arc::new(MemoryDraftStore::new()));
        linear_pipeline(&mut service).await;
        let expected = service.get_config_for_backend();

        let (nodes, connections) = service.get_config().to_graph();
        let mut rebuilt = service_with(catalog(), Arc::new(MemoryDraftStore::new()));
        rebuilt.set_metadata(service.metadata().clone());
        rebuilt.load_graph(nodes, connections);

        assert_eq!(rebuilt.get_config_for_backend(), expected);
    }

    #[tokio::test]
    async fn test_save_as_draft_without_name_never_reaches_backend() {
        let api = catalog();
        let store = Arc::new(MemoryDraftStore::new());
        let mut service = service_with(Arc::clone(&api), Arc::clone(&store));
        let reported = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&reported);
        service.on_error(Box::new(move |errors| sink.lock().unwrap().push(errors.clone())));

        let error = service.save_as_draft().await.unwrap_err();

        assert!(error.validation_errors().unwrap().contains_key("name"));
        assert_eq!(reported.lock().unwrap().len(), 1);
        assert_eq!(api.save_count(), 0);
        assert_eq!(store.get(DRAFTS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_as_draft_upserts_by_name() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut service = service_with(catalog(), Arc::clone(&store));
        linear_pipeline(&mut service).await;

        service.save_as_draft().await.unwrap();
        service.metadata_mut().description = "second".to_string();
        service.save_as_draft().await.unwrap();

        assert_eq!(service.draft_names().await.unwrap(), vec!["purchases".to_string()]);
        let stored = store.get(DRAFTS_KEY).await.unwrap().unwrap();
        let draft: PipelineDraft = serde_json::from_value(stored["purchases"].clone()).unwrap();
        assert_eq!(draft.submission.description, "second");
        assert_eq!(draft.ui.unwrap().nodes.len(), 3);
    }

    #[tokio::test]
    async fn test_save_as_draft_replaces_non_map_store_contents() {
        let mut service = PlumbService::new(Arc::new(EmptyApi), Arc::new(ScalarDraftStore));
        service.metadata_mut().name = "partial".to_string();

        assert!(service.save_as_draft().await.is_ok());
    }

    #[tokio::test]
    async fn test_save_validates_before_calling_backend() {
        let api = catalog();
        let mut service = service_with(Arc::clone(&api), Arc::new(MemoryDraftStore::new()));
        linear_pipeline(&mut service).await;
        service
            .add_node(NodeDescriptor::new("D", "Projection", Role::Transform), Role::Transform)
            .await
            .unwrap();

        let error = service.save("default").await.unwrap_err();

        assert!(error.validation_errors().unwrap().contains_key("D"));
        assert_eq!(api.save_count(), 0);
        assert_eq!(service.registry().len(), 4);
    }

    #[tokio::test]
    async fn test_save_submits_clears_draft_and_resets() {
        let api = catalog();
        let store = Arc::new(MemoryDraftStore::new());
        let mut service = service_with(Arc::clone(&api), Arc::clone(&store));
        let resets = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&resets);
        service.on_reset(Box::new(move || *counter.lock().unwrap() += 1));
        linear_pipeline(&mut service).await;
        service.save_as_draft().await.unwrap();

        let name = service.save("analytics").await.unwrap();

        assert_eq!(name, "purchases");
        let saved = api.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].namespace, "analytics");
        let source = saved[0].submission.config.source.as_ref().unwrap();
        assert_eq!(source.id, None);
        assert_eq!(source.properties.get("name").map(String::as_str), Some("raw"));
        assert_eq!(saved[0].submission.config.schedule.as_deref(), Some("* * * * *"));

        assert!(service.draft_names().await.unwrap().is_empty());
        assert!(service.registry().is_empty());
        assert_eq!(service.metadata().name, "");
        assert_eq!(*resets.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_succeeds_when_draft_cleanup_fails() {
        let api = catalog();
        let mut service = PlumbService::new(api.clone(), Arc::new(FailingDraftStore));
        linear_pipeline(&mut service).await;

        let name = service.save("analytics").await.unwrap();

        assert_eq!(name, "purchases");
        assert_eq!(api.save_count(), 1);
        assert!(service.registry().is_empty());
    }

    #[tokio::test]
    async fn test_save_rejection_keeps_session() {
        let api = catalog();
        api.reject_saves(ApiError::Rejected {
            status: 409,
            message: "pipeline exists".to_string(),
        });
        let mut service = service_with(Arc::clone(&api), Arc::new(MemoryDraftStore::new()));
        linear_pipeline(&mut service).await;

        let error = service.save("default").await.unwrap_err();

        assert!(matches!(error, PlumbError::Backend(ApiError::Rejected { status: 409, .. })));
        assert_eq!(service.registry().len(), 3);
    }

    #[tokio::test]
    async fn test_edit_copies_input_schema_and_cancel_reverts() {
        let mut service = service_with(catalog(), Arc::new(MemoryDraftStore::new()));
        linear_pipeline(&mut service).await;
        service.set_property("A", "format", "clf").unwrap();

        let editor = service.edit_plugin_properties("B", Some("modal")).await.unwrap();

        assert_eq!(editor.input_schema, CLF_SCHEMA);
        assert_eq!(editor.input_fields.as_ref().map(Vec::len), Some(9));
        let edited = service.node("B").unwrap();
        assert_eq!(edited.output_schema, CLF_SCHEMA);
        assert_eq!(edited.properties.get(SCHEMA_PROPERTY).map(String::as_str), Some(CLF_SCHEMA));
        assert!(service.has_open_editor());

        service.finish_edit(editor, EditOutcome::Cancel);

        assert_eq!(service.node("B").unwrap().output_schema, "");
        assert!(!service.has_open_editor());
    }

    #[tokio::test]
    async fn test_property_edits_follow_editor_outcome() {
        let mut service = service_with(catalog(), Arc::new(MemoryDraftStore::new()));
        linear_pipeline(&mut service).await;

        let editor = service.edit_plugin_properties("C", None).await.unwrap();
        service.set_property("C", "name", "changed").unwrap();
        assert_eq!(service.node("C").unwrap().properties["name"], "changed");
        service.finish_edit(editor, EditOutcome::Cancel);
        assert_eq!(service.node("C").unwrap().properties["name"], "out");

        let editor = service.edit_plugin_properties("C", None).await.unwrap();
        service.set_property("C", "name", "kept").unwrap();
        assert_eq!(
            service.remove_property("A", "format").unwrap().as_deref(),
            Some("")
        );
        service.finish_edit(editor, EditOutcome::Keep);
        assert_eq!(service.node("C").unwrap().properties["name"], "kept");
        assert!(!service.node("A").unwrap().properties.contains_key("format"));

        assert!(matches!(
            service.set_property("missing", "name", "x"),
            Err(PlumbError::NodeNotFound(_))
        ));
        assert!(matches!(
            service.remove_property("missing", "name"),
            Err(PlumbError::NodeNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_edit_keep_and_teardown() {
        let mut service = service_with(catalog(), Arc::new(MemoryDraftStore::new()));
        linear_pipeline(&mut service).await;
        service.set_is_disabled(true);

        let editor = service.edit_plugin_properties("A", None).await.unwrap();
        assert!(editor.read_only);
        assert!(editor.input_fields.is_none());
        service.set_output_schema("A", Some("{}".to_string())).unwrap();
        service.finish_edit(editor, EditOutcome::Keep);
        assert_eq!(service.node("A").unwrap().output_schema, "{}");

        let _editor = service.edit_plugin_properties("C", None).await.unwrap();
        service.teardown();
        assert!(!service.has_open_editor());

        assert!(matches!(
            service.edit_plugin_properties("missing", None).await,
            Err(PlumbError::NodeNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_reset_for_import_keeps_name() {
        let mut service = service_with(catalog(), Arc::new(MemoryDraftStore::new()));
        linear_pipeline(&mut service).await;
        service.metadata_mut().description = "hourly".to_string();

        service.reset_to_defaults(true);

        assert_eq!(service.metadata().name, "purchases");
        assert_eq!(service.metadata().description, "");
        assert!(service.connections().is_empty());
        assert_eq!(service.role_count(Role::Sink), 0);
    }

    #[tokio::test]
    async fn test_import_draft_restores_canvas() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut service = service_with(catalog(), Arc::clone(&store));
        linear_pipeline(&mut service).await;
        service.metadata_mut().template.schedule.cron = "0 * * * *".to_string();
        service.save_as_draft().await.unwrap();
        let before = service.get_config();
        service.reset_to_defaults(false);

        service.import_draft("purchases").await.unwrap();

        assert_eq!(service.get_config(), before);
        assert_eq!(service.metadata().template.schedule.cron, "0 * * * *");
        assert!(matches!(
            service.import_draft("nope").await,
            Err(PlumbError::DraftNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_import_draft_without_ui_builds_chain() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut service = service_with(catalog(), Arc::clone(&store));
        linear_pipeline(&mut service).await;
        let draft = PipelineDraft {
            submission: service.get_config_for_backend(),
            ui: None,
        };
        store
            .set(
                DRAFTS_KEY,
                serde_json::json!({ "legacy": serde_json::to_value(&draft).unwrap() }),
            )
            .await
            .unwrap();

        service.import_draft("legacy").await.unwrap();

        assert_eq!(service.metadata().name, "legacy");
        assert_eq!(service.registry().len(), 3);
        let ids: Vec<&str> = service
            .connections()
            .iter()
            .map(|c| c.source.as_str())
            .collect();
        assert_eq!(ids, vec!["source-0", "transform-1"]);
        assert_eq!(service.get_config_for_backend().config, draft.submission.config);
    }
}
