// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::{ApiError, StoreError};
use crate::graph::BackendSubmission;
use crate::traits::{DraftStore, PipelineApi, PluginProperties, PropertyQuery};

/// A backend that is never reachable
pub struct UnreachableApi;

#[async_trait]
impl PipelineApi for UnreachableApi {
    async fn fetch_plugin_properties(
        &self,
        _query: &PropertyQuery,
    ) -> Result<Vec<PluginProperties>, ApiError> {
        Err(ApiError::Unavailable("connection refused".to_string()))
    }

    async fn save_pipeline(
        &self,
        _namespace: &str,
        _name: &str,
        _submission: &BackendSubmission,
    ) -> Result<(), ApiError> {
        Err(ApiError::Unavailable("connection refused".to_string()))
    }
}

/// A backend that answers every schema request with an empty list
pub struct EmptyApi;

#[async_trait]
impl PipelineApi for EmptyApi {
    async fn fetch_plugin_properties(
        &self,
        _query: &PropertyQuery,
    ) -> Result<Vec<PluginProperties>, ApiError> {
        Ok(Vec::new())
    }

    async fn save_pipeline(
        &self,
        _namespace: &str,
        _name: &str,
        _submission: &BackendSubmission,
    ) -> Result<(), ApiError> {
        Ok(())
    }
}

/// A draft store holding something other than a map of drafts
pub struct ScalarDraftStore;

#[async_trait]
impl DraftStore for ScalarDraftStore {
    async fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(Some(serde_json::Value::String("not a map".to_string())))
    }

    async fn set(&self, _key: &str, _value: serde_json::Value) -> Result<(), StoreError> {
        Ok(())
    }
}

/// A draft store that can be read but never written
pub struct FailingDraftStore;

#[async_trait]
impl DraftStore for FailingDraftStore {
    async fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(Some(serde_json::json!({ "purchases": {} })))
    }

    async fn set(&self, _key: &str, _value: serde_json::Value) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk full",
        )))
    }
}
