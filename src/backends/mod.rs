// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Concrete collaborators for the editing service.
//!
//! # Available Backends
//!
//! ## Catalog backend
//! [`catalog::CatalogApi`] serves plugin property schemas from a YAML plugin
//! catalog and keeps saved pipelines in memory. It backs the CLI and most
//! tests.
//!
//! ## Draft stores
//! - [`memory::MemoryDraftStore`]: process-lifetime store
//! - [`file_store::JsonFileDraftStore`]: one JSON document on disk
//!
//! ## Stub Backend (Test-Only)
//! Failure and edge-case collaborators, only available in test builds:
//! - **UnreachableApi**: every call fails as if the backend were down
//! - **EmptyApi**: plugins declare no properties, saves always succeed
//! - **ScalarDraftStore**: the drafts key holds a non-map value

pub mod catalog;
pub mod file_store;
pub mod memory;
#[cfg(test)]
pub mod stub;

pub use catalog::{CatalogApi, SavedPipeline};
pub use file_store::JsonFileDraftStore;
pub use memory::MemoryDraftStore;
