// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;      // PipelineApi and DraftStore implementations
pub mod config;        // settings, canvas documents, model validation
pub mod errors;        // error handling
pub mod graph;         // nodes, connections, flattening, pruning
pub mod observability;
pub mod service;       // editing session
pub mod traits;        // collaborator abstractions
