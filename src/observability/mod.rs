// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Diagnostic and operational log lines are declared as message structs with
//! a `Display` implementation and a [`messages::StructuredLog`]
//! implementation that emits the message at its level with structured
//! fields attached. Call sites never format log text themselves.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::registry` - nodes entering and leaving the canvas, schema fetches
//! * `messages::flatten` - graph flattening and what it left out
//! * `messages::validation` - model validation outcomes
//! * `messages::persistence` - saves, drafts, imports and session resets
//! * `messages::editor` - property editor sessions
//!
//! # Usage
//!
//! ```rust
//! use the_plumber::observability::messages::{registry::NodeRemoved, StructuredLog};
//!
//! NodeRemoved {
//!     node_id: "stream-1",
//!     role: "source",
//!     remaining: 2,
//! }
//! .log();
//! ```

pub mod messages;
