// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit it with its fields as structured data.

use tracing::Span;

pub mod editor;
pub mod flatten;
pub mod persistence;
pub mod registry;
pub mod validation;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message at its level.
    fn log(&self);

    /// A span for scoping the work this message announces. Messages that
    /// open a unit of work override it to attach their fields.
    fn span(&self, name: &str) -> Span {
        tracing::span!(tracing::Level::DEBUG, "span_name", name = name)
    }
}
