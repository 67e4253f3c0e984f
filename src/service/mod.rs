// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod editor;
pub mod events;
pub mod plumb;

pub use editor::{EditOutcome, PropertyEditor};
pub use events::{Channel, EventBus, Subscription};
pub use plumb::{DraftUi, PipelineDraft, PlumbService};
