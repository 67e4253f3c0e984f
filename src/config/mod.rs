// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod consts;
pub mod loader;
mod validation;


pub use loader::{
    load_canvas, load_catalog, load_settings, CanvasDocument, CatalogEntry, EditorSettings,
    PluginCatalog,
};
pub use validation::{
    has_name_and_template, validate_model, CONNECTIONS_KEY, INSTANCES_KEY, NAME_KEY,
    SCHEDULE_KEY, SINK_KEY, SOURCE_KEY, TEMPLATE_KEY,
};
