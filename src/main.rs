// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{bail, Context};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use the_plumber::backends::{CatalogApi, JsonFileDraftStore, MemoryDraftStore};
use the_plumber::config::{load_canvas, load_settings};
use the_plumber::service::PlumbService;
use the_plumber::traits::DraftStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "<settings.yaml> <canvas.yaml> <config|backend|draft|save>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Editing config, ids and cached schemas included
    Config,
    /// Backend submission without saving it
    Backend,
    Draft,
    Save,
}

impl Command {
    fn parse(value: &str) -> Option<Command> {
        match value {
            "config" => Some(Command::Config),
            "backend" => Some(Command::Backend),
            "draft" => Some(Command::Draft),
            "save" => Some(Command::Save),
            _ => None,
        }
    }
}

/// Settings paths are relative to the settings file.
fn relative_to(settings_path: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    settings_path
        .parent()
        .map(|dir| dir.join(path))
        .unwrap_or_else(|| path.to_path_buf())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the JSON output, logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        bail!("Usage: {} {}", args[0], USAGE);
    }
    let settings_path = Path::new(&args[1]);
    let canvas_path = Path::new(&args[2]);
    let Some(command) = Command::parse(&args[3]) else {
        bail!("Unknown command '{}'. Usage: {} {}", args[3], args[0], USAGE);
    };

    let settings = load_settings(settings_path)?;
    let canvas = load_canvas(canvas_path)?;

    let has_catalog = settings.catalog_path.is_some();
    let api = match &settings.catalog_path {
        Some(path) => CatalogApi::from_file(relative_to(settings_path, path))?,
        None => CatalogApi::new(),
    };
    let api = Arc::new(api);

    let drafts: Arc<dyn DraftStore> = match &settings.drafts_path {
        Some(path) => Arc::new(JsonFileDraftStore::new(relative_to(settings_path, path))),
        None => Arc::new(MemoryDraftStore::new()),
    };

    let mut service = PlumbService::new(api.clone(), drafts);
    service.set_metadata(canvas.metadata);
    service.load_graph(canvas.nodes, canvas.connections);

    if has_catalog {
        let resolved = service
            .resolve_pending()
            .await
            .context("Failed to resolve plugin properties")?;
        tracing::info!(resolved, "Resolved pending plugin schemas");
    }

    let output = match command {
        Command::Config => serde_json::to_value(service.get_config())?,
        Command::Backend => serde_json::to_value(service.get_config_for_backend())?,
        Command::Draft => {
            service.save_as_draft().await?;
            serde_json::json!({ "drafts": service.draft_names().await? })
        }
        Command::Save => {
            let name = service.save(&settings.namespace).await?;
            let submission = api.saved().into_iter().last().map(|saved| saved.submission);
            serde_json::json!({
                "namespace": settings.namespace,
                "name": name,
                "submission": submission,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
