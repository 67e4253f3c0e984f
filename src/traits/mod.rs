pub mod draft_store;
pub mod pipeline_api;

pub use draft_store::DraftStore;
pub use pipeline_api::{PipelineApi, PluginProperties, PropertyQuery};
