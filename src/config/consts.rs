/// Settings-store key under which drafts are kept, one entry per pipeline name
pub const DRAFTS_KEY: &str = "pipelineDrafts";
/// Cron used for a fresh batch pipeline (every minute)
pub const DEFAULT_SCHEDULE_CRON: &str = "* * * * *";
/// Instance count used for a fresh realtime pipeline
pub const DEFAULT_INSTANCES: u32 = 1;
/// Namespace used when settings do not name one
pub const DEFAULT_NAMESPACE: &str = "default";

/// Left edge (vw) of the first source node on the canvas
pub const SOURCE_INITIAL_LEFT_VW: u32 = 30;
/// Left edge (vw) of the first transform node on the canvas
pub const TRANSFORM_INITIAL_LEFT_VW: u32 = 50;
/// Left edge (vw) of the first sink node on the canvas
pub const SINK_INITIAL_LEFT_VW: u32 = 70;
/// Top edge (px) of the first node of every role
pub const INITIAL_TOP_PX: u32 = 250;
/// Horizontal step (vw) between consecutive nodes of the same role
pub const LEFT_STEP_VW: u32 = 2;
/// Vertical step (px) between consecutive nodes of the same role
pub const TOP_STEP_PX: u32 = 70;

/// Property a source uses to declare a well-known log format
pub const FORMAT_PROPERTY: &str = "format";
/// Property that carries a plugin's record schema
pub const SCHEMA_PROPERTY: &str = "schema";
