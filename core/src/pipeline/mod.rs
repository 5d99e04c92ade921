pub mod mode;
pub mod params;
pub mod resolve;
pub mod select;
pub mod validate;

pub use mode::{Mode, ResourceRequest, StageShell, StageSpec, POST_REPORT_STAGE, REPORT_STAGE};
pub use params::{
    AggregateParams, ExecutionFlags, ModeParams, ScanParams, Switch, DEFAULT_SUFFIX_REPORT,
    DEFAULT_SUFFIX_STATS,
};
pub use resolve::{
    resolve_scripts_dir, ConfigResolver, RunConfiguration, RunRequest, DEFAULT_SCRIPTS_DIR,
};
pub use select::select_steps;
pub use validate::{validate, MAX_IDENTIFIER_LEN};
