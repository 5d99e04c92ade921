mod load;
mod sections;
mod types;

pub use load::{get_pandora_data_dir, load_default};
pub use sections::{StageSections, QPARAM_KEY};
pub use types::{AppConfig, LoggingConfig, PipelineConfig, SchedulerConfig};
