mod run;

pub use run::{run_pipeline, run_pipeline_with_backend, RunOptions};
