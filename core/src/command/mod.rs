mod args;
mod builder;
mod resources;

pub use args::UNSET;
pub use builder::{CommandBuilder, StepDefinition};
pub use resources::resource_fragment;
