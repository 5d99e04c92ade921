//! pandora-cli library: modules exposed for unit tests.

pub mod app;
pub mod commands;
