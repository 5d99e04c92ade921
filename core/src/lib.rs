pub mod api;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod executor;
pub mod pipeline;
