pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod logging;
pub mod orchestrator;
pub mod pipeline;
pub mod prompts;
pub mod server;
pub mod types;
