//! Worktrack CLI
//!
//! Library half of the `worktrack` binary: configuration, logging setup,
//! project file loading and the report subcommands.

pub mod commands;
pub mod config;
pub mod input;
pub mod logging;

pub use commands::{run, Report, RunContext};
pub use config::{CliConfig, ConfigError};
pub use input::{load_projects, parse_projects};
pub use logging::init_tracing;
