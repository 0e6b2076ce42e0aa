//! Configuration for hexglobe.
//!
//! Settings persist to disk as RON, accept CLI overrides via clap, and tolerate missing or
//! unknown fields so config files survive version changes.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, GlobeConfig, PickConfig, default_config_dir};
pub use error::ConfigError;
