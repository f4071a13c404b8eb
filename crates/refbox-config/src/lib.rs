//! Configuration for the referee listener.
//!
//! Settings persist to disk as a RON file. CLI flags override the file.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{Config, DebugConfig, NetworkConfig};
pub use error::ConfigError;
