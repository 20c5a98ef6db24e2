//! Configuration system for Biomer.
//!
//! Settings persist to disk as a RON file, can be overridden from the command
//! line via clap, and tolerate missing or unknown fields.

mod cli;
mod config;
mod error;

pub use cli::GlobalArgs;
pub use config::{Config, DebugConfig, EditConfig, PathsConfig, RenderConfig, default_config_dir};
pub use error::ConfigError;
