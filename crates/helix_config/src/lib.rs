//! Configuration for the Helix mapping pipeline.
//!
//! Algorithm parameters are read from a `helix.toml` file (or constructed
//! programmatically) and validated before the search starts. Every parameter
//! has a default, so an empty configuration is valid.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, parse_config};
pub use types::{AnnealConfig, MappingConfig};
