//! # rstore Config
//!
//! Connection settings for rstore backends. Settings can be built in code
//! or loaded from layered sources: TOML files followed by environment
//! variables.

mod loader;
mod storage_config;

pub use loader::*;
pub use storage_config::*;
