//! Configuration management for the rtpkg CLI
//!
//! Settings live in a small TOML file (`rtpkg.toml`). The location is resolved
//! from the `RTPKG_CONFIG` environment variable when set, otherwise from the
//! platform configuration directory.

pub mod settings;

pub use settings::{Config, ConfigError, CONFIG_ENV_VAR, KNOWN_KEYS};
