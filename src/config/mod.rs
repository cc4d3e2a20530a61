//! Configuration management for nexus-queue.
//!
//! This module handles loading and saving configuration from `~/.nexus-queue/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, EngineConfig, GeneralConfig};
