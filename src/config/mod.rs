//! Configuration management for portsweep.
//!
//! `ScanConfig` carries the engine tunables; `Settings` is the optional
//! on-disk layer of user defaults.

mod scan;
mod settings;

pub use scan::{
    ScanConfig, DEFAULT_BANNER_TIMEOUT, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT, MAX_CONCURRENCY,
};
pub use settings::{default_settings_path, Settings};
