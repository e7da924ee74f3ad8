//! Environment-facing adapters: location signal and configuration files.

pub mod config;
pub mod signal;
