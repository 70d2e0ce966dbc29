//! Core data models for alix

mod alias;
mod config;
mod shell;

pub use alias::{validate_command, validate_name, Alias};
pub use config::{BackupConfig, Config, IntegrationConfig, StorageConfig, UiConfig};
pub(crate) use shell::run_alias_listing;
pub use shell::ShellType;
