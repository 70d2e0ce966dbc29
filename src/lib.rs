//! alix - Shell Alias Manager
//!
//! Keeps a personal collection of shell aliases and installs them into the
//! startup file of bash, zsh, fish or sh.
//!
//! # Features
//!
//! - Durable registry with a snapshot before every change
//! - Import aliases from config files, the live shell, or every standard startup file
//! - Managed block in the shell startup file, written atomically and idempotently
//! - Automatic backups of the startup file before it is replaced

pub mod backup;
pub mod cli;
pub mod error;
pub mod integrator;
pub mod logging;
pub mod model;
pub mod registry;
pub mod scanner;
pub mod utils;

pub use error::{AliasError, Result};
pub use integrator::{ApplyReport, Integrator};
pub use model::{Alias, Config, ShellType};
pub use registry::{ConflictStrategy, ImportSummary, Registry};
pub use scanner::Scanner;
