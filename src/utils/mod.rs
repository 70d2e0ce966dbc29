//! Shared helpers

pub mod path;
pub mod shell_detect;
pub mod strings;
