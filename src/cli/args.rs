//! CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::model::ShellType;

#[derive(Parser)]
#[command(name = "alix")]
#[command(about = "Shell alias manager")]
#[command(version)]
#[command(author)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Shell to integrate with (detected when omitted)
    #[arg(short, long, global = true)]
    pub shell: Option<ShellArg>,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add an alias and write it to the shell startup file
    Add(AddArgs),

    /// Remove an alias
    #[command(visible_alias = "rm")]
    Remove {
        /// Alias name
        name: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// List aliases
    #[command(visible_alias = "ls")]
    List {
        /// Only aliases in this group
        #[arg(short, long)]
        group: Option<String>,
    },

    /// Import aliases from shell config files or the running shell
    Scan {
        /// Where to look for aliases
        #[arg(long, value_enum, default_value = "system")]
        source: ScanSource,
        /// File to read (implies --source file)
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Replace registered aliases that have the same name
        #[arg(long)]
        overwrite: bool,
    },

    /// Write every registered alias into the shell startup file
    Apply,

    /// Remove the managed alias block from the shell startup file
    Unapply,

    /// Show the startup file alix writes to
    Target,

    /// Show statistics about your aliases
    Stats,

    /// Backup management
    Backup {
        #[command(subcommand)]
        backup_command: BackupCommands,
    },
}

#[derive(Args)]
pub struct AddArgs {
    /// Alias name
    pub name: String,
    /// Command the alias expands to
    pub command: String,
    /// Description shown by `list`
    #[arg(short, long)]
    pub description: Option<String>,
    /// Comma separated tags
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,
    /// Group name
    #[arg(short, long)]
    pub group: Option<String>,
    /// Only save the alias, leave the startup file alone
    #[arg(long)]
    pub no_apply: bool,
}

#[derive(Subcommand)]
pub enum BackupCommands {
    /// List backups
    List {
        #[arg(long, value_enum, default_value = "registry")]
        of: BackupScope,
    },
    /// Restore a backup
    Restore {
        /// Backup ID (or a unique part of it)
        id: String,
        #[arg(long, value_enum, default_value = "registry")]
        of: BackupScope,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete old backups
    Clean {
        /// Number of backups to keep
        #[arg(long, default_value = "20")]
        keep: usize,
        #[arg(long, value_enum, default_value = "registry")]
        of: BackupScope,
    },
}

/// Which backups a `backup` subcommand works on
#[derive(Clone, Copy, ValueEnum, PartialEq, Eq, Debug)]
pub enum BackupScope {
    /// Alias registry snapshots
    Registry,
    /// Copies of the shell startup file
    Shell,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq, Debug)]
pub enum ScanSource {
    /// Every standard startup file in the home directory
    System,
    /// Aliases defined in the running shell
    Active,
    /// A single file given with --file
    File,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ShellArg {
    Bash,
    Zsh,
    Fish,
    Sh,
}

impl From<ShellArg> for ShellType {
    fn from(arg: ShellArg) -> Self {
        match arg {
            ShellArg::Bash => ShellType::Bash,
            ShellArg::Zsh => ShellType::Zsh,
            ShellArg::Fish => ShellType::Fish,
            ShellArg::Sh => ShellType::Sh,
        }
    }
}
