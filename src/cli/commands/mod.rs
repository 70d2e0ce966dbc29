//! CLI command implementations

pub mod add;
pub mod apply;
pub mod backup;
pub mod list;
pub mod remove;
pub mod scan;
pub mod stats;
pub mod target;

use anyhow::Result;

pub use super::context::CommandContext;
use crate::cli::args::{Cli, Commands};

/// Run the parsed command line
pub fn execute(cli: &Cli) -> Result<()> {
    let mut ctx = CommandContext::from_cli(cli)?;

    match &cli.command {
        Commands::Add(args) => add::execute(&mut ctx, args),
        Commands::Remove { name, yes } => remove::execute(&mut ctx, name, *yes),
        Commands::List { group } => list::execute(&ctx, group.as_deref()),
        Commands::Scan {
            source,
            file,
            overwrite,
        } => scan::execute(&mut ctx, *source, file.as_deref(), *overwrite),
        Commands::Apply => apply::execute(&ctx),
        Commands::Unapply => apply::unapply(&ctx),
        Commands::Target => target::execute(&ctx),
        Commands::Stats => stats::execute(&ctx),
        Commands::Backup { backup_command } => backup::execute(&ctx, backup_command),
    }
}
