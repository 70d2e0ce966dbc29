//! Scan command implementation

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::CommandContext;
use crate::cli::args::ScanSource;
use crate::model::Alias;
use crate::registry::ConflictStrategy;
use crate::scanner::Scanner;
use crate::utils::shell_detect::get_shell_type;

/// Execute the scan command
pub fn execute(
    ctx: &mut CommandContext,
    source: ScanSource,
    file: Option<&Path>,
    overwrite: bool,
) -> Result<()> {
    let scanner = Scanner::new();

    let aliases: Vec<Alias> = match (source, file) {
        (_, Some(path)) => {
            let aliases = scanner.scan_file(path)?;
            println!(
                "{}",
                format!("Found {} aliases in {}", aliases.len(), path.display()).cyan()
            );
            aliases
        }
        (ScanSource::File, None) => anyhow::bail!("--source file needs --file <PATH>"),
        (ScanSource::Active, None) => {
            let shell = get_shell_type(ctx.shell)?;
            let aliases = scanner.active_aliases_for(shell)?;
            println!(
                "{}",
                format!("Found {} active {} aliases", aliases.len(), shell).cyan()
            );
            aliases
        }
        (ScanSource::System, None) => {
            let results = scanner.scan_system();
            let mut aliases = Vec::new();
            for (source, found) in results {
                println!("{}", format!("  {}: {} aliases", source, found.len()).dimmed());
                aliases.extend(found);
            }
            println!(
                "{}",
                format!("Found {} total aliases in system files", aliases.len()).cyan()
            );
            aliases
        }
    };

    if aliases.is_empty() {
        println!("{}", "No aliases found to import".yellow());
        return Ok(());
    }

    let strategy = if overwrite {
        ConflictStrategy::Overwrite
    } else {
        ConflictStrategy::Skip
    };
    let summary = ctx.registry.import(aliases, strategy)?;

    println!();
    ctx.print_success(&summary.to_string());
    if summary.changed() {
        println!(
            "{}",
            "Run 'alix apply' to add these to your shell config".dimmed()
        );
    }

    Ok(())
}
