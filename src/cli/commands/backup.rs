//! Backup command implementation

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;
use std::path::PathBuf;

use super::CommandContext;
use crate::backup::BackupManager;
use crate::cli::args::{BackupCommands, BackupScope};
use crate::integrator::Integrator;

/// Execute the backup command
pub fn execute(ctx: &CommandContext, backup_cmd: &BackupCommands) -> Result<()> {
    match backup_cmd {
        BackupCommands::List { of } => list_backups(&resolve(ctx, *of)?.0),
        BackupCommands::Restore { id, of, yes } => {
            let (manager, target, integrator) = resolve(ctx, *of)?;
            restore_backup(ctx, &manager, id, &target, *yes)?;
            if let Some(integrator) = integrator {
                ctx.print_reload_hint(&integrator);
            }
            Ok(())
        }
        BackupCommands::Clean { keep, of } => clean_backups(&resolve(ctx, *of)?.0, *keep),
    }
}

/// Backup manager and restore target for a scope
fn resolve(
    ctx: &CommandContext,
    scope: BackupScope,
) -> Result<(BackupManager, PathBuf, Option<Integrator>)> {
    match scope {
        BackupScope::Registry => Ok((
            ctx.registry.backups().clone(),
            ctx.registry.storage_path().to_path_buf(),
            None,
        )),
        BackupScope::Shell => {
            let integrator = ctx.integrator()?;
            let manager = integrator
                .backups()
                .cloned()
                .unwrap_or_else(|| BackupManager::for_shell(integrator.shell(), &ctx.config));
            let target = integrator.get_target_file().to_path_buf();
            Ok((manager, target, Some(integrator)))
        }
    }
}

fn list_backups(manager: &BackupManager) -> Result<()> {
    let backups = manager.list_backups()?;

    if backups.is_empty() {
        println!("{}", "No backups found.".dimmed());
        return Ok(());
    }

    println!("{}", "Available backups:".bold());
    println!();

    println!(
        "{:<44} {:<28} {}",
        "ID".bold().cyan(),
        "TIMESTAMP".bold().cyan(),
        "SIZE".bold().cyan()
    );
    println!("{}", "─".repeat(84).dimmed());

    for backup in &backups {
        println!(
            "{:<44} {:<28} {}",
            backup.id.white(),
            backup.timestamp.dimmed(),
            format_size(backup.size).dimmed()
        );
    }

    println!();
    println!("{}", format!("Total: {} backup(s)", backups.len()).dimmed());

    Ok(())
}

fn restore_backup(
    ctx: &CommandContext,
    manager: &BackupManager,
    id: &str,
    target: &std::path::Path,
    yes: bool,
) -> Result<()> {
    let Some(backup) = manager.get_backup(id)? else {
        anyhow::bail!("Backup not found: {}", id);
    };

    println!(
        "Restoring backup: {} ({})",
        backup.id.cyan(),
        backup.timestamp.dimmed()
    );

    if !yes
        && !Confirm::new()
            .with_prompt(format!("This will overwrite {}. Continue?", target.display()))
            .default(false)
            .interact()?
    {
        println!("Cancelled.");
        return Ok(());
    }

    manager.restore_backup(&backup.id, target)?;

    ctx.print_success(&format!(
        "Restored backup to {}",
        target.display().to_string().cyan()
    ));

    Ok(())
}

fn clean_backups(manager: &BackupManager, keep: usize) -> Result<()> {
    let removed = manager.cleanup_keep(keep)?;

    if removed == 0 {
        println!("{}", "No old backups to clean.".dimmed());
    } else {
        println!(
            "{} Removed {} old backup(s), keeping {}",
            "✓".green(),
            removed,
            keep
        );
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
