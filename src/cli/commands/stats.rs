//! Stats command implementation

use anyhow::Result;
use colored::Colorize;
use std::collections::BTreeMap;

use super::CommandContext;
use crate::model::Alias;

/// Keystrokes saved per invocation
fn chars_saved(alias: &Alias) -> i64 {
    alias.command().chars().count() as i64 - alias.name().chars().count() as i64
}

/// Execute the stats command
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let aliases = ctx.registry.list_all();

    if aliases.is_empty() {
        println!("{} Start with 'alix add'", "No aliases yet!".yellow());
        return Ok(());
    }

    let total = aliases.len();
    let saved: i64 = aliases.iter().map(|a| chars_saved(a)).sum();
    let avg_len =
        aliases.iter().map(|a| a.command().chars().count()).sum::<usize>() as f64 / total as f64;
    let most_used = aliases.iter().max_by_key(|a| a.used_count());
    let newest = aliases.iter().max_by_key(|a| a.created_at());

    let mut shells: BTreeMap<String, usize> = BTreeMap::new();
    for alias in &aliases {
        let shell = alias
            .shell
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unspecified".to_string());
        *shells.entry(shell).or_default() += 1;
    }

    let backups = ctx.registry.backups().list_backups()?.len();

    println!("{}", "Alias Statistics".bold().cyan());
    println!();
    println!("{:<24} {}", "Total aliases:".yellow(), total);
    println!("{:<24} ~{} keystrokes", "Characters saved:".yellow(), saved);
    println!("{:<24} {:.1} chars", "Average command length:".yellow(), avg_len);
    if let Some(alias) = most_used {
        println!(
            "{:<24} {} ({} times)",
            "Most used:".yellow(),
            alias.name().cyan(),
            alias.used_count()
        );
    }
    if let Some(alias) = newest {
        println!("{:<24} {}", "Newest:".yellow(), alias.name().cyan());
    }
    println!(
        "{:<24} {}",
        "Storage:".yellow(),
        ctx.registry.storage_path().display()
    );
    println!("{:<24} {} files", "Backups:".yellow(), backups);

    println!();
    println!("{}", "By shell:".bold());
    for (shell, count) in &shells {
        println!("  {:<12} {}", shell, count);
    }

    let mut savers = aliases.clone();
    savers.sort_by_key(|a| std::cmp::Reverse(chars_saved(a)));

    println!();
    println!("{}", "Top commands by length saved:".bold());
    for (i, alias) in savers.iter().take(5).enumerate() {
        println!(
            "  {}. {:<16} saves {} chars",
            i + 1,
            alias.name().cyan(),
            chars_saved(alias)
        );
    }

    Ok(())
}
