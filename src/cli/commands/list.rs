//! List command implementation

use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

/// Get terminal width, defaulting to 80 if unable to detect
fn get_terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Truncate a string to fit within max_width, adding "..." if truncated
fn truncate_value(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        format!("{}...", s.chars().take(max_width - 3).collect::<String>())
    }
}

/// Execute the list command
pub fn execute(ctx: &CommandContext, group: Option<&str>) -> Result<()> {
    let mut aliases: Vec<_> = ctx
        .registry
        .list_all()
        .into_iter()
        .filter(|a| group.is_none() || a.group.as_deref() == group)
        .collect();

    if aliases.is_empty() {
        println!(
            "{} Add one with 'alix add' or import with 'alix scan'",
            "No aliases found.".yellow()
        );
        return Ok(());
    }

    aliases.sort_by(|a, b| a.name().cmp(b.name()));

    let name_w = aliases
        .iter()
        .map(|a| a.name().chars().count())
        .max()
        .unwrap_or(4)
        .clamp(4, 24);
    // name column, two separating spaces, rest for the command (and description)
    let rest_w = get_terminal_width().saturating_sub(name_w + 2).max(20);

    println!(
        "{}",
        format!("Your aliases ({} total)", aliases.len()).bold()
    );
    println!();
    println!(
        "{:<name_w$}  {}",
        "NAME".bold().cyan(),
        "COMMAND".bold().cyan(),
    );
    println!("{}", "─".repeat(name_w + 2 + rest_w.min(60)).dimmed());

    for alias in aliases {
        let name = truncate_value(alias.name(), name_w);
        let line = match (&alias.description, ctx.config.ui.show_descriptions) {
            (Some(desc), true) => {
                let command_w = rest_w * 2 / 3;
                let command = truncate_value(alias.command(), command_w);
                let desc = truncate_value(desc, rest_w.saturating_sub(command_w + 2).max(8));
                format!(
                    "{:<command_w$}  {}",
                    command.green(),
                    desc.dimmed()
                )
            }
            _ => truncate_value(alias.command(), rest_w).green().to_string(),
        };
        println!("{:<name_w$}  {}", name.white(), line);
    }

    Ok(())
}
