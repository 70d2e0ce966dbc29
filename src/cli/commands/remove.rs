//! Remove command implementation

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

use super::CommandContext;
use crate::error::AliasError;

/// Execute the remove command
pub fn execute(ctx: &mut CommandContext, name: &str, yes: bool) -> Result<()> {
    let Some(alias) = ctx.registry.lookup(name) else {
        return Err(AliasError::NotFound(name.to_string()).into());
    };

    println!("Found alias {} = '{}'", name.cyan(), alias.command().dimmed());

    if ctx.config.ui.confirm_delete
        && !yes
        && !Confirm::new()
            .with_prompt("Remove this alias?")
            .default(false)
            .interact()?
    {
        println!("Cancelled.");
        return Ok(());
    }

    ctx.registry.remove(name)?;
    ctx.print_success(&format!("Removed alias '{}'", name));
    println!(
        "{}",
        "Run 'alix apply' to drop it from your shell startup file".dimmed()
    );

    Ok(())
}
