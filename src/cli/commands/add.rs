//! Add command implementation

use anyhow::{Context as _, Result};
use colored::Colorize;

use super::CommandContext;
use crate::cli::args::AddArgs;
use crate::error::AliasError;
use crate::model::Alias;

/// Execute the add command
pub fn execute(ctx: &mut CommandContext, args: &AddArgs) -> Result<()> {
    let mut alias = Alias::new(&args.name, &args.command)?
        .with_description(args.description.clone().unwrap_or_default())
        .with_tags(args.tags.clone());
    if let Some(group) = &args.group {
        alias = alias.with_group(group);
    }

    if !ctx.registry.add(alias.clone())? {
        return Err(AliasError::Duplicate(args.name.clone()).into());
    }

    ctx.print_success(&format!(
        "Added alias: {} = '{}'",
        alias.name().cyan(),
        alias.command()
    ));

    if args.no_apply || !ctx.config.integration.auto_apply {
        println!("{}", "Run 'alix apply' to write it to your shell".dimmed());
        return Ok(());
    }

    let integrator = ctx
        .integrator()
        .context("Alias saved but not applied; run 'alix apply' to retry")?;
    let report = integrator
        .apply_single_alias(&alias)
        .context("Alias saved but not applied; run 'alix apply' to retry")?;

    ctx.print_success(&report.to_string());
    if report.changed {
        ctx.print_reload_hint(&integrator);
    }

    Ok(())
}
