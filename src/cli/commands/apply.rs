//! Apply and unapply command implementations

use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

/// Write every registered alias into the startup file
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let integrator = ctx.integrator()?;
    let report = integrator.apply_all(&ctx.registry)?;

    ctx.print_success(&report.to_string());
    if report.changed {
        ctx.print_reload_hint(&integrator);
    }

    Ok(())
}

/// Remove the managed block from the startup file
pub fn unapply(ctx: &CommandContext) -> Result<()> {
    let integrator = ctx.integrator()?;
    let target = integrator.get_target_file().display().to_string();

    if integrator.remove_block()? {
        ctx.print_success(&format!("Removed managed aliases from {}", target.cyan()));
        ctx.print_reload_hint(&integrator);
    } else {
        println!("{}", format!("No managed aliases in {}", target).dimmed());
    }

    Ok(())
}
