//! Target command implementation

use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

/// Print the startup file alix manages and what its block holds
pub fn execute(ctx: &CommandContext) -> Result<()> {
    let integrator = ctx.integrator()?;
    let target = integrator.get_target_file();

    println!("{}", target.display());

    if !target.exists() {
        println!("{}", "(not created yet)".dimmed());
        return Ok(());
    }

    match integrator.managed_aliases() {
        Ok(managed) if managed.is_empty() => {
            println!("{}", "No managed aliases yet".dimmed());
        }
        Ok(managed) => {
            println!(
                "{}",
                format!(
                    "{} managed aliases ({} shell)",
                    managed.len(),
                    integrator.shell()
                )
                .dimmed()
            );
        }
        Err(e) => ctx.print_warning(&e.to_string()),
    }

    Ok(())
}
