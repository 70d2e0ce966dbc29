//! Command execution context

use anyhow::Result;
use colored::Colorize;

use crate::cli::args::Cli;
use crate::integrator::Integrator;
use crate::model::{Config, ShellType};
use crate::registry::Registry;

/// Common context for command execution
pub struct CommandContext {
    pub config: Config,
    pub registry: Registry,
    /// Shell chosen with `--shell`; detected lazily otherwise
    pub shell: Option<ShellType>,
}

impl CommandContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load()?;
        let registry = Registry::from_config(&config);

        let ctx = Self {
            config,
            registry,
            shell: cli.shell.map(Into::into),
        };

        if let Some(warning) = ctx.registry.load_warning() {
            ctx.print_warning(warning);
        }

        Ok(ctx)
    }

    /// Integrator for the selected shell
    pub fn integrator(&self) -> Result<Integrator> {
        Ok(Integrator::from_config(&self.config, self.shell)?)
    }

    /// Print a success message
    pub fn print_success(&self, message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print a warning message
    pub fn print_warning(&self, message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Print reload hint after modifying the startup file
    pub fn print_reload_hint(&self, integrator: &Integrator) {
        let target = integrator.get_target_file().display();
        let reload_cmd = match integrator.shell() {
            ShellType::Sh => format!(". {}", target),
            _ => format!("source {}", target),
        };
        println!(
            "{} {}",
            "→".cyan(),
            format!("Run '{}' to use the changes in this session", reload_cmd).dimmed()
        );
    }
}
