//! alix - Shell Alias Manager

use clap::Parser;
use colored::Colorize;

use alix::cli::{commands, Cli};

fn main() {
    let cli = Cli::parse();
    alix::logging::init_logging(cli.verbose);

    if let Err(e) = commands::execute(&cli) {
        eprintln!("{} {}", "✗".red(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".dimmed(), cause);
        }
        std::process::exit(1);
    }
}
