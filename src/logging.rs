//! Terminal logging for the `alix` binary

use simplelog::{ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Level for a `--verbose` flag: warnings by default, everything down to debug when set
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Send `alix` log records to stderr. Calling it twice keeps the first logger.
pub fn init_logging(verbose: bool) {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .add_filter_allow_str("alix")
        .build();

    let term_logger = TermLogger::new(
        level_for(verbose),
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let _ = CombinedLogger::init(vec![term_logger]);
}
