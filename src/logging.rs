//! log4rs setup.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::error::Error;
use std::path::Path;

/// Level for the fallback config, from the number of `-v` flags.
pub fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Use `log_config` when it exists and no `-v` was given, otherwise log to
/// stderr at `level_for(verbose)`.
///
/// Logs go to stderr so the summary on stdout stays machine readable.
pub fn init_logging(log_config: &Path, verbose: u8) -> Result<(), Box<dyn Error>> {
    if verbose == 0 && log_config.exists() {
        log4rs::init_file(log_config, Default::default())?;
        log::debug!("Logging configured from {}", log_config.display());
        return Ok(());
    }

    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l:<5})} {t} - {m}{n}",
        )))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level_for(verbose)))?;
    log4rs::init_config(config)?;
    Ok(())
}
