use std::path::Path;

use fern::Dispatch;
use log::LevelFilter;

/// # map a `LOGGING_LEVEL` value to a level filter
/// unknown values default to info.
pub fn parse_level(verbosity: &str) -> LevelFilter {
    match verbosity.to_uppercase().as_str() {
        "OFF" => LevelFilter::Off,
        "ERROR" => LevelFilter::Error,
        "WARN" => LevelFilter::Warn,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// # setup logging
/// every record goes to `log_file` and to stdout.
///
/// ## Arguments
/// * `level` - the most verbose level that is still logged
/// * `log_file` - file the records are appended to
pub fn setup_logging(level: LevelFilter, log_file: &Path) -> Result<(), fern::InitError> {
    let base_config = Dispatch::new()
        .level(level)
        // rocket is chatty on info
        .level_for("rocket", LevelFilter::Warn)
        .level_for("_", LevelFilter::Warn);

    let formatted_config = Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .chain(fern::log_file(log_file)?)
        .chain(std::io::stdout());

    base_config
        .chain(formatted_config)
        .apply()?;

    Ok(())
}
