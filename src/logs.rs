use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Send log records to stderr, keeping stdout for the run summary.
pub fn init() -> Result<(), log::SetLoggerError> {
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    TermLogger::init(
        LevelFilter::Info,
        config,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
}
