use lexis_config::log::{LogConfig, LogFormat};
use tracing_subscriber::EnvFilter;

/// JSON output wins when asked for explicitly or when stderr is not a terminal.
pub fn use_json(format: LogFormat, stderr_is_tty: bool) -> bool {
    match format {
        LogFormat::Json => true,
        LogFormat::Pretty => false,
        LogFormat::Auto => !stderr_is_tty,
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for markdown.
pub fn init(config: &LogConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|e| {
        eprintln!("Invalid log filter {:?} ({e}), falling back to info", config.filter);
        EnvFilter::new("info")
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if use_json(config.format, atty::is(atty::Stream::Stderr)) {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}
