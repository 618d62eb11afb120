use tracing_subscriber::EnvFilter;
use yomu_config::LogFormat;

/// Installs the global subscriber. Logs go to stderr so stdout stays free
/// for lookup output. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let json = match format {
        LogFormat::Json => true,
        LogFormat::Pretty => false,
        LogFormat::Auto => !atty::is(atty::Stream::Stderr),
    };

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
