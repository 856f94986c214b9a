pub mod config;
pub use self::config::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{Layer, Registry};

/// Directives from `level_filter_env` when that variable is set, otherwise from `level_filter`.
fn build_filter(level_filter_env: &str, max_level: &LoggingLevel, level_filter: &str) -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(max_level.clone().into());
    if !level_filter_env.is_empty() && std::env::var(level_filter_env).is_ok() {
        return builder.with_env_var(level_filter_env).from_env_lossy();
    }
    builder.parse_lossy(level_filter)
}

pub fn initialize_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    if !config.enable {
        return Ok(());
    }
    let filter = build_filter(&config.level_filter_env, &config.max_level, &config.level_filter);
    let console = {
        let config = &config.console;
        if config.enable {
            let enable_debug_logging = config.enable_debug_logging;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_file(enable_debug_logging)
                    .with_line_number(enable_debug_logging)
                    .with_thread_ids(enable_debug_logging)
                    .with_target(enable_debug_logging)
                    .with_filter(build_filter(
                        &config.level_filter_env,
                        &config.max_level,
                        &config.level_filter,
                    )),
            )
        } else {
            None
        }
    };
    let file = {
        let config = &config.file;
        if config.enable {
            let enable_debug_logging = config.enable_debug_logging;
            let file_appender = RollingFileAppender::new(
                config.rolling_time.clone().into(),
                &config.path,
                &config.prefix,
            );
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(file_appender)
                    .with_file(enable_debug_logging)
                    .with_line_number(enable_debug_logging)
                    .with_thread_ids(enable_debug_logging)
                    .with_target(enable_debug_logging)
                    .with_filter(build_filter(
                        &config.level_filter_env,
                        &config.max_level,
                        &config.level_filter,
                    )),
            )
        } else {
            None
        }
    };
    Registry::default()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()?;
    Ok(())
}
