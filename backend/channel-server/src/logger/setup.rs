//! Subscriber setup for the console logger.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::config::{Log, LogFormat};

/// Install the global tracing subscriber. The returned guard must be held
/// for the lifetime of the process so buffered log lines are flushed.
pub fn setup(
    config: &Log,
    service_name: &'static str,
    crates_to_filter: impl IntoIterator<Item = &'static str>,
) -> WorkerGuard {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());

    let console_layer = config.console.enabled.then(|| {
        let filter = build_env_filter(
            config.console.level.into_level(),
            config.console.filtering_directive.as_deref(),
            crates_to_filter,
        );
        match config.console.log_format {
            LogFormat::Default => fmt::layer()
                .with_writer(non_blocking)
                .pretty()
                .with_filter(filter)
                .boxed(),
            LogFormat::Json => fmt::layer()
                .with_writer(non_blocking)
                .json()
                .with_filter(filter)
                .boxed(),
        }
    });

    tracing_subscriber::registry().with(console_layer).init();

    tracing::info!(service = service_name, "logger initialized");

    guard
}

#[allow(clippy::expect_used)]
fn build_env_filter(
    level: tracing::Level,
    filtering_directive: Option<&str>,
    crates_to_filter: impl IntoIterator<Item = &'static str>,
) -> EnvFilter {
    match filtering_directive {
        Some(directive) => EnvFilter::new(directive),
        None => {
            // Everything else stays at warn; the listed crates log at the
            // configured level.
            let mut filter = EnvFilter::new("warn");
            for crate_name in crates_to_filter {
                filter = filter.add_directive(
                    format!("{crate_name}={level}")
                        .parse()
                        .expect("invalid log filtering directive"),
                );
            }
            filter
        }
    }
}
