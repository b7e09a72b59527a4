use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Handle to the non-blocking log writers. Must be kept alive for the
/// lifetime of the process so the writers flush correctly.
pub struct LogGuards {
    _stdout: WorkerGuard,
    _file: WorkerGuard,
}

/// Initializes logging: stdout plus daily file rotation under the
/// configured directory. The `RUST_LOG` environment variable overrides the
/// default `info` filter.
pub fn init(cfg: &LoggingConfig) -> anyhow::Result<LogGuards> {
    std::fs::create_dir_all(&cfg.dir)?;
    let (stdout_nb, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let file_appender = tracing_appender::rolling::daily(&cfg.dir, &cfg.file_prefix);
    let (file_nb, file_guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(stdout_nb))
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_nb))
        .init();
    Ok(LogGuards { _stdout: stdout_guard, _file: file_guard })
}
