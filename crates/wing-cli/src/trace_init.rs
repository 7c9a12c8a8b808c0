#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// Keeps the background log writer alive; drop it to flush.
#[cfg(feature = "trace")]
pub type TraceGuard = Option<tracing_appender::non_blocking::WorkerGuard>;
#[cfg(not(feature = "trace"))]
pub type TraceGuard = ();

/// Install a JSON-lines subscriber writing to `<log_dir>/wingtool-trace.jsonl`.
/// `RUST_LOG` overrides the default filter.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> TraceGuard {
    let mut worker = None;
    INIT.call_once(|| {
        let file_appender = tracing_appender::rolling::never(log_dir, "wingtool-trace.jsonl");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        worker = Some(guard);

        tracing_subscriber::fmt()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new("wing_core=debug,wing_cli=debug")
                }),
            )
            .init();
    });
    worker
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) -> TraceGuard {}
