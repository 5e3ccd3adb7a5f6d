use std::path::Path;
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "formosan_core=info,formosan_cli=info";

/// Install the global subscriber.
///
/// Logs go to stderr. With the `trace` feature and a `log_dir`, spans and
/// events are written as JSON lines to `<log_dir>/formosan-trace.jsonl`
/// instead.
pub fn init_tracing(log_dir: Option<&Path>) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        #[cfg(feature = "trace")]
        {
            if let Some(dir) = log_dir {
                let file_appender = tracing_appender::rolling::never(dir, "formosan-trace.jsonl");
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file_appender)
                    .with_target(true)
                    .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
                    .with_env_filter(filter)
                    .init();
                return;
            }
        }
        #[cfg(not(feature = "trace"))]
        let _ = log_dir;

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(filter)
            .init();
    });
}
