use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::Layer;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the log filter, e.g. `GITACTIVITY_LOG=debug`.
pub const LOG_ENV: &str = "GITACTIVITY_LOG";

/// Install the global subscriber.
///
/// Log lines go to stderr through the indicatif writer so they are printed
/// above the `fetch` spinners instead of through them; stdout carries only
/// command output. The filter applies to log lines only, so spinner spans
/// stay visible at the default `warn` level.
pub fn setup_logger() {
    let indicatif_layer = IndicatifLayer::new();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let fmt = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(indicatif_layer.get_stderr_writer())
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(fmt)
        .with(indicatif_layer)
        .init();
}
