use anyhow::{anyhow, Context};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

static DEFAULT_FILTER: &str = "info";

/// Send diagnostics to `path`, appending to it.  The terminal belongs to the
/// calendar while it runs, so nothing is ever logged to stderr.
///
/// The filter comes from `RUST_LOG`; if that is unset or cannot be parsed,
/// `info` is used, and the rejected value is reported in the log itself.
pub(crate) fn init(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (env_filter, rejected) = filter_from(directives.as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging started");
    if let Some(reason) = rejected {
        tracing::warn!(%reason, default = DEFAULT_FILTER, "ignoring RUST_LOG");
    }
    Ok(())
}

// Returns the filter to install, plus why `directives` was rejected if it was
fn filter_from(directives: Option<&str>) -> (EnvFilter, Option<String>) {
    match directives {
        Some(d) => match EnvFilter::try_new(d) {
            Ok(filter) => (filter, None),
            Err(e) => (
                EnvFilter::new(DEFAULT_FILTER),
                Some(format!("invalid filter {d:?}: {e}")),
            ),
        },
        None => (EnvFilter::new(DEFAULT_FILTER), None),
    }
}
