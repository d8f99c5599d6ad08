use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Уровень по умолчанию; логи идут в stderr, stdout остаётся за результатами.
pub(crate) const DEFAULT_LOG_LEVEL: &str = "info";

pub(crate) fn log_level_from_env() -> String {
    log_level_from(|key| std::env::var(key).ok())
}

/// `LOG_LEVEL` важнее `RUST_LOG`; пустые значения пропускаются.
fn log_level_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    ["LOG_LEVEL", "RUST_LOG"]
        .into_iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

pub(crate) fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(())
}
