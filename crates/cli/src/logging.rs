//! Logging setup

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "metacog=info,metacog_core=info,metacog_infra_sqlite=warn";

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default filter. `format` is `json` for structured
/// output; anything else selects the compact human formatter.
pub fn init(format: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Failed to create env filter")?;

    match format {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .context("Failed to install JSON subscriber")?,
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init()
            .context("Failed to install subscriber")?,
    }

    Ok(())
}
