//! Logging bootstrap shared by huelog binaries.

use anyhow::anyhow;
use huelog_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Build the event filter: `RUST_LOG` wins, otherwise the configured directive.
pub fn env_filter(settings: &TelemetrySettings) -> EnvFilter {
    resolve_filter(EnvFilter::try_from_default_env().ok(), settings)
}

/// Filter built from the configured directive alone.
pub fn configured_filter(settings: &TelemetrySettings) -> EnvFilter {
    EnvFilter::new(&settings.filter)
}

fn resolve_filter(from_env: Option<EnvFilter>, settings: &TelemetrySettings) -> EnvFilter {
    from_env.unwrap_or_else(|| configured_filter(settings))
}

/// Install the global tracing subscriber.
///
/// Events go to stderr so stdout stays free for command output.
/// Fails if a subscriber is already installed.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = env_filter(settings);
    let directive = filter.to_string();

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;

    tracing::debug!(
        target: "huelog-telemetry",
        format = ?settings.log_format,
        filter = %directive,
        "telemetry initialized"
    );
    Ok(())
}
