use std::sync::Arc;

use anyhow::Context;
use huelog::settings::Settings;
use huelog::{Prefixer, PrefixedLog, TracingLogger};

fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load huelog settings")?;
    huelog_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        root_name = %settings.prefix.root_name,
        "huelog demo starting"
    );

    let prefixer = Arc::new(Prefixer::from_settings(&settings.prefix));
    let root = prefixer.augment(TracingLogger::root());
    let app = root
        .get_logger("app")
        .with_context(|| "failed to create 'app' logger")?;
    let db = app
        .get_logger("app:db")
        .with_context(|| "failed to create 'app:db' logger")?;

    root.info(["bootstrap complete"]);
    app.info(["serving", "requests"]);
    db.warn(["slow query", "320ms"]);

    tracing::info!(stats = ?prefixer.cache().stats(), "huelog demo complete");
    Ok(())
}
