use anyhow::Context;
use clap::{Parser, Subcommand};
use huelog_kernel::settings::Settings;
use huelog_kernel::{hue_hash, GradientCache, Prefixer};
use serde::Serialize;
use serde_json::Value;

/// Inspect the hues, gradients, and prefixes huelog assigns to logger names.
#[derive(Debug, Parser)]
#[command(name = "huelog-cli", version, about)]
struct Cli {
    /// Emit diagnostic logs on stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the hue pair for an identifier.
    Hues { id: String },
    /// Print the gradient for an identifier using the configured palette.
    Gradient { id: String },
    /// Print the `[format, style, ...args]` prefix for a logger.
    Prefix {
        /// Logger name; falls back to the root name when omitted or empty.
        #[arg(long)]
        name: Option<String>,
        /// Override the configured root name.
        #[arg(long)]
        root_name: Option<String>,
        /// Trailing arguments, passed through as strings.
        args: Vec<String>,
    },
}

#[derive(Debug, Serialize)]
struct HuesOutput<'a> {
    id: &'a str,
    hue1: u16,
    hue2: u16,
}

#[derive(Debug, Serialize)]
struct GradientOutput<'a> {
    id: &'a str,
    gradient: &'a str,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load huelog settings")?;
    if cli.verbose {
        huelog_telemetry::init(&settings.telemetry)?;
    }

    let output = run(cli.command, settings)?;
    println!("{output}");
    Ok(())
}

fn run(command: Command, mut settings: Settings) -> anyhow::Result<String> {
    tracing::debug!(?command, "running command");

    let value = match command {
        Command::Hues { id } => {
            let pair = hue_hash(&id);
            serde_json::to_value(HuesOutput {
                id: &id,
                hue1: pair.hue1,
                hue2: pair.hue2,
            })?
        }
        Command::Gradient { id } => {
            let cache = GradientCache::new(settings.prefix.palette());
            let gradient = cache.get(&id);
            serde_json::to_value(GradientOutput {
                id: &id,
                gradient: &gradient,
            })?
        }
        Command::Prefix {
            name,
            root_name,
            args,
        } => {
            if let Some(root_name) = root_name {
                settings.prefix.root_name = root_name;
            }
            let prefixer = Prefixer::from_settings(&settings.prefix);
            Value::Array(prefixer.prefix(name.as_deref(), args))
        }
    };

    serde_json::to_string(&value).with_context(|| "failed to encode output")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run_json(command: Command) -> Value {
        let output = run(command, Settings::default()).unwrap();
        serde_json::from_str(&output).unwrap()
    }

    #[test]
    fn hues_for_empty_identifier() {
        let value = run_json(Command::Hues { id: String::new() });
        assert_eq!(value, json!({"id": "", "hue1": 0, "hue2": 60}));
    }

    #[test]
    fn gradient_uses_default_palette() {
        let value = run_json(Command::Gradient { id: "app".into() });
        assert_eq!(
            value["gradient"],
            "linear-gradient(90deg, oklch(0.6 0.2 53), oklch(0.6 0.2 113))"
        );
    }

    #[test]
    fn prefix_with_root_override() {
        let value = run_json(Command::Prefix {
            name: None,
            root_name: Some("svc".into()),
            args: vec!["hello".into()],
        });
        assert_eq!(value[0], "%csvc");
        assert_eq!(value[2], "hello");
    }

    #[test]
    fn parses_prefix_arguments() {
        let cli = Cli::try_parse_from(["huelog-cli", "prefix", "--name", "app", "a", "b"]).unwrap();
        match cli.command {
            Command::Prefix { name, args, .. } => {
                assert_eq!(name.as_deref(), Some("app"));
                assert_eq!(args, ["a", "b"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
