use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;
use thiserror::Error;

use crate::hue::Palette;
use crate::prefix::PrefixStyle;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "HUELOG_ENV";
const CONFIG_DIR_ENV: &str = "HUELOG_CONFIG_DIR";
const MAX_CHROMA: f32 = 0.4;

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

/// Rejected configuration values.
#[derive(Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("prefix.lightness must be within 0..=1, got {0}")]
    Lightness(f32),

    #[error("prefix.chroma must be within 0..=0.4, got {0}")]
    Chroma(f32),

    #[error("prefix.angle must be below 360, got {0}")]
    Angle(u16),

    #[error("prefix.text_color must not be empty")]
    EmptyTextColor,
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub prefix: PrefixSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, and environment overlay.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .map(|cwd| cwd.join("config"))
                .with_context(|| "unable to resolve current directory")?,
        };

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix("HUELOG")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        // Override environment field with parsed enum variant.
        settings.environment = match environment.as_str() {
            "local" => Environment::Local,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(anyhow!(
                    "unsupported environment '{}'; expected local/staging/production",
                    other
                ));
            }
        };

        settings
            .validate()
            .with_context(|| "invalid configuration")?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.prefix.validate()
    }
}

/// Identifier fallback and gradient styling.
#[derive(Debug, Clone, Deserialize)]
pub struct PrefixSettings {
    #[serde(default = "PrefixSettings::default_root_name")]
    pub root_name: String,
    #[serde(default = "PrefixSettings::default_lightness")]
    pub lightness: f32,
    #[serde(default = "PrefixSettings::default_chroma")]
    pub chroma: f32,
    #[serde(default = "PrefixSettings::default_angle")]
    pub angle: u16,
    #[serde(default = "PrefixSettings::default_text_color")]
    pub text_color: String,
}

impl PrefixSettings {
    fn default_root_name() -> String {
        "root".to_string()
    }

    fn default_lightness() -> f32 {
        Palette::default().lightness
    }

    fn default_chroma() -> f32 {
        Palette::default().chroma
    }

    fn default_angle() -> u16 {
        Palette::default().angle
    }

    fn default_text_color() -> String {
        PrefixStyle::default().text_color
    }

    pub fn palette(&self) -> Palette {
        Palette {
            lightness: self.lightness,
            chroma: self.chroma,
            angle: self.angle,
        }
    }

    pub fn style(&self) -> PrefixStyle {
        PrefixStyle {
            text_color: self.text_color.clone(),
            ..PrefixStyle::default()
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if !(0.0..=1.0).contains(&self.lightness) {
            return Err(SettingsError::Lightness(self.lightness));
        }
        if !(0.0..=MAX_CHROMA).contains(&self.chroma) {
            return Err(SettingsError::Chroma(self.chroma));
        }
        if self.angle >= 360 {
            return Err(SettingsError::Angle(self.angle));
        }
        if self.text_color.trim().is_empty() {
            return Err(SettingsError::EmptyTextColor);
        }
        Ok(())
    }
}

impl Default for PrefixSettings {
    fn default() -> Self {
        Self {
            root_name: Self::default_root_name(),
            lightness: Self::default_lightness(),
            chroma: Self::default_chroma(),
            angle: Self::default_angle(),
            text_color: Self::default_text_color(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
    #[serde(default = "TelemetrySettings::default_filter")]
    pub filter: String,
}

impl TelemetrySettings {
    fn default_filter() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            filter: Self::default_filter(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_prefix_matches_builtin_palette() {
        let settings = Settings::default();
        assert_eq!(settings.prefix.root_name, "root");
        assert_eq!(settings.prefix.palette(), Palette::default());
        assert_eq!(settings.prefix.style(), PrefixStyle::default());
    }

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let mut prefix = PrefixSettings {
            lightness: 1.5,
            ..PrefixSettings::default()
        };
        assert_eq!(prefix.validate(), Err(SettingsError::Lightness(1.5)));

        prefix.lightness = 0.6;
        prefix.chroma = -0.1;
        assert_eq!(prefix.validate(), Err(SettingsError::Chroma(-0.1)));

        prefix.chroma = 0.2;
        prefix.angle = 360;
        assert_eq!(prefix.validate(), Err(SettingsError::Angle(360)));

        prefix.angle = 90;
        prefix.text_color = " ".to_string();
        assert_eq!(prefix.validate(), Err(SettingsError::EmptyTextColor));
    }

    #[test]
    fn partial_prefix_table_keeps_defaults() {
        let settings: Settings = serde_json::from_value(serde_json::json!({
            "prefix": { "root_name": "app" },
            "telemetry": { "log_format": "json" }
        }))
        .unwrap();

        assert_eq!(settings.prefix.root_name, "app");
        assert_eq!(settings.prefix.lightness, 0.6);
        assert_eq!(settings.telemetry.log_format, LogFormat::Json);
        assert_eq!(settings.telemetry.filter, "info");
    }
}
