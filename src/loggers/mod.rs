//! Host logger adapter that emits through `tracing`.

use std::convert::Infallible;

use huelog_kernel::{Logger, Prefixed};
use serde_json::Value;
use tracing::Level;

use crate::utils::plain_line;

/// Named logger whose output goes to the installed tracing subscriber.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TracingLogger {
    name: Option<String>,
}

impl TracingLogger {
    /// Unnamed root logger; prefixes fall back to the root name.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

impl Logger for TracingLogger {
    type Error = Infallible;

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn get_logger(&self, name: &str) -> Result<Self, Infallible> {
        Ok(Self::named(name))
    }
}

/// Level helpers for augmented tracing loggers.
pub trait PrefixedLog {
    /// Prefix `args` and emit one event at `level`. Returns the emitted line.
    fn log<I, T>(&self, level: Level, args: I) -> String
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>;

    fn error<I: IntoIterator<Item = T>, T: Into<Value>>(&self, args: I) -> String {
        self.log(Level::ERROR, args)
    }

    fn warn<I: IntoIterator<Item = T>, T: Into<Value>>(&self, args: I) -> String {
        self.log(Level::WARN, args)
    }

    fn info<I: IntoIterator<Item = T>, T: Into<Value>>(&self, args: I) -> String {
        self.log(Level::INFO, args)
    }

    fn debug<I: IntoIterator<Item = T>, T: Into<Value>>(&self, args: I) -> String {
        self.log(Level::DEBUG, args)
    }
}

impl PrefixedLog for Prefixed<TracingLogger> {
    fn log<I, T>(&self, level: Level, args: I) -> String
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let line = plain_line(&self.prefix(args));
        let logger = self.id();

        match level {
            Level::ERROR => tracing::error!(logger = logger, "{line}"),
            Level::WARN => tracing::warn!(logger = logger, "{line}"),
            Level::INFO => tracing::info!(logger = logger, "{line}"),
            Level::DEBUG => tracing::debug!(logger = logger, "{line}"),
            _ => tracing::trace!(logger = logger, "{line}"),
        }
        line
    }
}
