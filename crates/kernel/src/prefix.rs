use std::ops::Deref;
use std::sync::Arc;

use serde_json::Value;

use crate::cache::GradientCache;
use crate::logger::Logger;
use crate::settings::PrefixSettings;

/// Console format marker placed before the identifier.
const FORMAT_MARKER: &str = "%c";

/// Non-background styling applied to every prefix label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixStyle {
    pub text_color: String,
    pub font_weight: String,
    pub padding: String,
    pub border_radius: String,
}

impl PrefixStyle {
    /// Style declaration string with `gradient` as the background.
    pub fn declaration(&self, gradient: &str) -> String {
        format!(
            "background: {}; color: {}; font-weight: {}; padding: {}; border-radius: {};",
            gradient, self.text_color, self.font_weight, self.padding, self.border_radius
        )
    }
}

impl Default for PrefixStyle {
    fn default() -> Self {
        Self {
            text_color: "#fff".to_string(),
            font_weight: "bold".to_string(),
            padding: "2px 4px".to_string(),
            border_radius: "2px".to_string(),
        }
    }
}

/// Formatting service that builds gradient prefixes and augments loggers.
#[derive(Debug, Clone)]
pub struct Prefixer {
    root_name: String,
    cache: Arc<GradientCache>,
    style: PrefixStyle,
}

impl Prefixer {
    /// Prefixer backed by the process-wide gradient cache.
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            root_name: root_name.into(),
            cache: GradientCache::global(),
            style: PrefixStyle::default(),
        }
    }

    /// Prefixer with its own cache rendering the configured palette.
    pub fn from_settings(settings: &PrefixSettings) -> Self {
        Self {
            root_name: settings.root_name.clone(),
            cache: Arc::new(GradientCache::new(settings.palette())),
            style: settings.style(),
        }
    }

    pub fn with_cache(mut self, cache: Arc<GradientCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_style(mut self, style: PrefixStyle) -> Self {
        self.style = style;
        self
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn cache(&self) -> &Arc<GradientCache> {
        &self.cache
    }

    /// Logger name when present and non-empty, otherwise the root name.
    pub fn identifier<'a>(&'a self, logger_name: Option<&'a str>) -> &'a str {
        match logger_name {
            Some(name) if !name.is_empty() => name,
            _ => &self.root_name,
        }
    }

    /// Build `[format, style, ...args]` for a logger with `logger_name`.
    ///
    /// The gradient is looked up here, so nothing is hashed until a prefix
    /// is actually requested.
    pub fn prefix<I, T>(&self, logger_name: Option<&str>, args: I) -> Vec<Value>
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let id = self.identifier(logger_name);
        let gradient = self.cache.get(id);

        let mut parts = vec![
            Value::String(format!("{FORMAT_MARKER}{id}")),
            Value::String(self.style.declaration(&gradient)),
        ];
        parts.extend(args.into_iter().map(Into::into));
        parts
    }

    /// Wrap `logger` so it and every child it creates carry `prefix`.
    pub fn augment<L: Logger>(self: &Arc<Self>, logger: L) -> Prefixed<L> {
        Prefixed {
            inner: logger,
            prefixer: Arc::clone(self),
        }
    }
}

/// Augment `logger` using the process-wide cache and default style.
pub fn augment<L: Logger>(logger: L, root_name: impl Into<String>) -> Prefixed<L> {
    Arc::new(Prefixer::new(root_name)).augment(logger)
}

/// A host logger augmented with gradient prefixes.
///
/// Children created through [`Prefixed::get_logger`] are augmented with the
/// same [`Prefixer`], so the whole hierarchy shares one root name and cache.
#[derive(Debug, Clone)]
pub struct Prefixed<L> {
    inner: L,
    prefixer: Arc<Prefixer>,
}

impl<L: Logger> Prefixed<L> {
    /// Identifier shown in this logger's prefix.
    pub fn id(&self) -> &str {
        self.prefixer.identifier(self.inner.name())
    }

    /// `[format, style, ...args]` for this logger.
    pub fn prefix<I, T>(&self, args: I) -> Vec<Value>
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.prefixer.prefix(self.inner.name(), args)
    }

    /// Alias for [`Prefixed::prefix`].
    pub fn p<I, T>(&self, args: I) -> Vec<Value>
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.prefix(args)
    }

    /// Create a child through the host factory and augment it.
    ///
    /// Host factory errors are returned as-is.
    pub fn get_logger(&self, name: &str) -> Result<Prefixed<L>, L::Error> {
        let child = self.inner.get_logger(name)?;

        tracing::debug!(
            target: "huelog-kernel",
            parent = self.id(),
            child = name,
            "augmenting child logger"
        );

        Ok(self.prefixer.augment(child))
    }

    pub fn prefixer(&self) -> &Arc<Prefixer> {
        &self.prefixer
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    pub fn into_inner(self) -> L {
        self.inner
    }
}

impl<L> Deref for Prefixed<L> {
    type Target = L;

    fn deref(&self) -> &L {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hue::{gradient_for, Palette};
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Minimal host logger that records how often its factory runs.
    #[derive(Debug, Clone)]
    struct TestLogger {
        name: Option<String>,
        created: Rc<Cell<usize>>,
    }

    impl TestLogger {
        fn root(name: Option<&str>) -> Self {
            Self {
                name: name.map(str::to_string),
                created: Rc::new(Cell::new(0)),
            }
        }
    }

    impl Logger for TestLogger {
        type Error = String;

        fn name(&self) -> Option<&str> {
            self.name.as_deref()
        }

        fn get_logger(&self, name: &str) -> Result<Self, String> {
            if name == "forbidden" {
                return Err(format!("host refused '{name}'"));
            }
            self.created.set(self.created.get() + 1);
            Ok(Self {
                name: Some(name.to_string()),
                created: Rc::clone(&self.created),
            })
        }
    }

    fn isolated(root_name: &str) -> Arc<Prefixer> {
        Arc::new(Prefixer::new(root_name).with_cache(Arc::new(GradientCache::default())))
    }

    fn style_for(gradient: &str) -> String {
        format!(
            "background: {gradient}; color: #fff; font-weight: bold; padding: 2px 4px; border-radius: 2px;"
        )
    }

    #[test]
    fn prefix_for_named_logger() {
        let logger = isolated("root").augment(TestLogger::root(Some("app")));

        let parts = logger.prefix(["hello"]);

        assert_eq!(
            parts,
            vec![
                json!("%capp"),
                json!(style_for(&gradient_for(53, 113))),
                json!("hello"),
            ]
        );
    }

    #[test]
    fn alias_matches_prefix() {
        let logger = isolated("root").augment(TestLogger::root(Some("app")));
        assert_eq!(logger.p([1, 2]), logger.prefix([1, 2]));
    }

    #[test]
    fn trailing_args_are_kept_in_order() {
        let logger = isolated("root").augment(TestLogger::root(Some("app")));

        let parts = logger.prefix(vec![json!("a"), json!(2), json!({"k": true}), json!(null)]);

        assert_eq!(parts.len(), 6);
        assert_eq!(&parts[2..], &[json!("a"), json!(2), json!({"k": true}), json!(null)]);
    }

    #[test]
    fn no_args_yields_format_and_style_only() {
        let logger = isolated("root").augment(TestLogger::root(Some("app")));
        assert_eq!(logger.prefix(Vec::<Value>::new()).len(), 2);
    }

    #[test]
    fn missing_or_empty_name_falls_back_to_root() {
        let prefixer = isolated("root");

        for logger in [TestLogger::root(None), TestLogger::root(Some(""))] {
            let logger = prefixer.augment(logger);
            assert_eq!(logger.id(), "root");
            assert_eq!(
                logger.prefix(Vec::<Value>::new()),
                vec![json!("%croot"), json!(style_for(&gradient_for(9, 279)))]
            );
        }

        // Both unnamed loggers share one cache entry.
        assert_eq!(prefixer.cache().stats().entries, 1);
    }

    #[test]
    fn augmenting_does_not_touch_the_cache() {
        let prefixer = isolated("root");
        let logger = prefixer.augment(TestLogger::root(Some("app")));
        let _child = logger.get_logger("child").unwrap();

        assert_eq!(prefixer.cache().stats().misses, 0);

        logger.prefix(["x"]);
        assert_eq!(prefixer.cache().stats().misses, 1);
    }

    #[test]
    fn repeated_prefix_calls_hit_the_cache() {
        let prefixer = isolated("root");
        let logger = prefixer.augment(TestLogger::root(Some("app")));

        let first = logger.prefix(["x"]);
        let second = logger.prefix(["x"]);

        assert_eq!(first, second);
        let stats = prefixer.cache().stats();
        assert_eq!((stats.misses, stats.hits), (1, 1));
    }

    #[test]
    fn children_are_augmented_recursively() {
        let prefixer = isolated("root");
        let root = prefixer.augment(TestLogger::root(None));

        let child = root.get_logger("child").unwrap();
        let grandchild = child.get_logger("app:db").unwrap();

        assert_eq!(child.id(), "child");
        assert_eq!(child.prefix(["hi"])[0], json!("%cchild"));
        assert_eq!(
            grandchild.p(["deep"]),
            vec![
                json!("%capp:db"),
                json!(style_for(&gradient_for(118, 58))),
                json!("deep"),
            ]
        );
        assert!(Arc::ptr_eq(grandchild.prefixer(), &prefixer));
        assert_eq!(root.created.get(), 2);
    }

    #[test]
    fn host_factory_errors_pass_through() {
        let root = isolated("root").augment(TestLogger::root(Some("app")));
        let err = root.get_logger("forbidden").unwrap_err();
        assert_eq!(err, "host refused 'forbidden'");
    }

    #[test]
    fn host_logger_stays_reachable() {
        let logger = isolated("root").augment(TestLogger::root(Some("app")));
        assert_eq!(logger.name(), Some("app"));
        assert_eq!(logger.inner().name.as_deref(), Some("app"));
        assert_eq!(logger.into_inner().name.as_deref(), Some("app"));
    }

    #[test]
    fn settings_drive_palette_and_style() {
        let settings = PrefixSettings {
            root_name: "svc".to_string(),
            lightness: 0.7,
            text_color: "#000".to_string(),
            ..PrefixSettings::default()
        };
        let prefixer = Arc::new(Prefixer::from_settings(&settings));
        let logger = prefixer.augment(TestLogger::root(None));

        let palette = Palette {
            lightness: 0.7,
            ..Palette::default()
        };
        let gradient = palette.gradient(crate::hue::hue_hash("svc"));
        assert_eq!(
            logger.prefix(Vec::<Value>::new())[1],
            json!(format!(
                "background: {gradient}; color: #000; font-weight: bold; padding: 2px 4px; border-radius: 2px;"
            ))
        );
    }

    #[test]
    fn free_augment_uses_global_cache() {
        let logger = augment(TestLogger::root(Some("app")), "root");
        assert!(Arc::ptr_eq(logger.prefixer().cache(), &GradientCache::global()));
        assert_eq!(logger.prefixer().root_name(), "root");
    }
}
