//! Deterministic per-logger gradient prefixes.
//!
//! Each logger identifier hashes to a pair of hues, rendered once into a CSS
//! gradient and memoized. [`Prefixer`] turns that gradient into a console
//! `%c` prefix and wraps host loggers so their children inherit it.

pub mod cache;
pub mod hue;
pub mod logger;
pub mod prefix;
pub mod settings;

pub use cache::{get_gradient, CacheStats, GradientCache};
pub use hue::{gradient_for, hue_hash, HuePair, Palette};
pub use logger::Logger;
pub use prefix::{augment, PrefixStyle, Prefixed, Prefixer};
