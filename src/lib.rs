//! huelog application library
//!
//! Re-exports the kernel and provides a `tracing`-backed host logger that can
//! be augmented with gradient prefixes.

pub mod loggers;
pub mod utils;

/// Re-export commonly used types
pub use huelog_kernel::*;
pub use loggers::{PrefixedLog, TracingLogger};
