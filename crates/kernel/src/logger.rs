/// Host logger contract consumed by the augmentor.
///
/// Implemented by whatever logging facade owns the loggers; huelog never
/// creates loggers itself except through [`Logger::get_logger`].
pub trait Logger: Sized {
    /// Failure produced by the host factory. Passed through unchanged.
    type Error;

    /// Configured name, if any. Empty names are treated as absent.
    fn name(&self) -> Option<&str>;

    /// Create a named child logger.
    fn get_logger(&self, name: &str) -> Result<Self, Self::Error>;
}
