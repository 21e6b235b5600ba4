/// Result alias that carries the custom [`PortfolioError`] type.
pub type Result<T> = std::result::Result<T, PortfolioError>;

/// Common error type for the core crate.
///
/// The engine itself never fails at runtime; errors only surface at the edges
/// where configuration is loaded or documents are written.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    /// Free-form message, mostly raised by the command line front-end.
    #[error("{0}")]
    Message(String),
    /// A configuration value falls outside its accepted range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Configuration or snapshot (de)serialisation failed.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl PortfolioError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for PortfolioError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for PortfolioError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
