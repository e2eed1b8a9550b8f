// Error types for sda

use thiserror::Error;

/// Result type alias for sda operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when driving page objects
#[derive(Debug, Error)]
pub enum Error {
    /// Could not open a session with the WebDriver endpoint
    ///
    /// Common causes: geckodriver/chromedriver not running, wrong port,
    /// or capabilities the endpoint rejects.
    #[error("Failed to connect to WebDriver at '{url}': {message}")]
    ConnectionFailed { url: String, message: String },

    /// Any driver-side failure that has no more specific variant
    #[error("Driver error: {0}")]
    Driver(String),

    /// The driver rejected the selector expression
    ///
    /// Element lookups treat this as "no match" rather than surfacing it.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// The element exists but cannot receive the interaction
    ///
    /// Covers both "not interactable" and "click intercepted" responses.
    #[error("Element not interactable: {0}")]
    NotInteractable(String),

    /// A node handle outlived the DOM node it pointed to
    #[error("Stale element: {0}")]
    StaleElement(String),

    /// Element not found by locator
    ///
    /// Includes the locator expression (or field name) that was searched for.
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A bounded wait expired
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Assertion timeout (expect API)
    #[error("Assertion timeout: {0}")]
    AssertionTimeout(String),

    /// Invalid argument provided to method
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }

    /// True for errors a click retry after scrolling can recover from
    pub fn is_not_interactable(&self) -> bool {
        match self {
            Error::NotInteractable(_) => true,
            Error::Context(_, inner) => inner.is_not_interactable(),
            _ => false,
        }
    }

    /// True when the driver refused the selector itself
    pub fn is_invalid_selector(&self) -> bool {
        match self {
            Error::InvalidSelector(_) => true,
            Error::Context(_, inner) => inner.is_invalid_selector(),
            _ => false,
        }
    }
}
