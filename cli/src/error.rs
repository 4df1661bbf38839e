//! Error types for sales-cli.
//!
//! Provides user-friendly error messages and context for common console
//! failures. Request errors keep their [`SalesLinkError`] classification so
//! the shell can react to 401s differently from everything else.

use sales_link::SalesLinkError;
use std::fmt;

/// Result type for console operations
pub type Result<T> = std::result::Result<T, CLIError>;

/// Errors that can occur in the console
#[derive(Debug)]
pub enum CLIError {
    /// Error from the sales-link library
    Link(SalesLinkError),

    /// Configuration file error
    Configuration(String),

    /// File I/O error
    File(String),

    /// Invalid command syntax
    Parse(String),

    /// User cancelled operation
    Cancelled,

    /// Readline error
    Readline(String),
}

impl fmt::Display for CLIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CLIError::Link(e) => write!(f, "{e}"),
            CLIError::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            CLIError::File(msg) => write!(f, "File error: {msg}"),
            CLIError::Parse(msg) => write!(f, "Parse error: {msg}"),
            CLIError::Cancelled => write!(f, "Operation cancelled"),
            CLIError::Readline(msg) => write!(f, "Readline error: {msg}"),
        }
    }
}

impl std::error::Error for CLIError {}

impl CLIError {
    /// Whether the underlying failure invalidates the current session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CLIError::Link(e) if e.is_unauthorized())
    }

    /// Message suitable for the notification channel
    pub fn user_message(&self) -> String {
        match self {
            CLIError::Link(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

impl From<SalesLinkError> for CLIError {
    fn from(err: SalesLinkError) -> Self {
        CLIError::Link(err)
    }
}

impl From<std::io::Error> for CLIError {
    fn from(err: std::io::Error) -> Self {
        CLIError::File(err.to_string())
    }
}

impl From<toml::de::Error> for CLIError {
    fn from(err: toml::de::Error) -> Self {
        CLIError::Configuration(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CLIError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CLIError::Readline(err.to_string())
    }
}

impl From<serde_json::Error> for CLIError {
    fn from(err: serde_json::Error) -> Self {
        CLIError::Parse(err.to_string())
    }
}
