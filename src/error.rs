//! Error types and handling infrastructure for listprompt.
//!
//! Library operations return [`PromptError`] through the crate-wide [`Result`] alias.
//! Pluggable handlers are written against `anyhow` and their failures are carried in
//! [`PromptError::Handler`] so the caller of [`Prompt::run`](crate::Prompt::run) can report them.

use thiserror::Error;

/// The main error type for listprompt operations.
#[derive(Error, Debug)]
pub enum PromptError {
    /// Invalid construction arguments (non-positive visible size, bad options)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// An operation needed the active item but the filtered list is empty
    #[error("No item is selected")]
    SelectionUnavailable,

    /// Failure surfaced by a selection handler, key binding or key handler override
    #[error("Handler failed: {0}")]
    Handler(#[source] anyhow::Error),

    /// Terminal setup, drawing or teardown failed
    #[error("Terminal operation failed: {message}")]
    Terminal {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The key source failed or went away
    #[error("Input failed: {message}")]
    Input { message: String },
}

/// Standard Result type for listprompt operations.
pub type Result<T> = std::result::Result<T, PromptError>;

impl PromptError {
    /// Create a Configuration error with a descriptive message
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a Terminal error from an io::Error with additional context
    pub fn terminal(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Terminal {
            message: message.into(),
            source,
        }
    }

    /// Create an Input error with a descriptive message
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Convert a handler failure, keeping errors that already are `PromptError`s intact.
    pub fn from_handler(err: anyhow::Error) -> Self {
        match err.downcast::<PromptError>() {
            Ok(prompt_err) => prompt_err,
            Err(other) => Self::Handler(other),
        }
    }
}

impl From<std::io::Error> for PromptError {
    fn from(err: std::io::Error) -> Self {
        Self::Terminal {
            message: "IO operation failed".to_string(),
            source: err,
        }
    }
}
