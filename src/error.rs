use thiserror::Error;

/// Failures reported by a mailbox backend.
///
/// Both variants are fatal for the session when they happen while connecting
/// or collecting. During deletion the session records them per message and
/// keeps going.
#[derive(Debug, Error)]
pub enum MailboxError {
    #[error("authentication rejected: {0}")]
    Authentication(String),

    #[error("connection error: {0}")]
    Connection(String),
}

impl MailboxError {
    pub fn connection(context: &str, err: impl std::fmt::Display) -> Self {
        MailboxError::Connection(format!("{}: {}", context, err))
    }
}

/// Errors raised while building or loading a rule set.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("empty {0} rule")]
    Empty(&'static str),

    #[error("unable to read rules file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed rules file {path}: {source}")]
    Format {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
