use thiserror::Error;

/// Failures of explicit user commands. "No results" is never an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScholarhubError {
    #[error("announcement not found: {0}")]
    UnknownAnnouncement(String),
    #[error("conversation not found: {0}")]
    UnknownConversation(String),
    #[error("no conversation is open")]
    NoConversationOpen,
    #[error("no thread is open")]
    NoThreadOpen,
    #[error("thread {0} is locked")]
    ThreadLocked(String),
    #[error("{0} may not be empty")]
    EmptyBody(&'static str),
    #[error("unknown {kind} '{value}'")]
    UnknownOption { kind: &'static str, value: String },
}

impl ScholarhubError {
    pub(crate) fn unknown_option(kind: &'static str, value: &str) -> Self {
        ScholarhubError::UnknownOption {
            kind,
            value: value.to_string(),
        }
    }
}
