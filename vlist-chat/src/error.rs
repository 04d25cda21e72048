use std::fmt;

/// Errors from loading or saving chat sessions.
#[derive(Debug)]
pub enum StoreError {
    /// The key-value backend failed.
    Backend(String),
    /// Stored data is not a valid session list.
    Decode(serde_json::Error),
    Encode(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend(msg) => write!(f, "session backend error: {msg}"),
            Self::Decode(err) => write!(f, "stored sessions are corrupt: {err}"),
            Self::Encode(err) => write!(f, "failed to encode sessions: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend(_) => None,
            Self::Decode(err) | Self::Encode(err) => Some(err),
        }
    }
}

/// Errors from a [`crate::CompletionService`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionError {
    /// The request could not be sent or the stream broke off.
    Transport(String),
    /// The service rejected the request.
    Rejected { status: u16, message: String },
    Cancelled,
    /// The user message was empty or whitespace; nothing was sent.
    BlankPrompt,
}

impl fmt::Display for CompletionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "completion transport error: {msg}"),
            Self::Rejected { status, message } => {
                write!(f, "completion rejected ({status}): {message}")
            }
            Self::Cancelled => f.write_str("completion cancelled"),
            Self::BlankPrompt => f.write_str("message is blank"),
        }
    }
}

impl std::error::Error for CompletionError {}
