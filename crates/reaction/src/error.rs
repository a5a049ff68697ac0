use crate::StoreError;

const NETWORK_MESSAGE: &str = "Unable to reach the server. Check your connection and try again.";
const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";
const SIGN_IN_MESSAGE: &str = "Please sign in to react to reviews.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReactionError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("subject is not mounted")]
    NotLoaded,

    #[error("a reaction is already pending for this subject")]
    InFlight,

    #[error("network unreachable")]
    NetworkUnreachable,

    #[error("{0}")]
    RemoteRejected(String),

    #[error("{0}")]
    Unknown(String),

    #[error("subject was unmounted before the store answered")]
    Detached,
}

impl ReactionError {
    /// Text shown next to the reaction control.
    pub fn user_message(&self) -> &str {
        match self {
            ReactionError::Unauthenticated => SIGN_IN_MESSAGE,
            ReactionError::NetworkUnreachable => NETWORK_MESSAGE,
            ReactionError::RemoteRejected(message) => message,
            _ => FALLBACK_MESSAGE,
        }
    }

    /// Errors that roll back an optimistic update and stay visible.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ReactionError::NetworkUnreachable
                | ReactionError::RemoteRejected(_)
                | ReactionError::Unknown(_)
        )
    }
}

impl From<StoreError> for ReactionError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Unreachable(_) => ReactionError::NetworkUnreachable,
            StoreError::Unauthorized => ReactionError::Unauthenticated,
            StoreError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => ReactionError::RemoteRejected(message),
            other => ReactionError::Unknown(other.to_string()),
        }
    }
}
