use async_trait::async_trait;
use jointravel_shared::reaction::{ReactionStatus, ReactionType};

use crate::SubjectId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("reaction store unreachable: {0}")]
    Unreachable(String),

    #[error("not signed in")]
    Unauthorized,

    #[error("reaction store rejected the request ({status})")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("invalid reaction store response: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

/// Remote side of the reaction toggle.
#[async_trait]
pub trait ReactionStore: Send + Sync {
    /// Current counts and the viewer's own reaction.
    async fn status(&self, subject: &SubjectId) -> Result<ReactionStatus, StoreError>;

    /// Toggle `requested` for the viewer and return the new authoritative status.
    async fn toggle(
        &self,
        subject: &SubjectId,
        requested: ReactionType,
    ) -> Result<ReactionStatus, StoreError>;
}
