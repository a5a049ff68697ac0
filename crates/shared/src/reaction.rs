//! Wire shapes exchanged with the reaction store.
//!
//! ```json
//! GET  /reviews/{id}/reactions  -> {"reactionType":"like","likeCount":4,"dislikeCount":1}
//! POST /reviews/{id}/reactions  <- {"type":"dislike"}
//! error                         -> {"message":"..."}
//! ```

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    EnumString,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReactionType {
    Like,
    Dislike,
}

impl ReactionType {
    pub fn opposite(self) -> Self {
        match self {
            ReactionType::Like => ReactionType::Dislike,
            ReactionType::Dislike => ReactionType::Like,
        }
    }
}

/// Authoritative reaction state of one review as seen by one viewer.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReactionStatus {
    pub reaction_type: Option<ReactionType>,
    pub like_count: u32,
    pub dislike_count: u32,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleRequest {
    #[serde(rename = "type")]
    pub reaction_type: ReactionType,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}
