use std::fmt;

use jointravel_shared::reaction::{ReactionStatus, ReactionType};

/// Opaque identifier of the thing being reacted to (a review).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SubjectId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The viewer's own reaction. Exactly one variant holds at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Reaction {
    #[default]
    None,
    Like,
    Dislike,
}

impl Reaction {
    pub fn as_type(self) -> Option<ReactionType> {
        match self {
            Reaction::None => None,
            Reaction::Like => Some(ReactionType::Like),
            Reaction::Dislike => Some(ReactionType::Dislike),
        }
    }
}

impl From<ReactionType> for Reaction {
    fn from(value: ReactionType) -> Self {
        match value {
            ReactionType::Like => Reaction::Like,
            ReactionType::Dislike => Reaction::Dislike,
        }
    }
}

impl From<Option<ReactionType>> for Reaction {
    fn from(value: Option<ReactionType>) -> Self {
        value.map(Reaction::from).unwrap_or_default()
    }
}

/// Counts handed down by the parent view when a subject is first shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReactionCounts {
    pub like_count: u32,
    pub dislike_count: u32,
}

impl ReactionCounts {
    pub fn new(like_count: u32, dislike_count: u32) -> Self {
        Self {
            like_count,
            dislike_count,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReactionState {
    pub subject_id: SubjectId,
    pub reaction_type: Reaction,
    pub like_count: u32,
    pub dislike_count: u32,
}

impl ReactionState {
    pub fn seeded(subject_id: SubjectId, counts: ReactionCounts) -> Self {
        Self {
            subject_id,
            reaction_type: Reaction::None,
            like_count: counts.like_count,
            dislike_count: counts.dislike_count,
        }
    }

    pub fn from_status(subject_id: SubjectId, status: ReactionStatus) -> Self {
        Self {
            subject_id,
            reaction_type: status.reaction_type.into(),
            like_count: status.like_count,
            dislike_count: status.dislike_count,
        }
    }

    pub fn status(&self) -> ReactionStatus {
        ReactionStatus {
            reaction_type: self.reaction_type.as_type(),
            like_count: self.like_count,
            dislike_count: self.dislike_count,
        }
    }

    pub fn counts(&self) -> ReactionCounts {
        ReactionCounts::new(self.like_count, self.dislike_count)
    }

    /// Next state after the viewer presses `requested`.
    ///
    /// Pressing the active reaction clears it, pressing the other one moves
    /// the viewer across, pressing anything from `None` adds it. Counts
    /// saturate at zero.
    pub fn apply(&self, requested: ReactionType) -> ReactionState {
        let mut next = self.clone();

        match self.reaction_type.as_type() {
            Some(current) if current == requested => {
                next.decrement(requested);
                next.reaction_type = Reaction::None;
            }
            Some(current) => {
                next.decrement(current);
                next.increment(requested);
                next.reaction_type = requested.into();
            }
            None => {
                next.increment(requested);
                next.reaction_type = requested.into();
            }
        }

        next
    }

    fn count_mut(&mut self, reaction_type: ReactionType) -> &mut u32 {
        match reaction_type {
            ReactionType::Like => &mut self.like_count,
            ReactionType::Dislike => &mut self.dislike_count,
        }
    }

    fn increment(&mut self, reaction_type: ReactionType) {
        let count = self.count_mut(reaction_type);
        *count = count.saturating_add(1);
    }

    fn decrement(&mut self, reaction_type: ReactionType) {
        let count = self.count_mut(reaction_type);
        *count = count.saturating_sub(1);
    }
}
