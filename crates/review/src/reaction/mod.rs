mod query;
mod toggle;

pub use toggle::ToggleInput;

use std::ops::Deref;

/// Reactions on reviews, one row per viewer per review.
#[derive(Clone)]
pub struct Command {
    state: jointravel_shared::State,
}

impl Command {
    pub fn new(state: jointravel_shared::State) -> Self {
        Self { state }
    }
}

impl Deref for Command {
    type Target = jointravel_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}
