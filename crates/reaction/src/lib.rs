//! Optimistic like/dislike reactions on reviews.
//!
//! [`ReactionController`] owns the displayed [`ReactionState`] of every
//! mounted subject. A toggle is applied locally first, then confirmed by a
//! [`ReactionStore`]; the store's answer replaces the local guess, a failure
//! restores the exact snapshot taken before the toggle.

mod client;
mod controller;
mod error;
mod machine;
mod observer;
mod session;
mod store;

pub use client::{ClientConfig, HttpReactionStore};
pub use controller::{PendingToggle, ReactionController, ReactionView};
pub use error::ReactionError;
pub use jointravel_shared::reaction::{ReactionStatus, ReactionType};
pub use machine::{Reaction, ReactionCounts, ReactionState, SubjectId};
pub use observer::{ReactionObserver, SubscriptionId};
pub use session::Session;
pub use store::{ReactionStore, StoreError};
